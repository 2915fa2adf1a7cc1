// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::bid_status::BidStatus;
use crate::error::DomainError;
use crate::job_status::JobStatus;
use serde::{Deserialize, Serialize};

/// Represents a postal code.
///
/// Postal codes are normalized to uppercase with surrounding whitespace
/// removed so that lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostalCode {
    /// The normalized postal code value.
    value: String,
}

impl PostalCode {
    /// Creates a new `PostalCode`.
    ///
    /// # Arguments
    ///
    /// * `value` - The postal code value (will be trimmed and uppercased)
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_uppercase(),
        }
    }

    /// Returns the postal code value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// A bid amount in cents.
///
/// Amounts are stored as integer cents to avoid floating point drift.
/// An amount must be strictly positive; zero and negative amounts are
/// rejected at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BidAmount {
    /// The amount in cents.
    cents: i64,
}

impl BidAmount {
    /// Creates a new `BidAmount`.
    ///
    /// # Arguments
    ///
    /// * `cents` - The amount in cents
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBidAmount` if the amount is not
    /// strictly positive.
    pub const fn new(cents: i64) -> Result<Self, DomainError> {
        if cents <= 0 {
            return Err(DomainError::InvalidBidAmount { cents });
        }
        Ok(Self { cents })
    }

    /// Returns the amount in cents.
    #[must_use]
    pub const fn cents(&self) -> i64 {
        self.cents
    }
}

/// A review rating, bounded to the inclusive range 1–5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Rating {
    /// The rating value.
    value: u8,
}

impl Rating {
    /// Creates a new `Rating`.
    ///
    /// # Arguments
    ///
    /// * `value` - The rating value
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRating` if the value is outside 1–5.
    pub fn new(value: i64) -> Result<Self, DomainError> {
        match u8::try_from(value) {
            Ok(v) if (1..=5).contains(&v) => Ok(Self { value: v }),
            _ => Err(DomainError::InvalidRating { rating: value }),
        }
    }

    /// Returns the rating value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.value
    }
}

/// A homeowner: posts jobs, accepts bids, closes jobs, writes reviews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Homeowner {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the homeowner has not been persisted yet.
    homeowner_id: Option<i64>,
    /// The homeowner's display name.
    pub name: String,
    /// The homeowner's postal code.
    pub postal_code: PostalCode,
}

impl Homeowner {
    /// Creates a new `Homeowner` without a persisted ID.
    #[must_use]
    pub const fn new(name: String, postal_code: PostalCode) -> Self {
        Self {
            homeowner_id: None,
            name,
            postal_code,
        }
    }

    /// Creates a `Homeowner` with an existing persisted ID.
    #[must_use]
    pub const fn with_id(homeowner_id: i64, name: String, postal_code: PostalCode) -> Self {
        Self {
            homeowner_id: Some(homeowner_id),
            name,
            postal_code,
        }
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn homeowner_id(&self) -> Option<i64> {
        self.homeowner_id
    }
}

/// A company owner: browses open postings, bids, performs and confirms work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyOwner {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the company owner has not been persisted yet.
    company_owner_id: Option<i64>,
    /// The company's display name.
    pub company_name: String,
    /// The company's postal code.
    pub postal_code: PostalCode,
}

impl CompanyOwner {
    /// Creates a new `CompanyOwner` without a persisted ID.
    #[must_use]
    pub const fn new(company_name: String, postal_code: PostalCode) -> Self {
        Self {
            company_owner_id: None,
            company_name,
            postal_code,
        }
    }

    /// Creates a `CompanyOwner` with an existing persisted ID.
    #[must_use]
    pub const fn with_id(
        company_owner_id: i64,
        company_name: String,
        postal_code: PostalCode,
    ) -> Self {
        Self {
            company_owner_id: Some(company_owner_id),
            company_name,
            postal_code,
        }
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn company_owner_id(&self) -> Option<i64> {
        self.company_owner_id
    }
}

/// A marketplace participant.
///
/// Homeowners and company owners share nothing beyond an identity, so the
/// two are modeled as a tagged union rather than a generic parameter;
/// consuming code branches exhaustively on the variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Party {
    /// A homeowner.
    Homeowner(Homeowner),
    /// A company owner.
    CompanyOwner(CompanyOwner),
}

impl Party {
    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn id(&self) -> Option<i64> {
        match self {
            Self::Homeowner(h) => h.homeowner_id(),
            Self::CompanyOwner(c) => c.company_owner_id(),
        }
    }

    /// Returns the string representation of the party kind.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn kind_str(&self) -> &'static str {
        match self {
            Self::Homeowner(_) => "homeowner",
            Self::CompanyOwner(_) => "companyowner",
        }
    }
}

/// A homeowner's job posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the posting has not been persisted yet.
    posting_id: Option<i64>,
    /// The homeowner who created the posting.
    pub homeowner_id: i64,
    /// A short title for the job.
    pub title: String,
    /// A free-text description of the work.
    pub description: String,
    /// The job site's postal code.
    pub postal_code: PostalCode,
    /// Ordered image URLs attached to the posting.
    pub images: Vec<String>,
    /// The homeowner's estimated start date.
    pub estimated_start_date: time::Date,
    /// The posting's lifecycle status.
    pub status: JobStatus,
    /// Optimistic concurrency token. Bumped by the persistence layer on
    /// every committed transition of the posting aggregate.
    pub version: i64,
}

impl Posting {
    /// Creates a new `Posting` with status `Open` and no persisted ID.
    ///
    /// # Arguments
    ///
    /// * `homeowner_id` - The posting homeowner
    /// * `title` - A short title for the job
    /// * `description` - A free-text description of the work
    /// * `postal_code` - The job site's postal code
    /// * `images` - Ordered image URLs
    /// * `estimated_start_date` - The homeowner's estimated start date
    #[must_use]
    pub const fn new(
        homeowner_id: i64,
        title: String,
        description: String,
        postal_code: PostalCode,
        images: Vec<String>,
        estimated_start_date: time::Date,
    ) -> Self {
        Self {
            posting_id: None,
            homeowner_id,
            title,
            description,
            postal_code,
            images,
            estimated_start_date,
            status: JobStatus::Open,
            version: 0,
        }
    }

    /// Creates a `Posting` with an existing persisted ID.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn with_id(
        posting_id: i64,
        homeowner_id: i64,
        title: String,
        description: String,
        postal_code: PostalCode,
        images: Vec<String>,
        estimated_start_date: time::Date,
        status: JobStatus,
        version: i64,
    ) -> Self {
        Self {
            posting_id: Some(posting_id),
            homeowner_id,
            title,
            description,
            postal_code,
            images,
            estimated_start_date,
            status,
            version,
        }
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn posting_id(&self) -> Option<i64> {
        self.posting_id
    }
}

/// A company owner's priced proposal against a posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the bid has not been persisted yet.
    bid_id: Option<i64>,
    /// The posting this bid is for.
    pub posting_id: i64,
    /// The company owner who submitted the bid.
    pub bidder_id: i64,
    /// The proposed price.
    pub amount: BidAmount,
    /// A free-text description of the proposal.
    pub description: String,
    /// The date the bidder proposes to start.
    pub proposed_date: time::Date,
    /// The bid's lifecycle status.
    pub status: BidStatus,
}

impl Bid {
    /// Creates a new `Bid` with status `Pending` and no persisted ID.
    #[must_use]
    pub const fn new(
        posting_id: i64,
        bidder_id: i64,
        amount: BidAmount,
        description: String,
        proposed_date: time::Date,
    ) -> Self {
        Self {
            bid_id: None,
            posting_id,
            bidder_id,
            amount,
            description,
            proposed_date,
            status: BidStatus::Pending,
        }
    }

    /// Creates a `Bid` with an existing persisted ID.
    #[must_use]
    pub const fn with_id(
        bid_id: i64,
        posting_id: i64,
        bidder_id: i64,
        amount: BidAmount,
        description: String,
        proposed_date: time::Date,
        status: BidStatus,
    ) -> Self {
        Self {
            bid_id: Some(bid_id),
            posting_id,
            bidder_id,
            amount,
            description,
            proposed_date,
            status,
        }
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn bid_id(&self) -> Option<i64> {
        self.bid_id
    }
}

/// A homeowner's review of a company owner after a completed job.
///
/// Reviews are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the review has not been persisted yet.
    review_id: Option<i64>,
    /// The completed posting the review is about.
    pub posting_id: i64,
    /// The reviewing homeowner.
    pub homeowner_id: i64,
    /// The reviewed company owner.
    pub company_owner_id: i64,
    /// The rating, 1–5.
    pub rating: Rating,
    /// An optional short title.
    pub title: Option<String>,
    /// Optional free-text review body.
    pub body: Option<String>,
}

impl Review {
    /// Creates a new `Review` without a persisted ID.
    #[must_use]
    pub const fn new(
        posting_id: i64,
        homeowner_id: i64,
        company_owner_id: i64,
        rating: Rating,
        title: Option<String>,
        body: Option<String>,
    ) -> Self {
        Self {
            review_id: None,
            posting_id,
            homeowner_id,
            company_owner_id,
            rating,
            title,
            body,
        }
    }

    /// Creates a `Review` with an existing persisted ID.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn with_id(
        review_id: i64,
        posting_id: i64,
        homeowner_id: i64,
        company_owner_id: i64,
        rating: Rating,
        title: Option<String>,
        body: Option<String>,
    ) -> Self {
        Self {
            review_id: Some(review_id),
            posting_id,
            homeowner_id,
            company_owner_id,
            rating,
            title,
            body,
        }
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn review_id(&self) -> Option<i64> {
        self.review_id
    }
}

/// A company owner's attestation that a posting's work is done.
///
/// The confirmation gates the homeowner's close action; setting it again
/// is an idempotent no-op, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionConfirmation {
    /// The posting the confirmation is for.
    pub posting_id: i64,
    /// The confirming company owner.
    pub company_owner_id: i64,
    /// Whether completion has been confirmed.
    pub confirmed: bool,
}

impl CompletionConfirmation {
    /// Creates a new `CompletionConfirmation`.
    #[must_use]
    pub const fn new(posting_id: i64, company_owner_id: i64, confirmed: bool) -> Self {
        Self {
            posting_id,
            company_owner_id,
            confirmed,
        }
    }
}
