// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the API boundary.
//!
//! Requests carry raw primitives (dates as ISO 8601 strings, statuses as
//! their string representations); handlers parse and validate them into
//! domain types so malformed input surfaces as `InvalidInput` rather
//! than a panic or a silent default.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use lawn_bid_domain::{Bid, CompletionConfirmation, Posting, Review};
use lawn_bid_events::TransitionEvent;

/// Date wire format (ISO 8601 calendar date).
const DATE_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    time::macros::format_description!("[year]-[month]-[day]");

/// Parses an ISO 8601 date from a request field.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` naming the field if the value is not
/// a valid date.
pub fn parse_request_date(field: &str, value: &str) -> Result<time::Date, ApiError> {
    time::Date::parse(value, DATE_FORMAT).map_err(|e| ApiError::InvalidInput {
        field: field.to_string(),
        message: format!("Failed to parse date '{value}': {e}"),
    })
}

/// Formats a date for a response field.
fn format_response_date(date: time::Date) -> Result<String, ApiError> {
    date.format(DATE_FORMAT).map_err(|e| ApiError::Internal {
        message: format!("Failed to format date: {e}"),
    })
}

/// Request to register a marketplace party.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegisterPartyRequest {
    /// The party kind: `"homeowner"` or `"companyowner"`.
    pub kind: String,
    /// The display name (homeowner name or company name).
    pub name: String,
    /// The party's postal code.
    pub postal_code: String,
}

/// Response for a successful party registration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RegisterPartyResponse {
    /// The canonical ID assigned to the party.
    pub party_id: i64,
    /// The registered party kind.
    pub kind: String,
    /// A success message.
    pub message: String,
}

/// Request to create a job posting.
///
/// The posting homeowner is the authenticated actor, not a request field.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreatePostingRequest {
    /// A short title for the job.
    pub title: String,
    /// A free-text description of the work.
    pub description: String,
    /// The job site's postal code.
    pub postal_code: String,
    /// Ordered image URLs attached to the posting.
    pub images: Vec<String>,
    /// The estimated start date (ISO 8601).
    pub estimated_start_date: String,
}

/// Response for a successful posting creation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CreatePostingResponse {
    /// The canonical ID assigned to the posting.
    pub posting_id: i64,
    /// The posting's status (`"open"`).
    pub status: String,
    /// A success message.
    pub message: String,
}

/// Request to submit a bid against an open posting.
///
/// The bidder is the authenticated actor, not a request field.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubmitBidRequest {
    /// The posting to bid on.
    pub posting_id: i64,
    /// The proposed price in cents.
    pub amount_cents: i64,
    /// A free-text description of the proposal.
    pub description: String,
    /// The proposed start date (ISO 8601).
    pub proposed_date: String,
}

/// Response for a successful bid submission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SubmitBidResponse {
    /// The canonical ID assigned to the bid.
    pub bid_id: i64,
    /// The posting the bid references.
    pub posting_id: i64,
    /// The bid's status (`"pending"`).
    pub status: String,
    /// A success message.
    pub message: String,
}

/// Request to accept a pending bid.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AcceptBidRequest {
    /// The bid to accept.
    pub bid_id: i64,
}

/// Response for a successful bid acceptance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AcceptBidResponse {
    /// The posting that moved to in-progress.
    pub posting_id: i64,
    /// The accepted bid.
    pub accepted_bid_id: i64,
    /// Sibling bids rejected by this acceptance.
    pub rejected_bid_ids: Vec<i64>,
    /// A success message.
    pub message: String,
}

/// Request for the accepted bidder to confirm completion.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConfirmCompletionRequest {
    /// The posting being confirmed.
    pub posting_id: i64,
}

/// Response for a successful completion confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConfirmCompletionResponse {
    /// The confirmed posting.
    pub posting_id: i64,
    /// The confirming company owner.
    pub company_owner_id: i64,
    /// True if the confirmation was already present (no change).
    pub already_confirmed: bool,
    /// A success message.
    pub message: String,
}

/// Request to close a confirmed job.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CloseJobRequest {
    /// The posting to close.
    pub posting_id: i64,
    /// The accepted (winning) bid.
    pub winning_bid_id: i64,
}

/// Response for a successful job close.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CloseJobResponse {
    /// The completed posting.
    pub posting_id: i64,
    /// The completed winning bid.
    pub winning_bid_id: i64,
    /// A success message.
    pub message: String,
}

/// Request to submit a review of the company owner after completion.
///
/// The reviewing homeowner is the authenticated actor.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubmitReviewRequest {
    /// The completed posting the review is about.
    pub posting_id: i64,
    /// The rating, 1–5.
    pub rating: i64,
    /// An optional short title.
    pub title: Option<String>,
    /// Optional free-text review body.
    pub body: Option<String>,
}

/// Response for a successful review submission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SubmitReviewResponse {
    /// The canonical ID assigned to the review.
    pub review_id: i64,
    /// The reviewed posting.
    pub posting_id: i64,
    /// The submitted rating.
    pub rating: u8,
    /// A success message.
    pub message: String,
}

/// Request for the open-postings listing a company owner browses.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListOpenPostingsRequest {
    /// The browsing company owner; postings they already bid on are omitted.
    pub bidder_id: i64,
    /// Optional search radius in kilometers. Requires a center.
    pub radius_km: Option<f64>,
    /// Optional search center latitude in degrees.
    pub center_latitude_deg: Option<f64>,
    /// Optional search center longitude in degrees.
    pub center_longitude_deg: Option<f64>,
}

/// Request for a company owner's bid listing.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListBidsForUserRequest {
    /// The company owner whose bids to list.
    pub bidder_id: i64,
    /// Bid statuses to include, as status strings. Empty matches nothing.
    pub statuses: Vec<String>,
}

/// Request for a homeowner's postings-with-bids listing.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListPostingsWithBidsRequest {
    /// The homeowner whose postings to list.
    pub homeowner_id: i64,
    /// Posting statuses to include, as status strings. Empty matches nothing.
    pub statuses: Vec<String>,
}

/// A posting projected for API responses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PostingInfo {
    /// The posting's canonical ID.
    pub posting_id: i64,
    /// The posting homeowner.
    pub homeowner_id: i64,
    /// The posting title.
    pub title: String,
    /// The posting description.
    pub description: String,
    /// The job site's postal code.
    pub postal_code: String,
    /// Ordered image URLs.
    pub images: Vec<String>,
    /// The estimated start date (ISO 8601).
    pub estimated_start_date: String,
    /// The posting's status string.
    pub status: String,
    /// The posting's current aggregate version.
    pub version: i64,
}

impl PostingInfo {
    /// Projects a domain posting into its response form.
    ///
    /// # Errors
    ///
    /// Returns an error if the posting has no canonical ID or its date
    /// cannot be formatted.
    pub fn from_posting(posting: &Posting) -> Result<Self, ApiError> {
        let posting_id: i64 = posting.posting_id().ok_or_else(|| ApiError::Internal {
            message: String::from("posting has no canonical ID"),
        })?;
        Ok(Self {
            posting_id,
            homeowner_id: posting.homeowner_id,
            title: posting.title.clone(),
            description: posting.description.clone(),
            postal_code: posting.postal_code.value().to_string(),
            images: posting.images.clone(),
            estimated_start_date: format_response_date(posting.estimated_start_date)?,
            status: posting.status.as_str().to_string(),
            version: posting.version,
        })
    }
}

/// A bid projected for API responses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BidInfo {
    /// The bid's canonical ID.
    pub bid_id: i64,
    /// The posting the bid references.
    pub posting_id: i64,
    /// The bidding company owner.
    pub bidder_id: i64,
    /// The proposed price in cents.
    pub amount_cents: i64,
    /// The proposal description.
    pub description: String,
    /// The proposed start date (ISO 8601).
    pub proposed_date: String,
    /// The bid's status string.
    pub status: String,
}

impl BidInfo {
    /// Projects a domain bid into its response form.
    ///
    /// # Errors
    ///
    /// Returns an error if the bid has no canonical ID or its date cannot
    /// be formatted.
    pub fn from_bid(bid: &Bid) -> Result<Self, ApiError> {
        let bid_id: i64 = bid.bid_id().ok_or_else(|| ApiError::Internal {
            message: String::from("bid has no canonical ID"),
        })?;
        Ok(Self {
            bid_id,
            posting_id: bid.posting_id,
            bidder_id: bid.bidder_id,
            amount_cents: bid.amount.cents(),
            description: bid.description.clone(),
            proposed_date: format_response_date(bid.proposed_date)?,
            status: bid.status.as_str().to_string(),
        })
    }
}

/// A completion confirmation projected for API responses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConfirmationInfo {
    /// The confirmed posting.
    pub posting_id: i64,
    /// The confirming company owner.
    pub company_owner_id: i64,
    /// Whether completion is confirmed.
    pub confirmed: bool,
}

impl ConfirmationInfo {
    /// Projects a domain confirmation into its response form.
    #[must_use]
    pub const fn from_confirmation(confirmation: &CompletionConfirmation) -> Self {
        Self {
            posting_id: confirmation.posting_id,
            company_owner_id: confirmation.company_owner_id,
            confirmed: confirmation.confirmed,
        }
    }
}

/// A review projected for API responses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReviewInfo {
    /// The review's canonical ID.
    pub review_id: i64,
    /// The reviewed posting.
    pub posting_id: i64,
    /// The reviewing homeowner.
    pub homeowner_id: i64,
    /// The reviewed company owner.
    pub company_owner_id: i64,
    /// The rating, 1–5.
    pub rating: u8,
    /// The optional review title.
    pub title: Option<String>,
    /// The optional review body.
    pub body: Option<String>,
}

impl ReviewInfo {
    /// Projects a domain review into its response form.
    ///
    /// # Errors
    ///
    /// Returns an error if the review has no canonical ID.
    pub fn from_review(review: &Review) -> Result<Self, ApiError> {
        let review_id: i64 = review.review_id().ok_or_else(|| ApiError::Internal {
            message: String::from("review has no canonical ID"),
        })?;
        Ok(Self {
            review_id,
            posting_id: review.posting_id,
            homeowner_id: review.homeowner_id,
            company_owner_id: review.company_owner_id,
            rating: review.rating.value(),
            title: review.title.clone(),
            body: review.body.clone(),
        })
    }
}

/// The full posting aggregate projected for a detail view.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PostingDetailResponse {
    /// The posting itself.
    pub posting: PostingInfo,
    /// All bids referencing the posting, oldest first.
    pub bids: Vec<BidInfo>,
    /// Completion confirmations recorded for the posting.
    pub confirmations: Vec<ConfirmationInfo>,
    /// Reviews written about the posting.
    pub reviews: Vec<ReviewInfo>,
    /// True if the homeowner's close action would currently succeed.
    pub ready_to_close: bool,
}

/// A posting joined with its bids for homeowner listings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PostingWithBidsInfo {
    /// The posting itself.
    pub posting: PostingInfo,
    /// All bids referencing the posting, oldest first.
    pub bids: Vec<BidInfo>,
}

/// Response for the open-postings listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ListOpenPostingsResponse {
    /// Matching postings, newest first.
    pub postings: Vec<PostingInfo>,
}

/// Response for a company owner's bid listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ListBidsResponse {
    /// Matching bids, newest first.
    pub bids: Vec<BidInfo>,
}

/// Response for a homeowner's postings-with-bids listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ListPostingsWithBidsResponse {
    /// Matching postings with their bids, newest first.
    pub postings: Vec<PostingWithBidsInfo>,
}

/// Response for a company owner's review summary.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CompanyReviewsResponse {
    /// The reviewed company owner.
    pub company_owner_id: i64,
    /// All reviews about the company owner, newest first.
    pub reviews: Vec<ReviewInfo>,
    /// The mean rating, absent when there are no reviews.
    pub average_rating: Option<f64>,
}

/// A transition event projected for API responses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EventInfo {
    /// The event kind string.
    pub kind: String,
    /// The posting the event applies to.
    pub posting_id: Option<i64>,
    /// The bid the event applies to, if any.
    pub bid_id: Option<i64>,
    /// The review the event created, if any.
    pub review_id: Option<i64>,
    /// The acting party's identifier.
    pub actor_id: String,
    /// The acting party's type.
    pub actor_type: String,
    /// The cause identifier (e.g., request ID).
    pub cause_id: String,
    /// Optional human-readable details.
    pub details: Option<String>,
}

impl EventInfo {
    /// Projects a transition event into its response form.
    #[must_use]
    pub fn from_event(event: &TransitionEvent) -> Self {
        Self {
            kind: event.action.kind.as_str().to_string(),
            posting_id: event.scope.posting_id,
            bid_id: event.scope.bid_id,
            review_id: event.scope.review_id,
            actor_id: event.actor.id.clone(),
            actor_type: event.actor.actor_type.clone(),
            cause_id: event.cause.id.clone(),
            details: event.action.details.clone(),
        }
    }
}

/// Response for a posting's transition event timeline.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TimelineResponse {
    /// The posting whose timeline this is.
    pub posting_id: i64,
    /// The posting's transition events in commit order.
    pub events: Vec<EventInfo>,
}
