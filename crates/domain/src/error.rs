// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Posting title is empty or invalid.
    InvalidTitle(String),
    /// Posting or bid description is empty or invalid.
    InvalidDescription(String),
    /// Postal code is empty or invalid.
    InvalidPostalCode(String),
    /// An image URL in a posting's image list is empty or invalid.
    InvalidImageUrl {
        /// The zero-based position of the offending image.
        position: usize,
    },
    /// Bid amount must be strictly positive.
    InvalidBidAmount {
        /// The invalid amount in cents.
        cents: i64,
    },
    /// Review rating must be between 1 and 5.
    InvalidRating {
        /// The invalid rating value.
        rating: i64,
    },
    /// Party name is empty or invalid.
    InvalidPartyName(String),
    /// Job status string is not a valid status.
    InvalidJobStatus {
        /// The unrecognized status string.
        status: String,
    },
    /// Bid status string is not a valid status.
    InvalidBidStatus {
        /// The unrecognized status string.
        status: String,
    },
    /// Event kind string is not a valid kind.
    InvalidEventKind {
        /// The unrecognized event kind string.
        kind: String,
    },
    /// A status transition is not permitted by the lifecycle rules.
    InvalidStatusTransition {
        /// The status transitioned from.
        from: String,
        /// The status transitioned to.
        to: String,
        /// Why the transition is not permitted.
        reason: String,
    },
    /// Posting does not exist.
    PostingNotFound(i64),
    /// Bid does not exist.
    BidNotFound(i64),
    /// Party (homeowner or company owner) does not exist.
    PartyNotFound(i64),
    /// Operation requires the posting to be open for bidding.
    PostingNotOpen {
        /// The posting identifier.
        posting_id: i64,
        /// The posting's actual status.
        status: String,
    },
    /// Operation requires the posting to be in progress.
    PostingNotInProgress {
        /// The posting identifier.
        posting_id: i64,
        /// The posting's actual status.
        status: String,
    },
    /// Operation requires the posting to be completed.
    PostingNotCompleted {
        /// The posting identifier.
        posting_id: i64,
        /// The posting's actual status.
        status: String,
    },
    /// Operation requires the bid to be pending.
    BidNotPending {
        /// The bid identifier.
        bid_id: i64,
        /// The bid's actual status.
        status: String,
    },
    /// A bid references a posting other than the one being operated on.
    BidPostingMismatch {
        /// The bid identifier.
        bid_id: i64,
        /// The posting the bid actually references.
        expected_posting_id: i64,
    },
    /// The posting has no accepted bid.
    NoAcceptedBid {
        /// The posting identifier.
        posting_id: i64,
    },
    /// The given bid is not the posting's accepted (winning) bid.
    WinningBidMismatch {
        /// The posting identifier.
        posting_id: i64,
        /// The bid that was supplied.
        bid_id: i64,
    },
    /// More than one bid on the posting holds accepted status.
    MultipleAcceptedBids {
        /// The posting identifier.
        posting_id: i64,
    },
    /// The acting company owner is not the bidder of the accepted bid.
    NotWinningBidder {
        /// The posting identifier.
        posting_id: i64,
        /// The company owner who attempted the action.
        company_owner_id: i64,
    },
    /// The acting homeowner does not own the posting.
    NotPostingOwner {
        /// The posting identifier.
        posting_id: i64,
        /// The homeowner who attempted the action.
        homeowner_id: i64,
    },
    /// The accepted bid's company owner has not confirmed completion.
    CompletionNotConfirmed {
        /// The posting identifier.
        posting_id: i64,
        /// The company owner whose confirmation is missing.
        company_owner_id: i64,
    },
    /// A review already exists for this (posting, homeowner) pair.
    DuplicateReview {
        /// The posting identifier.
        posting_id: i64,
        /// The homeowner identifier.
        homeowner_id: i64,
    },
    /// Latitude or longitude is outside the valid range.
    InvalidCoordinate {
        /// Latitude in degrees.
        latitude_deg: f64,
        /// Longitude in degrees.
        longitude_deg: f64,
    },
    /// Search radius must be strictly positive.
    InvalidRadius {
        /// The invalid radius in kilometers.
        radius_km: f64,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTitle(msg) => write!(f, "Invalid title: {msg}"),
            Self::InvalidDescription(msg) => write!(f, "Invalid description: {msg}"),
            Self::InvalidPostalCode(msg) => write!(f, "Invalid postal code: {msg}"),
            Self::InvalidImageUrl { position } => {
                write!(f, "Invalid image URL at position {position}")
            }
            Self::InvalidBidAmount { cents } => {
                write!(f, "Invalid bid amount: {cents} cents. Must be greater than 0")
            }
            Self::InvalidRating { rating } => {
                write!(f, "Invalid rating: {rating}. Must be between 1 and 5")
            }
            Self::InvalidPartyName(msg) => write!(f, "Invalid party name: {msg}"),
            Self::InvalidJobStatus { status } => {
                write!(f, "Invalid job status: '{status}'")
            }
            Self::InvalidBidStatus { status } => {
                write!(f, "Invalid bid status: '{status}'")
            }
            Self::InvalidEventKind { kind } => {
                write!(f, "Invalid event kind: '{kind}'")
            }
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Invalid status transition from '{from}' to '{to}': {reason}")
            }
            Self::PostingNotFound(id) => write!(f, "Posting {id} not found"),
            Self::BidNotFound(id) => write!(f, "Bid {id} not found"),
            Self::PartyNotFound(id) => write!(f, "Party {id} not found"),
            Self::PostingNotOpen { posting_id, status } => {
                write!(f, "Posting {posting_id} is not open for bids (status: {status})")
            }
            Self::PostingNotInProgress { posting_id, status } => {
                write!(f, "Posting {posting_id} is not in progress (status: {status})")
            }
            Self::PostingNotCompleted { posting_id, status } => {
                write!(f, "Posting {posting_id} is not completed (status: {status})")
            }
            Self::BidNotPending { bid_id, status } => {
                write!(f, "Bid {bid_id} is not pending (status: {status})")
            }
            Self::BidPostingMismatch {
                bid_id,
                expected_posting_id,
            } => {
                write!(f, "Bid {bid_id} belongs to posting {expected_posting_id}")
            }
            Self::NoAcceptedBid { posting_id } => {
                write!(f, "Posting {posting_id} has no accepted bid")
            }
            Self::WinningBidMismatch { posting_id, bid_id } => {
                write!(f, "Bid {bid_id} is not the accepted bid of posting {posting_id}")
            }
            Self::MultipleAcceptedBids { posting_id } => {
                write!(f, "Posting {posting_id} has more than one accepted bid")
            }
            Self::NotWinningBidder {
                posting_id,
                company_owner_id,
            } => {
                write!(
                    f,
                    "Company owner {company_owner_id} is not the accepted bidder of posting {posting_id}"
                )
            }
            Self::NotPostingOwner {
                posting_id,
                homeowner_id,
            } => {
                write!(f, "Homeowner {homeowner_id} does not own posting {posting_id}")
            }
            Self::CompletionNotConfirmed {
                posting_id,
                company_owner_id,
            } => {
                write!(
                    f,
                    "Company owner {company_owner_id} has not confirmed completion of posting {posting_id}"
                )
            }
            Self::DuplicateReview {
                posting_id,
                homeowner_id,
            } => {
                write!(
                    f,
                    "Homeowner {homeowner_id} has already reviewed posting {posting_id}"
                )
            }
            Self::InvalidCoordinate {
                latitude_deg,
                longitude_deg,
            } => {
                write!(
                    f,
                    "Invalid coordinate: latitude {latitude_deg}, longitude {longitude_deg}"
                )
            }
            Self::InvalidRadius { radius_km } => {
                write!(f, "Invalid radius: {radius_km} km. Must be greater than 0")
            }
        }
    }
}

impl std::error::Error for DomainError {}
