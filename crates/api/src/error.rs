// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use lawn_bid::CoreError;
use lawn_bid_domain::DomainError;
use lawn_bid_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract. Each variant maps to a caller-facing failure class:
/// malformed input, a missing entity, a precondition on status or
/// ownership, benign write contention, or store trouble.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Invalid input was provided. Never retried automatically.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A lifecycle precondition on status or ownership was violated.
    InvalidState {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// The operation would duplicate an entity that must be unique.
    Duplicate {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// The aggregate changed while the operation was in flight. This is
    /// benign contention: callers should reload fresh state and retry
    /// (silently, in a UI) rather than surface an error dialog.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// The entity store is temporarily unavailable. Safe to retry with
    /// backoff; preconditions are re-checked on every attempt.
    StoreUnavailable {
        /// A description of the store failure.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::InvalidState { rule, message } => {
                write!(f, "Lifecycle rule violation ({rule}): {message}")
            }
            Self::Duplicate { rule, message } => {
                write!(f, "Duplicate ({rule}): {message}")
            }
            Self::Conflict { message } => {
                write!(f, "Concurrent modification: {message}")
            }
            Self::StoreUnavailable { message } => {
                write!(f, "Store unavailable: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidTitle(msg) => ApiError::InvalidInput {
            field: String::from("title"),
            message: msg,
        },
        DomainError::InvalidDescription(msg) => ApiError::InvalidInput {
            field: String::from("description"),
            message: msg,
        },
        DomainError::InvalidPostalCode(msg) => ApiError::InvalidInput {
            field: String::from("postal_code"),
            message: msg,
        },
        DomainError::InvalidImageUrl { position } => ApiError::InvalidInput {
            field: String::from("images"),
            message: format!("Invalid image URL at position {position}"),
        },
        DomainError::InvalidBidAmount { cents } => ApiError::InvalidInput {
            field: String::from("amount_cents"),
            message: format!("Invalid bid amount: {cents} cents. Must be greater than 0"),
        },
        DomainError::InvalidRating { rating } => ApiError::InvalidInput {
            field: String::from("rating"),
            message: format!("Invalid rating: {rating}. Must be between 1 and 5"),
        },
        DomainError::InvalidPartyName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::InvalidJobStatus { status } => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Invalid job status: '{status}'"),
        },
        DomainError::InvalidBidStatus { status } => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Invalid bid status: '{status}'"),
        },
        DomainError::InvalidEventKind { kind } => ApiError::InvalidInput {
            field: String::from("kind"),
            message: format!("Invalid event kind: '{kind}'"),
        },
        DomainError::InvalidCoordinate {
            latitude_deg,
            longitude_deg,
        } => ApiError::InvalidInput {
            field: String::from("center"),
            message: format!(
                "Invalid coordinate: latitude {latitude_deg}, longitude {longitude_deg}"
            ),
        },
        DomainError::InvalidRadius { radius_km } => ApiError::InvalidInput {
            field: String::from("radius_km"),
            message: format!("Invalid radius: {radius_km} km. Must be greater than 0"),
        },
        DomainError::PostingNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Posting"),
            message: format!("Posting {id} does not exist"),
        },
        DomainError::BidNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Bid"),
            message: format!("Bid {id} does not exist"),
        },
        DomainError::PartyNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Party"),
            message: format!("Party {id} does not exist"),
        },
        DomainError::InvalidStatusTransition { from, to, reason } => ApiError::InvalidState {
            rule: String::from("forward_only_status"),
            message: format!("Invalid status transition from '{from}' to '{to}': {reason}"),
        },
        DomainError::PostingNotOpen { posting_id, status } => ApiError::InvalidState {
            rule: String::from("posting_open"),
            message: format!("Posting {posting_id} is not open for bids (status: {status})"),
        },
        DomainError::PostingNotInProgress { posting_id, status } => ApiError::InvalidState {
            rule: String::from("posting_in_progress"),
            message: format!("Posting {posting_id} is not in progress (status: {status})"),
        },
        DomainError::PostingNotCompleted { posting_id, status } => ApiError::InvalidState {
            rule: String::from("posting_completed"),
            message: format!("Posting {posting_id} is not completed (status: {status})"),
        },
        DomainError::BidNotPending { bid_id, status } => ApiError::InvalidState {
            rule: String::from("bid_pending"),
            message: format!("Bid {bid_id} is not pending (status: {status})"),
        },
        DomainError::BidPostingMismatch {
            bid_id,
            expected_posting_id,
        } => ApiError::InvalidState {
            rule: String::from("bid_posting_reference"),
            message: format!("Bid {bid_id} belongs to posting {expected_posting_id}"),
        },
        DomainError::NoAcceptedBid { posting_id } => ApiError::InvalidState {
            rule: String::from("accepted_bid_present"),
            message: format!("Posting {posting_id} has no accepted bid"),
        },
        DomainError::WinningBidMismatch { posting_id, bid_id } => ApiError::InvalidState {
            rule: String::from("winning_bid"),
            message: format!("Bid {bid_id} is not the accepted bid of posting {posting_id}"),
        },
        DomainError::MultipleAcceptedBids { posting_id } => ApiError::InvalidState {
            rule: String::from("single_accepted_bid"),
            message: format!("Posting {posting_id} has more than one accepted bid"),
        },
        DomainError::NotWinningBidder {
            posting_id,
            company_owner_id,
        } => ApiError::InvalidState {
            rule: String::from("winning_bidder"),
            message: format!(
                "Company owner {company_owner_id} is not the accepted bidder of posting {posting_id}"
            ),
        },
        DomainError::NotPostingOwner {
            posting_id,
            homeowner_id,
        } => ApiError::InvalidState {
            rule: String::from("posting_owner"),
            message: format!("Homeowner {homeowner_id} does not own posting {posting_id}"),
        },
        DomainError::CompletionNotConfirmed {
            posting_id,
            company_owner_id,
        } => ApiError::InvalidState {
            rule: String::from("completion_confirmed"),
            message: format!(
                "Company owner {company_owner_id} has not confirmed completion of posting {posting_id}"
            ),
        },
        DomainError::DuplicateReview {
            posting_id,
            homeowner_id,
        } => ApiError::Duplicate {
            rule: String::from("one_review_per_posting"),
            message: format!("Homeowner {homeowner_id} has already reviewed posting {posting_id}"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Internal(msg) => ApiError::Internal {
            message: format!("Internal error: {msg}"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Conflicts surface as `ApiError::Conflict` so callers can refresh and
/// retry; infrastructure failures surface as `StoreUnavailable`.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::PostingNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Posting"),
            message: format!("Posting {id} does not exist"),
        },
        PersistenceError::PartyNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Party"),
            message: format!("Party {id} does not exist"),
        },
        PersistenceError::EventNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Event"),
            message: format!("Event {id} does not exist"),
        },
        PersistenceError::NotFound(msg) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message: msg,
        },
        PersistenceError::Conflict {
            posting_id,
            expected_version,
        } => ApiError::Conflict {
            message: format!(
                "Posting {posting_id} changed while the operation was in flight (version {expected_version} is stale)"
            ),
        },
        PersistenceError::DatabaseError(msg)
        | PersistenceError::DatabaseConnectionFailed(msg)
        | PersistenceError::QueryFailed(msg)
        | PersistenceError::MigrationFailed(msg)
        | PersistenceError::InitializationError(msg) => ApiError::StoreUnavailable { message: msg },
        PersistenceError::ForeignKeyEnforcementNotEnabled => ApiError::StoreUnavailable {
            message: String::from("Foreign key enforcement is not enabled"),
        },
        PersistenceError::ReconstructionError(msg) | PersistenceError::SerializationError(msg) => {
            ApiError::Internal { message: msg }
        }
    }
}
