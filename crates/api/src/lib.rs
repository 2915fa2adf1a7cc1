// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod error;
mod geocode;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

use lawn_bid_events::Actor;

pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use geocode::{GeocodeError, PostalGeocoder, StaticGeocoder, filter_postings_within_radius};
pub use handlers::{
    ApiResult, accept_bid, close_completed_job, confirm_completion, create_posting,
    get_event_timeline, get_posting, list_bids_for_user, list_company_reviews,
    list_open_postings, list_postings_with_bids, register_party, submit_bid, submit_review,
};
pub use request_response::{
    AcceptBidRequest, AcceptBidResponse, BidInfo, CloseJobRequest, CloseJobResponse,
    CompanyReviewsResponse, ConfirmCompletionRequest, ConfirmCompletionResponse, ConfirmationInfo,
    CreatePostingRequest, CreatePostingResponse, EventInfo, ListBidsForUserRequest,
    ListBidsResponse, ListOpenPostingsRequest, ListOpenPostingsResponse,
    ListPostingsWithBidsRequest, ListPostingsWithBidsResponse, PostingDetailResponse, PostingInfo,
    PostingWithBidsInfo, RegisterPartyRequest, RegisterPartyResponse, ReviewInfo,
    SubmitBidRequest, SubmitBidResponse, SubmitReviewRequest, SubmitReviewResponse,
    TimelineResponse, parse_request_date,
};

/// The authenticated party performing an operation.
///
/// Homeowners and company owners have disjoint capabilities, so the
/// actor is a tagged union and every handler branches exhaustively on
/// it. Authentication itself (sessions, tokens) is an external
/// collaborator's concern; callers hand the resolved identity in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorIdentity {
    /// An authenticated homeowner.
    Homeowner {
        /// The homeowner's canonical party ID.
        id: i64,
    },
    /// An authenticated company owner.
    CompanyOwner {
        /// The company owner's canonical party ID.
        id: i64,
    },
}

impl ActorIdentity {
    /// Returns the actor's canonical party ID.
    #[must_use]
    pub const fn id(&self) -> i64 {
        match self {
            Self::Homeowner { id } | Self::CompanyOwner { id } => *id,
        }
    }

    /// Returns the string representation of the actor's kind.
    #[must_use]
    pub const fn kind_str(&self) -> &'static str {
        match self {
            Self::Homeowner { .. } => "homeowner",
            Self::CompanyOwner { .. } => "companyowner",
        }
    }

    /// Converts this actor identity into an event Actor.
    ///
    /// This is used when recording transition events to attribute
    /// actions to the acting party.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(self.id().to_string(), self.kind_str().to_string())
    }
}
