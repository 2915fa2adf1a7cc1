// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! State-changing handlers all follow the same shape: authorize the
//! actor, load the posting aggregate, apply the command in the pure
//! core, persist the transition atomically, and return the response with
//! the committed event. The acting party is always taken from the
//! authenticated actor, never from a request field.

use std::str::FromStr;
use tracing::info;

use lawn_bid::{
    Command, PostingState, TransitionResult, apply, apply_create, validate_ready_to_close,
};
use lawn_bid_domain::{
    Bid, BidStatus, CompanyOwner, Coordinate, DomainError, Homeowner, JobStatus, Party, PostalCode,
    Posting, validate_party_fields,
};
use lawn_bid_events::{Cause, TransitionEvent};
use lawn_bid_persistence::Persistence;

use crate::ActorIdentity;
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::geocode::{PostalGeocoder, filter_postings_within_radius};
use crate::request_response::{
    AcceptBidRequest, AcceptBidResponse, BidInfo, CloseJobRequest, CloseJobResponse,
    CompanyReviewsResponse, ConfirmCompletionRequest, ConfirmCompletionResponse, ConfirmationInfo,
    CreatePostingRequest, CreatePostingResponse, EventInfo, ListBidsForUserRequest,
    ListBidsResponse, ListOpenPostingsRequest, ListOpenPostingsResponse,
    ListPostingsWithBidsRequest, ListPostingsWithBidsResponse, PostingDetailResponse, PostingInfo,
    PostingWithBidsInfo, RegisterPartyRequest, RegisterPartyResponse, ReviewInfo,
    SubmitBidRequest, SubmitBidResponse, SubmitReviewRequest, SubmitReviewResponse,
    TimelineResponse, parse_request_date,
};

/// The result of an API operation that includes both the response and
/// the committed transition event.
///
/// This ensures that successful API operations always surface the event
/// they produced, so the caller can hand it to the event sink.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResult<T> {
    /// The API response.
    pub response: T,
    /// The transition event committed by this operation, with its scope
    /// resolved to canonical IDs.
    pub event: TransitionEvent,
    /// The new aggregate state after the operation.
    pub new_state: PostingState,
}

/// Requires the actor to be a homeowner and returns their ID.
fn require_homeowner(actor: &ActorIdentity) -> Result<i64, ApiError> {
    match actor {
        ActorIdentity::Homeowner { id } => Ok(*id),
        ActorIdentity::CompanyOwner { .. } => Err(ApiError::InvalidState {
            rule: String::from("homeowner_action"),
            message: String::from("Only homeowners may perform this action"),
        }),
    }
}

/// Requires the actor to be a company owner and returns their ID.
fn require_company_owner(actor: &ActorIdentity) -> Result<i64, ApiError> {
    match actor {
        ActorIdentity::CompanyOwner { id } => Ok(*id),
        ActorIdentity::Homeowner { .. } => Err(ApiError::InvalidState {
            rule: String::from("company_owner_action"),
            message: String::from("Only company owners may perform this action"),
        }),
    }
}

/// Verifies the acting party exists and matches the actor's kind.
fn ensure_actor_registered(
    persistence: &mut Persistence,
    actor: &ActorIdentity,
) -> Result<(), ApiError> {
    let actor_id: i64 = actor.id();
    let party: Party = persistence
        .get_party(actor_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| translate_domain_error(DomainError::PartyNotFound(actor_id)))?;

    let matches: bool = matches!(
        (actor, &party),
        (ActorIdentity::Homeowner { .. }, Party::Homeowner(_))
            | (ActorIdentity::CompanyOwner { .. }, Party::CompanyOwner(_))
    );
    if matches {
        Ok(())
    } else {
        Err(ApiError::InvalidState {
            rule: String::from("party_kind"),
            message: format!(
                "Party {actor_id} is registered as a {}, not a {}",
                party.kind_str(),
                actor.kind_str()
            ),
        })
    }
}

/// Resolves the committed event's scope with IDs generated at persist time.
fn resolve_event_scope(
    mut event: TransitionEvent,
    posting_id: i64,
    bid_id: Option<i64>,
    review_id: Option<i64>,
) -> TransitionEvent {
    event.scope.posting_id = Some(posting_id);
    if event.scope.bid_id.is_none() {
        event.scope.bid_id = bid_id;
    }
    if event.scope.review_id.is_none() {
        event.scope.review_id = review_id;
    }
    event
}

/// Registers a marketplace party.
///
/// This is identity provisioning, not a lifecycle transition: it emits
/// no event and needs no prior aggregate.
///
/// # Errors
///
/// Returns an error if the kind is unknown or a field is invalid.
pub fn register_party(
    persistence: &mut Persistence,
    request: RegisterPartyRequest,
) -> Result<RegisterPartyResponse, ApiError> {
    let party: Party = match request.kind.as_str() {
        "homeowner" => Party::Homeowner(Homeowner::new(
            request.name,
            PostalCode::new(&request.postal_code),
        )),
        "companyowner" => Party::CompanyOwner(CompanyOwner::new(
            request.name,
            PostalCode::new(&request.postal_code),
        )),
        other => {
            return Err(ApiError::InvalidInput {
                field: String::from("kind"),
                message: format!("Unknown party kind '{other}'"),
            });
        }
    };

    validate_party_fields(&party).map_err(translate_domain_error)?;

    let party_id: i64 = persistence
        .create_party(&party)
        .map_err(translate_persistence_error)?;

    info!(party_id, kind = party.kind_str(), "Registered party");

    Ok(RegisterPartyResponse {
        party_id,
        kind: party.kind_str().to_string(),
        message: format!("Registered {} {party_id}", party.kind_str()),
    })
}

/// Creates a job posting owned by the acting homeowner.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not a registered homeowner
/// - Any field validation fails
pub fn create_posting(
    persistence: &mut Persistence,
    request: CreatePostingRequest,
    actor: &ActorIdentity,
    cause: Cause,
) -> Result<ApiResult<CreatePostingResponse>, ApiError> {
    let homeowner_id: i64 = require_homeowner(actor)?;
    ensure_actor_registered(persistence, actor)?;

    let estimated_start_date: time::Date =
        parse_request_date("estimated_start_date", &request.estimated_start_date)?;

    let command: Command = Command::CreatePosting {
        homeowner_id,
        title: request.title,
        description: request.description,
        postal_code: request.postal_code,
        images: request.images,
        estimated_start_date,
    };

    let result: TransitionResult =
        apply_create(command, actor.to_audit_actor(), cause).map_err(translate_core_error)?;

    let persisted = persistence
        .persist_creation(&result)
        .map_err(translate_persistence_error)?;

    info!(
        posting_id = persisted.posting_id,
        homeowner_id, "Created posting"
    );

    Ok(ApiResult {
        response: CreatePostingResponse {
            posting_id: persisted.posting_id,
            status: JobStatus::Open.as_str().to_string(),
            message: format!("Created posting {}", persisted.posting_id),
        },
        event: resolve_event_scope(result.event, persisted.posting_id, None, None),
        new_state: result.new_state,
    })
}

/// Submits a bid by the acting company owner against an open posting.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not a registered company owner
/// - The posting does not exist or is not open
/// - The amount or description is invalid
pub fn submit_bid(
    persistence: &mut Persistence,
    request: SubmitBidRequest,
    actor: &ActorIdentity,
    cause: Cause,
) -> Result<ApiResult<SubmitBidResponse>, ApiError> {
    let bidder_id: i64 = require_company_owner(actor)?;
    ensure_actor_registered(persistence, actor)?;

    let proposed_date: time::Date = parse_request_date("proposed_date", &request.proposed_date)?;

    let state: PostingState = persistence
        .load_posting_state(request.posting_id)
        .map_err(translate_persistence_error)?;

    let command: Command = Command::SubmitBid {
        posting_id: request.posting_id,
        bidder_id,
        amount_cents: request.amount_cents,
        description: request.description,
        proposed_date,
    };

    let result: TransitionResult =
        apply(&state, command, actor.to_audit_actor(), cause).map_err(translate_core_error)?;

    let persisted = persistence
        .persist_transition(&result)
        .map_err(translate_persistence_error)?;
    let bid_id: i64 = persisted.bid_id.ok_or_else(|| ApiError::Internal {
        message: String::from("bid submission committed without a bid ID"),
    })?;

    info!(bid_id, posting_id = request.posting_id, bidder_id, "Submitted bid");

    Ok(ApiResult {
        response: SubmitBidResponse {
            bid_id,
            posting_id: request.posting_id,
            status: BidStatus::Pending.as_str().to_string(),
            message: format!("Submitted bid {bid_id} on posting {}", request.posting_id),
        },
        event: resolve_event_scope(
            result.event,
            request.posting_id,
            persisted.bid_id,
            None,
        ),
        new_state: result.new_state,
    })
}

/// Accepts a pending bid on behalf of the posting's homeowner.
///
/// The acceptance, every sibling rejection, and the posting's move to
/// in-progress commit as one atomic unit; a concurrent transition on the
/// same posting surfaces as `ApiError::Conflict`.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not the posting's homeowner
/// - The bid does not exist, is not pending, or its posting is not open
pub fn accept_bid(
    persistence: &mut Persistence,
    request: AcceptBidRequest,
    actor: &ActorIdentity,
    cause: Cause,
) -> Result<ApiResult<AcceptBidResponse>, ApiError> {
    let homeowner_id: i64 = require_homeowner(actor)?;

    let bid: Bid = persistence
        .get_bid(request.bid_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| translate_domain_error(DomainError::BidNotFound(request.bid_id)))?;
    let posting_id: i64 = bid.posting_id;

    let state: PostingState = persistence
        .load_posting_state(posting_id)
        .map_err(translate_persistence_error)?;

    if state.posting.homeowner_id != homeowner_id {
        return Err(translate_domain_error(DomainError::NotPostingOwner {
            posting_id,
            homeowner_id,
        }));
    }

    let result: TransitionResult = apply(
        &state,
        Command::AcceptBid {
            bid_id: request.bid_id,
        },
        actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;

    // Bids that were pending before and rejected after are the ones this
    // acceptance turned away.
    let rejected_bid_ids: Vec<i64> = result
        .new_state
        .bids
        .iter()
        .filter(|bid| bid.status == BidStatus::Rejected)
        .filter_map(Bid::bid_id)
        .filter(|id| {
            state
                .find_bid(*id)
                .is_some_and(|before| before.status == BidStatus::Pending)
        })
        .collect();

    persistence
        .persist_transition(&result)
        .map_err(translate_persistence_error)?;

    info!(
        bid_id = request.bid_id,
        posting_id,
        rejected = rejected_bid_ids.len(),
        "Accepted bid"
    );

    Ok(ApiResult {
        response: AcceptBidResponse {
            posting_id,
            accepted_bid_id: request.bid_id,
            rejected_bid_ids,
            message: format!("Accepted bid {} on posting {posting_id}", request.bid_id),
        },
        event: resolve_event_scope(result.event, posting_id, Some(request.bid_id), None),
        new_state: result.new_state,
    })
}

/// Records the acting company owner's completion confirmation.
///
/// Re-confirming is an idempotent no-op; the posting status is never
/// changed by this operation.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not a company owner
/// - The posting is not in progress
/// - The actor is not the accepted bidder
pub fn confirm_completion(
    persistence: &mut Persistence,
    request: ConfirmCompletionRequest,
    actor: &ActorIdentity,
    cause: Cause,
) -> Result<ApiResult<ConfirmCompletionResponse>, ApiError> {
    let company_owner_id: i64 = require_company_owner(actor)?;

    let state: PostingState = persistence
        .load_posting_state(request.posting_id)
        .map_err(translate_persistence_error)?;
    let already_confirmed: bool = state.is_confirmed_by(company_owner_id);

    let result: TransitionResult = apply(
        &state,
        Command::ConfirmCompletion {
            posting_id: request.posting_id,
            company_owner_id,
        },
        actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;

    persistence
        .persist_transition(&result)
        .map_err(translate_persistence_error)?;

    info!(
        posting_id = request.posting_id,
        company_owner_id, already_confirmed, "Confirmed completion"
    );

    Ok(ApiResult {
        response: ConfirmCompletionResponse {
            posting_id: request.posting_id,
            company_owner_id,
            already_confirmed,
            message: format!("Confirmed completion of posting {}", request.posting_id),
        },
        event: resolve_event_scope(result.event, request.posting_id, None, None),
        new_state: result.new_state,
    })
}

/// Closes a confirmed job on behalf of the posting's homeowner.
///
/// The posting and its winning bid complete together atomically.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not the posting's homeowner
/// - The posting is not in progress
/// - The winning bid's bidder has not confirmed completion
pub fn close_completed_job(
    persistence: &mut Persistence,
    request: CloseJobRequest,
    actor: &ActorIdentity,
    cause: Cause,
) -> Result<ApiResult<CloseJobResponse>, ApiError> {
    let homeowner_id: i64 = require_homeowner(actor)?;

    let state: PostingState = persistence
        .load_posting_state(request.posting_id)
        .map_err(translate_persistence_error)?;

    if state.posting.homeowner_id != homeowner_id {
        return Err(translate_domain_error(DomainError::NotPostingOwner {
            posting_id: request.posting_id,
            homeowner_id,
        }));
    }

    let result: TransitionResult = apply(
        &state,
        Command::CloseJob {
            posting_id: request.posting_id,
            winning_bid_id: request.winning_bid_id,
        },
        actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;

    persistence
        .persist_transition(&result)
        .map_err(translate_persistence_error)?;

    info!(
        posting_id = request.posting_id,
        winning_bid_id = request.winning_bid_id,
        "Closed job"
    );

    Ok(ApiResult {
        response: CloseJobResponse {
            posting_id: request.posting_id,
            winning_bid_id: request.winning_bid_id,
            message: format!("Closed posting {}", request.posting_id),
        },
        event: resolve_event_scope(
            result.event,
            request.posting_id,
            Some(request.winning_bid_id),
            None,
        ),
        new_state: result.new_state,
    })
}

/// Submits the acting homeowner's review of the winning company owner.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not the posting's homeowner
/// - The posting is not completed
/// - A review by this homeowner already exists (`ApiError::Duplicate`)
/// - The rating is out of bounds
pub fn submit_review(
    persistence: &mut Persistence,
    request: SubmitReviewRequest,
    actor: &ActorIdentity,
    cause: Cause,
) -> Result<ApiResult<SubmitReviewResponse>, ApiError> {
    let homeowner_id: i64 = require_homeowner(actor)?;

    let state: PostingState = persistence
        .load_posting_state(request.posting_id)
        .map_err(translate_persistence_error)?;

    let result: TransitionResult = apply(
        &state,
        Command::SubmitReview {
            posting_id: request.posting_id,
            homeowner_id,
            rating: request.rating,
            title: request.title,
            body: request.body,
        },
        actor.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;

    let persisted = persistence
        .persist_transition(&result)
        .map_err(translate_persistence_error)?;
    let review_id: i64 = persisted.review_id.ok_or_else(|| ApiError::Internal {
        message: String::from("review submission committed without a review ID"),
    })?;

    let rating: u8 = result
        .new_state
        .reviews
        .last()
        .map_or(0, |review| review.rating.value());

    info!(review_id, posting_id = request.posting_id, "Submitted review");

    Ok(ApiResult {
        response: SubmitReviewResponse {
            review_id,
            posting_id: request.posting_id,
            rating,
            message: format!("Submitted review {review_id}"),
        },
        event: resolve_event_scope(
            result.event,
            request.posting_id,
            None,
            persisted.review_id,
        ),
        new_state: result.new_state,
    })
}

/// Retrieves the full posting aggregate for a detail view.
///
/// # Errors
///
/// Returns an error if the posting does not exist.
pub fn get_posting(
    persistence: &mut Persistence,
    posting_id: i64,
) -> Result<PostingDetailResponse, ApiError> {
    let state: PostingState = persistence
        .load_posting_state(posting_id)
        .map_err(translate_persistence_error)?;

    let posting: PostingInfo = PostingInfo::from_posting(&state.posting)?;
    let bids: Vec<BidInfo> = state
        .bids
        .iter()
        .map(BidInfo::from_bid)
        .collect::<Result<Vec<BidInfo>, ApiError>>()?;
    let confirmations: Vec<ConfirmationInfo> = state
        .confirmations
        .iter()
        .map(ConfirmationInfo::from_confirmation)
        .collect();
    let reviews: Vec<ReviewInfo> = state
        .reviews
        .iter()
        .map(ReviewInfo::from_review)
        .collect::<Result<Vec<ReviewInfo>, ApiError>>()?;
    let ready_to_close: bool = validate_ready_to_close(&state).is_ok();

    Ok(PostingDetailResponse {
        posting,
        bids,
        confirmations,
        reviews,
        ready_to_close,
    })
}

/// Lists open postings the browsing company owner has not yet bid on,
/// optionally filtered to a radius around a center coordinate.
///
/// # Errors
///
/// Returns an error if the radius/center combination is invalid or the
/// store cannot be queried. An empty result is not an error.
pub fn list_open_postings(
    persistence: &mut Persistence,
    geocoder: &dyn PostalGeocoder,
    request: ListOpenPostingsRequest,
) -> Result<ListOpenPostingsResponse, ApiError> {
    let postings: Vec<Posting> = persistence
        .list_open_postings_excluding_bidder(request.bidder_id)
        .map_err(translate_persistence_error)?;

    let postings: Vec<Posting> = match (
        request.radius_km,
        request.center_latitude_deg,
        request.center_longitude_deg,
    ) {
        (Some(radius_km), Some(latitude), Some(longitude)) => {
            let center: Coordinate =
                Coordinate::new(latitude, longitude).map_err(translate_domain_error)?;
            filter_postings_within_radius(geocoder, center, radius_km, postings)?
        }
        (None, None, None) => postings,
        _ => {
            return Err(ApiError::InvalidInput {
                field: String::from("radius_km"),
                message: String::from(
                    "Radius filtering requires radius_km, center_latitude_deg, and center_longitude_deg together",
                ),
            });
        }
    };

    let postings: Vec<PostingInfo> = postings
        .iter()
        .map(PostingInfo::from_posting)
        .collect::<Result<Vec<PostingInfo>, ApiError>>()?;

    Ok(ListOpenPostingsResponse { postings })
}

/// Lists a company owner's bids filtered by status, newest first.
///
/// # Errors
///
/// Returns an error if a status string is invalid or the store cannot
/// be queried. An empty status set yields an empty listing.
pub fn list_bids_for_user(
    persistence: &mut Persistence,
    request: ListBidsForUserRequest,
) -> Result<ListBidsResponse, ApiError> {
    let statuses: Vec<BidStatus> = request
        .statuses
        .iter()
        .map(|status| BidStatus::from_str(status).map_err(translate_domain_error))
        .collect::<Result<Vec<BidStatus>, ApiError>>()?;

    let bids: Vec<Bid> = persistence
        .list_bids_for_user(request.bidder_id, &statuses)
        .map_err(translate_persistence_error)?;

    let bids: Vec<BidInfo> = bids
        .iter()
        .map(BidInfo::from_bid)
        .collect::<Result<Vec<BidInfo>, ApiError>>()?;

    Ok(ListBidsResponse { bids })
}

/// Lists a homeowner's postings filtered by status, each joined with its
/// bids, newest first.
///
/// # Errors
///
/// Returns an error if a status string is invalid or the store cannot
/// be queried. An empty status set yields an empty listing.
pub fn list_postings_with_bids(
    persistence: &mut Persistence,
    request: ListPostingsWithBidsRequest,
) -> Result<ListPostingsWithBidsResponse, ApiError> {
    let statuses: Vec<JobStatus> = request
        .statuses
        .iter()
        .map(|status| JobStatus::from_str(status).map_err(translate_domain_error))
        .collect::<Result<Vec<JobStatus>, ApiError>>()?;

    let postings: Vec<Posting> = persistence
        .list_postings_for_homeowner(request.homeowner_id, &statuses)
        .map_err(translate_persistence_error)?;

    let mut joined: Vec<PostingWithBidsInfo> = Vec::with_capacity(postings.len());
    for posting in &postings {
        let posting_info: PostingInfo = PostingInfo::from_posting(posting)?;
        let bids: Vec<Bid> = persistence
            .bids_for_posting(posting_info.posting_id)
            .map_err(translate_persistence_error)?;
        let bids: Vec<BidInfo> = bids
            .iter()
            .map(BidInfo::from_bid)
            .collect::<Result<Vec<BidInfo>, ApiError>>()?;
        joined.push(PostingWithBidsInfo {
            posting: posting_info,
            bids,
        });
    }

    Ok(ListPostingsWithBidsResponse { postings: joined })
}

/// Lists a company owner's reviews with their mean rating.
///
/// # Errors
///
/// Returns an error if the store cannot be queried. A company owner with
/// no reviews gets an empty list and no average.
pub fn list_company_reviews(
    persistence: &mut Persistence,
    company_owner_id: i64,
) -> Result<CompanyReviewsResponse, ApiError> {
    let reviews = persistence
        .list_reviews_for_company(company_owner_id)
        .map_err(translate_persistence_error)?;
    let average_rating: Option<f64> = persistence
        .average_rating_for_company(company_owner_id)
        .map_err(translate_persistence_error)?;

    let reviews: Vec<ReviewInfo> = reviews
        .iter()
        .map(ReviewInfo::from_review)
        .collect::<Result<Vec<ReviewInfo>, ApiError>>()?;

    Ok(CompanyReviewsResponse {
        company_owner_id,
        reviews,
        average_rating,
    })
}

/// Retrieves a posting's transition event timeline in commit order.
///
/// A posting with no recorded events yields an empty timeline.
///
/// # Errors
///
/// Returns an error if the store cannot be queried.
pub fn get_event_timeline(
    persistence: &mut Persistence,
    posting_id: i64,
) -> Result<TimelineResponse, ApiError> {
    let events = persistence
        .posting_timeline(posting_id)
        .map_err(translate_persistence_error)?;

    Ok(TimelineResponse {
        posting_id,
        events: events.iter().map(EventInfo::from_event).collect(),
    })
}
