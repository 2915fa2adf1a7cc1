// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{PostingState, TransitionResult};
use lawn_bid_domain::{
    Bid, BidAmount, BidStatus, CompletionConfirmation, DomainError, JobStatus, PostalCode, Posting,
    Rating, Review, validate_bid_fields, validate_posting_fields, validate_review_fields,
    validate_single_accepted_bid,
};
use lawn_bid_events::{Action, Actor, Cause, EventKind, EventScope, StateSnapshot, TransitionEvent};

/// Applies a creation command, producing the initial aggregate state and
/// its creation event.
///
/// Creation is separate from `apply` because there is no prior state to
/// transition from.
///
/// # Arguments
///
/// * `command` - The `CreatePosting` command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new aggregate and its event
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if any posting field violates domain rules.
pub fn apply_create(
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::CreatePosting {
            homeowner_id,
            title,
            description,
            postal_code,
            images,
            estimated_start_date,
        } => {
            let posting: Posting = Posting::new(
                homeowner_id,
                title,
                description,
                PostalCode::new(&postal_code),
                images,
                estimated_start_date,
            );

            validate_posting_fields(&posting)?;

            let before: StateSnapshot = StateSnapshot::new(String::from("absent"));
            let new_state: PostingState = PostingState::new(posting);
            let after: StateSnapshot = new_state.to_snapshot();

            let action: Action = Action::new(
                EventKind::PostingCreated,
                Some(format!("Homeowner {homeowner_id} created a posting")),
            );
            let event: TransitionEvent = TransitionEvent::new(
                actor,
                cause,
                action,
                EventScope::default(),
                before,
                after,
            );

            Ok(TransitionResult { new_state, event })
        }
        _ => {
            // Lifecycle commands should use apply() instead
            unreachable!("apply_create called with non-creation command")
        }
    }
}

/// Applies a lifecycle command to the current aggregate state, producing
/// a new state and the transition event.
///
/// This function is pure: it never performs I/O, and the input state is
/// left untouched on failure. The multi-entity effect set it computes
/// (e.g., accepting one bid while rejecting every sibling) must be
/// persisted as a single atomic unit by the caller.
///
/// # Arguments
///
/// * `state` - The current aggregate state (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state and transition event
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The command violates domain rules
/// - A referenced entity is missing from the aggregate
/// - A status precondition does not hold
#[allow(clippy::too_many_lines)]
pub fn apply(
    state: &PostingState,
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::SubmitBid {
            posting_id,
            bidder_id,
            amount_cents,
            description,
            proposed_date,
        } => {
            require_aggregate(state, posting_id)?;

            // Bids may only be submitted while the posting is open
            if state.posting.status != JobStatus::Open {
                return Err(CoreError::DomainViolation(DomainError::PostingNotOpen {
                    posting_id,
                    status: state.posting.status.to_string(),
                }));
            }

            let amount: BidAmount = BidAmount::new(amount_cents)?;
            let bid: Bid = Bid::new(posting_id, bidder_id, amount, description, proposed_date);
            validate_bid_fields(&bid)?;

            let before: StateSnapshot = state.to_snapshot();

            let mut new_state: PostingState = state.clone();
            new_state.bids.push(bid);

            let after: StateSnapshot = new_state.to_snapshot();

            let action: Action = Action::new(
                EventKind::BidSubmitted,
                Some(format!(
                    "Company owner {bidder_id} bid {amount_cents} cents on posting {posting_id}"
                )),
            );
            let event: TransitionEvent = TransitionEvent::new(
                actor,
                cause,
                action,
                EventScope::posting(posting_id),
                before,
                after,
            );

            Ok(TransitionResult { new_state, event })
        }
        Command::AcceptBid { bid_id } => {
            let posting_id: i64 = aggregate_id(state)?;

            let bid: &Bid = state.find_bid(bid_id).ok_or_else(|| {
                CoreError::DomainViolation(DomainError::BidNotFound(bid_id))
            })?;

            // Acceptance requires an open posting and a pending bid
            if state.posting.status != JobStatus::Open {
                return Err(CoreError::DomainViolation(DomainError::PostingNotOpen {
                    posting_id,
                    status: state.posting.status.to_string(),
                }));
            }
            if bid.status != BidStatus::Pending {
                return Err(CoreError::DomainViolation(DomainError::BidNotPending {
                    bid_id,
                    status: bid.status.to_string(),
                }));
            }

            // An open posting must not already hold an accepted bid
            validate_single_accepted_bid(posting_id, &state.bids)?;
            if state.accepted_bid().is_some() {
                return Err(CoreError::DomainViolation(
                    DomainError::MultipleAcceptedBids { posting_id },
                ));
            }

            state.posting.status.validate_transition(JobStatus::InProgress)?;

            let before: StateSnapshot = state.to_snapshot();

            // Accept the winner, reject every pending sibling, move the
            // posting forward. One effect set, persisted atomically.
            let mut new_state: PostingState = state.clone();
            let mut rejected: Vec<i64> = Vec::new();
            for bid in &mut new_state.bids {
                if bid.bid_id() == Some(bid_id) {
                    bid.status.validate_transition(BidStatus::Accepted)?;
                    bid.status = BidStatus::Accepted;
                } else if bid.status == BidStatus::Pending {
                    bid.status.validate_transition(BidStatus::Rejected)?;
                    bid.status = BidStatus::Rejected;
                    if let Some(id) = bid.bid_id() {
                        rejected.push(id);
                    }
                }
            }
            new_state.posting.status = JobStatus::InProgress;

            let after: StateSnapshot = new_state.to_snapshot();

            let details: String = if rejected.is_empty() {
                format!("Accepted bid {bid_id} on posting {posting_id}")
            } else {
                format!(
                    "Accepted bid {bid_id} on posting {posting_id}; rejected {} sibling bid(s)",
                    rejected.len()
                )
            };
            let action: Action = Action::new(EventKind::BidAccepted, Some(details));
            let event: TransitionEvent = TransitionEvent::new(
                actor,
                cause,
                action,
                EventScope::bid(posting_id, bid_id),
                before,
                after,
            );

            Ok(TransitionResult { new_state, event })
        }
        Command::ConfirmCompletion {
            posting_id,
            company_owner_id,
        } => {
            require_aggregate(state, posting_id)?;

            if state.posting.status != JobStatus::InProgress {
                return Err(CoreError::DomainViolation(
                    DomainError::PostingNotInProgress {
                        posting_id,
                        status: state.posting.status.to_string(),
                    },
                ));
            }

            let accepted: &Bid = state.accepted_bid().ok_or_else(|| {
                CoreError::DomainViolation(DomainError::NoAcceptedBid { posting_id })
            })?;
            if accepted.bidder_id != company_owner_id {
                return Err(CoreError::DomainViolation(DomainError::NotWinningBidder {
                    posting_id,
                    company_owner_id,
                }));
            }

            let before: StateSnapshot = state.to_snapshot();

            // Idempotent: re-confirming leaves the aggregate unchanged
            let already_confirmed: bool = state.is_confirmed_by(company_owner_id);
            let mut new_state: PostingState = state.clone();
            if !already_confirmed {
                new_state.confirmations.push(CompletionConfirmation::new(
                    posting_id,
                    company_owner_id,
                    true,
                ));
            }

            let after: StateSnapshot = new_state.to_snapshot();

            let details: String = if already_confirmed {
                format!(
                    "Company owner {company_owner_id} re-confirmed completion of posting {posting_id} (no change)"
                )
            } else {
                format!(
                    "Company owner {company_owner_id} confirmed completion of posting {posting_id}"
                )
            };
            let action: Action = Action::new(EventKind::JobConfirmed, Some(details));
            let event: TransitionEvent = TransitionEvent::new(
                actor,
                cause,
                action,
                EventScope::posting(posting_id),
                before,
                after,
            );

            Ok(TransitionResult { new_state, event })
        }
        Command::CloseJob {
            posting_id,
            winning_bid_id,
        } => {
            require_aggregate(state, posting_id)?;

            if state.posting.status != JobStatus::InProgress {
                return Err(CoreError::DomainViolation(
                    DomainError::PostingNotInProgress {
                        posting_id,
                        status: state.posting.status.to_string(),
                    },
                ));
            }

            let winning: &Bid = state.find_bid(winning_bid_id).ok_or_else(|| {
                CoreError::DomainViolation(DomainError::BidNotFound(winning_bid_id))
            })?;
            if winning.posting_id != posting_id {
                return Err(CoreError::DomainViolation(DomainError::BidPostingMismatch {
                    bid_id: winning_bid_id,
                    expected_posting_id: winning.posting_id,
                }));
            }
            if winning.status != BidStatus::Accepted {
                return Err(CoreError::DomainViolation(
                    DomainError::WinningBidMismatch {
                        posting_id,
                        bid_id: winning_bid_id,
                    },
                ));
            }

            // The close action is gated on the winning bidder's confirmation
            if !state.is_confirmed_by(winning.bidder_id) {
                return Err(CoreError::DomainViolation(
                    DomainError::CompletionNotConfirmed {
                        posting_id,
                        company_owner_id: winning.bidder_id,
                    },
                ));
            }

            state.posting.status.validate_transition(JobStatus::Completed)?;
            winning.status.validate_transition(BidStatus::Completed)?;

            let before: StateSnapshot = state.to_snapshot();

            let mut new_state: PostingState = state.clone();
            new_state.posting.status = JobStatus::Completed;
            for bid in &mut new_state.bids {
                if bid.bid_id() == Some(winning_bid_id) {
                    bid.status = BidStatus::Completed;
                }
            }

            let after: StateSnapshot = new_state.to_snapshot();

            let action: Action = Action::new(
                EventKind::JobClosed,
                Some(format!(
                    "Closed posting {posting_id} with winning bid {winning_bid_id}"
                )),
            );
            let event: TransitionEvent = TransitionEvent::new(
                actor,
                cause,
                action,
                EventScope::bid(posting_id, winning_bid_id),
                before,
                after,
            );

            Ok(TransitionResult { new_state, event })
        }
        Command::SubmitReview {
            posting_id,
            homeowner_id,
            rating,
            title,
            body,
        } => {
            require_aggregate(state, posting_id)?;

            if state.posting.status != JobStatus::Completed {
                return Err(CoreError::DomainViolation(
                    DomainError::PostingNotCompleted {
                        posting_id,
                        status: state.posting.status.to_string(),
                    },
                ));
            }
            if state.posting.homeowner_id != homeowner_id {
                return Err(CoreError::DomainViolation(DomainError::NotPostingOwner {
                    posting_id,
                    homeowner_id,
                }));
            }

            // One review per (posting, homeowner): re-submission is
            // rejected, not duplicated
            if state.has_review_by(homeowner_id) {
                return Err(CoreError::DomainViolation(DomainError::DuplicateReview {
                    posting_id,
                    homeowner_id,
                }));
            }

            let company_owner_id: i64 = state
                .accepted_bid()
                .map(|bid| bid.bidder_id)
                .ok_or_else(|| {
                    CoreError::DomainViolation(DomainError::NoAcceptedBid { posting_id })
                })?;

            let rating: Rating = Rating::new(rating)?;
            let review: Review = Review::new(
                posting_id,
                homeowner_id,
                company_owner_id,
                rating,
                title,
                body,
            );
            validate_review_fields(&review)?;

            let before: StateSnapshot = state.to_snapshot();

            let mut new_state: PostingState = state.clone();
            new_state.reviews.push(review);

            let after: StateSnapshot = new_state.to_snapshot();

            let action: Action = Action::new(
                EventKind::ReviewSubmitted,
                Some(format!(
                    "Homeowner {homeowner_id} rated company owner {company_owner_id} {} on posting {posting_id}",
                    rating.value()
                )),
            );
            let event: TransitionEvent = TransitionEvent::new(
                actor,
                cause,
                action,
                EventScope::posting(posting_id),
                before,
                after,
            );

            Ok(TransitionResult { new_state, event })
        }
        Command::CreatePosting { .. } => {
            // Creation commands should use apply_create() instead
            unreachable!("apply called with creation command")
        }
    }
}

/// Returns the aggregate's posting ID, failing if the posting was never
/// persisted.
fn aggregate_id(state: &PostingState) -> Result<i64, CoreError> {
    state.posting.posting_id().ok_or_else(|| {
        CoreError::Internal(String::from(
            "lifecycle command applied to an unpersisted posting",
        ))
    })
}

/// Verifies the command targets the aggregate it is being applied to.
fn require_aggregate(state: &PostingState, posting_id: i64) -> Result<(), CoreError> {
    let actual: i64 = aggregate_id(state)?;
    if actual != posting_id {
        return Err(CoreError::Internal(format!(
            "command for posting {posting_id} applied to aggregate of posting {actual}"
        )));
    }
    Ok(())
}

/// Checks whether a posting is ready for its homeowner to close.
///
/// This is a read-only validation that does not create transition events.
///
/// # Arguments
///
/// * `state` - The aggregate to check
///
/// # Returns
///
/// * `Ok(())` if the posting may be closed by its homeowner
/// * `Err(DomainError)` naming the first unmet close precondition
///
/// # Errors
///
/// Returns an error if the posting is not in progress, has no accepted
/// bid, or the accepted bidder has not confirmed completion.
pub fn validate_ready_to_close(state: &PostingState) -> Result<(), DomainError> {
    let posting_id: i64 = state.posting.posting_id().unwrap_or_default();

    if state.posting.status != JobStatus::InProgress {
        return Err(DomainError::PostingNotInProgress {
            posting_id,
            status: state.posting.status.to_string(),
        });
    }

    let accepted: &Bid = state
        .accepted_bid()
        .ok_or_else(|| DomainError::NoAcceptedBid { posting_id })?;

    if !state.is_confirmed_by(accepted.bidder_id) {
        return Err(DomainError::CompletionNotConfirmed {
            posting_id,
            company_owner_id: accepted.bidder_id,
        });
    }

    Ok(())
}
