// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use lawn_bid_domain::{Bid, BidStatus, CompletionConfirmation, Posting, Review};
use lawn_bid_events::{StateSnapshot, TransitionEvent};

/// The complete lifecycle state scoped to a single posting.
///
/// A posting and everything that hangs off it (bids, completion
/// confirmations, reviews) forms one consistency unit: every invariant
/// in the lifecycle is expressible within this aggregate, and every
/// transition commits against it atomically.
#[derive(Debug, Clone, PartialEq)]
pub struct PostingState {
    /// The posting this state is scoped to.
    pub posting: Posting,
    /// All bids referencing the posting.
    pub bids: Vec<Bid>,
    /// Completion confirmations recorded for the posting.
    pub confirmations: Vec<CompletionConfirmation>,
    /// Reviews written about the posting.
    pub reviews: Vec<Review>,
}

impl PostingState {
    /// Creates a new state for a posting with no bids, confirmations,
    /// or reviews.
    #[must_use]
    pub const fn new(posting: Posting) -> Self {
        Self {
            posting,
            bids: Vec::new(),
            confirmations: Vec::new(),
            reviews: Vec::new(),
        }
    }

    /// Returns the posting's accepted bid, if any.
    #[must_use]
    pub fn accepted_bid(&self) -> Option<&Bid> {
        self.bids.iter().find(|bid| bid.status == BidStatus::Accepted)
    }

    /// Returns the bid with the given ID, if present in this aggregate.
    #[must_use]
    pub fn find_bid(&self, bid_id: i64) -> Option<&Bid> {
        self.bids.iter().find(|bid| bid.bid_id() == Some(bid_id))
    }

    /// Returns true if the given company owner has confirmed completion.
    #[must_use]
    pub fn is_confirmed_by(&self, company_owner_id: i64) -> bool {
        self.confirmations
            .iter()
            .any(|c| c.company_owner_id == company_owner_id && c.confirmed)
    }

    /// Returns true if the given homeowner has already reviewed this posting.
    #[must_use]
    pub fn has_review_by(&self, homeowner_id: i64) -> bool {
        self.reviews
            .iter()
            .any(|review| review.homeowner_id == homeowner_id)
    }

    /// Converts the state to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        let posting_id = self
            .posting
            .posting_id()
            .map_or_else(|| String::from("new"), |id| id.to_string());
        let accepted = self
            .bids
            .iter()
            .filter(|bid| bid.status == BidStatus::Accepted)
            .count();
        let confirmed = self.confirmations.iter().filter(|c| c.confirmed).count();
        StateSnapshot::new(format!(
            "posting={posting_id},status={},bids={},accepted={accepted},confirmed={confirmed},reviews={}",
            self.posting.status,
            self.bids.len(),
            self.reviews.len()
        ))
    }
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: PostingState,
    /// The transition event recording this change.
    pub event: TransitionEvent,
}
