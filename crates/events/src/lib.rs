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

use serde::{Deserialize, Serialize};

use lawn_bid_domain::DomainError;
use std::str::FromStr;

/// Represents the entity performing an action.
///
/// An actor is any identifiable entity that initiates a state change.
/// For lifecycle transitions this is a homeowner or company owner; the
/// system itself may also act (e.g., during data repair).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "homeowner", "companyowner", "system").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// Represents the reason or trigger for an action.
///
/// A cause describes why a state change was initiated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., request ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this cause
    /// * `description` - A description of what triggered this action
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// The kind of lifecycle transition an event records.
///
/// Exactly one event of the matching kind is produced per successful
/// lifecycle operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A posting was created.
    PostingCreated,
    /// A bid was submitted against an open posting.
    BidSubmitted,
    /// A bid was accepted; implies sibling rejection and the posting
    /// moving to in-progress.
    BidAccepted,
    /// The accepted bid's company owner confirmed completion.
    JobConfirmed,
    /// The homeowner closed the job; posting and winning bid completed.
    JobClosed,
    /// The homeowner reviewed the company owner.
    ReviewSubmitted,
}

impl EventKind {
    /// Returns the string representation of the event kind.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PostingCreated => "PostingCreated",
            Self::BidSubmitted => "BidSubmitted",
            Self::BidAccepted => "BidAccepted",
            Self::JobConfirmed => "JobConfirmed",
            Self::JobClosed => "JobClosed",
            Self::ReviewSubmitted => "ReviewSubmitted",
        }
    }

    /// Parses an event kind from its string representation.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "PostingCreated" => Ok(Self::PostingCreated),
            "BidSubmitted" => Ok(Self::BidSubmitted),
            "BidAccepted" => Ok(Self::BidAccepted),
            "JobConfirmed" => Ok(Self::JobConfirmed),
            "JobClosed" => Ok(Self::JobClosed),
            "ReviewSubmitted" => Ok(Self::ReviewSubmitted),
            _ => Err(DomainError::InvalidEventKind {
                kind: s.to_string(),
            }),
        }
    }
}

impl FromStr for EventKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents the specific action performed.
///
/// An action pairs the typed event kind with optional human-readable
/// details about what changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The kind of transition performed.
    pub kind: EventKind,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    ///
    /// # Arguments
    ///
    /// * `kind` - The kind of transition performed
    /// * `details` - Optional additional details
    #[must_use]
    pub const fn new(kind: EventKind, details: Option<String>) -> Self {
        Self { kind, details }
    }
}

/// A snapshot of aggregate state at a point in time.
///
/// Snapshots capture a compact string summary of the posting aggregate,
/// sufficient for audit review and debugging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// A string representation of the state.
    pub data: String,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot`.
    ///
    /// # Arguments
    ///
    /// * `data` - A string representation of the state
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }
}

/// The entities affected by a transition.
///
/// The posting scope is present for every lifecycle transition; the bid
/// and review references are present when the transition touched one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventScope {
    /// The posting the transition applied to.
    pub posting_id: Option<i64>,
    /// The primary bid the transition applied to, if any.
    pub bid_id: Option<i64>,
    /// The review the transition created, if any.
    pub review_id: Option<i64>,
}

impl EventScope {
    /// Creates a scope referencing only a posting.
    #[must_use]
    pub const fn posting(posting_id: i64) -> Self {
        Self {
            posting_id: Some(posting_id),
            bid_id: None,
            review_id: None,
        }
    }

    /// Creates a scope referencing a posting and a bid.
    #[must_use]
    pub const fn bid(posting_id: i64, bid_id: i64) -> Self {
        Self {
            posting_id: Some(posting_id),
            bid_id: Some(bid_id),
            review_id: None,
        }
    }

    /// Creates a scope referencing a posting and a review.
    #[must_use]
    pub const fn review(posting_id: i64, review_id: i64) -> Self {
        Self {
            posting_id: Some(posting_id),
            bid_id: None,
            review_id: Some(review_id),
        }
    }
}

/// An immutable transition event.
///
/// Every successful state change must produce exactly one transition
/// event. Events are immutable once created and capture:
/// - Who performed the action (actor)
/// - Why it was performed (cause)
/// - What action was performed (action)
/// - Which entities were affected (scope)
/// - The aggregate state before the transition (before)
/// - The aggregate state after the transition (after)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionEvent {
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The cause or reason for this state change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The entities affected by this transition.
    pub scope: EventScope,
    /// The state before the transition.
    pub before: StateSnapshot,
    /// The state after the transition.
    pub after: StateSnapshot,
}

impl TransitionEvent {
    /// Creates a new `TransitionEvent`.
    ///
    /// Once created, a transition event is immutable.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `scope` - The entities affected by the transition
    /// * `before` - The state before the transition
    /// * `after` - The state after the transition
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        scope: EventScope,
        before: StateSnapshot,
        after: StateSnapshot,
    ) -> Self {
        Self {
            actor,
            cause,
            action,
            scope,
            before,
            after,
        }
    }
}

/// The Event Hook collaborator interface.
///
/// After each successfully committed transition the caller hands the
/// event to a sink. Delivery and ordering to downstream subscribers
/// (push notifications, chat prompts, live UIs) is the sink's concern;
/// the lifecycle engine never depends on delivery having happened.
///
/// The sink is injected at the composition root rather than reached
/// through any process-global emitter.
pub trait EventSink: Send + Sync {
    /// Publishes a committed transition event.
    ///
    /// Implementations must not block on downstream consumers and must
    /// not fail the calling operation; delivery is best-effort.
    fn publish(&self, event: &TransitionEvent);
}

/// An `EventSink` that discards every event.
///
/// Used where no subscriber is wired in (tests, embedding without a UI).
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn publish(&self, _event: &TransitionEvent) {}
}
