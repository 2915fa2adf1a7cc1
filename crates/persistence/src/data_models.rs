// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row and payload types for the persistence layer.
//!
//! `*Row` structs are `Queryable` mirrors of the canonical tables;
//! `New*` structs are their `Insertable` counterparts. The `*Data`
//! structs are the serializable JSON payloads stored inside transition
//! event rows. Conversion into domain types happens here so the rest of
//! the crate deals only in domain values.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::diesel_schema::{
    bids, completion_confirmations, parties, posting_images, postings, reviews, transition_events,
};
use crate::error::PersistenceError;
use lawn_bid_domain::{
    Bid, BidAmount, BidStatus, CompanyOwner, CompletionConfirmation, Homeowner, JobStatus, Party,
    PostalCode, Posting, Rating, Review,
};
use lawn_bid_events::{Action, Actor, Cause, EventKind, EventScope, StateSnapshot, TransitionEvent};

/// Date storage format (ISO 8601 calendar date).
const DATE_FORMAT: &[time::format_description::BorrowedFormatItem<'static>] =
    time::macros::format_description!("[year]-[month]-[day]");

/// Formats a civil date for storage.
///
/// # Errors
///
/// Returns an error if the date cannot be formatted.
pub fn format_date(date: time::Date) -> Result<String, PersistenceError> {
    date.format(DATE_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(format!("format date: {e}")))
}

/// Parses a civil date from its storage representation.
///
/// # Errors
///
/// Returns an error if the string is not a valid ISO 8601 date.
pub fn parse_date(value: &str) -> Result<time::Date, PersistenceError> {
    time::Date::parse(value, DATE_FORMAT)
        .map_err(|e| PersistenceError::ReconstructionError(format!("parse date '{value}': {e}")))
}

/// Serializable representation of an Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

/// Serializable representation of a Cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

/// Serializable representation of an Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub kind: String,
    pub details: Option<String>,
}

/// Serializable representation of a `StateSnapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshotData {
    pub data: String,
}

/// A row from the `parties` table.
#[derive(Debug, Clone, Queryable)]
pub struct PartyRow {
    pub party_id: i64,
    pub kind: String,
    pub display_name: String,
    pub postal_code: String,
    pub created_at: Option<String>,
}

impl PartyRow {
    /// Converts the row into its domain representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored kind is not a known party kind.
    pub fn into_domain(self) -> Result<Party, PersistenceError> {
        let postal_code: PostalCode = PostalCode::new(&self.postal_code);
        match self.kind.as_str() {
            "homeowner" => Ok(Party::Homeowner(Homeowner::with_id(
                self.party_id,
                self.display_name,
                postal_code,
            ))),
            "companyowner" => Ok(Party::CompanyOwner(CompanyOwner::with_id(
                self.party_id,
                self.display_name,
                postal_code,
            ))),
            other => Err(PersistenceError::ReconstructionError(format!(
                "unknown party kind '{other}' for party {}",
                self.party_id
            ))),
        }
    }
}

/// An insertable row for the `parties` table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = parties)]
pub struct NewParty {
    pub kind: String,
    pub display_name: String,
    pub postal_code: String,
}

/// A row from the `postings` table.
#[derive(Debug, Clone, Queryable)]
pub struct PostingRow {
    pub posting_id: i64,
    pub homeowner_id: i64,
    pub title: String,
    pub description: String,
    pub postal_code: String,
    pub estimated_start_date: String,
    pub status: String,
    pub version: i64,
    pub created_at: Option<String>,
}

impl PostingRow {
    /// Converts the row into its domain representation.
    ///
    /// # Arguments
    ///
    /// * `images` - The posting's ordered image URLs
    ///
    /// # Errors
    ///
    /// Returns an error if the stored status or date cannot be parsed.
    pub fn into_domain(self, images: Vec<String>) -> Result<Posting, PersistenceError> {
        let status: JobStatus = JobStatus::from_str(&self.status)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
        let estimated_start_date: time::Date = parse_date(&self.estimated_start_date)?;

        Ok(Posting::with_id(
            self.posting_id,
            self.homeowner_id,
            self.title,
            self.description,
            PostalCode::new(&self.postal_code),
            images,
            estimated_start_date,
            status,
            self.version,
        ))
    }
}

/// An insertable row for the `postings` table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = postings)]
pub struct NewPosting {
    pub homeowner_id: i64,
    pub title: String,
    pub description: String,
    pub postal_code: String,
    pub estimated_start_date: String,
    pub status: String,
    pub version: i64,
}

/// A row from the `posting_images` table.
#[derive(Debug, Clone, Queryable)]
pub struct PostingImageRow {
    pub image_id: i64,
    pub posting_id: i64,
    pub position: i32,
    pub url: String,
}

/// An insertable row for the `posting_images` table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = posting_images)]
pub struct NewPostingImage {
    pub posting_id: i64,
    pub position: i32,
    pub url: String,
}

/// A row from the `bids` table.
#[derive(Debug, Clone, Queryable)]
pub struct BidRow {
    pub bid_id: i64,
    pub posting_id: i64,
    pub bidder_id: i64,
    pub amount_cents: i64,
    pub description: String,
    pub proposed_date: String,
    pub status: String,
    pub created_at: Option<String>,
}

impl BidRow {
    /// Converts the row into its domain representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored status, amount, or date cannot be
    /// parsed.
    pub fn into_domain(self) -> Result<Bid, PersistenceError> {
        let status: BidStatus = BidStatus::from_str(&self.status)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
        let amount: BidAmount = BidAmount::new(self.amount_cents)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
        let proposed_date: time::Date = parse_date(&self.proposed_date)?;

        Ok(Bid::with_id(
            self.bid_id,
            self.posting_id,
            self.bidder_id,
            amount,
            self.description,
            proposed_date,
            status,
        ))
    }
}

/// An insertable row for the `bids` table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bids)]
pub struct NewBid {
    pub posting_id: i64,
    pub bidder_id: i64,
    pub amount_cents: i64,
    pub description: String,
    pub proposed_date: String,
    pub status: String,
}

/// A row from the `completion_confirmations` table.
#[derive(Debug, Clone, Queryable)]
pub struct ConfirmationRow {
    pub confirmation_id: i64,
    pub posting_id: i64,
    pub company_owner_id: i64,
    pub confirmed: i32,
    pub confirmed_at: Option<String>,
}

impl ConfirmationRow {
    /// Converts the row into its domain representation.
    #[must_use]
    pub fn into_domain(self) -> CompletionConfirmation {
        CompletionConfirmation::new(self.posting_id, self.company_owner_id, self.confirmed != 0)
    }
}

/// An insertable row for the `completion_confirmations` table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = completion_confirmations)]
pub struct NewConfirmation {
    pub posting_id: i64,
    pub company_owner_id: i64,
    pub confirmed: i32,
}

/// A row from the `reviews` table.
#[derive(Debug, Clone, Queryable)]
pub struct ReviewRow {
    pub review_id: i64,
    pub posting_id: i64,
    pub homeowner_id: i64,
    pub company_owner_id: i64,
    pub rating: i32,
    pub title: Option<String>,
    pub body: Option<String>,
    pub created_at: Option<String>,
}

impl ReviewRow {
    /// Converts the row into its domain representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored rating is out of range.
    pub fn into_domain(self) -> Result<Review, PersistenceError> {
        let rating: Rating = Rating::new(i64::from(self.rating))
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;

        Ok(Review::with_id(
            self.review_id,
            self.posting_id,
            self.homeowner_id,
            self.company_owner_id,
            rating,
            self.title,
            self.body,
        ))
    }
}

/// An insertable row for the `reviews` table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = reviews)]
pub struct NewReview {
    pub posting_id: i64,
    pub homeowner_id: i64,
    pub company_owner_id: i64,
    pub rating: i32,
    pub title: Option<String>,
    pub body: Option<String>,
}

/// A row from the `transition_events` table.
#[derive(Debug, Clone, Queryable)]
pub struct TransitionEventRow {
    pub event_id: i64,
    pub kind: String,
    pub posting_id: Option<i64>,
    pub bid_id: Option<i64>,
    pub review_id: Option<i64>,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
    pub created_at: Option<String>,
}

impl TransitionEventRow {
    /// Reconstructs the transition event from its persisted JSON payloads.
    ///
    /// # Errors
    ///
    /// Returns an error if any payload cannot be deserialized or the
    /// stored kind is unknown.
    pub fn into_domain(self) -> Result<TransitionEvent, PersistenceError> {
        let actor: ActorData = serde_json::from_str(&self.actor_json)?;
        let cause: CauseData = serde_json::from_str(&self.cause_json)?;
        let action: ActionData = serde_json::from_str(&self.action_json)?;
        let before: StateSnapshotData = serde_json::from_str(&self.before_snapshot_json)?;
        let after: StateSnapshotData = serde_json::from_str(&self.after_snapshot_json)?;

        let kind: EventKind = EventKind::from_str(&action.kind)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;

        Ok(TransitionEvent::new(
            Actor::new(actor.id, actor.actor_type),
            Cause::new(cause.id, cause.description),
            Action::new(kind, action.details),
            EventScope {
                posting_id: self.posting_id,
                bid_id: self.bid_id,
                review_id: self.review_id,
            },
            StateSnapshot::new(before.data),
            StateSnapshot::new(after.data),
        ))
    }
}

/// An insertable row for the `transition_events` table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = transition_events)]
pub struct NewTransitionEvent {
    pub kind: String,
    pub posting_id: Option<i64>,
    pub bid_id: Option<i64>,
    pub review_id: Option<i64>,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
}

impl NewTransitionEvent {
    /// Builds an insertable event row from a transition event, overriding
    /// the scope with the canonical IDs resolved during persistence.
    ///
    /// # Errors
    ///
    /// Returns an error if a payload cannot be serialized.
    pub fn from_event(
        event: &TransitionEvent,
        scope: EventScope,
    ) -> Result<Self, PersistenceError> {
        let actor_json: String = serde_json::to_string(&ActorData {
            id: event.actor.id.clone(),
            actor_type: event.actor.actor_type.clone(),
        })?;
        let cause_json: String = serde_json::to_string(&CauseData {
            id: event.cause.id.clone(),
            description: event.cause.description.clone(),
        })?;
        let action_json: String = serde_json::to_string(&ActionData {
            kind: event.action.kind.as_str().to_string(),
            details: event.action.details.clone(),
        })?;
        let before_snapshot_json: String = serde_json::to_string(&StateSnapshotData {
            data: event.before.data.clone(),
        })?;
        let after_snapshot_json: String = serde_json::to_string(&StateSnapshotData {
            data: event.after.data.clone(),
        })?;

        Ok(Self {
            kind: event.action.kind.as_str().to_string(),
            posting_id: scope.posting_id,
            bid_id: scope.bid_id,
            review_id: scope.review_id,
            actor_json,
            cause_json,
            action_json,
            before_snapshot_json,
            after_snapshot_json,
        })
    }
}
