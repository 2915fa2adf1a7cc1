// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Atomic persistence of lifecycle transitions.
//!
//! A transition's effect set (the posting row, every bid status it
//! touched, confirmation upserts, a new review, and the transition event
//! itself) is applied inside one database transaction. The posting's
//! `version` column is the optimistic concurrency token: the update
//! commits only against the version the transition was computed from,
//! and a miss rolls the whole batch back as a `Conflict`.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use num_traits::ToPrimitive;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::{
    NewBid, NewConfirmation, NewPosting, NewPostingImage, NewReview, NewTransitionEvent,
    format_date,
};
use crate::diesel_schema::{
    bids, completion_confirmations, posting_images, postings, reviews, transition_events,
};
use crate::error::PersistenceError;
use lawn_bid::TransitionResult;
use lawn_bid_events::EventScope;

/// The outcome of persisting a posting creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistCreationResult {
    /// The canonical ID assigned to the new posting.
    pub posting_id: i64,
    /// The event ID assigned to the creation event.
    pub event_id: i64,
}

/// The outcome of persisting a lifecycle transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistTransitionResult {
    /// The event ID assigned to the transition event.
    pub event_id: i64,
    /// The canonical ID of the bid the transition created, if any.
    pub bid_id: Option<i64>,
    /// The canonical ID of the review the transition created, if any.
    pub review_id: Option<i64>,
}

backend_fn! {

/// Persist a posting creation: the posting row, its images, and the
/// creation event, atomically.
///
/// # Returns
///
/// A `PersistCreationResult` with the generated posting and event IDs.
///
/// # Errors
///
/// Returns an error if any write fails; nothing is persisted in that case.
pub fn persist_creation(
    conn: &mut _,
    result: &TransitionResult,
) -> Result<PersistCreationResult, PersistenceError> {
    conn.transaction(|conn| {
        let posting = &result.new_state.posting;

        let record = NewPosting {
            homeowner_id: posting.homeowner_id,
            title: posting.title.clone(),
            description: posting.description.clone(),
            postal_code: posting.postal_code.value().to_string(),
            estimated_start_date: format_date(posting.estimated_start_date)?,
            status: posting.status.as_str().to_string(),
            version: posting.version,
        };

        diesel::insert_into(postings::table)
            .values(&record)
            .execute(conn)?;
        let posting_id: i64 = conn.get_last_insert_rowid()?;

        for (index, url) in posting.images.iter().enumerate() {
            let position: i32 = index.to_i32().ok_or_else(|| {
                PersistenceError::ReconstructionError(format!(
                    "image position {index} out of range"
                ))
            })?;
            let image = NewPostingImage {
                posting_id,
                position,
                url: url.clone(),
            };
            diesel::insert_into(posting_images::table)
                .values(&image)
                .execute(conn)?;
        }

        let event_record =
            NewTransitionEvent::from_event(&result.event, EventScope::posting(posting_id))?;
        diesel::insert_into(transition_events::table)
            .values(&event_record)
            .execute(conn)?;
        let event_id: i64 = conn.get_last_insert_rowid()?;

        info!(posting_id, event_id, "Persisted posting creation");

        Ok(PersistCreationResult {
            posting_id,
            event_id,
        })
    })
}

}

backend_fn! {

/// Persist a lifecycle transition against an existing posting aggregate.
///
/// The posting row is updated with a `WHERE version = expected` guard and
/// its version bumped; bid statuses are synced from the new state; a new
/// bid or review is inserted if the transition created one; confirmation
/// records are upserted idempotently; and the transition event is
/// appended. All of it commits together or not at all.
///
/// # Returns
///
/// A `PersistTransitionResult` with the generated event ID and the IDs of
/// any entities the transition created.
///
/// # Errors
///
/// Returns `PersistenceError::Conflict` if the posting changed underneath
/// the transition (stale version), or another error if a write fails. In
/// every failure case the database is left untouched.
#[allow(clippy::too_many_lines)]
pub fn persist_transition(
    conn: &mut _,
    result: &TransitionResult,
) -> Result<PersistTransitionResult, PersistenceError> {
    conn.transaction(|conn| {
        let posting = &result.new_state.posting;
        let posting_id: i64 = posting.posting_id().ok_or_else(|| {
            PersistenceError::ReconstructionError(String::from(
                "transition references an unpersisted posting",
            ))
        })?;
        let expected_version: i64 = posting.version;

        // Optimistic concurrency check: only commit against the version
        // this transition was computed from.
        let updated: usize = diesel::update(
            postings::table
                .filter(postings::posting_id.eq(posting_id))
                .filter(postings::version.eq(expected_version)),
        )
        .set((
            postings::status.eq(posting.status.as_str()),
            postings::version.eq(expected_version + 1),
        ))
        .execute(conn)?;

        if updated == 0 {
            return Err(PersistenceError::Conflict {
                posting_id,
                expected_version,
            });
        }

        // Sync bid statuses from the new state; insert the bid the
        // transition created, if any.
        let mut created_bid_id: Option<i64> = None;
        for bid in &result.new_state.bids {
            if let Some(bid_id) = bid.bid_id() {
                diesel::update(bids::table.filter(bids::bid_id.eq(bid_id)))
                    .set(bids::status.eq(bid.status.as_str()))
                    .execute(conn)?;
            } else {
                let record = NewBid {
                    posting_id: bid.posting_id,
                    bidder_id: bid.bidder_id,
                    amount_cents: bid.amount.cents(),
                    description: bid.description.clone(),
                    proposed_date: format_date(bid.proposed_date)?,
                    status: bid.status.as_str().to_string(),
                };
                diesel::insert_into(bids::table)
                    .values(&record)
                    .execute(conn)?;
                created_bid_id = Some(conn.get_last_insert_rowid()?);
                debug!(posting_id, bid_id = ?created_bid_id, "Inserted new bid");
            }
        }

        // Confirmation upserts are idempotent via the unique
        // (posting_id, company_owner_id) key.
        for confirmation in &result.new_state.confirmations {
            let record = NewConfirmation {
                posting_id: confirmation.posting_id,
                company_owner_id: confirmation.company_owner_id,
                confirmed: i32::from(confirmation.confirmed),
            };
            diesel::insert_or_ignore_into(completion_confirmations::table)
                .values(&record)
                .execute(conn)?;
        }

        // Insert the review the transition created, if any.
        let mut created_review_id: Option<i64> = None;
        for review in &result.new_state.reviews {
            if review.review_id().is_none() {
                let record = NewReview {
                    posting_id: review.posting_id,
                    homeowner_id: review.homeowner_id,
                    company_owner_id: review.company_owner_id,
                    rating: i32::from(review.rating.value()),
                    title: review.title.clone(),
                    body: review.body.clone(),
                };
                diesel::insert_into(reviews::table)
                    .values(&record)
                    .execute(conn)?;
                created_review_id = Some(conn.get_last_insert_rowid()?);
                debug!(posting_id, review_id = ?created_review_id, "Inserted new review");
            }
        }

        // Append the event with the scope resolved to canonical IDs.
        let mut scope: EventScope = result.event.scope;
        scope.posting_id = Some(posting_id);
        if scope.bid_id.is_none() {
            scope.bid_id = created_bid_id;
        }
        if scope.review_id.is_none() {
            scope.review_id = created_review_id;
        }
        let event_record = NewTransitionEvent::from_event(&result.event, scope)?;
        diesel::insert_into(transition_events::table)
            .values(&event_record)
            .execute(conn)?;
        let event_id: i64 = conn.get_last_insert_rowid()?;

        info!(
            event_id,
            posting_id,
            kind = result.event.action.kind.as_str(),
            "Persisted transition"
        );

        Ok(PersistTransitionResult {
            event_id,
            bid_id: created_bid_id,
            review_id: created_review_id,
        })
    })
}

}
