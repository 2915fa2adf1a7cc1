// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Posting aggregate reconstruction.
//!
//! The lifecycle engine operates on the full posting aggregate: the
//! posting plus every bid, confirmation, and review referencing it.
//! This module rebuilds that aggregate from the canonical tables.

use crate::data_models::{BidRow, ConfirmationRow, PostingRow, ReviewRow};
use crate::diesel_schema::{bids, completion_confirmations, posting_images, postings, reviews};
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use lawn_bid::PostingState;
use lawn_bid_domain::{Bid, CompletionConfirmation, Posting, Review};

backend_fn! {

/// Load the full aggregate state for a posting.
///
/// The loaded posting carries its current `version`, which later guards
/// the commit of any transition computed from this state.
///
/// # Errors
///
/// Returns `PersistenceError::PostingNotFound` if the posting does not
/// exist, or a reconstruction error if stored data cannot be parsed.
pub fn load_posting_state(
    conn: &mut _,
    posting_id: i64,
) -> Result<PostingState, PersistenceError> {
    let row: PostingRow = postings::table
        .filter(postings::posting_id.eq(posting_id))
        .first::<PostingRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("load_posting_state: {e}")))?
        .ok_or_else(|| PersistenceError::PostingNotFound(posting_id))?;

    let images: Vec<String> = posting_images::table
        .filter(posting_images::posting_id.eq(posting_id))
        .order(posting_images::position.asc())
        .select(posting_images::url)
        .load::<String>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("load_posting_state images: {e}")))?;

    let posting: Posting = row.into_domain(images)?;

    let bid_rows: Vec<BidRow> = bids::table
        .filter(bids::posting_id.eq(posting_id))
        .order(bids::bid_id.asc())
        .load::<BidRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("load_posting_state bids: {e}")))?;
    let posting_bids: Vec<Bid> = bid_rows
        .into_iter()
        .map(BidRow::into_domain)
        .collect::<Result<Vec<Bid>, PersistenceError>>()?;

    let confirmation_rows: Vec<ConfirmationRow> = completion_confirmations::table
        .filter(completion_confirmations::posting_id.eq(posting_id))
        .order(completion_confirmations::confirmation_id.asc())
        .load::<ConfirmationRow>(conn)
        .map_err(|e| {
            PersistenceError::QueryFailed(format!("load_posting_state confirmations: {e}"))
        })?;
    let confirmations: Vec<CompletionConfirmation> = confirmation_rows
        .into_iter()
        .map(ConfirmationRow::into_domain)
        .collect();

    let review_rows: Vec<ReviewRow> = reviews::table
        .filter(reviews::posting_id.eq(posting_id))
        .order(reviews::review_id.asc())
        .load::<ReviewRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("load_posting_state reviews: {e}")))?;
    let posting_reviews: Vec<Review> = review_rows
        .into_iter()
        .map(ReviewRow::into_domain)
        .collect::<Result<Vec<Review>, PersistenceError>>()?;

    Ok(PostingState {
        posting,
        bids: posting_bids,
        confirmations,
        reviews: posting_reviews,
    })
}

}
