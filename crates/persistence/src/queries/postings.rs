// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Posting query operations.
//!
//! Listing queries order by creation timestamp descending (newest
//! first), with the row ID as the tie-break. Callers needing another
//! order sort client-side.

use crate::data_models::PostingRow;
use crate::diesel_schema::{bids, posting_images, postings};
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use lawn_bid_domain::{JobStatus, Posting};

backend_fn! {

/// Query a posting by its canonical ID, including its ordered images.
///
/// # Backend-agnostic
///
/// This function uses Diesel DSL exclusively.
pub fn get_posting(conn: &mut _, posting_id: i64) -> Result<Option<Posting>, PersistenceError> {
    let row: Option<PostingRow> = postings::table
        .filter(postings::posting_id.eq(posting_id))
        .first::<PostingRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_posting: {e}")))?;

    let Some(row) = row else {
        return Ok(None);
    };

    let images: Vec<String> = posting_images::table
        .filter(posting_images::posting_id.eq(row.posting_id))
        .order(posting_images::position.asc())
        .select(posting_images::url)
        .load::<String>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("get_posting images: {e}")))?;

    row.into_domain(images).map(Some)
}

}

backend_fn! {

/// Query open postings that the given bidder has not yet bid on.
///
/// Returns postings with status `open` whose ID is not referenced by any
/// bid from `bidder_id`, newest first. Geographic filtering is applied
/// by the caller after coordinate resolution.
pub fn list_open_postings_excluding_bidder(
    conn: &mut _,
    bidder_id: i64,
) -> Result<Vec<Posting>, PersistenceError> {
    let bid_posting_ids = bids::table
        .filter(bids::bidder_id.eq(bidder_id))
        .select(bids::posting_id);

    let rows: Vec<PostingRow> = postings::table
        .filter(postings::status.eq(JobStatus::Open.as_str()))
        .filter(postings::posting_id.ne_all(bid_posting_ids))
        .order((postings::created_at.desc(), postings::posting_id.desc()))
        .load::<PostingRow>(conn)
        .map_err(|e| {
            PersistenceError::QueryFailed(format!("list_open_postings_excluding_bidder: {e}"))
        })?;

    let mut result: Vec<Posting> = Vec::with_capacity(rows.len());
    for row in rows {
        let images: Vec<String> = posting_images::table
            .filter(posting_images::posting_id.eq(row.posting_id))
            .order(posting_images::position.asc())
            .select(posting_images::url)
            .load::<String>(conn)
            .map_err(|e| PersistenceError::QueryFailed(format!("posting images: {e}")))?;
        result.push(row.into_domain(images)?);
    }
    Ok(result)
}

}

backend_fn! {

/// Query a homeowner's postings filtered by status, newest first.
///
/// An empty status set matches nothing and returns an empty list.
pub fn list_postings_for_homeowner(
    conn: &mut _,
    homeowner_id: i64,
    statuses: &[JobStatus],
) -> Result<Vec<Posting>, PersistenceError> {
    if statuses.is_empty() {
        return Ok(Vec::new());
    }

    let status_strs: Vec<&'static str> = statuses.iter().map(JobStatus::as_str).collect();

    let rows: Vec<PostingRow> = postings::table
        .filter(postings::homeowner_id.eq(homeowner_id))
        .filter(postings::status.eq_any(status_strs))
        .order((postings::created_at.desc(), postings::posting_id.desc()))
        .load::<PostingRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_postings_for_homeowner: {e}")))?;

    let mut result: Vec<Posting> = Vec::with_capacity(rows.len());
    for row in rows {
        let images: Vec<String> = posting_images::table
            .filter(posting_images::posting_id.eq(row.posting_id))
            .order(posting_images::position.asc())
            .select(posting_images::url)
            .load::<String>(conn)
            .map_err(|e| PersistenceError::QueryFailed(format!("posting images: {e}")))?;
        result.push(row.into_domain(images)?);
    }
    Ok(result)
}

}
