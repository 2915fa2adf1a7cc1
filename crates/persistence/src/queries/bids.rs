// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bid query operations.

use crate::data_models::BidRow;
use crate::diesel_schema::bids;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use lawn_bid_domain::{Bid, BidStatus};

backend_fn! {

/// Query a bid by its canonical ID.
///
/// # Backend-agnostic
///
/// This function uses Diesel DSL exclusively.
pub fn get_bid(conn: &mut _, bid_id: i64) -> Result<Option<Bid>, PersistenceError> {
    let row: Option<BidRow> = bids::table
        .filter(bids::bid_id.eq(bid_id))
        .first::<BidRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_bid: {e}")))?;

    row.map(BidRow::into_domain).transpose()
}

}

backend_fn! {

/// Query all bids referencing a posting, oldest first.
///
/// # Backend-agnostic
///
/// This function uses Diesel DSL exclusively.
pub fn bids_for_posting(conn: &mut _, posting_id: i64) -> Result<Vec<Bid>, PersistenceError> {
    let rows: Vec<BidRow> = bids::table
        .filter(bids::posting_id.eq(posting_id))
        .order(bids::bid_id.asc())
        .load::<BidRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("bids_for_posting: {e}")))?;

    rows.into_iter().map(BidRow::into_domain).collect()
}

}

backend_fn! {

/// Query a company owner's bids filtered by status, newest first.
///
/// An empty status set matches nothing and returns an empty list.
pub fn list_bids_for_user(
    conn: &mut _,
    bidder_id: i64,
    statuses: &[BidStatus],
) -> Result<Vec<Bid>, PersistenceError> {
    if statuses.is_empty() {
        return Ok(Vec::new());
    }

    let status_strs: Vec<&'static str> = statuses.iter().map(BidStatus::as_str).collect();

    let rows: Vec<BidRow> = bids::table
        .filter(bids::bidder_id.eq(bidder_id))
        .filter(bids::status.eq_any(status_strs))
        .order((bids::created_at.desc(), bids::bid_id.desc()))
        .load::<BidRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_bids_for_user: {e}")))?;

    rows.into_iter().map(BidRow::into_domain).collect()
}

}
