// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Transition event query operations.

use crate::data_models::TransitionEventRow;
use crate::diesel_schema::transition_events;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use lawn_bid_events::TransitionEvent;

backend_fn! {

/// Query a transition event by ID.
///
/// # Backend-agnostic
///
/// This function uses Diesel DSL exclusively.
pub fn get_event(conn: &mut _, event_id: i64) -> Result<TransitionEvent, PersistenceError> {
    let row: Option<TransitionEventRow> = transition_events::table
        .filter(transition_events::event_id.eq(event_id))
        .first::<TransitionEventRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_event: {e}")))?;

    row.ok_or_else(|| PersistenceError::EventNotFound(event_id))?
        .into_domain()
}

}

backend_fn! {

/// Query the ordered transition event timeline for a posting.
///
/// Events are returned in commit order (ascending event ID).
pub fn posting_timeline(
    conn: &mut _,
    posting_id: i64,
) -> Result<Vec<TransitionEvent>, PersistenceError> {
    let rows: Vec<TransitionEventRow> = transition_events::table
        .filter(transition_events::posting_id.eq(posting_id))
        .order(transition_events::event_id.asc())
        .load::<TransitionEventRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("posting_timeline: {e}")))?;

    rows.into_iter()
        .map(TransitionEventRow::into_domain)
        .collect()
}

}
