// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Party query operations.

use crate::data_models::PartyRow;
use crate::diesel_schema::parties;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use lawn_bid_domain::Party;

backend_fn! {

/// Query a party by its canonical ID.
///
/// # Backend-agnostic
///
/// This function uses Diesel DSL exclusively.
pub fn get_party(conn: &mut _, party_id: i64) -> Result<Option<Party>, PersistenceError> {
    let row: Option<PartyRow> = parties::table
        .filter(parties::party_id.eq(party_id))
        .first::<PartyRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_party: {e}")))?;

    row.map(PartyRow::into_domain).transpose()
}

}
