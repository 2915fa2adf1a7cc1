// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Party mutation operations.

use crate::backend::PersistenceBackend;
use crate::data_models::NewParty;
use crate::diesel_schema::parties;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use lawn_bid_domain::Party;

backend_fn! {

/// Insert a new party record.
///
/// # Backend-agnostic
///
/// This function uses Diesel DSL exclusively, plus the backend helper
/// for the generated row ID.
pub fn insert_party(conn: &mut _, party: &Party) -> Result<i64, PersistenceError> {
    let (display_name, postal_code): (&str, &str) = match party {
        Party::Homeowner(h) => (h.name.as_str(), h.postal_code.value()),
        Party::CompanyOwner(c) => (c.company_name.as_str(), c.postal_code.value()),
    };

    let record = NewParty {
        kind: party.kind_str().to_string(),
        display_name: display_name.to_string(),
        postal_code: postal_code.to_string(),
    };

    diesel::insert_into(parties::table)
        .values(&record)
        .execute(conn)?;

    conn.get_last_insert_rowid()
}

}
