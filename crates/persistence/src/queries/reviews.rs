// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Review query operations and rating aggregation.

use crate::data_models::ReviewRow;
use crate::diesel_schema::reviews;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use lawn_bid_domain::Review;
use num_traits::ToPrimitive;

backend_fn! {

/// Query all reviews written about a company owner, newest first.
///
/// # Backend-agnostic
///
/// This function uses Diesel DSL exclusively.
pub fn list_reviews_for_company(
    conn: &mut _,
    company_owner_id: i64,
) -> Result<Vec<Review>, PersistenceError> {
    let rows: Vec<ReviewRow> = reviews::table
        .filter(reviews::company_owner_id.eq(company_owner_id))
        .order((reviews::created_at.desc(), reviews::review_id.desc()))
        .load::<ReviewRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_reviews_for_company: {e}")))?;

    rows.into_iter().map(ReviewRow::into_domain).collect()
}

}

backend_fn! {

/// Compute a company owner's mean rating across all of their reviews.
///
/// Returns `None` when the company owner has no reviews yet.
pub fn average_rating_for_company(
    conn: &mut _,
    company_owner_id: i64,
) -> Result<Option<f64>, PersistenceError> {
    let ratings: Vec<i32> = reviews::table
        .filter(reviews::company_owner_id.eq(company_owner_id))
        .select(reviews::rating)
        .load::<i32>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("average_rating_for_company: {e}")))?;

    if ratings.is_empty() {
        return Ok(None);
    }

    let total: i64 = ratings.iter().map(|rating| i64::from(*rating)).sum();
    let count: f64 = ratings.len().to_f64().ok_or_else(|| {
        PersistenceError::ReconstructionError(String::from("review count out of range"))
    })?;
    let sum: f64 = total.to_f64().ok_or_else(|| {
        PersistenceError::ReconstructionError(String::from("rating sum out of range"))
    })?;

    Ok(Some(sum / count))
}

}
