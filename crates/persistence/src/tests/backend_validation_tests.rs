// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend validation tests for multi-database support.
//!
//! These tests validate that the persistence layer works correctly
//! across different database backends (`SQLite`, MariaDB/MySQL).
//!
//! ## Test Execution
//!
//! - `SQLite` tests run normally via `cargo test`
//! - MariaDB/MySQL tests are marked `#[ignore]` and run only via `cargo xtask test-mariadb`
//!
//! ## Infrastructure Requirements
//!
//! `MariaDB` tests require:
//! - `DATABASE_URL` environment variable (set by xtask)
//! - `LAWNBID_TEST_BACKEND=mariadb` environment variable
//! - Running `MariaDB` instance (provisioned by xtask)
//!
//! Tests fail fast if required infrastructure is missing.
//!
//! ## What These Tests Validate
//!
//! These tests focus on **infrastructure and schema compatibility**, not
//! business logic:
//! - Schema creation and migration application
//! - Database constraint enforcement (FK, UNIQUE, CHECK)
//! - Transaction and rollback semantics
//! - Backend-specific SQL compatibility
//!
//! Business logic and domain rules are validated by the standard test
//! suite running against `SQLite`.

use std::env;

use crate::tests::{
    accept_bid, create_company_owner, create_homeowner, create_posting, submit_bid,
};
use crate::{Persistence, PersistenceError};
use lawn_bid::PostingState;
use lawn_bid_domain::{BidStatus, JobStatus};

/// Helper to get the `MariaDB` connection URL from environment.
///
/// # Panics
///
/// Panics with a descriptive message if the required environment
/// variables are missing, so a misconfigured run fails fast instead of
/// silently skipping.
fn mariadb_url() -> String {
    let backend = env::var("LAWNBID_TEST_BACKEND").unwrap_or_default();
    assert_eq!(
        backend, "mariadb",
        "backend validation tests must run via `cargo xtask test-mariadb`"
    );
    env::var("DATABASE_URL").expect("DATABASE_URL must be set by xtask for MariaDB tests")
}

fn mariadb_persistence() -> Persistence {
    Persistence::new_with_mysql(&mariadb_url()).expect("connect to MariaDB")
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mariadb_migrations_apply_and_fk_enforced() {
    let mut persistence: Persistence = mariadb_persistence();
    persistence
        .verify_foreign_key_enforcement()
        .expect("foreign keys enforced on MariaDB");
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mariadb_lifecycle_round_trip() {
    let mut persistence: Persistence = mariadb_persistence();
    let homeowner: i64 = create_homeowner(&mut persistence, "Dana (mariadb)");
    let company: i64 = create_company_owner(&mut persistence, "Green Thumb (mariadb)");

    let posting_id: i64 = create_posting(&mut persistence, homeowner, "Backend check");
    let bid: i64 = submit_bid(&mut persistence, posting_id, company, 50_000);
    accept_bid(&mut persistence, posting_id, bid, homeowner);

    let state: PostingState = persistence.load_posting_state(posting_id).unwrap();
    assert_eq!(state.posting.status, JobStatus::InProgress);
    assert_eq!(state.find_bid(bid).unwrap().status, BidStatus::Accepted);
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mariadb_conflict_rolls_back() {
    let mut persistence: Persistence = mariadb_persistence();
    let homeowner: i64 = create_homeowner(&mut persistence, "Sam (mariadb)");
    let company_one: i64 = create_company_owner(&mut persistence, "Lawn Kings (mariadb)");
    let company_two: i64 = create_company_owner(&mut persistence, "Fresh Cuts (mariadb)");

    let posting_id: i64 = create_posting(&mut persistence, homeowner, "Conflict check");
    let bid_one: i64 = submit_bid(&mut persistence, posting_id, company_one, 40_000);
    let bid_two: i64 = submit_bid(&mut persistence, posting_id, company_two, 45_000);

    let stale: PostingState = persistence.load_posting_state(posting_id).unwrap();
    accept_bid(&mut persistence, posting_id, bid_one, homeowner);

    let late = lawn_bid::apply(
        &stale,
        lawn_bid::Command::AcceptBid { bid_id: bid_two },
        crate::tests::homeowner_actor(homeowner),
        crate::tests::create_test_cause(),
    )
    .unwrap();
    let result = persistence.persist_transition(&late);
    assert!(matches!(result, Err(PersistenceError::Conflict { .. })));

    let state: PostingState = persistence.load_posting_state(posting_id).unwrap();
    assert_eq!(state.find_bid(bid_one).unwrap().status, BidStatus::Accepted);
    assert_eq!(state.find_bid(bid_two).unwrap().status, BidStatus::Rejected);
}
