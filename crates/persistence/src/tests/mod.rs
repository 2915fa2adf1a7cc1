// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod backend_validation_tests;

use crate::Persistence;
use lawn_bid::{Command, PostingState, TransitionResult, apply, apply_create};
use lawn_bid_domain::{CompanyOwner, Homeowner, Party, PostalCode};
use lawn_bid_events::{Actor, Cause};
use time::macros::date;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn homeowner_actor(homeowner_id: i64) -> Actor {
    Actor::new(homeowner_id.to_string(), String::from("homeowner"))
}

pub fn company_actor(company_owner_id: i64) -> Actor {
    Actor::new(company_owner_id.to_string(), String::from("companyowner"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

pub fn create_homeowner(persistence: &mut Persistence, name: &str) -> i64 {
    persistence
        .create_party(&Party::Homeowner(Homeowner::new(
            String::from(name),
            PostalCode::new("M4B 1B3"),
        )))
        .expect("create homeowner")
}

pub fn create_company_owner(persistence: &mut Persistence, name: &str) -> i64 {
    persistence
        .create_party(&Party::CompanyOwner(CompanyOwner::new(
            String::from(name),
            PostalCode::new("M5V 2T6"),
        )))
        .expect("create company owner")
}

pub fn create_posting(persistence: &mut Persistence, homeowner_id: i64, title: &str) -> i64 {
    let result: TransitionResult = apply_create(
        Command::CreatePosting {
            homeowner_id,
            title: String::from(title),
            description: String::from("Remove old sod and lay fresh sod"),
            postal_code: String::from("M4B 1B3"),
            images: vec![String::from("https://img.example/yard-1.jpg")],
            estimated_start_date: date!(2026 - 05 - 15),
        },
        homeowner_actor(homeowner_id),
        create_test_cause(),
    )
    .expect("creation transition");

    persistence
        .persist_creation(&result)
        .expect("persist creation")
        .posting_id
}

pub fn submit_bid(
    persistence: &mut Persistence,
    posting_id: i64,
    bidder_id: i64,
    amount_cents: i64,
) -> i64 {
    let state: PostingState = persistence
        .load_posting_state(posting_id)
        .expect("load state");
    let result: TransitionResult = apply(
        &state,
        Command::SubmitBid {
            posting_id,
            bidder_id,
            amount_cents,
            description: String::from("Two day job including disposal"),
            proposed_date: date!(2026 - 05 - 20),
        },
        company_actor(bidder_id),
        create_test_cause(),
    )
    .expect("submit bid transition");

    persistence
        .persist_transition(&result)
        .expect("persist bid")
        .bid_id
        .expect("created bid id")
}

pub fn accept_bid(persistence: &mut Persistence, posting_id: i64, bid_id: i64, actor_id: i64) {
    let state: PostingState = persistence
        .load_posting_state(posting_id)
        .expect("load state");
    let result: TransitionResult = apply(
        &state,
        Command::AcceptBid { bid_id },
        homeowner_actor(actor_id),
        create_test_cause(),
    )
    .expect("accept transition");

    persistence
        .persist_transition(&result)
        .expect("persist accept");
}

pub fn confirm_completion(persistence: &mut Persistence, posting_id: i64, company_owner_id: i64) {
    let state: PostingState = persistence
        .load_posting_state(posting_id)
        .expect("load state");
    let result: TransitionResult = apply(
        &state,
        Command::ConfirmCompletion {
            posting_id,
            company_owner_id,
        },
        company_actor(company_owner_id),
        create_test_cause(),
    )
    .expect("confirm transition");

    persistence
        .persist_transition(&result)
        .expect("persist confirm");
}

pub fn close_job(persistence: &mut Persistence, posting_id: i64, winning_bid_id: i64, actor_id: i64) {
    let state: PostingState = persistence
        .load_posting_state(posting_id)
        .expect("load state");
    let result: TransitionResult = apply(
        &state,
        Command::CloseJob {
            posting_id,
            winning_bid_id,
        },
        homeowner_actor(actor_id),
        create_test_cause(),
    )
    .expect("close transition");

    persistence
        .persist_transition(&result)
        .expect("persist close");
}

pub fn submit_review(
    persistence: &mut Persistence,
    posting_id: i64,
    homeowner_id: i64,
    rating: i64,
) -> i64 {
    let state: PostingState = persistence
        .load_posting_state(posting_id)
        .expect("load state");
    let result: TransitionResult = apply(
        &state,
        Command::SubmitReview {
            posting_id,
            homeowner_id,
            rating,
            title: Some(String::from("Great work")),
            body: None,
        },
        homeowner_actor(homeowner_id),
        create_test_cause(),
    )
    .expect("review transition");

    persistence
        .persist_transition(&result)
        .expect("persist review")
        .review_id
        .expect("created review id")
}
