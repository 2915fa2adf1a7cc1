// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Command, PostingState, TransitionResult, apply};
use lawn_bid_domain::{Bid, BidAmount, BidStatus, JobStatus, PostalCode, Posting};
use lawn_bid_events::{Actor, Cause};
use time::macros::date;

/// The posting id used by every test fixture.
pub const POSTING_ID: i64 = 12;
/// The fixture homeowner who owns the posting.
pub const HOMEOWNER_ID: i64 = 7;
/// The fixture company owner behind bid B1.
pub const BIDDER_ONE: i64 = 21;
/// The fixture company owner behind bid B2.
pub const BIDDER_TWO: i64 = 22;
/// The fixture bid id for B1.
pub const BID_ONE: i64 = 101;
/// The fixture bid id for B2.
pub const BID_TWO: i64 = 102;

pub fn create_test_actor() -> Actor {
    Actor::new(HOMEOWNER_ID.to_string(), String::from("homeowner"))
}

pub fn create_company_actor(company_owner_id: i64) -> Actor {
    Actor::new(company_owner_id.to_string(), String::from("companyowner"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("User request"))
}

pub fn create_test_posting(status: JobStatus) -> Posting {
    Posting::with_id(
        POSTING_ID,
        HOMEOWNER_ID,
        String::from("Backyard sod replacement"),
        String::from("Remove old sod and lay fresh sod, roughly 80 square meters"),
        PostalCode::new("M4B 1B3"),
        vec![String::from("https://img.example/yard-1.jpg")],
        date!(2026 - 05 - 15),
        status,
        1,
    )
}

pub fn create_test_bid(bid_id: i64, bidder_id: i64, cents: i64, status: BidStatus) -> Bid {
    Bid::with_id(
        bid_id,
        POSTING_ID,
        bidder_id,
        BidAmount::new(cents).unwrap(),
        String::from("Two day job including disposal"),
        date!(2026 - 05 - 20),
        status,
    )
}

/// An open posting with two pending bids: B1 (500.00) and B2 (600.00).
pub fn create_open_state_with_two_bids() -> PostingState {
    let mut state: PostingState = PostingState::new(create_test_posting(JobStatus::Open));
    state.bids.push(create_test_bid(
        BID_ONE,
        BIDDER_ONE,
        50_000,
        BidStatus::Pending,
    ));
    state.bids.push(create_test_bid(
        BID_TWO,
        BIDDER_TWO,
        60_000,
        BidStatus::Pending,
    ));
    state
}

/// The state after B1 was accepted: posting in progress, B2 rejected.
pub fn create_in_progress_state() -> PostingState {
    let state: PostingState = create_open_state_with_two_bids();
    let result: TransitionResult = apply(
        &state,
        Command::AcceptBid { bid_id: BID_ONE },
        create_test_actor(),
        create_test_cause(),
    )
    .expect("acceptance fixture");
    result.new_state
}

/// The state after B1's bidder confirmed completion.
pub fn create_confirmed_state() -> PostingState {
    let state: PostingState = create_in_progress_state();
    let result: TransitionResult = apply(
        &state,
        Command::ConfirmCompletion {
            posting_id: POSTING_ID,
            company_owner_id: BIDDER_ONE,
        },
        create_company_actor(BIDDER_ONE),
        create_test_cause(),
    )
    .expect("confirmation fixture");
    result.new_state
}

/// The state after the confirmed job was closed.
pub fn create_completed_state() -> PostingState {
    let state: PostingState = create_confirmed_state();
    let result: TransitionResult = apply(
        &state,
        Command::CloseJob {
            posting_id: POSTING_ID,
            winning_bid_id: BID_ONE,
        },
        create_test_actor(),
        create_test_cause(),
    )
    .expect("close fixture");
    result.new_state
}
