// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    AcceptBidRequest, AcceptBidResponse, ActorIdentity, ApiResult, CloseJobRequest,
    ConfirmCompletionRequest, CreatePostingRequest, RegisterPartyRequest, SubmitBidRequest,
    SubmitReviewRequest, SubmitReviewResponse, accept_bid, close_completed_job,
    confirm_completion, create_posting, register_party, submit_bid, submit_review,
};
use lawn_bid_events::Cause;
use lawn_bid_persistence::Persistence;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("User request"))
}

pub fn register_homeowner(persistence: &mut Persistence, name: &str) -> ActorIdentity {
    let response = register_party(
        persistence,
        RegisterPartyRequest {
            kind: String::from("homeowner"),
            name: String::from(name),
            postal_code: String::from("M4B 1B3"),
        },
    )
    .expect("register homeowner");
    ActorIdentity::Homeowner {
        id: response.party_id,
    }
}

pub fn register_company_owner(persistence: &mut Persistence, name: &str) -> ActorIdentity {
    let response = register_party(
        persistence,
        RegisterPartyRequest {
            kind: String::from("companyowner"),
            name: String::from(name),
            postal_code: String::from("M5V 2T6"),
        },
    )
    .expect("register company owner");
    ActorIdentity::CompanyOwner {
        id: response.party_id,
    }
}

pub fn create_posting_request(postal_code: &str) -> CreatePostingRequest {
    CreatePostingRequest {
        title: String::from("Backyard sod replacement"),
        description: String::from("Remove old sod and lay fresh sod"),
        postal_code: String::from(postal_code),
        images: vec![String::from("https://img.example/yard-1.jpg")],
        estimated_start_date: String::from("2026-05-15"),
    }
}

pub fn create_test_posting(
    persistence: &mut Persistence,
    homeowner: &ActorIdentity,
    postal_code: &str,
) -> i64 {
    create_posting(
        persistence,
        create_posting_request(postal_code),
        homeowner,
        create_test_cause(),
    )
    .expect("create posting")
    .response
    .posting_id
}

pub fn submit_test_bid(
    persistence: &mut Persistence,
    posting_id: i64,
    bidder: &ActorIdentity,
    amount_cents: i64,
) -> i64 {
    submit_bid(
        persistence,
        SubmitBidRequest {
            posting_id,
            amount_cents,
            description: String::from("Two day job including disposal"),
            proposed_date: String::from("2026-05-20"),
        },
        bidder,
        create_test_cause(),
    )
    .expect("submit bid")
    .response
    .bid_id
}

pub fn accept_test_bid(
    persistence: &mut Persistence,
    bid_id: i64,
    homeowner: &ActorIdentity,
) -> ApiResult<AcceptBidResponse> {
    accept_bid(
        persistence,
        AcceptBidRequest { bid_id },
        homeowner,
        create_test_cause(),
    )
    .expect("accept bid")
}

pub fn confirm_test_completion(
    persistence: &mut Persistence,
    posting_id: i64,
    company_owner: &ActorIdentity,
) {
    confirm_completion(
        persistence,
        ConfirmCompletionRequest { posting_id },
        company_owner,
        create_test_cause(),
    )
    .expect("confirm completion");
}

pub fn close_test_job(
    persistence: &mut Persistence,
    posting_id: i64,
    winning_bid_id: i64,
    homeowner: &ActorIdentity,
) {
    close_completed_job(
        persistence,
        CloseJobRequest {
            posting_id,
            winning_bid_id,
        },
        homeowner,
        create_test_cause(),
    )
    .expect("close job");
}

pub fn submit_test_review(
    persistence: &mut Persistence,
    posting_id: i64,
    homeowner: &ActorIdentity,
    rating: i64,
) -> ApiResult<SubmitReviewResponse> {
    submit_review(
        persistence,
        SubmitReviewRequest {
            posting_id,
            rating,
            title: Some(String::from("Great work")),
            body: None,
        },
        homeowner,
        create_test_cause(),
    )
    .expect("submit review")
}
