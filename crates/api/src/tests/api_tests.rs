// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Happy-path tests for the API boundary.

use crate::tests::helpers::{
    accept_test_bid, close_test_job, confirm_test_completion, create_posting_request,
    create_test_cause, create_test_persistence, create_test_posting, register_company_owner,
    register_homeowner, submit_test_bid, submit_test_review,
};
use crate::{
    ActorIdentity, ConfirmCompletionRequest, confirm_completion, create_posting, get_posting,
    get_event_timeline,
};
use lawn_bid_events::EventKind;
use lawn_bid_persistence::Persistence;

#[test]
fn test_create_posting_returns_open_posting_with_event() {
    let mut persistence: Persistence = create_test_persistence();
    let homeowner: ActorIdentity = register_homeowner(&mut persistence, "Dana");

    let result = create_posting(
        &mut persistence,
        create_posting_request("M4B 1B3"),
        &homeowner,
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(result.response.status, "open");
    assert_eq!(result.event.action.kind, EventKind::PostingCreated);
    assert_eq!(
        result.event.scope.posting_id,
        Some(result.response.posting_id)
    );
    assert_eq!(result.event.actor.id, homeowner.id().to_string());
}

#[test]
fn test_posting_detail_reflects_aggregate() {
    let mut persistence: Persistence = create_test_persistence();
    let homeowner: ActorIdentity = register_homeowner(&mut persistence, "Dana");
    let company: ActorIdentity = register_company_owner(&mut persistence, "Green Thumb");

    let posting_id: i64 = create_test_posting(&mut persistence, &homeowner, "M4B 1B3");
    let bid_id: i64 = submit_test_bid(&mut persistence, posting_id, &company, 50_000);

    let detail = get_posting(&mut persistence, posting_id).unwrap();
    assert_eq!(detail.posting.posting_id, posting_id);
    assert_eq!(detail.posting.status, "open");
    assert_eq!(detail.bids.len(), 1);
    assert_eq!(detail.bids[0].bid_id, bid_id);
    assert_eq!(detail.bids[0].status, "pending");
    assert!(!detail.ready_to_close);
}

#[test]
fn test_accept_bid_reports_rejected_siblings() {
    let mut persistence: Persistence = create_test_persistence();
    let homeowner: ActorIdentity = register_homeowner(&mut persistence, "Dana");
    let company_one: ActorIdentity = register_company_owner(&mut persistence, "Green Thumb");
    let company_two: ActorIdentity = register_company_owner(&mut persistence, "Lawn Kings");

    let posting_id: i64 = create_test_posting(&mut persistence, &homeowner, "M4B 1B3");
    let bid_one: i64 = submit_test_bid(&mut persistence, posting_id, &company_one, 50_000);
    let bid_two: i64 = submit_test_bid(&mut persistence, posting_id, &company_two, 60_000);

    let result = accept_test_bid(&mut persistence, bid_one, &homeowner);

    assert_eq!(result.response.posting_id, posting_id);
    assert_eq!(result.response.accepted_bid_id, bid_one);
    assert_eq!(result.response.rejected_bid_ids, vec![bid_two]);
    assert_eq!(result.event.action.kind, EventKind::BidAccepted);
    assert_eq!(result.event.scope.bid_id, Some(bid_one));
}

#[test]
fn test_confirmation_reports_idempotent_repeat() {
    let mut persistence: Persistence = create_test_persistence();
    let homeowner: ActorIdentity = register_homeowner(&mut persistence, "Dana");
    let company: ActorIdentity = register_company_owner(&mut persistence, "Green Thumb");

    let posting_id: i64 = create_test_posting(&mut persistence, &homeowner, "M4B 1B3");
    let bid_id: i64 = submit_test_bid(&mut persistence, posting_id, &company, 50_000);
    accept_test_bid(&mut persistence, bid_id, &homeowner);

    let first = confirm_completion(
        &mut persistence,
        ConfirmCompletionRequest { posting_id },
        &company,
        create_test_cause(),
    )
    .unwrap();
    assert!(!first.response.already_confirmed);

    let second = confirm_completion(
        &mut persistence,
        ConfirmCompletionRequest { posting_id },
        &company,
        create_test_cause(),
    )
    .unwrap();
    assert!(second.response.already_confirmed);
    assert_eq!(second.new_state.confirmations.len(), 1);
}

#[test]
fn test_full_lifecycle_through_api() {
    let mut persistence: Persistence = create_test_persistence();
    let homeowner: ActorIdentity = register_homeowner(&mut persistence, "Dana");
    let company: ActorIdentity = register_company_owner(&mut persistence, "Green Thumb");

    let posting_id: i64 = create_test_posting(&mut persistence, &homeowner, "M4B 1B3");
    let bid_id: i64 = submit_test_bid(&mut persistence, posting_id, &company, 50_000);
    accept_test_bid(&mut persistence, bid_id, &homeowner);
    confirm_test_completion(&mut persistence, posting_id, &company);

    // Once confirmed, the detail view reports the posting closeable.
    let detail = get_posting(&mut persistence, posting_id).unwrap();
    assert!(detail.ready_to_close);

    close_test_job(&mut persistence, posting_id, bid_id, &homeowner);
    let review = submit_test_review(&mut persistence, posting_id, &homeowner, 5);
    assert_eq!(review.response.rating, 5);
    assert_eq!(review.event.action.kind, EventKind::ReviewSubmitted);

    let detail = get_posting(&mut persistence, posting_id).unwrap();
    assert_eq!(detail.posting.status, "completed");
    assert_eq!(detail.bids[0].status, "completed");
    assert_eq!(detail.reviews.len(), 1);

    let timeline = get_event_timeline(&mut persistence, posting_id).unwrap();
    let kinds: Vec<&str> = timeline
        .events
        .iter()
        .map(|event| event.kind.as_str())
        .collect();
    assert_eq!(
        kinds,
        vec![
            "PostingCreated",
            "BidSubmitted",
            "BidAccepted",
            "JobConfirmed",
            "JobClosed",
            "ReviewSubmitted",
        ]
    );
}
