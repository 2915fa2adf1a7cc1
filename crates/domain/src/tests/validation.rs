// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Bid, BidAmount, BidStatus, CompanyOwner, DomainError, Homeowner, Party, PostalCode, Posting,
    Rating, Review, validate_bid_fields, validate_party_fields, validate_posting_fields,
    validate_review_fields, validate_single_accepted_bid,
};
use time::macros::date;

fn create_test_posting() -> Posting {
    Posting::new(
        7,
        String::from("Backyard sod replacement"),
        String::from("Remove old sod and lay fresh sod, roughly 80 square meters"),
        PostalCode::new("M4B 1B3"),
        vec![String::from("https://img.example/yard-1.jpg")],
        date!(2026 - 05 - 15),
    )
}

fn create_test_bid(posting_id: i64, bidder_id: i64, status: BidStatus) -> Bid {
    Bid::with_id(
        1,
        posting_id,
        bidder_id,
        BidAmount::new(50_000).unwrap(),
        String::from("Two day job including disposal"),
        date!(2026 - 05 - 20),
        status,
    )
}

#[test]
fn test_validate_posting_fields_accepts_valid_posting() {
    let posting: Posting = create_test_posting();

    let result: Result<(), DomainError> = validate_posting_fields(&posting);
    assert!(result.is_ok());
}

#[test]
fn test_validate_posting_fields_rejects_empty_title() {
    let mut posting: Posting = create_test_posting();
    posting.title = String::from("  ");

    let result: Result<(), DomainError> = validate_posting_fields(&posting);
    assert!(matches!(result, Err(DomainError::InvalidTitle(_))));
}

#[test]
fn test_validate_posting_fields_rejects_empty_description() {
    let mut posting: Posting = create_test_posting();
    posting.description = String::new();

    let result: Result<(), DomainError> = validate_posting_fields(&posting);
    assert!(matches!(result, Err(DomainError::InvalidDescription(_))));
}

#[test]
fn test_validate_posting_fields_rejects_empty_postal_code() {
    let mut posting: Posting = create_test_posting();
    posting.postal_code = PostalCode::new("   ");

    let result: Result<(), DomainError> = validate_posting_fields(&posting);
    assert!(matches!(result, Err(DomainError::InvalidPostalCode(_))));
}

#[test]
fn test_validate_posting_fields_rejects_blank_image_url() {
    let mut posting: Posting = create_test_posting();
    posting.images.push(String::from(" "));

    let result: Result<(), DomainError> = validate_posting_fields(&posting);
    assert!(matches!(
        result,
        Err(DomainError::InvalidImageUrl { position: 1 })
    ));
}

#[test]
fn test_validate_bid_fields_rejects_empty_description() {
    let mut bid: Bid = create_test_bid(1, 2, BidStatus::Pending);
    bid.description = String::from("\t");

    let result: Result<(), DomainError> = validate_bid_fields(&bid);
    assert!(matches!(result, Err(DomainError::InvalidDescription(_))));
}

#[test]
fn test_validate_review_fields_rejects_blank_title() {
    let review: Review = Review::new(
        1,
        7,
        2,
        Rating::new(4).unwrap(),
        Some(String::from("  ")),
        None,
    );

    let result: Result<(), DomainError> = validate_review_fields(&review);
    assert!(matches!(result, Err(DomainError::InvalidTitle(_))));
}

#[test]
fn test_validate_review_fields_accepts_omitted_text() {
    let review: Review = Review::new(1, 7, 2, Rating::new(5).unwrap(), None, None);

    let result: Result<(), DomainError> = validate_review_fields(&review);
    assert!(result.is_ok());
}

#[test]
fn test_validate_party_fields_rejects_empty_name() {
    let party: Party = Party::Homeowner(Homeowner::new(String::new(), PostalCode::new("M4B 1B3")));

    let result: Result<(), DomainError> = validate_party_fields(&party);
    assert!(matches!(result, Err(DomainError::InvalidPartyName(_))));
}

#[test]
fn test_validate_party_fields_accepts_valid_company_owner() {
    let party: Party = Party::CompanyOwner(CompanyOwner::new(
        String::from("Green Thumb Landscaping"),
        PostalCode::new("m5v 2t6"),
    ));

    let result: Result<(), DomainError> = validate_party_fields(&party);
    assert!(result.is_ok());
}

#[test]
fn test_single_accepted_bid_accepts_zero_accepted() {
    let bids = vec![
        create_test_bid(1, 2, BidStatus::Pending),
        create_test_bid(1, 3, BidStatus::Pending),
    ];

    assert!(validate_single_accepted_bid(1, &bids).is_ok());
}

#[test]
fn test_single_accepted_bid_accepts_one_accepted() {
    let bids = vec![
        create_test_bid(1, 2, BidStatus::Accepted),
        create_test_bid(1, 3, BidStatus::Rejected),
    ];

    assert!(validate_single_accepted_bid(1, &bids).is_ok());
}

#[test]
fn test_single_accepted_bid_rejects_two_accepted() {
    let bids = vec![
        create_test_bid(1, 2, BidStatus::Accepted),
        create_test_bid(1, 3, BidStatus::Accepted),
    ];

    let result = validate_single_accepted_bid(1, &bids);
    assert!(matches!(
        result,
        Err(DomainError::MultipleAcceptedBids { posting_id: 1 })
    ));
}
