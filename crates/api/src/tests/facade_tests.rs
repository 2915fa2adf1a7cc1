// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the read-side façade: listings, filters, and projections.

use crate::tests::helpers::{
    accept_test_bid, close_test_job, confirm_test_completion, create_test_persistence,
    create_test_posting, register_company_owner, register_homeowner, submit_test_bid,
    submit_test_review,
};
use crate::{
    ActorIdentity, ApiError, ListBidsForUserRequest, ListOpenPostingsRequest,
    ListPostingsWithBidsRequest, StaticGeocoder, list_bids_for_user, list_company_reviews,
    list_open_postings, list_postings_with_bids,
};
use lawn_bid_domain::Coordinate;
use lawn_bid_persistence::Persistence;

fn plain_listing_request(bidder_id: i64) -> ListOpenPostingsRequest {
    ListOpenPostingsRequest {
        bidder_id,
        radius_km: None,
        center_latitude_deg: None,
        center_longitude_deg: None,
    }
}

#[test]
fn test_open_listing_excludes_already_bid_postings() {
    let mut persistence: Persistence = create_test_persistence();
    let homeowner: ActorIdentity = register_homeowner(&mut persistence, "Dana");
    let company: ActorIdentity = register_company_owner(&mut persistence, "Green Thumb");

    let fresh: i64 = create_test_posting(&mut persistence, &homeowner, "M4B 1B3");
    let already_bid: i64 = create_test_posting(&mut persistence, &homeowner, "M4B 1B3");
    submit_test_bid(&mut persistence, already_bid, &company, 50_000);

    let geocoder = StaticGeocoder::new();
    let listing = list_open_postings(
        &mut persistence,
        &geocoder,
        plain_listing_request(company.id()),
    )
    .unwrap();

    let ids: Vec<i64> = listing.postings.iter().map(|p| p.posting_id).collect();
    assert_eq!(ids, vec![fresh]);
}

#[test]
fn test_open_listing_with_radius_filters_by_distance() {
    let mut persistence: Persistence = create_test_persistence();
    let homeowner: ActorIdentity = register_homeowner(&mut persistence, "Dana");
    let company: ActorIdentity = register_company_owner(&mut persistence, "Green Thumb");

    // One posting downtown, one in another city, one with an unknown code.
    let near: i64 = create_test_posting(&mut persistence, &homeowner, "M5V 2T6");
    let far: i64 = create_test_posting(&mut persistence, &homeowner, "K1A 0A9");
    let unknown: i64 = create_test_posting(&mut persistence, &homeowner, "X0X 0X0");

    let mut geocoder = StaticGeocoder::new();
    geocoder.insert("M5V 2T6", Coordinate::new(43.6426, -79.3871).unwrap());
    geocoder.insert("K1A 0A9", Coordinate::new(45.4215, -75.6972).unwrap());

    let listing = list_open_postings(
        &mut persistence,
        &geocoder,
        ListOpenPostingsRequest {
            bidder_id: company.id(),
            radius_km: Some(50.0),
            center_latitude_deg: Some(43.6534),
            center_longitude_deg: Some(-79.3839),
        },
    )
    .unwrap();

    let ids: Vec<i64> = listing.postings.iter().map(|p| p.posting_id).collect();
    assert!(ids.contains(&near));
    assert!(!ids.contains(&far));
    // Unresolvable codes cannot be placed in the radius and are omitted.
    assert!(!ids.contains(&unknown));
}

#[test]
fn test_radius_without_center_is_invalid_input() {
    let mut persistence: Persistence = create_test_persistence();
    let company: ActorIdentity = register_company_owner(&mut persistence, "Green Thumb");

    let geocoder = StaticGeocoder::new();
    let result = list_open_postings(
        &mut persistence,
        &geocoder,
        ListOpenPostingsRequest {
            bidder_id: company.id(),
            radius_km: Some(25.0),
            center_latitude_deg: None,
            center_longitude_deg: None,
        },
    );

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_empty_listing_is_ok_not_error() {
    let mut persistence: Persistence = create_test_persistence();
    let company: ActorIdentity = register_company_owner(&mut persistence, "Green Thumb");

    let geocoder = StaticGeocoder::new();
    let listing = list_open_postings(
        &mut persistence,
        &geocoder,
        plain_listing_request(company.id()),
    )
    .unwrap();
    assert!(listing.postings.is_empty());

    let bids = list_bids_for_user(
        &mut persistence,
        ListBidsForUserRequest {
            bidder_id: company.id(),
            statuses: vec![String::from("pending")],
        },
    )
    .unwrap();
    assert!(bids.bids.is_empty());
}

#[test]
fn test_bid_listing_parses_and_filters_statuses() {
    let mut persistence: Persistence = create_test_persistence();
    let homeowner: ActorIdentity = register_homeowner(&mut persistence, "Dana");
    let company: ActorIdentity = register_company_owner(&mut persistence, "Green Thumb");

    let posting: i64 = create_test_posting(&mut persistence, &homeowner, "M4B 1B3");
    let bid: i64 = submit_test_bid(&mut persistence, posting, &company, 50_000);
    accept_test_bid(&mut persistence, bid, &homeowner);

    let accepted = list_bids_for_user(
        &mut persistence,
        ListBidsForUserRequest {
            bidder_id: company.id(),
            statuses: vec![String::from("accepted")],
        },
    )
    .unwrap();
    assert_eq!(accepted.bids.len(), 1);
    assert_eq!(accepted.bids[0].bid_id, bid);

    let invalid = list_bids_for_user(
        &mut persistence,
        ListBidsForUserRequest {
            bidder_id: company.id(),
            statuses: vec![String::from("withdrawn")],
        },
    );
    assert!(matches!(invalid, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_postings_with_bids_listing_accepts_closed_alias() {
    let mut persistence: Persistence = create_test_persistence();
    let homeowner: ActorIdentity = register_homeowner(&mut persistence, "Dana");
    let company: ActorIdentity = register_company_owner(&mut persistence, "Green Thumb");

    let posting: i64 = create_test_posting(&mut persistence, &homeowner, "M4B 1B3");
    let bid: i64 = submit_test_bid(&mut persistence, posting, &company, 50_000);
    accept_test_bid(&mut persistence, bid, &homeowner);
    confirm_test_completion(&mut persistence, posting, &company);
    close_test_job(&mut persistence, posting, bid, &homeowner);

    // The legacy "closed" filter value selects the same terminal state.
    let listing = list_postings_with_bids(
        &mut persistence,
        ListPostingsWithBidsRequest {
            homeowner_id: homeowner.id(),
            statuses: vec![String::from("closed")],
        },
    )
    .unwrap();

    assert_eq!(listing.postings.len(), 1);
    assert_eq!(listing.postings[0].posting.posting_id, posting);
    assert_eq!(listing.postings[0].posting.status, "completed");
    assert_eq!(listing.postings[0].bids.len(), 1);
}

#[test]
fn test_company_reviews_average() {
    let mut persistence: Persistence = create_test_persistence();
    let homeowner: ActorIdentity = register_homeowner(&mut persistence, "Dana");
    let company: ActorIdentity = register_company_owner(&mut persistence, "Green Thumb");

    for rating in [5, 4] {
        let posting: i64 = create_test_posting(&mut persistence, &homeowner, "M4B 1B3");
        let bid: i64 = submit_test_bid(&mut persistence, posting, &company, 50_000);
        accept_test_bid(&mut persistence, bid, &homeowner);
        confirm_test_completion(&mut persistence, posting, &company);
        close_test_job(&mut persistence, posting, bid, &homeowner);
        submit_test_review(&mut persistence, posting, &homeowner, rating);
    }

    let summary = list_company_reviews(&mut persistence, company.id()).unwrap();
    assert_eq!(summary.reviews.len(), 2);
    assert!((summary.average_rating.unwrap() - 4.5).abs() < f64::EPSILON);
}
