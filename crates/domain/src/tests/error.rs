// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::DomainError;

#[test]
fn test_display_posting_not_open() {
    let err = DomainError::PostingNotOpen {
        posting_id: 12,
        status: String::from("inprogress"),
    };

    assert_eq!(
        err.to_string(),
        "Posting 12 is not open for bids (status: inprogress)"
    );
}

#[test]
fn test_display_invalid_bid_amount() {
    let err = DomainError::InvalidBidAmount { cents: -100 };

    assert_eq!(
        err.to_string(),
        "Invalid bid amount: -100 cents. Must be greater than 0"
    );
}

#[test]
fn test_display_invalid_status_transition() {
    let err = DomainError::InvalidStatusTransition {
        from: String::from("completed"),
        to: String::from("open"),
        reason: String::from("cannot transition from terminal state"),
    };

    assert_eq!(
        err.to_string(),
        "Invalid status transition from 'completed' to 'open': cannot transition from terminal state"
    );
}

#[test]
fn test_display_duplicate_review() {
    let err = DomainError::DuplicateReview {
        posting_id: 4,
        homeowner_id: 9,
    };

    assert_eq!(
        err.to_string(),
        "Homeowner 9 has already reviewed posting 4"
    );
}

#[test]
fn test_display_completion_not_confirmed() {
    let err = DomainError::CompletionNotConfirmed {
        posting_id: 4,
        company_owner_id: 2,
    };

    assert_eq!(
        err.to_string(),
        "Company owner 2 has not confirmed completion of posting 4"
    );
}
