// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::bid_status::BidStatus;
use crate::error::DomainError;
use crate::types::{Bid, Party, Posting, Review};

/// Validates that a posting's basic field constraints are met.
///
/// This function checks field-level constraints only. It does NOT check
/// cross-entity invariants (those require the full aggregate).
///
/// # Arguments
///
/// * `posting` - The posting to validate
///
/// # Returns
///
/// * `Ok(())` if the posting's fields are valid
/// * `Err(DomainError)` if any field is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The title is empty
/// - The description is empty
/// - The postal code is empty
/// - Any image URL is empty
pub fn validate_posting_fields(posting: &Posting) -> Result<(), DomainError> {
    // Rule: title must not be empty
    if posting.title.trim().is_empty() {
        return Err(DomainError::InvalidTitle(String::from(
            "Title cannot be empty",
        )));
    }

    // Rule: description must not be empty
    if posting.description.trim().is_empty() {
        return Err(DomainError::InvalidDescription(String::from(
            "Description cannot be empty",
        )));
    }

    // Rule: postal code must not be empty
    if posting.postal_code.value().is_empty() {
        return Err(DomainError::InvalidPostalCode(String::from(
            "Postal code cannot be empty",
        )));
    }

    // Rule: image URLs, when present, must not be empty
    for (position, url) in posting.images.iter().enumerate() {
        if url.trim().is_empty() {
            return Err(DomainError::InvalidImageUrl { position });
        }
    }

    Ok(())
}

/// Validates that a bid's basic field constraints are met.
///
/// Amount positivity is enforced by `BidAmount` at construction time;
/// this checks the remaining field constraints.
///
/// # Errors
///
/// Returns an error if the bid's description is empty.
pub fn validate_bid_fields(bid: &Bid) -> Result<(), DomainError> {
    // Rule: description must not be empty
    if bid.description.trim().is_empty() {
        return Err(DomainError::InvalidDescription(String::from(
            "Bid description cannot be empty",
        )));
    }

    Ok(())
}

/// Validates that a review's basic field constraints are met.
///
/// The rating bound is enforced by `Rating` at construction time; this
/// checks that optional text fields are not present-but-blank.
///
/// # Errors
///
/// Returns an error if the title or body is present but empty.
pub fn validate_review_fields(review: &Review) -> Result<(), DomainError> {
    if let Some(title) = &review.title
        && title.trim().is_empty()
    {
        return Err(DomainError::InvalidTitle(String::from(
            "Review title cannot be blank when provided",
        )));
    }

    if let Some(body) = &review.body
        && body.trim().is_empty()
    {
        return Err(DomainError::InvalidDescription(String::from(
            "Review body cannot be blank when provided",
        )));
    }

    Ok(())
}

/// Validates that a party's basic field constraints are met.
///
/// # Errors
///
/// Returns an error if the display name or postal code is empty.
pub fn validate_party_fields(party: &Party) -> Result<(), DomainError> {
    let (name, postal_code) = match party {
        Party::Homeowner(h) => (&h.name, &h.postal_code),
        Party::CompanyOwner(c) => (&c.company_name, &c.postal_code),
    };

    if name.trim().is_empty() {
        return Err(DomainError::InvalidPartyName(String::from(
            "Name cannot be empty",
        )));
    }

    if postal_code.value().is_empty() {
        return Err(DomainError::InvalidPostalCode(String::from(
            "Postal code cannot be empty",
        )));
    }

    Ok(())
}

/// Validates that at most one bid on a posting holds accepted status.
///
/// This is the representative cross-entity invariant of the lifecycle:
/// the function is pure, deterministic, and has no side effects.
///
/// # Arguments
///
/// * `posting_id` - The posting the bids belong to
/// * `bids` - All bids referencing the posting
///
/// # Returns
///
/// * `Ok(())` if zero or one bid is accepted
/// * `Err(DomainError::MultipleAcceptedBids)` otherwise
///
/// # Errors
///
/// Returns an error if more than one bid holds `Accepted` status.
pub fn validate_single_accepted_bid(posting_id: i64, bids: &[Bid]) -> Result<(), DomainError> {
    let accepted: usize = bids
        .iter()
        .filter(|bid| bid.status == BidStatus::Accepted)
        .count();

    if accepted > 1 {
        return Err(DomainError::MultipleAcceptedBids { posting_id });
    }

    Ok(())
}
