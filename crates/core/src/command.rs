// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// A command represents user intent as data only.
///
/// Commands are the only way to request state changes. Field values are
/// raw primitives; validation happens when the command is applied.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Create a new job posting.
    CreatePosting {
        /// The homeowner creating the posting.
        homeowner_id: i64,
        /// A short title for the job.
        title: String,
        /// A free-text description of the work.
        description: String,
        /// The job site's postal code.
        postal_code: String,
        /// Ordered image URLs attached to the posting.
        images: Vec<String>,
        /// The homeowner's estimated start date.
        estimated_start_date: time::Date,
    },
    /// Submit a bid against an open posting.
    SubmitBid {
        /// The posting to bid on.
        posting_id: i64,
        /// The company owner submitting the bid.
        bidder_id: i64,
        /// The proposed price in cents.
        amount_cents: i64,
        /// A free-text description of the proposal.
        description: String,
        /// The date the bidder proposes to start.
        proposed_date: time::Date,
    },
    /// Accept a pending bid, rejecting all of its pending siblings and
    /// moving the posting to in-progress.
    AcceptBid {
        /// The bid to accept.
        bid_id: i64,
    },
    /// Record the accepted bidder's attestation that the work is done.
    ConfirmCompletion {
        /// The posting being confirmed.
        posting_id: i64,
        /// The confirming company owner.
        company_owner_id: i64,
    },
    /// Close a confirmed job, completing the posting and its winning bid.
    CloseJob {
        /// The posting to close.
        posting_id: i64,
        /// The accepted (winning) bid.
        winning_bid_id: i64,
    },
    /// Submit the homeowner's review of the company owner after completion.
    SubmitReview {
        /// The completed posting the review is about.
        posting_id: i64,
        /// The reviewing homeowner.
        homeowner_id: i64,
        /// The rating, 1–5.
        rating: i64,
        /// An optional short title.
        title: Option<String>,
        /// Optional free-text review body.
        body: Option<String>,
    },
}
