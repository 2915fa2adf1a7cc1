// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Job posting status tracking and transition logic.
//!
//! This module defines posting status states and valid transitions.
//! Transitions are forward-only and party-initiated; the system never
//! advances status based on time alone.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The lifecycle status of a job posting.
///
/// A posting moves strictly forward: `Open` → `InProgress` → `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Accepting bids. No bid on the posting is accepted yet.
    #[default]
    Open,
    /// A bid has been accepted; work is underway.
    InProgress,
    /// Work is confirmed done and the posting is closed. Terminal.
    Completed,
}

impl JobStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "inprogress",
            Self::Completed => "completed",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// The legacy value `"closed"` is accepted as an alias of `"completed"`:
    /// older data uses the two interchangeably for the same terminal state.
    /// The system itself only ever emits `"completed"`.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "open" => Ok(Self::Open),
            "inprogress" => Ok(Self::InProgress),
            "completed" | "closed" => Ok(Self::Completed),
            _ => Err(DomainError::InvalidJobStatus {
                status: s.to_string(),
            }),
        }
    }

    /// Returns true if this status is terminal (no further transition is defined).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Valid transitions are:
    /// - `Open` → `InProgress` (bid acceptance)
    /// - `InProgress` → `Completed` (close after confirmation)
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Open, Self::InProgress) | (Self::InProgress, Self::Completed)
        )
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not allowed.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "cannot transition from terminal state".to_string(),
            });
        }

        if self.can_transition_to(new_status) {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "postings only move forward through the lifecycle".to_string(),
            })
        }
    }
}

impl FromStr for JobStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
