//! Oracle aggregation status returned to claim submitters.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a prophecy stands in the vote-aggregation lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusText {
    /// Votes are still accumulating below the consensus threshold.
    Pending,
    /// A claim string reached the threshold and was finalized.
    Success,
    /// Every active validator voted and no claim string reached threshold.
    Failed,
}

impl fmt::Display for StatusText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Success => write!(f, "SUCCESS"),
            Self::Failed => write!(f, "FAILED"),
        }
    }
}

/// The aggregation status of one prophecy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimStatus {
    /// Lifecycle phase.
    pub text: StatusText,
    /// The winning finalized-claim string; empty until `Success`.
    pub final_claim: String,
}

impl ClaimStatus {
    #[must_use]
    pub fn pending() -> Self {
        Self {
            text: StatusText::Pending,
            final_claim: String::new(),
        }
    }

    #[must_use]
    pub fn success(final_claim: impl Into<String>) -> Self {
        Self {
            text: StatusText::Success,
            final_claim: final_claim.into(),
        }
    }

    #[must_use]
    pub fn failed() -> Self {
        Self {
            text: StatusText::Failed,
            final_claim: String::new(),
        }
    }

    /// Whether this status marks the finality transition.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.text == StatusText::Success
    }
}
