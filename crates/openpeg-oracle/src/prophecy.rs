//! Prophecy: one logical claim under vote.
//!
//! Each vote carries two serializations of the claim: the *content* string
//! (every field except the attesting validator) and the full finalized
//! string. Validators observing the same event produce byte-identical
//! content strings, so the tally groups on content; when the best-supported
//! content reaches the consensus threshold the prophecy finalizes with the
//! full claim string of its first supporter in validator order. The tally
//! is re-run after every vote against the *current* active-validator count,
//! so whitelist churn mid-vote is reflected.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use openpeg_types::{ClaimId, ClaimStatus, OpenpegError, Result, StatusText, ValidatorAddress};

/// One validator's submission: the tally key plus the string the
/// settlement dispatcher will consume if this vote's content wins.
#[derive(Debug, Clone)]
struct Vote {
    content: String,
    finalized: String,
}

/// Vote state for one claim id.
#[derive(Debug, Clone)]
pub struct Prophecy {
    /// The deterministic claim id this prophecy aggregates under.
    pub id: ClaimId,
    /// Current aggregation status.
    pub status: ClaimStatus,
    /// Validator → the vote it submitted.
    claims: BTreeMap<ValidatorAddress, Vote>,
    /// When the first vote arrived (local bookkeeping, never on the wire).
    pub created_at: DateTime<Utc>,
}

impl Prophecy {
    #[must_use]
    pub fn new(id: ClaimId) -> Self {
        Self {
            id,
            status: ClaimStatus::pending(),
            claims: BTreeMap::new(),
            created_at: Utc::now(),
        }
    }

    /// Record one validator's vote.
    ///
    /// # Errors
    /// Returns [`OpenpegError::DuplicateClaimSubmission`] if the validator
    /// already voted on this prophecy.
    pub fn record(
        &mut self,
        validator: &ValidatorAddress,
        content: String,
        finalized: String,
    ) -> Result<()> {
        if self.claims.contains_key(validator) {
            return Err(OpenpegError::DuplicateClaimSubmission(validator.clone()));
        }
        self.claims
            .insert(validator.clone(), Vote { content, finalized });
        Ok(())
    }

    /// Re-run the tally against the current active-validator count.
    ///
    /// Threshold rule: a content string finalizes when
    /// `supporters * 100 >= active_validators * threshold_percent`.
    /// Tie-break: among equally supported contents the lexicographically
    /// smallest is always the candidate, so every node picks the same one.
    pub fn retally(&mut self, active_validators: usize, threshold_percent: u32) {
        if self.status.text != StatusText::Pending || active_validators == 0 {
            return;
        }

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for vote in self.claims.values() {
            *counts.entry(vote.content.as_str()).or_insert(0) += 1;
        }
        // BTreeMap iterates keys in lexicographic order; taking a strictly
        // greater count keeps the smallest content among ties.
        let best = counts
            .iter()
            .fold(None::<(&str, usize)>, |best, (s, n)| match best {
                Some((_, bn)) if *n <= bn => best,
                _ => Some((s, *n)),
            });

        if let Some((content, supporters)) = best {
            if supporters * 100 >= active_validators * threshold_percent as usize {
                // First supporter in validator order carries the finalized
                // string; deterministic because the map is ordered.
                if let Some(vote) = self.claims.values().find(|v| v.content == content) {
                    self.status = ClaimStatus::success(&vote.finalized);
                }
                return;
            }
        }

        if self.claims.len() >= active_validators {
            // Everyone voted and nothing reached threshold.
            self.status = ClaimStatus::failed();
        }
    }

    /// Number of votes recorded so far.
    #[must_use]
    pub fn vote_count(&self) -> usize {
        self.claims.len()
    }

    /// Whether this validator already voted.
    #[must_use]
    pub fn has_voted(&self, validator: &ValidatorAddress) -> bool {
        self.claims.contains_key(validator)
    }
}
