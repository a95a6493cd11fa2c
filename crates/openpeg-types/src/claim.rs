//! Claim model: a validator's attestation that an event occurred on a
//! source chain.
//!
//! [`BridgeClaim`] is the typed, validated record the dispatcher consumes.
//! [`RawClaim`] is its serde wire form and [`ClaimContent`] the
//! validator-free projection the oracle tallies votes on. Both
//! serializations are bit-exact contracts (field order fixed by the struct,
//! amount carried as a string) because consensus compares byte-equal
//! content strings.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_SOURCE_CHAIN_LEN, MAX_SYMBOL_LEN};
use crate::error::{OpenpegError, Result};
use crate::ids::{AccountAddress, ClaimId, Direction, OperationId, ValidatorAddress};

// ---------------------------------------------------------------------------
// ClaimType
// ---------------------------------------------------------------------------

/// The four settlement operations a claim can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimType {
    /// Escrow collateral into the bridge module (source-chain lock event).
    Lock,
    /// Escrow and destroy pegged supply (source-chain burn event).
    Burn,
    /// Release escrowed collateral back to the sender (foreign-chain reversal).
    Unlock,
    /// Mint pegged supply back to the sender (foreign-chain reversal of a burn).
    Unburn,
}

impl ClaimType {
    /// Stable wire tag.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lock => "lock",
            Self::Burn => "burn",
            Self::Unlock => "unlock",
            Self::Unburn => "unburn",
        }
    }

    /// Which dedup namespace this operation settles into.
    #[must_use]
    pub fn direction(self) -> Direction {
        match self {
            Self::Lock | Self::Burn => Direction::Forward,
            Self::Unlock | Self::Unburn => Direction::Reverse,
        }
    }
}

impl FromStr for ClaimType {
    type Err = OpenpegError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "lock" => Ok(Self::Lock),
            "burn" => Ok(Self::Burn),
            "unlock" => Ok(Self::Unlock),
            "unburn" => Ok(Self::Unburn),
            other => Err(OpenpegError::InvalidClaimType(other.to_string())),
        }
    }
}

impl fmt::Display for ClaimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// BridgeClaim
// ---------------------------------------------------------------------------

/// A typed, validated claim. Immutable once constructed; produced by event
/// producers, consumed once by the settlement dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeClaim {
    /// Identifier of the chain the event was observed on.
    pub source_chain: String,
    /// Which settlement operation this claim requests.
    pub claim_type: ClaimType,
    /// The account whose balance the settlement touches.
    pub sender: AccountAddress,
    /// Counterparty address on the opposite chain (informational to
    /// settlement; the relayer uses it when acting on the other side).
    pub receiver: AccountAddress,
    /// Foreign asset symbol, without the pegged prefix.
    pub symbol: String,
    /// Whole-unit amount; non-negative integer.
    pub amount: Decimal,
    /// Monotonic per-sender counter assigned by the source chain.
    pub sequence: u64,
    /// The validator attesting to the event.
    pub validator: ValidatorAddress,
}

impl BridgeClaim {
    /// Structural validation only: addresses, symbol, chain id, amount.
    /// Never touches the ledger.
    pub fn validate(&self) -> Result<()> {
        if self.source_chain.is_empty() || self.source_chain.len() > MAX_SOURCE_CHAIN_LEN {
            return Err(OpenpegError::InvalidClaim {
                reason: format!("bad source chain: {:?}", self.source_chain),
            });
        }
        if self.symbol.is_empty() || self.symbol.len() > MAX_SYMBOL_LEN {
            return Err(OpenpegError::InvalidClaim {
                reason: format!("bad symbol: {:?}", self.symbol),
            });
        }
        if !self.symbol.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(OpenpegError::InvalidClaim {
                reason: format!("symbol is not alphanumeric: {:?}", self.symbol),
            });
        }
        self.sender.validate()?;
        self.receiver.validate()?;
        self.validator.validate()?;
        if self.amount.is_sign_negative() || !self.amount.fract().is_zero() {
            return Err(OpenpegError::InvalidAmount(self.amount.to_string()));
        }
        Ok(())
    }

    /// The dedup fingerprint of this claim's settlement.
    #[must_use]
    pub fn operation_id(&self) -> OperationId {
        OperationId::derive(self.claim_type.direction(), &self.sender, self.sequence)
    }

    /// The prophecy key this claim's votes aggregate under.
    #[must_use]
    pub fn claim_id(&self) -> ClaimId {
        ClaimId::deterministic(
            &self.source_chain,
            &self.sender,
            self.sequence,
            self.claim_type.as_str(),
        )
    }

    /// Serialize into the finalized-claim wire string.
    ///
    /// # Errors
    /// Returns [`OpenpegError::Serialization`] if encoding fails.
    pub fn to_finalized_string(&self) -> Result<String> {
        serde_json::to_string(&RawClaim::from(self))
            .map_err(|e| OpenpegError::Serialization(e.to_string()))
    }

    /// Serialize the consensus content: every field except the attesting
    /// validator. Independent validators observing the same event produce
    /// byte-identical content strings; the oracle tallies votes on this.
    ///
    /// # Errors
    /// Returns [`OpenpegError::Serialization`] if encoding fails.
    pub fn content_string(&self) -> Result<String> {
        serde_json::to_string(&ClaimContent::from(self))
            .map_err(|e| OpenpegError::Serialization(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// RawClaim (wire form)
// ---------------------------------------------------------------------------

/// The serde wire form of a claim.
///
/// `claim_type` and `amount` are plain strings so that a tag outside the
/// known taxonomy or a garbage amount is *representable* — the translator
/// rejects them with the precise error instead of a decode failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawClaim {
    pub source_chain: String,
    pub claim_type: String,
    pub sender: String,
    pub receiver: String,
    pub symbol: String,
    pub amount: String,
    pub sequence: u64,
    pub validator: String,
}

impl From<&BridgeClaim> for RawClaim {
    fn from(claim: &BridgeClaim) -> Self {
        Self {
            source_chain: claim.source_chain.clone(),
            claim_type: claim.claim_type.as_str().to_string(),
            sender: claim.sender.as_str().to_string(),
            receiver: claim.receiver.as_str().to_string(),
            symbol: claim.symbol.clone(),
            amount: claim.amount.to_string(),
            sequence: claim.sequence,
            validator: claim.validator.as_str().to_string(),
        }
    }
}

/// The validator-free projection of a claim used as the vote-tally key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimContent {
    pub source_chain: String,
    pub claim_type: String,
    pub sender: String,
    pub receiver: String,
    pub symbol: String,
    pub amount: String,
    pub sequence: u64,
}

impl From<&BridgeClaim> for ClaimContent {
    fn from(claim: &BridgeClaim) -> Self {
        Self {
            source_chain: claim.source_chain.clone(),
            claim_type: claim.claim_type.as_str().to_string(),
            sender: claim.sender.as_str().to_string(),
            receiver: claim.receiver.as_str().to_string(),
            symbol: claim.symbol.clone(),
            amount: claim.amount.to_string(),
            sequence: claim.sequence,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
