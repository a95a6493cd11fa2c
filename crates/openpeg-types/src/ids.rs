//! Identifiers used throughout OpenPeg.
//!
//! Addresses are opaque printable strings owned by the two chains.
//! [`OperationId`] and [`ClaimId`] are deterministic fingerprints: every
//! validator derives the exact same id for the same logical event, which is
//! what makes settlement idempotent under redelivery and replay.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::constants::MAX_ADDRESS_LEN;
use crate::error::{OpenpegError, Result};

fn validate_address(addr: &str, what: &str) -> Result<()> {
    if addr.is_empty() {
        return Err(OpenpegError::InvalidClaim {
            reason: format!("{what} address is empty"),
        });
    }
    if addr.len() > MAX_ADDRESS_LEN {
        return Err(OpenpegError::InvalidClaim {
            reason: format!("{what} address exceeds {MAX_ADDRESS_LEN} bytes"),
        });
    }
    if !addr.bytes().all(|b| b.is_ascii_graphic()) {
        return Err(OpenpegError::InvalidClaim {
            reason: format!("{what} address contains non-printable bytes"),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// AccountAddress
// ---------------------------------------------------------------------------

/// An account address on the destination ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountAddress(String);

impl AccountAddress {
    /// Construct a validated account address.
    ///
    /// # Errors
    /// Returns [`OpenpegError::InvalidClaim`] if the address is empty,
    /// overlong, or contains non-printable bytes.
    pub fn new(addr: impl Into<String>) -> Result<Self> {
        let addr = addr.into();
        validate_address(&addr, "account")?;
        Ok(Self(addr))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Re-run structural validation (used on claims that arrived over serde,
    /// which bypasses [`AccountAddress::new`]).
    pub fn validate(&self) -> Result<()> {
        validate_address(&self.0, "account")
    }

    /// Random test address.
    #[cfg(any(test, feature = "test-helpers"))]
    #[must_use]
    pub fn random() -> Self {
        Self(format!("peg1{}", random_suffix()))
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// ValidatorAddress
// ---------------------------------------------------------------------------

/// The operator address of a bridge validator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidatorAddress(String);

impl ValidatorAddress {
    /// Construct a validated validator address.
    ///
    /// # Errors
    /// Returns [`OpenpegError::InvalidClaim`] on a malformed address.
    pub fn new(addr: impl Into<String>) -> Result<Self> {
        let addr = addr.into();
        validate_address(&addr, "validator")?;
        Ok(Self(addr))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Re-run structural validation.
    pub fn validate(&self) -> Result<()> {
        validate_address(&self.0, "validator")
    }

    /// Random test address.
    #[cfg(any(test, feature = "test-helpers"))]
    #[must_use]
    pub fn random() -> Self {
        Self(format!("pegvaloper1{}", random_suffix()))
    }
}

impl fmt::Display for ValidatorAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(any(test, feature = "test-helpers"))]
fn random_suffix() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();
    (0..20)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Which namespace of the dedup store an operation settles into.
///
/// Forward operations (Lock, Burn) originate from the source chain's own
/// deterministic log; reverse operations (Unlock, Unburn) originate from
/// whitelisted validators observing the foreign chain. The two namespaces
/// are partitioned inside [`OperationId`] so a forward and a reverse
/// operation with the same (sender, sequence) can never alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Source-chain initiated: Lock, Burn.
    Forward,
    /// Foreign-chain initiated: Unlock, Unburn.
    Reverse,
}

impl Direction {
    /// Domain-separation tag mixed into the operation-id hash.
    #[must_use]
    pub fn tag(self) -> &'static [u8] {
        match self {
            Self::Forward => b"fwd",
            Self::Reverse => b"rev",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward => write!(f, "FORWARD"),
            Self::Reverse => write!(f, "REVERSE"),
        }
    }
}

// ---------------------------------------------------------------------------
// OperationId
// ---------------------------------------------------------------------------

/// Deterministic fingerprint of one logical bridge operation.
///
/// Derived from (sender, sequence, direction). Every validator derives the
/// **exact same** id for the same event — the dedup store keys on it, so
/// redelivery and historical replay collapse to no-ops. The derivation is a
/// stable wire contract: changing it changes dedup-collision behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct OperationId(pub [u8; 32]);

impl OperationId {
    /// Derive the operation id for (sender, sequence) in the given namespace.
    #[must_use]
    pub fn derive(direction: Direction, sender: &AccountAddress, sequence: u64) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"openpeg:op_id:v1:");
        hasher.update(direction.tag());
        hasher.update(b":");
        hasher.update(sender.as_str().as_bytes());
        hasher.update(b":");
        hasher.update(sequence.to_le_bytes());
        Self(hasher.finalize().into())
    }

    /// Forward-namespace id (Lock, Burn).
    #[must_use]
    pub fn forward(sender: &AccountAddress, sequence: u64) -> Self {
        Self::derive(Direction::Forward, sender, sequence)
    }

    /// Reverse-namespace id (Unlock, Unburn).
    #[must_use]
    pub fn reverse(sender: &AccountAddress, sequence: u64) -> Self {
        Self::derive(Direction::Reverse, sender, sequence)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "op:{}", hex::encode(&self.0[..8]))
    }
}

// ---------------------------------------------------------------------------
// ClaimId
// ---------------------------------------------------------------------------

/// Deterministic identifier of one prophecy (one logical claim under vote).
///
/// Every node generates the **exact same** `ClaimId` for the same observed
/// event, so votes from independent validators aggregate under one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ClaimId(pub Uuid);

impl ClaimId {
    /// Derive a claim id from the event coordinates.
    #[must_use]
    pub fn deterministic(
        source_chain: &str,
        sender: &AccountAddress,
        sequence: u64,
        claim_tag: &str,
    ) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"openpeg:claim_id:v1:");
        hasher.update(source_chain.as_bytes());
        hasher.update(b":");
        hasher.update(sender.as_str().as_bytes());
        hasher.update(b":");
        hasher.update(sequence.to_le_bytes());
        hasher.update(b":");
        hasher.update(claim_tag.as_bytes());
        let hash = hasher.finalize();
        let bytes: [u8; 16] = hash[..16].try_into().expect("SHA-256 produces 32 bytes");
        Self(Uuid::from_bytes(bytes))
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "claim:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
