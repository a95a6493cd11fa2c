//! # openpeg-types
//!
//! Shared types, errors, and configuration for the **OpenPeg** bridge.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`AccountAddress`], [`ValidatorAddress`], [`OperationId`], [`ClaimId`], [`Direction`]
//! - **Claim model**: [`BridgeClaim`], [`RawClaim`], [`ClaimType`]
//! - **Coin model**: [`Coin`], [`Denom`]
//! - **Oracle status**: [`ClaimStatus`], [`StatusText`]
//! - **Receipt model**: [`SettlementReceipt`]
//! - **Configuration**: [`BridgeConfig`]
//! - **Errors**: [`OpenpegError`] with `OP_ERR_` prefix codes
//! - **Constants**: pegged-denom prefix, module name, defaults

pub mod claim;
pub mod coin;
pub mod config;
pub mod constants;
pub mod error;
pub mod ids;
pub mod receipt;
pub mod status;

// Re-export all primary types at crate root for ergonomic imports:
//   use openpeg_types::{BridgeClaim, ClaimType, Coin, OperationId, ...};

pub use claim::*;
pub use coin::*;
pub use config::*;
pub use error::*;
pub use ids::*;
pub use receipt::*;
pub use status::*;

// Constants are accessed via `openpeg_types::constants::FOO`
// (not re-exported to avoid name collisions).
