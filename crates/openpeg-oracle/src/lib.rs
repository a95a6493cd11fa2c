//! # openpeg-oracle
//!
//! **Oracle consensus plane**: validator authorization and claim vote
//! aggregation.
//!
//! - [`ValidatorWhitelist`]: the set of validator addresses authorized to
//!   submit claims and originate reverse-direction settlement
//! - [`Prophecy`]: one logical claim under vote, keyed by `ClaimId`
//! - [`OracleKeeper`]: aggregates votes and flips a prophecy to
//!   `Success` exactly once, at the consensus threshold
//!
//! Stake weighting is out of scope; aggregation is count-based over active
//! whitelist entries with a deterministic lexicographic tie-break, which
//! satisfies the `Pending/Success/Failed` contract the settlement
//! dispatcher consumes.

pub mod keeper;
pub mod prophecy;
pub mod whitelist;

pub use keeper::OracleKeeper;
pub use prophecy::Prophecy;
pub use whitelist::{ValidatorWhitelist, WhitelistOp};
