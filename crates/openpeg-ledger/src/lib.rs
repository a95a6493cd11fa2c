//! # openpeg-ledger
//!
//! The **Ledger collaborator**: authoritative token accounting for the
//! destination chain side of the bridge.
//!
//! - [`Bank`]: per-(account, denom) balances, module escrow accounts,
//!   mint/burn, and a supply-conservation checker
//! - [`PeggedTokenRegistry`]: lazily created pegged denominations with the
//!   fixed `peg/` prefix
//!
//! In production these calls land on the host ledger's bank module inside
//! an already-sequenced transaction; this crate is the in-process stand-in
//! with identical semantics. The settlement dispatcher only reaches it
//! through the `Ledger` capability trait.

pub mod bank;
pub mod registry;

pub use bank::Bank;
pub use registry::{PeggedTokenRegistry, pegged_denom};
