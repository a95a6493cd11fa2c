//! # openpeg-settlement
//!
//! **The settlement core**: converts a finalized, multi-validator-attested
//! claim into exactly one balance-changing operation on the destination
//! ledger.
//!
//! ## Architecture
//!
//! 1. [`translator`] parses a finalized claim string into a typed record
//! 2. [`DedupStore`] keys every settlement by its deterministic
//!    `OperationId` so redelivery and historical replay collapse to the
//!    per-direction idempotency rule
//! 3. [`SettlementDispatcher`] routes the claim to one of four handlers
//!    (lock, burn, unlock, unburn) through the [`Ledger`] and [`Oracle`]
//!    capabilities supplied at construction
//!
//! ## Idempotency contract
//!
//! - Forward (lock/burn): insert-or-fail — a redelivered forward claim is
//!   `DuplicateOperation`, because forward claims come from a single
//!   deterministic source-chain log and should never legitimately repeat
//! - Reverse (unlock/unburn): insert-or-noop — a redelivered reverse claim
//!   returns success with zero side effects, so a caller restarting after a
//!   crash behaves correctly without tracking delivery state
//!
//! Every call runs synchronously inside the host ledger's sequenced
//! transaction pipeline; a failure mid-settlement rolls the dedup write
//! back, except for the unrecoverable post-mint/post-escrow transfer
//! failures, which abort the enclosing transaction.

pub mod dedup;
pub mod dispatcher;
pub mod traits;
pub mod translator;

pub use dedup::DedupStore;
pub use dispatcher::SettlementDispatcher;
pub use traits::{Ledger, Oracle};
pub use translator::translate;
