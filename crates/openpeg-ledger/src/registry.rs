//! Pegged-token registry.
//!
//! Foreign assets are represented on the destination ledger under the fixed
//! `peg/` prefix. Registry entries are created lazily the first time a
//! Lock or Burn claim for a previously unseen symbol settles successfully.

use std::collections::BTreeSet;

use openpeg_types::Denom;
use openpeg_types::constants::PEGGED_DENOM_PREFIX;

/// The pegged denomination for a foreign symbol (pure prefix rule).
///
/// Stable wire contract: `ETH` → `peg/ETH`.
#[must_use]
pub fn pegged_denom(symbol: &str) -> Denom {
    format!("{PEGGED_DENOM_PREFIX}{symbol}")
}

/// Which pegged denominations exist on this ledger.
#[derive(Debug, Default)]
pub struct PeggedTokenRegistry {
    denoms: BTreeSet<Denom>,
}

impl PeggedTokenRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the pegged denom for `symbol`, creating the registry entry
    /// if this is the first time the symbol is seen.
    pub fn ensure_registered(&mut self, symbol: &str) -> Denom {
        let denom = pegged_denom(symbol);
        if self.denoms.insert(denom.clone()) {
            tracing::info!(%denom, "registered pegged token");
        }
        denom
    }

    /// Whether a symbol already has a registry entry.
    #[must_use]
    pub fn is_registered(&self, symbol: &str) -> bool {
        self.denoms.contains(&pegged_denom(symbol))
    }

    /// All registered pegged denoms, in deterministic order.
    #[must_use]
    pub fn registered(&self) -> Vec<Denom> {
        self.denoms.iter().cloned().collect()
    }

    /// Number of registered pegged denoms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.denoms.len()
    }

    /// Whether no pegged denom has been registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.denoms.is_empty()
    }
}
