//! Configuration for the OpenPeg bridge module.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CONSENSUS_THRESHOLD, MODULE_NAME};
use crate::error::{OpenpegError, Result};
use crate::ids::AccountAddress;

/// Configuration supplied to the settlement dispatcher and oracle at
/// construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Name of the module escrow account.
    pub module_name: String,
    /// The only account allowed to mutate the validator whitelist.
    pub admin: AccountAddress,
    /// Percent of active validators that must submit the identical claim
    /// before it finalizes (1..=100).
    pub consensus_threshold: u32,
}

impl BridgeConfig {
    /// Config with default module name and threshold.
    #[must_use]
    pub fn new(admin: AccountAddress) -> Self {
        Self {
            module_name: MODULE_NAME.to_string(),
            admin,
            consensus_threshold: DEFAULT_CONSENSUS_THRESHOLD,
        }
    }

    /// Override the consensus threshold.
    ///
    /// # Errors
    /// Returns [`OpenpegError::Configuration`] if `threshold` is outside
    /// `1..=100`.
    pub fn with_threshold(mut self, threshold: u32) -> Result<Self> {
        if threshold == 0 || threshold > 100 {
            return Err(OpenpegError::Configuration(format!(
                "consensus threshold must be in 1..=100, got {threshold}"
            )));
        }
        self.consensus_threshold = threshold;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = BridgeConfig::new(AccountAddress::new("peg1admin").unwrap());
        assert_eq!(cfg.module_name, "bridge");
        assert_eq!(cfg.consensus_threshold, DEFAULT_CONSENSUS_THRESHOLD);
    }

    #[test]
    fn threshold_bounds() {
        let cfg = BridgeConfig::new(AccountAddress::new("peg1admin").unwrap());
        assert!(cfg.clone().with_threshold(0).is_err());
        assert!(cfg.clone().with_threshold(101).is_err());
        let cfg = cfg.with_threshold(100).unwrap();
        assert_eq!(cfg.consensus_threshold, 100);
    }

    #[test]
    fn config_serde_roundtrip() {
        let cfg = BridgeConfig::new(AccountAddress::new("peg1admin").unwrap());
        let json = serde_json::to_string(&cfg).unwrap();
        let back: BridgeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg.module_name, back.module_name);
        assert_eq!(cfg.admin, back.admin);
        assert_eq!(cfg.consensus_threshold, back.consensus_threshold);
    }
}
