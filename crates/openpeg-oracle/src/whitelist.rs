//! Validator whitelist.
//!
//! Entries map a validator address to an active flag. Removal flips the
//! flag instead of deleting the entry, so the set of ever-seen validators
//! stays inspectable. Mutation happens only through an explicit
//! administrative call; settlement reads it and never caches the answer
//! beyond the current call.

use std::collections::BTreeMap;
use std::str::FromStr;

use openpeg_types::{OpenpegError, Result, ValidatorAddress};

/// Administrative operation on the whitelist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhitelistOp {
    Add,
    Remove,
}

impl FromStr for WhitelistOp {
    type Err = OpenpegError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "add" => Ok(Self::Add),
            "remove" => Ok(Self::Remove),
            other => Err(OpenpegError::InvalidClaim {
                reason: format!("unknown whitelist operation: {other:?}"),
            }),
        }
    }
}

/// Validator address → active flag.
#[derive(Debug, Default)]
pub struct ValidatorWhitelist {
    entries: BTreeMap<ValidatorAddress, bool>,
}

impl ValidatorWhitelist {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a validator active (inserting the entry if unseen).
    pub fn add(&mut self, validator: &ValidatorAddress) {
        self.entries.insert(validator.clone(), true);
    }

    /// Mark a validator inactive. The entry is kept.
    pub fn remove(&mut self, validator: &ValidatorAddress) {
        self.entries.insert(validator.clone(), false);
    }

    /// Whether the validator is currently active.
    #[must_use]
    pub fn is_active(&self, validator: &ValidatorAddress) -> bool {
        self.entries.get(validator).copied().unwrap_or(false)
    }

    /// Number of currently active validators.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.entries.values().filter(|active| **active).count()
    }

    /// All currently active validators, in deterministic order.
    #[must_use]
    pub fn active(&self) -> Vec<ValidatorAddress> {
        self.entries
            .iter()
            .filter(|(_, active)| **active)
            .map(|(v, _)| v.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_remove_flip_flag() {
        let mut wl = ValidatorWhitelist::new();
        let v = ValidatorAddress::random();
        assert!(!wl.is_active(&v));

        wl.add(&v);
        assert!(wl.is_active(&v));
        assert_eq!(wl.active_count(), 1);

        wl.remove(&v);
        assert!(!wl.is_active(&v));
        assert_eq!(wl.active_count(), 0);
        // Entry survives removal, inactive.
        assert!(wl.active().is_empty());
    }

    #[test]
    fn readd_after_remove() {
        let mut wl = ValidatorWhitelist::new();
        let v = ValidatorAddress::random();
        wl.add(&v);
        wl.remove(&v);
        wl.add(&v);
        assert!(wl.is_active(&v));
    }

    #[test]
    fn active_is_sorted() {
        let mut wl = ValidatorWhitelist::new();
        let a = ValidatorAddress::new("pegvaloper1aaa").unwrap();
        let b = ValidatorAddress::new("pegvaloper1bbb").unwrap();
        wl.add(&b);
        wl.add(&a);
        assert_eq!(wl.active(), vec![a, b]);
    }

    #[test]
    fn whitelist_op_parse() {
        assert_eq!("add".parse::<WhitelistOp>().unwrap(), WhitelistOp::Add);
        assert_eq!("remove".parse::<WhitelistOp>().unwrap(), WhitelistOp::Remove);
        assert!("ban".parse::<WhitelistOp>().is_err());
    }
}
