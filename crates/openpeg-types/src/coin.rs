//! Coin model: a (denomination, amount) pair.
//!
//! Bridge amounts are whole token units: non-negative integers carried as
//! [`Decimal`] so they survive the string-based wire format without
//! precision loss.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{OpenpegError, Result};

/// Type alias for denomination identifiers (e.g. "peg/ETH", "stake").
pub type Denom = String;

/// An amount of a single denomination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    /// Denomination (native, or pegged with the `peg/` prefix).
    pub denom: Denom,
    /// Whole-unit amount; always a non-negative integer.
    pub amount: Decimal,
}

impl Coin {
    /// Construct a validated coin.
    ///
    /// # Errors
    /// Returns [`OpenpegError::InvalidAmount`] unless `amount` is a
    /// non-negative integer, and [`OpenpegError::UnknownDenom`] for an
    /// empty denomination.
    pub fn new(denom: impl Into<Denom>, amount: Decimal) -> Result<Self> {
        let denom = denom.into();
        if denom.is_empty() {
            return Err(OpenpegError::UnknownDenom(denom));
        }
        if amount.is_sign_negative() || !amount.fract().is_zero() {
            return Err(OpenpegError::InvalidAmount(amount.to_string()));
        }
        Ok(Self { denom, amount })
    }

    /// Whether the coin carries a zero amount.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coin_new_ok() {
        let coin = Coin::new("peg/ETH", Decimal::new(100, 0)).unwrap();
        assert_eq!(coin.denom, "peg/ETH");
        assert_eq!(coin.amount, Decimal::new(100, 0));
        assert!(!coin.is_zero());
    }

    #[test]
    fn coin_rejects_negative() {
        let err = Coin::new("peg/ETH", Decimal::new(-1, 0)).unwrap_err();
        assert!(matches!(err, OpenpegError::InvalidAmount(_)));
    }

    #[test]
    fn coin_rejects_fractional() {
        let err = Coin::new("peg/ETH", Decimal::new(15, 1)).unwrap_err();
        assert!(matches!(err, OpenpegError::InvalidAmount(_)));
    }

    #[test]
    fn coin_rejects_empty_denom() {
        let err = Coin::new("", Decimal::ONE).unwrap_err();
        assert!(matches!(err, OpenpegError::UnknownDenom(_)));
    }

    #[test]
    fn zero_amount_is_valid() {
        let coin = Coin::new("stake", Decimal::ZERO).unwrap();
        assert!(coin.is_zero());
    }

    #[test]
    fn coin_display() {
        let coin = Coin::new("peg/ETH", Decimal::new(42, 0)).unwrap();
        assert_eq!(format!("{coin}"), "42peg/ETH");
    }
}
