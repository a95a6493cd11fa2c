//! Bank: balances, module escrow, mint and burn.
//!
//! Supply invariant enforced on demand:
//! ```text
//! ∀ denom: Σ(account balances) + Σ(module balances) == recorded supply
//! ```
//! Settlement only moves value between accounts and modules or changes
//! supply through mint/burn, so the invariant must hold after every call.

use std::collections::BTreeMap;

use openpeg_types::{AccountAddress, Coin, Denom, OpenpegError, Result};
use rust_decimal::Decimal;

/// In-memory bank with account balances and module escrow accounts.
#[derive(Debug, Default)]
pub struct Bank {
    /// Per-(account, denom) spendable balances.
    balances: BTreeMap<(AccountAddress, Denom), Decimal>,
    /// Per-(module, denom) escrow balances.
    module_balances: BTreeMap<(String, Denom), Decimal>,
    /// Recorded total supply per denom (deposits + mints - burns).
    supply: BTreeMap<Denom, Decimal>,
}

impl Bank {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit an account out of thin air (genesis funding / test setup).
    /// Counts toward recorded supply.
    pub fn deposit(&mut self, addr: &AccountAddress, coin: &Coin) {
        *self
            .balances
            .entry((addr.clone(), coin.denom.clone()))
            .or_insert(Decimal::ZERO) += coin.amount;
        *self.supply.entry(coin.denom.clone()).or_insert(Decimal::ZERO) += coin.amount;
    }

    /// Create new supply into a module account.
    pub fn mint_coins(&mut self, module: &str, coin: &Coin) -> Result<()> {
        *self
            .module_balances
            .entry((module.to_string(), coin.denom.clone()))
            .or_insert(Decimal::ZERO) += coin.amount;
        *self.supply.entry(coin.denom.clone()).or_insert(Decimal::ZERO) += coin.amount;
        tracing::debug!(module, coin = %coin, "minted coins");
        Ok(())
    }

    /// Destroy supply held by a module account.
    ///
    /// # Errors
    /// Returns [`OpenpegError::InsufficientEscrow`] if the module holds less
    /// than `coin.amount`.
    pub fn burn_coins(&mut self, module: &str, coin: &Coin) -> Result<()> {
        let held = self.module_balance(module, &coin.denom);
        if held < coin.amount {
            return Err(OpenpegError::InsufficientEscrow {
                module: module.to_string(),
                denom: coin.denom.clone(),
            });
        }
        *self
            .module_balances
            .get_mut(&(module.to_string(), coin.denom.clone()))
            .ok_or(OpenpegError::UnknownDenom(coin.denom.clone()))? -= coin.amount;
        *self
            .supply
            .get_mut(&coin.denom)
            .ok_or(OpenpegError::UnknownDenom(coin.denom.clone()))? -= coin.amount;
        tracing::debug!(module, coin = %coin, "burned coins");
        Ok(())
    }

    /// Move coins from an account into a module escrow account.
    ///
    /// # Errors
    /// Returns [`OpenpegError::InsufficientBalance`] if the account's
    /// spendable balance is below `coin.amount`.
    pub fn send_from_account_to_module(
        &mut self,
        addr: &AccountAddress,
        module: &str,
        coin: &Coin,
    ) -> Result<()> {
        let available = self.balance_of(addr, &coin.denom);
        if available < coin.amount {
            return Err(OpenpegError::InsufficientBalance {
                needed: coin.amount,
                available,
            });
        }
        *self
            .balances
            .get_mut(&(addr.clone(), coin.denom.clone()))
            .ok_or(OpenpegError::UnknownDenom(coin.denom.clone()))? -= coin.amount;
        *self
            .module_balances
            .entry((module.to_string(), coin.denom.clone()))
            .or_insert(Decimal::ZERO) += coin.amount;
        Ok(())
    }

    /// Move coins from a module escrow account to an account.
    ///
    /// # Errors
    /// Returns [`OpenpegError::InsufficientEscrow`] if the module holds less
    /// than `coin.amount`.
    pub fn send_from_module_to_account(
        &mut self,
        module: &str,
        addr: &AccountAddress,
        coin: &Coin,
    ) -> Result<()> {
        let held = self.module_balance(module, &coin.denom);
        if held < coin.amount {
            return Err(OpenpegError::InsufficientEscrow {
                module: module.to_string(),
                denom: coin.denom.clone(),
            });
        }
        *self
            .module_balances
            .get_mut(&(module.to_string(), coin.denom.clone()))
            .ok_or(OpenpegError::UnknownDenom(coin.denom.clone()))? -= coin.amount;
        *self
            .balances
            .entry((addr.clone(), coin.denom.clone()))
            .or_insert(Decimal::ZERO) += coin.amount;
        Ok(())
    }

    /// Spendable balance of an account in one denom.
    #[must_use]
    pub fn balance_of(&self, addr: &AccountAddress, denom: &str) -> Decimal {
        self.balances
            .get(&(addr.clone(), denom.to_string()))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Escrow balance of a module account in one denom.
    #[must_use]
    pub fn module_balance(&self, module: &str, denom: &str) -> Decimal {
        self.module_balances
            .get(&(module.to_string(), denom.to_string()))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Recorded total supply of one denom.
    #[must_use]
    pub fn total_supply(&self, denom: &str) -> Decimal {
        self.supply.get(denom).copied().unwrap_or(Decimal::ZERO)
    }

    /// Verify supply conservation for one denom: the sum of every account
    /// and module balance must equal the recorded supply.
    ///
    /// # Errors
    /// Returns [`OpenpegError::SupplyInvariantViolation`] on mismatch.
    pub fn verify_supply(&self, denom: &str) -> Result<()> {
        let accounts: Decimal = self
            .balances
            .iter()
            .filter(|((_, d), _)| d == denom)
            .map(|(_, amount)| *amount)
            .sum();
        let modules: Decimal = self
            .module_balances
            .iter()
            .filter(|((_, d), _)| d == denom)
            .map(|(_, amount)| *amount)
            .sum();
        let actual = accounts + modules;
        let expected = self.total_supply(denom);
        if actual != expected {
            return Err(OpenpegError::SupplyInvariantViolation {
                reason: format!(
                    "denom {denom}: held {actual} != recorded supply {expected} \
                     (accounts={accounts}, modules={modules})"
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openpeg_types::constants::MODULE_NAME;

    fn coin(denom: &str, n: i64) -> Coin {
        Coin::new(denom, Decimal::new(n, 0)).unwrap()
    }

    #[test]
    fn deposit_and_query() {
        let mut bank = Bank::new();
        let alice = AccountAddress::random();
        bank.deposit(&alice, &coin("stake", 1000));
        assert_eq!(bank.balance_of(&alice, "stake"), Decimal::new(1000, 0));
        assert_eq!(bank.total_supply("stake"), Decimal::new(1000, 0));
        bank.verify_supply("stake").unwrap();
    }

    #[test]
    fn escrow_round_trip_restores_balances() {
        let mut bank = Bank::new();
        let alice = AccountAddress::random();
        bank.deposit(&alice, &coin("peg/ETH", 500));

        bank.send_from_account_to_module(&alice, MODULE_NAME, &coin("peg/ETH", 200))
            .unwrap();
        assert_eq!(bank.balance_of(&alice, "peg/ETH"), Decimal::new(300, 0));
        assert_eq!(
            bank.module_balance(MODULE_NAME, "peg/ETH"),
            Decimal::new(200, 0)
        );

        bank.send_from_module_to_account(MODULE_NAME, &alice, &coin("peg/ETH", 200))
            .unwrap();
        assert_eq!(bank.balance_of(&alice, "peg/ETH"), Decimal::new(500, 0));
        assert_eq!(bank.module_balance(MODULE_NAME, "peg/ETH"), Decimal::ZERO);
        bank.verify_supply("peg/ETH").unwrap();
    }

    #[test]
    fn send_insufficient_balance() {
        let mut bank = Bank::new();
        let alice = AccountAddress::random();
        bank.deposit(&alice, &coin("stake", 10));
        let err = bank
            .send_from_account_to_module(&alice, MODULE_NAME, &coin("stake", 11))
            .unwrap_err();
        assert!(matches!(err, OpenpegError::InsufficientBalance { .. }));
        // Nothing moved.
        assert_eq!(bank.balance_of(&alice, "stake"), Decimal::new(10, 0));
        assert_eq!(bank.module_balance(MODULE_NAME, "stake"), Decimal::ZERO);
    }

    #[test]
    fn release_insufficient_escrow() {
        let mut bank = Bank::new();
        let alice = AccountAddress::random();
        let err = bank
            .send_from_module_to_account(MODULE_NAME, &alice, &coin("stake", 1))
            .unwrap_err();
        assert!(matches!(err, OpenpegError::InsufficientEscrow { .. }));
    }

    #[test]
    fn mint_then_burn_round_trips_supply() {
        let mut bank = Bank::new();
        bank.mint_coins(MODULE_NAME, &coin("peg/ETH", 100)).unwrap();
        assert_eq!(bank.total_supply("peg/ETH"), Decimal::new(100, 0));
        assert_eq!(
            bank.module_balance(MODULE_NAME, "peg/ETH"),
            Decimal::new(100, 0)
        );

        bank.burn_coins(MODULE_NAME, &coin("peg/ETH", 100)).unwrap();
        assert_eq!(bank.total_supply("peg/ETH"), Decimal::ZERO);
        assert_eq!(bank.module_balance(MODULE_NAME, "peg/ETH"), Decimal::ZERO);
        bank.verify_supply("peg/ETH").unwrap();
    }

    #[test]
    fn burn_more_than_held_fails() {
        let mut bank = Bank::new();
        bank.mint_coins(MODULE_NAME, &coin("peg/ETH", 50)).unwrap();
        let err = bank.burn_coins(MODULE_NAME, &coin("peg/ETH", 51)).unwrap_err();
        assert!(matches!(err, OpenpegError::InsufficientEscrow { .. }));
        assert_eq!(bank.total_supply("peg/ETH"), Decimal::new(50, 0));
    }

    #[test]
    fn denoms_are_independent() {
        let mut bank = Bank::new();
        let alice = AccountAddress::random();
        bank.deposit(&alice, &coin("peg/ETH", 5));
        bank.deposit(&alice, &coin("peg/BTC", 7));
        assert_eq!(bank.balance_of(&alice, "peg/ETH"), Decimal::new(5, 0));
        assert_eq!(bank.balance_of(&alice, "peg/BTC"), Decimal::new(7, 0));
        bank.verify_supply("peg/ETH").unwrap();
        bank.verify_supply("peg/BTC").unwrap();
    }

    #[test]
    fn supply_of_unseen_denom_is_zero() {
        let bank = Bank::new();
        assert_eq!(bank.total_supply("nope"), Decimal::ZERO);
        bank.verify_supply("nope").unwrap();
    }
}
