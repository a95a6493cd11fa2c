//! Capability traits the dispatcher is constructed over.
//!
//! The original design reached its collaborators through ambient module
//! handles; here they are explicit capabilities so the dispatcher can be
//! exercised against the real [`Bank`]/[`OracleKeeper`] or against test
//! doubles that inject ledger failures.

use openpeg_types::{
    AccountAddress, BridgeClaim, ClaimStatus, Coin, Result, ValidatorAddress,
};

use openpeg_ledger::Bank;
use openpeg_oracle::{OracleKeeper, WhitelistOp};

/// Authoritative token accounting on the destination ledger.
pub trait Ledger {
    /// Create new supply into a module account.
    fn mint_coins(&mut self, module: &str, coin: &Coin) -> Result<()>;
    /// Destroy supply held by a module account.
    fn burn_coins(&mut self, module: &str, coin: &Coin) -> Result<()>;
    /// Escrow coins from an account into a module account.
    fn send_from_account_to_module(
        &mut self,
        addr: &AccountAddress,
        module: &str,
        coin: &Coin,
    ) -> Result<()>;
    /// Release coins from a module account to an account.
    fn send_from_module_to_account(
        &mut self,
        module: &str,
        addr: &AccountAddress,
        coin: &Coin,
    ) -> Result<()>;
}

/// Vote aggregation and validator authorization.
pub trait Oracle {
    /// Record one validator's claim; returns the aggregation status.
    fn process_claim(
        &mut self,
        validator: &ValidatorAddress,
        claim: &BridgeClaim,
    ) -> Result<ClaimStatus>;
    /// Whitelist membership check; consulted per call, never cached.
    fn validate_address(&self, validator: &ValidatorAddress) -> bool;
    /// Admin-gated whitelist mutation.
    fn update_whitelist(
        &mut self,
        admin: &AccountAddress,
        validator: &ValidatorAddress,
        op: WhitelistOp,
    ) -> Result<()>;
}

impl Ledger for Bank {
    fn mint_coins(&mut self, module: &str, coin: &Coin) -> Result<()> {
        Bank::mint_coins(self, module, coin)
    }

    fn burn_coins(&mut self, module: &str, coin: &Coin) -> Result<()> {
        Bank::burn_coins(self, module, coin)
    }

    fn send_from_account_to_module(
        &mut self,
        addr: &AccountAddress,
        module: &str,
        coin: &Coin,
    ) -> Result<()> {
        Bank::send_from_account_to_module(self, addr, module, coin)
    }

    fn send_from_module_to_account(
        &mut self,
        module: &str,
        addr: &AccountAddress,
        coin: &Coin,
    ) -> Result<()> {
        Bank::send_from_module_to_account(self, module, addr, coin)
    }
}

impl Oracle for OracleKeeper {
    fn process_claim(
        &mut self,
        validator: &ValidatorAddress,
        claim: &BridgeClaim,
    ) -> Result<ClaimStatus> {
        OracleKeeper::process_claim(self, validator, claim)
    }

    fn validate_address(&self, validator: &ValidatorAddress) -> bool {
        OracleKeeper::validate_address(self, validator)
    }

    fn update_whitelist(
        &mut self,
        admin: &AccountAddress,
        validator: &ValidatorAddress,
        op: WhitelistOp,
    ) -> Result<()> {
        OracleKeeper::update_whitelist(self, admin, validator, op)
    }
}
