//! Settlement dispatcher — routes a finalized claim to one of the four
//! operation handlers.
//!
//! Invoked by the oracle exactly at the finality transition, and again on
//! redelivery (live retries, historical backfill after downtime). Replay
//! correctness reduces entirely to the `OperationId` idempotency rule in
//! [`crate::dedup`].
//!
//! Failure discipline, per handler:
//! - a rejection (validation, duplicate, unauthorized, unknown type)
//!   performs zero mutation
//! - a ledger failure before any unowned mint/escrow exists rolls back the
//!   dedup write and propagates
//! - a ledger failure *after* supply has been minted or escrowed with no
//!   assigned final owner aborts the enclosing transaction (panic); a
//!   retryable error here would silently strand supply with no owner

use chrono::Utc;
use openpeg_types::{
    AccountAddress, BridgeClaim, BridgeConfig, ClaimStatus, ClaimType, Coin, OpenpegError,
    OperationId, Result, SettlementReceipt, ValidatorAddress,
};

use openpeg_ledger::{PeggedTokenRegistry, pegged_denom};
use openpeg_oracle::WhitelistOp;

use crate::dedup::DedupStore;
use crate::traits::{Ledger, Oracle};
use crate::translator;

/// The settlement state machine.
///
/// Generic over the [`Ledger`] and [`Oracle`] capabilities supplied at
/// construction; owns the dedup store, the pegged-token registry, and the
/// settlement receipt log.
pub struct SettlementDispatcher<L: Ledger, O: Oracle> {
    ledger: L,
    oracle: O,
    dedup: DedupStore,
    registry: PeggedTokenRegistry,
    receipts: Vec<SettlementReceipt>,
    config: BridgeConfig,
}

impl<L: Ledger, O: Oracle> SettlementDispatcher<L, O> {
    #[must_use]
    pub fn new(ledger: L, oracle: O, config: BridgeConfig) -> Self {
        Self {
            ledger,
            oracle,
            dedup: DedupStore::new(),
            registry: PeggedTokenRegistry::new(),
            receipts: Vec::new(),
            config,
        }
    }

    /// Forward a not-yet-finalized claim to the oracle for voting.
    ///
    /// Performs structural validation only; never mutates the ledger.
    pub fn process_claim(&mut self, claim: &BridgeClaim) -> Result<ClaimStatus> {
        claim.validate()?;
        self.oracle.process_claim(&claim.validator, claim)
    }

    /// Apply a claim that has just completed successfully with consensus.
    ///
    /// Translates the finalized claim string, resolves the pegged
    /// denomination, and dispatches by operation type. The registry entry
    /// for a Lock/Burn symbol is created only after its handler succeeds,
    /// so a failed settlement leaves no trace in the registry either.
    ///
    /// # Errors
    /// Translation errors, [`OpenpegError::InvalidClaimType`], the
    /// per-direction dedup errors, [`OpenpegError::UnauthorizedValidator`],
    /// or a propagated ledger error — all without partial mutation.
    pub fn process_successful_claim(&mut self, serialized: &str) -> Result<()> {
        let claim = translator::translate(serialized)?;
        let coin = Coin::new(pegged_denom(&claim.symbol), claim.amount)?;

        match claim.claim_type {
            ClaimType::Lock => self.process_lock(&claim.sender, claim.sequence, &coin)?,
            ClaimType::Burn => self.process_burn(&claim.sender, claim.sequence, &coin)?,
            ClaimType::Unlock => {
                self.process_unlock(&claim.sender, claim.sequence, &coin, &claim.validator)?;
            }
            ClaimType::Unburn => {
                self.process_unburn(&claim.sender, claim.sequence, &coin, &claim.validator)?;
            }
        }

        if matches!(claim.claim_type, ClaimType::Lock | ClaimType::Burn) {
            self.registry.ensure_registered(&claim.symbol);
        }
        Ok(())
    }

    /// Lock: escrow `coin` from the sender into the bridge module.
    ///
    /// Forward dedup discipline: a second call with the same
    /// (sender, sequence) is [`OpenpegError::DuplicateOperation`].
    pub fn process_lock(
        &mut self,
        sender: &AccountAddress,
        sequence: u64,
        coin: &Coin,
    ) -> Result<()> {
        let id = OperationId::forward(sender, sequence);
        self.dedup.insert_new(id)?;

        if let Err(err) =
            self.ledger
                .send_from_account_to_module(sender, &self.config.module_name, coin)
        {
            self.dedup.rollback(&id);
            return Err(err);
        }

        tracing::info!(%id, %sender, %coin, "lock settled");
        self.push_receipt(id, ClaimType::Lock, sender, coin);
        Ok(())
    }

    /// Burn: escrow `coin` from the sender, then destroy it, permanently
    /// reducing circulating pegged supply.
    ///
    /// # Panics
    /// Aborts if the escrowed coins cannot be burned: at that point the
    /// module holds coins whose settlement can no longer complete.
    pub fn process_burn(
        &mut self,
        sender: &AccountAddress,
        sequence: u64,
        coin: &Coin,
    ) -> Result<()> {
        let id = OperationId::forward(sender, sequence);
        self.dedup.insert_new(id)?;

        if let Err(err) =
            self.ledger
                .send_from_account_to_module(sender, &self.config.module_name, coin)
        {
            self.dedup.rollback(&id);
            return Err(err);
        }

        if let Err(err) = self.ledger.burn_coins(&self.config.module_name, coin) {
            panic!("settlement aborted: escrowed {coin} could not be burned: {err}");
        }

        tracing::info!(%id, %sender, %coin, "burn settled");
        self.push_receipt(id, ClaimType::Burn, sender, coin);
        Ok(())
    }

    /// Unlock: release `coin` from escrow back to the sender.
    ///
    /// Whitelist-gated; reverse dedup discipline: redelivery returns
    /// `Ok(())` with zero side effects.
    pub fn process_unlock(
        &mut self,
        sender: &AccountAddress,
        sequence: u64,
        coin: &Coin,
        validator: &ValidatorAddress,
    ) -> Result<()> {
        if !self.oracle.validate_address(validator) {
            return Err(OpenpegError::UnauthorizedValidator(validator.clone()));
        }

        let id = OperationId::reverse(sender, sequence);
        if !self.dedup.set_settled(id) {
            tracing::debug!(%id, "unlock redelivery, already settled");
            return Ok(());
        }

        if let Err(err) =
            self.ledger
                .send_from_module_to_account(&self.config.module_name, sender, coin)
        {
            self.dedup.rollback(&id);
            return Err(err);
        }

        tracing::info!(%id, %sender, %coin, "unlock settled");
        self.push_receipt(id, ClaimType::Unlock, sender, coin);
        Ok(())
    }

    /// Unburn: mint `coin` of pegged supply and transfer it to the sender,
    /// compensating a foreign-chain reversal of a prior burn.
    ///
    /// Whitelist-gated; reverse dedup discipline.
    ///
    /// # Panics
    /// Aborts if the final transfer fails after the mint: minted supply
    /// would otherwise sit in the module with no assigned owner.
    pub fn process_unburn(
        &mut self,
        sender: &AccountAddress,
        sequence: u64,
        coin: &Coin,
        validator: &ValidatorAddress,
    ) -> Result<()> {
        if !self.oracle.validate_address(validator) {
            return Err(OpenpegError::UnauthorizedValidator(validator.clone()));
        }

        let id = OperationId::reverse(sender, sequence);
        if !self.dedup.set_settled(id) {
            tracing::debug!(%id, "unburn redelivery, already settled");
            return Ok(());
        }

        if let Err(err) = self.ledger.mint_coins(&self.config.module_name, coin) {
            self.dedup.rollback(&id);
            return Err(err);
        }

        if let Err(err) =
            self.ledger
                .send_from_module_to_account(&self.config.module_name, sender, coin)
        {
            panic!("settlement aborted: minted {coin} has no owner: {err}");
        }

        tracing::info!(%id, %sender, %coin, "unburn settled");
        self.push_receipt(id, ClaimType::Unburn, sender, coin);
        Ok(())
    }

    /// Apply an administrative whitelist mutation; settlement state is
    /// untouched. Authorization of `admin` is the oracle's concern.
    pub fn process_update_whitelist_validator(
        &mut self,
        admin: &AccountAddress,
        validator: &ValidatorAddress,
        op: WhitelistOp,
    ) -> Result<()> {
        self.oracle.update_whitelist(admin, validator, op)
    }

    /// Whether an operation id has been settled. External inspection
    /// surface over the dedup store.
    #[must_use]
    pub fn exists(&self, id: &OperationId) -> bool {
        self.dedup.exists(id)
    }

    /// The append-only settlement audit trail.
    #[must_use]
    pub fn receipts(&self) -> &[SettlementReceipt] {
        &self.receipts
    }

    /// The pegged-token registry, read-only.
    #[must_use]
    pub fn registry(&self) -> &PeggedTokenRegistry {
        &self.registry
    }

    /// The ledger capability, read-only (balance inspection).
    #[must_use]
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// The oracle capability, read-only.
    #[must_use]
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    fn push_receipt(
        &mut self,
        operation_id: OperationId,
        claim_type: ClaimType,
        sender: &AccountAddress,
        coin: &Coin,
    ) {
        self.receipts.push(SettlementReceipt {
            operation_id,
            claim_type,
            sender: sender.clone(),
            denom: coin.denom.clone(),
            amount: coin.amount,
            settled_at: Utc::now(),
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests against injectable test doubles (the abort paths need a ledger
// that fails on command; the integration tests in tests/ use the real Bank
// and OracleKeeper).
// ---------------------------------------------------------------------------
