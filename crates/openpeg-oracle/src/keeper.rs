//! Oracle keeper: whitelist administration plus vote aggregation.

use std::collections::BTreeMap;

use openpeg_types::{
    AccountAddress, BridgeClaim, BridgeConfig, ClaimId, ClaimStatus, OpenpegError, Result,
    StatusText, ValidatorAddress,
};

use crate::prophecy::Prophecy;
use crate::whitelist::{ValidatorWhitelist, WhitelistOp};

/// Aggregates claims across validators and guards the whitelist.
///
/// The settlement dispatcher reaches this through its `Oracle` capability
/// trait; nothing here touches the ledger.
#[derive(Debug)]
pub struct OracleKeeper {
    whitelist: ValidatorWhitelist,
    prophecies: BTreeMap<ClaimId, Prophecy>,
    config: BridgeConfig,
}

impl OracleKeeper {
    #[must_use]
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            whitelist: ValidatorWhitelist::new(),
            prophecies: BTreeMap::new(),
            config,
        }
    }

    /// Record one validator's claim and return the aggregation status.
    ///
    /// The caller (the dispatcher) invokes settlement exactly when the
    /// returned status flips to `Success`.
    ///
    /// # Errors
    /// - [`OpenpegError::EmptyWhitelist`] if no validator is active at all
    /// - [`OpenpegError::UnauthorizedValidator`] if the submitting validator
    ///   is not active in the whitelist
    /// - [`OpenpegError::ProphecyFinalized`] if this claim id already
    ///   reached a final status
    /// - [`OpenpegError::DuplicateClaimSubmission`] if this validator
    ///   already voted on this claim id
    pub fn process_claim(
        &mut self,
        validator: &ValidatorAddress,
        claim: &BridgeClaim,
    ) -> Result<ClaimStatus> {
        if self.whitelist.active_count() == 0 {
            return Err(OpenpegError::EmptyWhitelist);
        }
        if !self.whitelist.is_active(validator) {
            return Err(OpenpegError::UnauthorizedValidator(validator.clone()));
        }

        let id = claim.claim_id();
        let content = claim.content_string()?;
        let finalized = claim.to_finalized_string()?;
        let prophecy = self
            .prophecies
            .entry(id)
            .or_insert_with(|| Prophecy::new(id));

        if prophecy.status.text != StatusText::Pending {
            return Err(OpenpegError::ProphecyFinalized(id));
        }

        prophecy.record(validator, content, finalized)?;
        prophecy.retally(
            self.whitelist.active_count(),
            self.config.consensus_threshold,
        );

        if prophecy.status.is_success() {
            tracing::info!(
                claim_id = %id,
                votes = prophecy.vote_count(),
                "claim reached consensus"
            );
        }
        Ok(prophecy.status.clone())
    }

    /// Whitelist membership check for reverse-direction settlement.
    /// Consulted per call, never cached.
    #[must_use]
    pub fn validate_address(&self, validator: &ValidatorAddress) -> bool {
        self.whitelist.is_active(validator)
    }

    /// Apply an administrative whitelist mutation.
    ///
    /// # Errors
    /// Returns [`OpenpegError::UnauthorizedAdmin`] unless `admin` is the
    /// configured bridge admin.
    pub fn update_whitelist(
        &mut self,
        admin: &AccountAddress,
        validator: &ValidatorAddress,
        op: WhitelistOp,
    ) -> Result<()> {
        if *admin != self.config.admin {
            return Err(OpenpegError::UnauthorizedAdmin(admin.clone()));
        }
        match op {
            WhitelistOp::Add => self.whitelist.add(validator),
            WhitelistOp::Remove => self.whitelist.remove(validator),
        }
        tracing::info!(%validator, ?op, "whitelist updated");
        Ok(())
    }

    /// Look up a prophecy by claim id.
    #[must_use]
    pub fn prophecy(&self, id: &ClaimId) -> Option<&Prophecy> {
        self.prophecies.get(id)
    }

    /// The whitelist, read-only.
    #[must_use]
    pub fn whitelist(&self) -> &ValidatorWhitelist {
        &self.whitelist
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openpeg_types::{ClaimType, StatusText};
    use rust_decimal::Decimal;

    fn keeper_with_validators(n: usize) -> (OracleKeeper, AccountAddress, Vec<ValidatorAddress>) {
        let admin = AccountAddress::random();
        let mut keeper = OracleKeeper::new(BridgeConfig::new(admin.clone()));
        let validators: Vec<ValidatorAddress> =
            (0..n).map(|_| ValidatorAddress::random()).collect();
        for v in &validators {
            keeper.update_whitelist(&admin, v, WhitelistOp::Add).unwrap();
        }
        (keeper, admin, validators)
    }

    fn lock_claim(validator: &ValidatorAddress) -> BridgeClaim {
        BridgeClaim {
            source_chain: "ethereum".to_string(),
            claim_type: ClaimType::Lock,
            sender: AccountAddress::new("peg1sender").unwrap(),
            receiver: AccountAddress::new("0xreceiver").unwrap(),
            symbol: "ETH".to_string(),
            amount: Decimal::new(100, 0),
            sequence: 1,
            validator: validator.clone(),
        }
    }

    #[test]
    fn consensus_flips_to_success_exactly_at_threshold() {
        let (mut keeper, _, validators) = keeper_with_validators(3);

        let s = keeper
            .process_claim(&validators[0], &lock_claim(&validators[0]))
            .unwrap();
        assert_eq!(s.text, StatusText::Pending);

        let s = keeper
            .process_claim(&validators[1], &lock_claim(&validators[1]))
            .unwrap();
        assert_eq!(s.text, StatusText::Pending);

        let s = keeper
            .process_claim(&validators[2], &lock_claim(&validators[2]))
            .unwrap();
        assert_eq!(s.text, StatusText::Success);
        assert!(!s.final_claim.is_empty());
    }

    #[test]
    fn empty_whitelist_rejects_every_claim() {
        let (mut keeper, _, _) = keeper_with_validators(0);
        let v = ValidatorAddress::random();
        let err = keeper.process_claim(&v, &lock_claim(&v)).unwrap_err();
        assert!(matches!(err, OpenpegError::EmptyWhitelist));
    }

    #[test]
    fn non_whitelisted_validator_rejected() {
        let (mut keeper, _, _) = keeper_with_validators(1);
        let stranger = ValidatorAddress::random();
        let err = keeper
            .process_claim(&stranger, &lock_claim(&stranger))
            .unwrap_err();
        assert!(matches!(err, OpenpegError::UnauthorizedValidator(_)));
    }

    #[test]
    fn duplicate_vote_rejected() {
        let (mut keeper, _, validators) = keeper_with_validators(3);
        keeper
            .process_claim(&validators[0], &lock_claim(&validators[0]))
            .unwrap();
        let err = keeper
            .process_claim(&validators[0], &lock_claim(&validators[0]))
            .unwrap_err();
        assert!(matches!(err, OpenpegError::DuplicateClaimSubmission(_)));
    }

    #[test]
    fn vote_after_finality_rejected() {
        let (mut keeper, _, validators) = keeper_with_validators(1);
        let s = keeper
            .process_claim(&validators[0], &lock_claim(&validators[0]))
            .unwrap();
        assert_eq!(s.text, StatusText::Success);

        let err = keeper
            .process_claim(&validators[0], &lock_claim(&validators[0]))
            .unwrap_err();
        assert!(matches!(err, OpenpegError::ProphecyFinalized(_)));
    }

    #[test]
    fn admin_gate_on_whitelist() {
        let (mut keeper, _, _) = keeper_with_validators(0);
        let impostor = AccountAddress::random();
        let v = ValidatorAddress::random();
        let err = keeper
            .update_whitelist(&impostor, &v, WhitelistOp::Add)
            .unwrap_err();
        assert!(matches!(err, OpenpegError::UnauthorizedAdmin(_)));
        assert!(!keeper.validate_address(&v));
    }

    #[test]
    fn remove_revokes_authorization() {
        let (mut keeper, admin, validators) = keeper_with_validators(1);
        assert!(keeper.validate_address(&validators[0]));
        keeper
            .update_whitelist(&admin, &validators[0], WhitelistOp::Remove)
            .unwrap();
        assert!(!keeper.validate_address(&validators[0]));
    }

    #[test]
    fn disagreement_fails_prophecy() {
        let (mut keeper, _, validators) = keeper_with_validators(2);

        let claim_a = lock_claim(&validators[0]);
        let mut claim_b = lock_claim(&validators[1]);
        claim_b.amount = Decimal::new(999, 0); // disagreeing attestation

        keeper.process_claim(&validators[0], &claim_a).unwrap();
        let s = keeper.process_claim(&validators[1], &claim_b).unwrap();
        // 1 supporter each of 2 active at 67%: nothing reached threshold and
        // everyone voted.
        assert_eq!(s.text, StatusText::Failed);
    }
}
