//! Claim translator: finalized wire string → typed, validated record.
//!
//! Translation performs structural checks only and never touches the
//! ledger. Each malformation maps to its precise error so callers can tell
//! a garbage payload ([`OpenpegError::MalformedClaim`]) from a well-formed
//! claim with an unknown operation tag ([`OpenpegError::InvalidClaimType`])
//! or a bad amount ([`OpenpegError::InvalidAmount`]).

use std::str::FromStr;

use openpeg_types::{
    AccountAddress, BridgeClaim, ClaimType, OpenpegError, RawClaim, Result, ValidatorAddress,
};
use rust_decimal::Decimal;

/// Parse and validate a finalized claim string.
pub fn translate(serialized: &str) -> Result<BridgeClaim> {
    let raw: RawClaim = serde_json::from_str(serialized)
        .map_err(|e| OpenpegError::MalformedClaim(e.to_string()))?;

    let claim_type = ClaimType::from_str(&raw.claim_type)?;
    let amount = Decimal::from_str(&raw.amount)
        .map_err(|_| OpenpegError::InvalidAmount(raw.amount.clone()))?;

    let claim = BridgeClaim {
        source_chain: raw.source_chain,
        claim_type,
        sender: AccountAddress::new(raw.sender)?,
        receiver: AccountAddress::new(raw.receiver)?,
        symbol: raw.symbol,
        amount,
        sequence: raw.sequence,
        validator: ValidatorAddress::new(raw.validator)?,
    };
    claim.validate()?;
    Ok(claim)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire(claim_type: &str, amount: &str) -> String {
        format!(
            "{{\"source_chain\":\"ethereum\",\"claim_type\":\"{claim_type}\",\
             \"sender\":\"peg1sender\",\"receiver\":\"0xreceiver\",\
             \"symbol\":\"ETH\",\"amount\":\"{amount}\",\"sequence\":1,\
             \"validator\":\"pegvaloper1v\"}}"
        )
    }

    #[test]
    fn translate_round_trips_with_finalized_string() {
        let claim = translate(&wire("lock", "100")).unwrap();
        assert_eq!(claim.claim_type, ClaimType::Lock);
        assert_eq!(claim.amount, Decimal::new(100, 0));
        assert_eq!(claim.sequence, 1);

        let reserialized = claim.to_finalized_string().unwrap();
        let back = translate(&reserialized).unwrap();
        assert_eq!(claim, back);
    }

    #[test]
    fn garbage_is_malformed() {
        let err = translate("not json at all").unwrap_err();
        assert!(matches!(err, OpenpegError::MalformedClaim(_)));
    }

    #[test]
    fn missing_field_is_malformed() {
        let err = translate("{\"source_chain\":\"ethereum\"}").unwrap_err();
        assert!(matches!(err, OpenpegError::MalformedClaim(_)));
    }

    #[test]
    fn unknown_tag_is_invalid_claim_type() {
        let err = translate(&wire("mint", "100")).unwrap_err();
        assert!(matches!(err, OpenpegError::InvalidClaimType(tag) if tag == "mint"));
    }

    #[test]
    fn unparseable_amount_is_invalid_amount() {
        let err = translate(&wire("lock", "ten")).unwrap_err();
        assert!(matches!(err, OpenpegError::InvalidAmount(_)));
    }

    #[test]
    fn negative_amount_rejected() {
        let err = translate(&wire("lock", "-5")).unwrap_err();
        assert!(matches!(err, OpenpegError::InvalidAmount(_)));
    }

    #[test]
    fn fractional_amount_rejected() {
        let err = translate(&wire("lock", "1.5")).unwrap_err();
        assert!(matches!(err, OpenpegError::InvalidAmount(_)));
    }

    #[test]
    fn empty_sender_rejected() {
        let serialized = wire("lock", "100").replace("peg1sender", "");
        let err = translate(&serialized).unwrap_err();
        assert!(matches!(err, OpenpegError::InvalidClaim { .. }));
    }
}
