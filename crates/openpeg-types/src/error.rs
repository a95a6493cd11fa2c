//! Error types for the OpenPeg bridge.
//!
//! All errors use the `OP_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Claim / validation errors
//! - 2xx: Dedup / idempotency errors
//! - 3xx: Authorization errors
//! - 4xx: Ledger / balance errors
//! - 5xx: Oracle / consensus errors
//! - 9xx: General / internal errors

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{AccountAddress, ClaimId, OperationId, ValidatorAddress};

/// Central error enum for all OpenPeg operations.
#[derive(Debug, Error)]
pub enum OpenpegError {
    // =================================================================
    // Claim / Validation Errors (1xx)
    // =================================================================
    /// The serialized claim could not be decoded at all.
    #[error("OP_ERR_100: Malformed claim: {0}")]
    MalformedClaim(String),

    /// The claim decoded but failed structural validation.
    #[error("OP_ERR_101: Invalid claim: {reason}")]
    InvalidClaim { reason: String },

    /// The claim's operation tag is outside {lock, burn, unlock, unburn}.
    #[error("OP_ERR_102: Invalid claim type: {0:?}")]
    InvalidClaimType(String),

    /// The claim's amount is not a non-negative integer.
    #[error("OP_ERR_103: Invalid amount: {0:?}")]
    InvalidAmount(String),

    // =================================================================
    // Dedup / Idempotency Errors (2xx)
    // =================================================================
    /// A forward operation with this id was already settled.
    #[error("OP_ERR_200: Duplicate operation: {0}")]
    DuplicateOperation(OperationId),

    // =================================================================
    // Authorization Errors (3xx)
    // =================================================================
    /// The originating validator is not active in the whitelist.
    #[error("OP_ERR_300: Validator not in the whitelist: {0}")]
    UnauthorizedValidator(ValidatorAddress),

    /// The caller is not the configured bridge admin.
    #[error("OP_ERR_301: Not the bridge admin: {0}")]
    UnauthorizedAdmin(AccountAddress),

    // =================================================================
    // Ledger / Balance Errors (4xx)
    // =================================================================
    /// Not enough spendable balance to perform the transfer.
    #[error("OP_ERR_400: Insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Decimal, available: Decimal },

    /// The module escrow account holds less than the requested amount.
    #[error("OP_ERR_401: Insufficient escrow in module {module} for {denom}")]
    InsufficientEscrow { module: String, denom: String },

    /// The denomination has never been seen by the ledger.
    #[error("OP_ERR_402: Unknown denomination: {0}")]
    UnknownDenom(String),

    /// Supply conservation invariant violated — critical safety alert.
    #[error("OP_ERR_403: Supply invariant violation: {reason}")]
    SupplyInvariantViolation { reason: String },

    // =================================================================
    // Oracle / Consensus Errors (5xx)
    // =================================================================
    /// This validator already submitted a claim for this prophecy.
    #[error("OP_ERR_500: Duplicate claim submission from validator: {0}")]
    DuplicateClaimSubmission(ValidatorAddress),

    /// The prophecy already reached a final status.
    #[error("OP_ERR_501: Prophecy already finalized: {0}")]
    ProphecyFinalized(ClaimId),

    /// The whitelist has no active validators; no claim can finalize.
    #[error("OP_ERR_502: Validator whitelist is empty")]
    EmptyWhitelist,

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("OP_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("OP_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (invalid threshold, missing fields, etc.).
    #[error("OP_ERR_902: Configuration error: {0}")]
    Configuration(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, OpenpegError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let sender = AccountAddress::new("peg1sender").unwrap();
        let err = OpenpegError::DuplicateOperation(OperationId::forward(&sender, 1));
        let msg = format!("{err}");
        assert!(msg.starts_with("OP_ERR_200"), "Got: {msg}");
    }

    #[test]
    fn insufficient_balance_display() {
        let err = OpenpegError::InsufficientBalance {
            needed: Decimal::new(100, 0),
            available: Decimal::new(50, 0),
        };
        let msg = format!("{err}");
        assert!(msg.contains("OP_ERR_400"));
        assert!(msg.contains("100"));
        assert!(msg.contains("50"));
    }

    #[test]
    fn all_errors_have_op_err_prefix() {
        let validator = ValidatorAddress::new("pegvaloper1v").unwrap();
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(OpenpegError::MalformedClaim("x".into())),
            Box::new(OpenpegError::InvalidClaimType("mint".into())),
            Box::new(OpenpegError::UnauthorizedValidator(validator.clone())),
            Box::new(OpenpegError::DuplicateClaimSubmission(validator)),
            Box::new(OpenpegError::EmptyWhitelist),
            Box::new(OpenpegError::Internal("test".into())),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("OP_ERR_"),
                "Error missing OP_ERR_ prefix: {msg}"
            );
        }
    }
}
