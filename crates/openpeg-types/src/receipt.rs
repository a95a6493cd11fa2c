//! Settlement receipts for the OpenPeg audit trail.
//!
//! Every applied settlement produces a [`SettlementReceipt`]. Rejections and
//! idempotent no-ops do not — the receipt log is exactly the sequence of
//! ledger mutations the dispatcher performed.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AccountAddress, ClaimType, Denom, OperationId};

/// An append-only record of one applied settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementReceipt {
    /// The dedup fingerprint this settlement was keyed under.
    pub operation_id: OperationId,
    /// Which of the four operations was applied.
    pub claim_type: ClaimType,
    /// The account whose balance changed.
    pub sender: AccountAddress,
    /// Denomination the operation moved.
    pub denom: Denom,
    /// Whole-unit amount moved, minted, or destroyed.
    pub amount: Decimal,
    /// When the dispatcher applied the settlement.
    pub settled_at: DateTime<Utc>,
}
