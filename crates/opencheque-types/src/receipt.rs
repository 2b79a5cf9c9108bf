//! Redemption receipt — the record emitted when a cheque settles.
//!
//! A successful `redeem` produces exactly one receipt. Together with the
//! permanently retained cheque record, receipts form the audit trail of
//! every transfer the engine ever executed.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::ChequeId;

/// Proof that a cheque was redeemed and its funds moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedemptionReceipt {
    /// The cheque that was redeemed.
    pub cheque_id: ChequeId,
    /// Account debited.
    pub payer: Address,
    /// Account credited.
    pub payee: Address,
    /// Amount transferred, in ledger units.
    pub amount: U256,
    /// Ledger time at which redemption executed.
    pub redeemed_at: u32,
}
