//! # Cheque — the signed bearer instrument
//!
//! A cheque is an off-chain payment authorization: the payer signs a
//! commitment over the cheque's fields plus the settlement instance's
//! identity, and hands the signed instrument to the payee. No engine state
//! changes at authorization time; the payee presents the cheque later.
//!
//! ## State Machine
//!
//! ```text
//!   ┌─────────┐   issue    ┌────────┐   redeem    ┌──────────┐
//!   │ UNKNOWN ├───────────▶│ ISSUED ├────────────▶│ REDEEMED │
//!   └─────────┘            └───┬────┘             └──────────┘
//!                              │ revoke
//!                              ▼
//!                          ┌─────────┐
//!                          │ REVOKED │
//!                          └─────────┘
//! ```
//!
//! `REDEEMED` and `REVOKED` are terminal and mutually exclusive. The status
//! is the single source of truth for replay protection: once terminal, a
//! cheque can never move funds again.

use std::fmt;

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::ChequeId;
use crate::constants::NO_TIME_BOUND;

/// The lifecycle status of a cheque, tracked per [`ChequeId`].
///
/// Transitions are **monotonic** (never go backwards):
/// - `Unknown → Issued` (issuance stored the signed instrument)
/// - `Issued → Redeemed` (funds moved, **irreversible**)
/// - `Issued → Revoked` (payer cancelled, **irreversible**)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChequeStatus {
    /// Never issued. Represented for ids the registry has no record of.
    Unknown,
    /// Stored and redeemable.
    Issued,
    /// Redeemed exactly once. Terminal.
    Redeemed,
    /// Revoked by the payer. Terminal.
    Revoked,
}

impl ChequeStatus {
    /// Can this status transition to the given target status?
    #[must_use]
    pub fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Unknown, Self::Issued) | (Self::Issued, Self::Redeemed | Self::Revoked)
        )
    }

    /// Whether the cheque is in a terminal (irreversible) status.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Redeemed | Self::Revoked)
    }
}

impl fmt::Display for ChequeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "UNKNOWN"),
            Self::Issued => write!(f, "ISSUED"),
            Self::Redeemed => write!(f, "REDEEMED"),
            Self::Revoked => write!(f, "REVOKED"),
        }
    }
}

/// The immutable fields of a cheque. These are exactly the fields bound by
/// the payer's signature (together with the settlement instance identity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChequeInfo {
    /// Caller-chosen random identifier, unique among ever-issued cheques.
    pub cheque_id: ChequeId,
    /// The account that signed and funds the cheque.
    pub payer: Address,
    /// The only account allowed to redeem the cheque.
    pub payee: Address,
    /// Amount in ledger units. Must be positive.
    pub amount: U256,
    /// Ledger-time lower bound; `0` means no lower bound.
    pub valid_from: u32,
    /// Ledger-time upper bound; `0` means no upper bound.
    pub valid_thru: u32,
}

impl ChequeInfo {
    /// Whether `now` falls inside the validity window.
    ///
    /// Each bound is inclusive and `0` disables it, so a cheque with
    /// `valid_from == valid_thru == 0` is valid at any time.
    #[must_use]
    pub fn in_window(&self, now: u32) -> bool {
        (self.valid_from == NO_TIME_BOUND || now >= self.valid_from)
            && (self.valid_thru == NO_TIME_BOUND || now <= self.valid_thru)
    }
}

/// A signed cheque: the immutable fields plus the payer's recoverable
/// signature over their commitment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cheque {
    /// The signed fields.
    pub info: ChequeInfo,
    /// Recoverable signature, 65 bytes: r (32) ‖ s (32) ‖ v (1).
    pub signature: Vec<u8>,
}

impl Cheque {
    #[must_use]
    pub fn new(info: ChequeInfo, signature: Vec<u8>) -> Self {
        Self { info, signature }
    }
}
