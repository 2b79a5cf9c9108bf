//! Cheque registry — issuance validation and lifecycle bookkeeping.
//!
//! Stores, per cheque id, the immutable signed instrument plus its current
//! [`ChequeStatus`]. Records are retained indefinitely: a terminal status
//! must stay queryable forever, because it is what permanently blocks
//! re-redemption. There is no eviction.
//!
//! Issuance validation re-derives the commitment and recovers the signer
//! (see `opencheque-signing`), so a cheque enters the registry only if its
//! claimed payer actually signed it for this settlement instance.

use std::collections::HashMap;

use alloy_primitives::{Address, U256};
use opencheque_signing::verify_cheque;
use opencheque_types::{Cheque, ChequeId, ChequeStatus, OpenchequeError, Result};

/// A stored cheque and its lifecycle status.
#[derive(Debug, Clone)]
pub struct ChequeRecord {
    /// The signed instrument, exactly as issued.
    pub cheque: Cheque,
    /// Current lifecycle status. Never `Unknown` for a stored record.
    pub status: ChequeStatus,
}

/// Registry of every cheque ever issued to this settlement instance.
#[derive(Debug, Default)]
pub struct ChequeRegistry {
    cheques: HashMap<ChequeId, ChequeRecord>,
}

impl ChequeRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cheques: HashMap::new(),
        }
    }

    /// Validate and store a cheque with status `Issued`.
    ///
    /// # Errors
    /// - [`OpenchequeError::DuplicateCheque`] if the id already exists
    ///   (issued or terminal — ids are never reusable)
    /// - [`OpenchequeError::InvalidAmount`] for a zero amount
    /// - [`OpenchequeError::InvalidSignature`] if the recovered signer is
    ///   not the claimed payer for this settlement instance
    pub fn issue(&mut self, cheque: Cheque, settlement_identity: Address) -> Result<()> {
        let id = cheque.info.cheque_id;
        if self.cheques.contains_key(&id) {
            return Err(OpenchequeError::DuplicateCheque(id));
        }
        if cheque.info.amount == U256::ZERO {
            return Err(OpenchequeError::InvalidAmount);
        }
        verify_cheque(&cheque, settlement_identity)?;

        self.cheques.insert(
            id,
            ChequeRecord {
                cheque,
                status: ChequeStatus::Issued,
            },
        );
        Ok(())
    }

    /// Look up a stored record.
    #[must_use]
    pub fn get(&self, id: &ChequeId) -> Option<&ChequeRecord> {
        self.cheques.get(id)
    }

    /// The lifecycle status for `id`; `Unknown` if never issued.
    #[must_use]
    pub fn status(&self, id: &ChequeId) -> ChequeStatus {
        self.cheques
            .get(id)
            .map_or(ChequeStatus::Unknown, |record| record.status)
    }

    /// True iff the cheque is currently `Issued` (not yet paid out or
    /// revoked).
    #[must_use]
    pub fn is_redeemable(&self, id: &ChequeId) -> bool {
        self.status(id) == ChequeStatus::Issued
    }

    /// Transition `id` to `Redeemed`. Only reachable from `Issued`.
    ///
    /// # Errors
    /// Returns [`OpenchequeError::ChequeNotRedeemable`] if the cheque is
    /// unknown or not in `Issued` state — this is the exactly-once guard.
    pub fn mark_redeemed(&mut self, id: &ChequeId) -> Result<()> {
        self.transition(id, ChequeStatus::Redeemed)
    }

    /// Transition `id` to `Revoked`. Only reachable from `Issued`.
    ///
    /// # Errors
    /// Returns [`OpenchequeError::ChequeNotRedeemable`] if the cheque is
    /// unknown or not in `Issued` state.
    pub fn mark_revoked(&mut self, id: &ChequeId) -> Result<()> {
        self.transition(id, ChequeStatus::Revoked)
    }

    fn transition(&mut self, id: &ChequeId, target: ChequeStatus) -> Result<()> {
        let record = self
            .cheques
            .get_mut(id)
            .ok_or(OpenchequeError::ChequeNotRedeemable(*id))?;
        if !record.status.can_transition_to(target) {
            return Err(OpenchequeError::ChequeNotRedeemable(*id));
        }
        record.status = target;
        Ok(())
    }

    /// Number of cheques ever issued.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cheques.len()
    }

    /// Whether no cheque was ever issued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cheques.is_empty()
    }
}
