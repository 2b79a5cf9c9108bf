//! The settlement engine — the only mutator of ledger and registry state.
//!
//! Redemption deliberately re-validates every submitted field against the
//! stored, signed instrument instead of trusting a lookup alone: each
//! mismatch surfaces its own failure reason, and the checks run in a fixed
//! order so the first violation wins. The status transition and the balance
//! transfer it triggers happen inside one `&mut self` call, which is what
//! makes exactly-once redemption and the redeem/revoke race trivially
//! correct.

use alloy_primitives::{Address, U256};
use tracing::{debug, info, warn};

use opencheque_types::{
    Cheque, ChequeId, ChequeInfo, ChequeStatus, OpenchequeError, RedemptionReceipt, Result,
};

use crate::clock::{LedgerClock, SystemClock};
use crate::ledger::{Ledger, PayoutSink};
use crate::registry::ChequeRegistry;

/// The orchestrating settlement component.
///
/// `identity` is the 20-byte value bound into every commitment signed for
/// this instance; cheques signed for a different identity fail issuance,
/// which is what prevents cross-instance replay.
pub struct SettlementEngine<C = SystemClock> {
    identity: Address,
    ledger: Ledger,
    registry: ChequeRegistry,
    clock: C,
}

impl SettlementEngine<SystemClock> {
    /// Create an engine bound to `identity`, using wall-clock ledger time.
    #[must_use]
    pub fn new(identity: Address) -> Self {
        Self::with_clock(identity, SystemClock)
    }
}

impl<C: LedgerClock> SettlementEngine<C> {
    /// Create an engine bound to `identity` with an explicit time source.
    #[must_use]
    pub fn with_clock(identity: Address, clock: C) -> Self {
        Self {
            identity,
            ledger: Ledger::new(),
            registry: ChequeRegistry::new(),
            clock,
        }
    }

    /// The identity bound into every commitment signed for this instance.
    #[must_use]
    pub fn identity(&self) -> Address {
        self.identity
    }

    /// The engine's time source.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    // =====================================================================
    // Balance operations
    // =====================================================================

    /// Credit the caller's ledger balance by the attached value.
    pub fn deposit(&mut self, caller: Address, value: U256) {
        self.ledger.deposit(caller, value);
        debug!(account = %caller, amount = %value, "deposit");
    }

    /// Debit the caller's ledger balance.
    ///
    /// # Errors
    /// [`OpenchequeError::InsufficientFunds`] if `amount` exceeds the
    /// caller's balance.
    pub fn withdraw(&mut self, caller: Address, amount: U256) -> Result<()> {
        self.ledger.withdraw(caller, amount)?;
        debug!(account = %caller, amount = %amount, "withdraw");
        Ok(())
    }

    /// Debit the caller's ledger balance and pay the amount out of pooled
    /// custody to an external recipient.
    ///
    /// The debit lands before the external hand-off (checks-effects-
    /// interactions); a refused payout restores the debit, so either both
    /// effects happen or neither does.
    ///
    /// # Errors
    /// [`OpenchequeError::InsufficientFunds`] if the balance cannot cover
    /// `amount`; [`OpenchequeError::PayoutFailed`] if the sink refuses.
    pub fn withdraw_to(
        &mut self,
        caller: Address,
        amount: U256,
        recipient: Address,
        sink: &mut dyn PayoutSink,
    ) -> Result<()> {
        self.ledger.withdraw(caller, amount)?;
        if let Err(err) = sink.payout(recipient, amount) {
            self.ledger.deposit(caller, amount);
            warn!(account = %caller, recipient = %recipient, amount = %amount, %err, "payout refused, debit restored");
            return Err(err);
        }
        debug!(account = %caller, recipient = %recipient, amount = %amount, "withdraw_to");
        Ok(())
    }

    /// The ledger balance of `account` (zero if never referenced).
    #[must_use]
    pub fn balance_of(&self, account: Address) -> U256 {
        self.ledger.balance_of(account)
    }

    /// Sum of all ledger balances, for conservation checks.
    #[must_use]
    pub fn total_supply(&self) -> U256 {
        self.ledger.total_supply()
    }

    // =====================================================================
    // Cheque lifecycle
    // =====================================================================

    /// Admit a signed cheque into the registry.
    ///
    /// Any holder may submit the instrument; authenticity comes from the
    /// payer's signature, not from the submitting caller.
    ///
    /// # Errors
    /// [`OpenchequeError::DuplicateCheque`], [`OpenchequeError::InvalidAmount`]
    /// or [`OpenchequeError::InvalidSignature`] as in
    /// [`ChequeRegistry::issue`].
    pub fn issue_cheque(&mut self, cheque: Cheque) -> Result<()> {
        let id = cheque.info.cheque_id;
        let payer = cheque.info.payer;
        let amount = cheque.info.amount;
        self.registry.issue(cheque, self.identity)?;
        info!(cheque = %id, payer = %payer, amount = %amount, "cheque issued");
        Ok(())
    }

    /// The stored instrument for `id`.
    ///
    /// # Errors
    /// [`OpenchequeError::ChequeNotFound`] if the id was never issued.
    pub fn get_cheque(&self, id: &ChequeId) -> Result<&Cheque> {
        self.registry
            .get(id)
            .map(|record| &record.cheque)
            .ok_or(OpenchequeError::ChequeNotFound(*id))
    }

    /// Whether the cheque is currently inside its validity window.
    ///
    /// Does not mutate status: an out-of-window cheque stays `Issued` and
    /// may become valid later.
    ///
    /// # Errors
    /// [`OpenchequeError::ChequeNotFound`] if the id was never issued;
    /// [`OpenchequeError::UnauthorizedPayee`] if `claimed_payee` is not the
    /// stored payee.
    pub fn is_cheque_valid(&self, claimed_payee: Address, id: &ChequeId) -> Result<bool> {
        let record = self
            .registry
            .get(id)
            .ok_or(OpenchequeError::ChequeNotFound(*id))?;
        if claimed_payee != record.cheque.info.payee {
            return Err(OpenchequeError::UnauthorizedPayee);
        }
        if record.status != ChequeStatus::Issued {
            return Ok(false);
        }
        Ok(record.cheque.info.in_window(self.clock.now()))
    }

    /// True iff the cheque's status is `Issued`.
    #[must_use]
    pub fn is_redeemable(&self, id: &ChequeId) -> bool {
        self.registry.is_redeemable(id)
    }

    /// The lifecycle status for `id`; `Unknown` if never issued.
    #[must_use]
    pub fn cheque_status(&self, id: &ChequeId) -> ChequeStatus {
        self.registry.status(id)
    }

    /// Redeem a cheque: move the funds from payer to payee and retire the
    /// instrument. The caller authenticates as the claimed payee through
    /// the invocation identity.
    ///
    /// Every submitted field is checked against the stored instrument, in
    /// order, first failure wins; the validity window is re-checked at
    /// redemption time.
    ///
    /// # Errors
    /// In check order: [`OpenchequeError::ChequeNotRedeemable`] for a
    /// never-issued id; [`OpenchequeError::InvalidAmount`],
    /// [`OpenchequeError::InvalidValidFrom`],
    /// [`OpenchequeError::InvalidValidThru`] on field mismatch;
    /// [`OpenchequeError::UnauthorizedPayee`] /
    /// [`OpenchequeError::UnauthorizedPayer`] on party mismatch;
    /// [`OpenchequeError::ChequeNotRedeemable`] for terminal status or an
    /// out-of-window redemption; [`OpenchequeError::InsufficientFunds`] if
    /// the payer cannot cover the amount (status stays `Issued`).
    pub fn redeem(&mut self, caller: Address, submitted: ChequeInfo) -> Result<RedemptionReceipt> {
        let id = submitted.cheque_id;
        let record = self
            .registry
            .get(&id)
            .ok_or(OpenchequeError::ChequeNotRedeemable(id))?;
        let stored = record.cheque.info;
        let status = record.status;

        if submitted.amount != stored.amount {
            return Err(OpenchequeError::InvalidAmount);
        }
        if submitted.valid_from != stored.valid_from {
            return Err(OpenchequeError::InvalidValidFrom);
        }
        if submitted.valid_thru != stored.valid_thru {
            return Err(OpenchequeError::InvalidValidThru);
        }
        if caller != stored.payee {
            return Err(OpenchequeError::UnauthorizedPayee);
        }
        if submitted.payer != stored.payer {
            return Err(OpenchequeError::UnauthorizedPayer);
        }
        if status != ChequeStatus::Issued {
            return Err(OpenchequeError::ChequeNotRedeemable(id));
        }
        let now = self.clock.now();
        if !stored.in_window(now) {
            return Err(OpenchequeError::ChequeNotRedeemable(id));
        }

        // Transfer first: an insufficient payer balance must leave the
        // cheque `Issued` and redeemable once funded.
        self.ledger.transfer(stored.payer, stored.payee, stored.amount)?;
        self.registry.mark_redeemed(&id)?;

        info!(
            cheque = %id,
            payer = %stored.payer,
            payee = %stored.payee,
            amount = %stored.amount,
            "cheque redeemed"
        );
        Ok(RedemptionReceipt {
            cheque_id: id,
            payer: stored.payer,
            payee: stored.payee,
            amount: stored.amount,
            redeemed_at: now,
        })
    }

    /// Revoke an issued cheque. Only the stored payer may revoke.
    ///
    /// # Errors
    /// [`OpenchequeError::ChequeNotRedeemable`] for a never-issued id or a
    /// terminal status; [`OpenchequeError::Unauthorized`] if `caller` is
    /// not the stored payer.
    pub fn revoke(&mut self, caller: Address, id: &ChequeId) -> Result<()> {
        let record = self
            .registry
            .get(id)
            .ok_or(OpenchequeError::ChequeNotRedeemable(*id))?;
        if caller != record.cheque.info.payer {
            return Err(OpenchequeError::Unauthorized);
        }
        if record.status != ChequeStatus::Issued {
            return Err(OpenchequeError::ChequeNotRedeemable(*id));
        }
        self.registry.mark_revoked(id)?;
        info!(cheque = %id, payer = %caller, "cheque revoked");
        Ok(())
    }
}
