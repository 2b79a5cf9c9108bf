//! End-to-end integration tests across all three layers.
//!
//! These tests exercise the full cheque lifecycle:
//! commitment encoding (`opencheque-signing`) -> issuance -> registry ->
//! settlement engine (ledger transfer and status transition).
//!
//! They verify that signing, issuance and redemption work together in
//! realistic scenarios: funded redemption, time-window gating, overdraws,
//! revocation races, replay across instances, and supply conservation.

use alloy_primitives::{Address, U256};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;
use opencheque_settlement::{ManualClock, PayoutSink, SettlementEngine};
use opencheque_signing::cheque_commitment;
use opencheque_types::{
    Cheque, ChequeId, ChequeInfo, ChequeStatus, OpenchequeError, Result,
};

const BANK: Address = Address::repeat_byte(0xBA);
const OTHER_BANK: Address = Address::repeat_byte(0xBB);

/// Helper: a settlement instance plus the signing-side machinery a payer
/// would run off-system.
struct ChequeDesk {
    engine: SettlementEngine<ManualClock>,
    payer: PrivateKeySigner,
    payee: Address,
}

impl ChequeDesk {
    fn new(now: u32) -> Self {
        Self {
            engine: SettlementEngine::with_clock(BANK, ManualClock::new(now)),
            payer: PrivateKeySigner::random(),
            payee: Address::repeat_byte(0x33),
        }
    }

    fn payer_addr(&self) -> Address {
        self.payer.address()
    }

    /// Sign a cheque off-system, the way a payer's wallet would.
    fn write_cheque(&self, amount: u64, valid_from: u32, valid_thru: u32) -> Cheque {
        self.write_cheque_for(self.payee, amount, valid_from, valid_thru, BANK)
    }

    fn write_cheque_for(
        &self,
        payee: Address,
        amount: u64,
        valid_from: u32,
        valid_thru: u32,
        bank: Address,
    ) -> Cheque {
        let info = ChequeInfo {
            cheque_id: ChequeId::random(),
            payer: self.payer.address(),
            payee,
            amount: U256::from(amount),
            valid_from,
            valid_thru,
        };
        let commitment = cheque_commitment(&info, bank);
        let sig = self
            .payer
            .sign_message_sync(commitment.as_slice())
            .expect("signing should succeed");
        let mut raw = Vec::with_capacity(65);
        raw.extend_from_slice(&sig.r().to_be_bytes::<32>());
        raw.extend_from_slice(&sig.s().to_be_bytes::<32>());
        raw.push(27 + u8::from(sig.v()));
        Cheque::new(info, raw)
    }
}

/// Payout sink that records every transfer it is asked to make.
#[derive(Default)]
struct RecordingSink {
    payouts: Vec<(Address, U256)>,
    refuse: bool,
}

impl PayoutSink for RecordingSink {
    fn payout(&mut self, recipient: Address, amount: U256) -> Result<()> {
        if self.refuse {
            return Err(OpenchequeError::PayoutFailed {
                reason: "sink offline".into(),
            });
        }
        self.payouts.push((recipient, amount));
        Ok(())
    }
}

// =============================================================================
// Test: The canonical flow — deposit, issue, redeem
// =============================================================================
#[test]
fn e2e_deposit_issue_redeem() {
    let mut desk = ChequeDesk::new(1000);
    desk.engine.deposit(desk.payer_addr(), U256::from(20_000u64));

    let cheque = desk.write_cheque(1000, 0, 0);
    let info = cheque.info;
    desk.engine.issue_cheque(cheque).unwrap();

    assert!(desk.engine.is_cheque_valid(desk.payee, &info.cheque_id).unwrap());

    let receipt = desk.engine.redeem(desk.payee, info).unwrap();
    assert_eq!(receipt.cheque_id, info.cheque_id);
    assert_eq!(receipt.amount, U256::from(1000u64));
    assert_eq!(receipt.redeemed_at, 1000);

    assert_eq!(desk.engine.balance_of(desk.payer_addr()), U256::from(19_000u64));
    assert_eq!(desk.engine.balance_of(desk.payee), U256::from(1000u64));
    assert_eq!(
        desk.engine.cheque_status(&info.cheque_id),
        ChequeStatus::Redeemed
    );
    assert!(!desk.engine.is_cheque_valid(desk.payee, &info.cheque_id).unwrap());
}

// =============================================================================
// Test: Exactly-once redemption
// =============================================================================
#[test]
fn e2e_redeem_exactly_once() {
    let mut desk = ChequeDesk::new(1000);
    desk.engine.deposit(desk.payer_addr(), U256::from(20_000u64));

    let cheque = desk.write_cheque(1000, 0, 0);
    let info = cheque.info;
    desk.engine.issue_cheque(cheque).unwrap();

    desk.engine.redeem(desk.payee, info).unwrap();

    // Re-presenting the very same instrument must move nothing.
    let err = desk.engine.redeem(desk.payee, info).unwrap_err();
    assert!(matches!(err, OpenchequeError::ChequeNotRedeemable(_)));
    assert_eq!(desk.engine.balance_of(desk.payee), U256::from(1000u64));
    assert_eq!(desk.engine.balance_of(desk.payer_addr()), U256::from(19_000u64));
}

// =============================================================================
// Test: Validity window gating with a controlled clock
// =============================================================================
#[test]
fn e2e_window_opens_and_closes() {
    let mut desk = ChequeDesk::new(50);
    desk.engine.deposit(desk.payer_addr(), U256::from(20_000u64));

    let cheque = desk.write_cheque(1000, 100, 200);
    let info = cheque.info;
    desk.engine.issue_cheque(cheque).unwrap();

    // Before valid_from: reported invalid, redemption refused, but the
    // cheque stays Issued.
    assert!(!desk.engine.is_cheque_valid(desk.payee, &info.cheque_id).unwrap());
    assert!(matches!(
        desk.engine.redeem(desk.payee, info).unwrap_err(),
        OpenchequeError::ChequeNotRedeemable(_)
    ));
    assert_eq!(desk.engine.cheque_status(&info.cheque_id), ChequeStatus::Issued);

    // Inside the window (bounds inclusive).
    desk.engine.clock().set(100);
    assert!(desk.engine.is_cheque_valid(desk.payee, &info.cheque_id).unwrap());

    // Past valid_thru the cheque expires without a status change.
    desk.engine.clock().set(201);
    assert!(!desk.engine.is_cheque_valid(desk.payee, &info.cheque_id).unwrap());
    assert!(matches!(
        desk.engine.redeem(desk.payee, info).unwrap_err(),
        OpenchequeError::ChequeNotRedeemable(_)
    ));

    // Back inside: the same instrument settles.
    desk.engine.clock().set(150);
    desk.engine.redeem(desk.payee, info).unwrap();
    assert_eq!(desk.engine.balance_of(desk.payee), U256::from(1000u64));
}

// =============================================================================
// Test: Overdraw leaves both balances and the cheque untouched
// =============================================================================
#[test]
fn e2e_underfunded_payer() {
    let mut desk = ChequeDesk::new(1000);
    desk.engine.deposit(desk.payer_addr(), U256::from(300u64));

    let cheque = desk.write_cheque(1000, 0, 0);
    let info = cheque.info;
    desk.engine.issue_cheque(cheque).unwrap();

    let err = desk.engine.redeem(desk.payee, info).unwrap_err();
    assert!(matches!(
        err,
        OpenchequeError::InsufficientFunds { needed, available }
            if needed == U256::from(1000u64) && available == U256::from(300u64)
    ));
    assert_eq!(desk.engine.balance_of(desk.payer_addr()), U256::from(300u64));
    assert_eq!(desk.engine.balance_of(desk.payee), U256::ZERO);
    assert_eq!(desk.engine.cheque_status(&info.cheque_id), ChequeStatus::Issued);

    // Once funded, the same cheque redeems.
    desk.engine.deposit(desk.payer_addr(), U256::from(700u64));
    desk.engine.redeem(desk.payee, info).unwrap();
    assert_eq!(desk.engine.balance_of(desk.payee), U256::from(1000u64));
}

// =============================================================================
// Test: Revocation — who may revoke, and the revoke/redeem race
// =============================================================================
#[test]
fn e2e_revocation() {
    let mut desk = ChequeDesk::new(1000);
    desk.engine.deposit(desk.payer_addr(), U256::from(20_000u64));

    let cheque = desk.write_cheque(1000, 0, 0);
    let info = cheque.info;
    desk.engine.issue_cheque(cheque).unwrap();

    // Neither the payee nor a stranger may revoke.
    assert!(matches!(
        desk.engine.revoke(desk.payee, &info.cheque_id).unwrap_err(),
        OpenchequeError::Unauthorized
    ));
    assert!(matches!(
        desk.engine
            .revoke(Address::repeat_byte(0x77), &info.cheque_id)
            .unwrap_err(),
        OpenchequeError::Unauthorized
    ));
    assert_eq!(desk.engine.cheque_status(&info.cheque_id), ChequeStatus::Issued);

    // The payer revokes; the payee's later redemption loses the race.
    desk.engine.revoke(desk.payer_addr(), &info.cheque_id).unwrap();
    let err = desk.engine.redeem(desk.payee, info).unwrap_err();
    assert!(matches!(err, OpenchequeError::ChequeNotRedeemable(_)));
    assert_eq!(desk.engine.balance_of(desk.payee), U256::ZERO);

    // Revocation is terminal: a second revoke also fails.
    assert!(desk.engine.revoke(desk.payer_addr(), &info.cheque_id).is_err());
}

#[test]
fn e2e_redeem_wins_revoke_race() {
    let mut desk = ChequeDesk::new(1000);
    desk.engine.deposit(desk.payer_addr(), U256::from(20_000u64));

    let cheque = desk.write_cheque(1000, 0, 0);
    let info = cheque.info;
    desk.engine.issue_cheque(cheque).unwrap();

    // Ordered the other way round: redemption first, revocation refused.
    desk.engine.redeem(desk.payee, info).unwrap();
    let err = desk.engine.revoke(desk.payer_addr(), &info.cheque_id).unwrap_err();
    assert!(matches!(err, OpenchequeError::ChequeNotRedeemable(_)));
    assert_eq!(desk.engine.balance_of(desk.payee), U256::from(1000u64));
}

// =============================================================================
// Test: Redemption field mismatches surface their own reasons, in order
// =============================================================================
#[test]
fn e2e_redeem_mismatch_taxonomy() {
    let mut desk = ChequeDesk::new(1000);
    desk.engine.deposit(desk.payer_addr(), U256::from(20_000u64));

    let cheque = desk.write_cheque(1000, 0, 0);
    let info = cheque.info;
    desk.engine.issue_cheque(cheque).unwrap();

    let mut wrong_amount = info;
    wrong_amount.amount = U256::from(999u64);
    assert!(matches!(
        desk.engine.redeem(desk.payee, wrong_amount).unwrap_err(),
        OpenchequeError::InvalidAmount
    ));

    let mut wrong_from = info;
    wrong_from.valid_from = 1;
    assert!(matches!(
        desk.engine.redeem(desk.payee, wrong_from).unwrap_err(),
        OpenchequeError::InvalidValidFrom
    ));

    let mut wrong_thru = info;
    wrong_thru.valid_thru = 9999;
    assert!(matches!(
        desk.engine.redeem(desk.payee, wrong_thru).unwrap_err(),
        OpenchequeError::InvalidValidThru
    ));

    assert!(matches!(
        desk.engine
            .redeem(Address::repeat_byte(0x77), info)
            .unwrap_err(),
        OpenchequeError::UnauthorizedPayee
    ));

    let mut wrong_payer = info;
    wrong_payer.payer = Address::repeat_byte(0x88);
    assert!(matches!(
        desk.engine.redeem(desk.payee, wrong_payer).unwrap_err(),
        OpenchequeError::UnauthorizedPayer
    ));

    // None of the failed attempts moved funds or retired the cheque.
    assert_eq!(desk.engine.balance_of(desk.payee), U256::ZERO);
    desk.engine.redeem(desk.payee, info).unwrap();
}

// =============================================================================
// Test: Cheques are bound to one settlement instance
// =============================================================================
#[test]
fn e2e_cross_instance_replay_rejected() {
    let mut desk = ChequeDesk::new(1000);

    // Signed for a different instance: this engine must refuse issuance.
    let foreign = desk.write_cheque_for(desk.payee, 1000, 0, 0, OTHER_BANK);
    let err = desk.engine.issue_cheque(foreign).unwrap_err();
    assert!(matches!(err, OpenchequeError::InvalidSignature { .. }));

    // Signed for this instance: accepted here, unusable elsewhere.
    let local = desk.write_cheque(1000, 0, 0);
    let mut other_engine =
        SettlementEngine::with_clock(OTHER_BANK, ManualClock::new(1000));
    let err = other_engine.issue_cheque(local.clone()).unwrap_err();
    assert!(matches!(err, OpenchequeError::InvalidSignature { .. }));
    desk.engine.issue_cheque(local).unwrap();
}

// =============================================================================
// Test: Queries on never-issued ids
// =============================================================================
#[test]
fn e2e_unknown_cheque_queries() {
    let desk = ChequeDesk::new(1000);
    let id = ChequeId::random();

    assert!(matches!(
        desk.engine.get_cheque(&id).unwrap_err(),
        OpenchequeError::ChequeNotFound(_)
    ));
    assert!(matches!(
        desk.engine.is_cheque_valid(desk.payee, &id).unwrap_err(),
        OpenchequeError::ChequeNotFound(_)
    ));
    assert_eq!(desk.engine.cheque_status(&id), ChequeStatus::Unknown);
    assert!(!desk.engine.is_redeemable(&id));
}

// =============================================================================
// Test: withdraw and withdraw_to
// =============================================================================
#[test]
fn e2e_withdrawals() {
    let mut desk = ChequeDesk::new(1000);
    let payer = desk.payer_addr();
    desk.engine.deposit(payer, U256::from(10_000u64));

    desk.engine.withdraw(payer, U256::from(4_000u64)).unwrap();
    assert_eq!(desk.engine.balance_of(payer), U256::from(6_000u64));

    let err = desk.engine.withdraw(payer, U256::from(7_000u64)).unwrap_err();
    assert!(matches!(err, OpenchequeError::InsufficientFunds { .. }));
    assert_eq!(desk.engine.balance_of(payer), U256::from(6_000u64));

    let recipient = Address::repeat_byte(0x66);
    let mut sink = RecordingSink::default();
    desk.engine
        .withdraw_to(payer, U256::from(1_000u64), recipient, &mut sink)
        .unwrap();
    assert_eq!(desk.engine.balance_of(payer), U256::from(5_000u64));
    assert_eq!(sink.payouts, vec![(recipient, U256::from(1_000u64))]);

    // A refused payout restores the debit.
    sink.refuse = true;
    let err = desk
        .engine
        .withdraw_to(payer, U256::from(1_000u64), recipient, &mut sink)
        .unwrap_err();
    assert!(matches!(err, OpenchequeError::PayoutFailed { .. }));
    assert_eq!(desk.engine.balance_of(payer), U256::from(5_000u64));
    assert_eq!(sink.payouts.len(), 1);
}

// =============================================================================
// Test: Redemptions conserve total supply
// =============================================================================
#[test]
fn e2e_supply_conservation() {
    let mut desk = ChequeDesk::new(1000);
    desk.engine.deposit(desk.payer_addr(), U256::from(50_000u64));
    desk.engine.deposit(desk.payee, U256::from(5_000u64));
    let supply = desk.engine.total_supply();
    assert_eq!(supply, U256::from(55_000u64));

    for amount in [1_000u64, 2_500, 400] {
        let cheque = desk.write_cheque(amount, 0, 0);
        let info = cheque.info;
        desk.engine.issue_cheque(cheque).unwrap();
        desk.engine.redeem(desk.payee, info).unwrap();
    }

    // Internal transfers never mint or burn.
    assert_eq!(desk.engine.total_supply(), supply);
    assert_eq!(desk.engine.balance_of(desk.payee), U256::from(8_900u64));

    desk.engine.withdraw(desk.payee, U256::from(900u64)).unwrap();
    assert_eq!(desk.engine.total_supply(), supply - U256::from(900u64));
}

// =============================================================================
// Test: Stored instrument round-trips through the registry
// =============================================================================
#[test]
fn e2e_get_cheque_returns_issued_instrument() {
    let mut desk = ChequeDesk::new(1000);
    let cheque = desk.write_cheque(1000, 10, 20);
    let id = cheque.info.cheque_id;
    desk.engine.issue_cheque(cheque.clone()).unwrap();

    let stored = desk.engine.get_cheque(&id).unwrap();
    assert_eq!(stored, &cheque);
    assert_eq!(stored.signature.len(), 65);
}
