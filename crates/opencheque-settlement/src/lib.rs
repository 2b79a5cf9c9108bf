//! # opencheque-settlement
//!
//! The settlement engine: internal balance ledger, cheque registry, and the
//! cheque lifecycle state machine.
//!
//! ## Architecture
//!
//! The [`SettlementEngine`] is the orchestrating component. It exclusively
//! owns the [`Ledger`] and the [`ChequeRegistry`] — no other component
//! mutates them — and exposes the public operations:
//!
//! 1. `deposit` / `withdraw` / `withdraw_to` — balance management
//! 2. `issue_cheque` — signature-checked admission into the registry
//! 3. `is_cheque_valid` / `get_cheque` — read-only queries
//! 4. `redeem` — exactly-once settlement, re-deriving every precondition
//! 5. `revoke` — payer-only cancellation
//!
//! Every mutating operation takes `&mut self`, so execution is serialized
//! by construction: a status transition and the balance transfer it
//! triggers happen within one indivisible call, and no caller can observe
//! a partial effect.

pub mod clock;
pub mod engine;
pub mod ledger;
pub mod registry;

pub use clock::{LedgerClock, ManualClock, SystemClock};
pub use engine::SettlementEngine;
pub use ledger::{Ledger, PayoutSink};
pub use registry::{ChequeRecord, ChequeRegistry};

// Standalone verification entry points, usable off-system without an engine.
pub use opencheque_signing::{recover_signer, split_signature};
