//! Ledger time source.
//!
//! Validity windows are expressed in ledger time: `u32` seconds, with `0`
//! reserved as the "no bound" sentinel. The engine reads time through
//! [`LedgerClock`] so the window checks stay deterministic under test.

use std::cell::Cell;

/// Source of the current ledger time, in seconds.
pub trait LedgerClock {
    fn now(&self) -> u32;
}

/// Wall-clock time (seconds since the Unix epoch).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl LedgerClock for SystemClock {
    fn now(&self) -> u32 {
        // Saturates rather than wrapping past 2106.
        u32::try_from(chrono::Utc::now().timestamp()).unwrap_or(u32::MAX)
    }
}

/// Manually advanced clock for deterministic replay and window tests.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Cell<u32>,
}

impl ManualClock {
    #[must_use]
    pub fn new(now: u32) -> Self {
        Self { now: Cell::new(now) }
    }

    /// Set the current ledger time.
    pub fn set(&self, now: u32) {
        self.now.set(now);
    }

    /// Advance the clock by `delta` seconds.
    pub fn advance(&self, delta: u32) {
        self.now.set(self.now.get().saturating_add(delta));
    }
}

impl LedgerClock for ManualClock {
    fn now(&self) -> u32 {
        self.now.get()
    }
}
