//! Internal balance ledger.
//!
//! A mapping from account identifier to non-negative balance. Accounts are
//! created implicitly on first reference and never destroyed. All mutations
//! are atomic: either the full operation succeeds or the ledger is
//! unchanged.
//!
//! Balances are `U256`, so underflow is handled by explicit precondition
//! checks and overflow by saturating arithmetic — the sum of all balances
//! is bounded by total deposits, which cannot approach 2^256.

use std::collections::HashMap;

use alloy_primitives::{Address, U256};
use opencheque_types::{OpenchequeError, Result};

/// Interface to the external value-transfer collaborator that moves funds
/// out of the ledger's pooled custody (the only path value leaves the
/// ledger's own accounting).
pub trait PayoutSink {
    /// Transfer `amount` of pooled custody to the external `recipient`.
    ///
    /// # Errors
    /// Implementations report a refused transfer with
    /// [`OpenchequeError::PayoutFailed`]; the engine then restores the
    /// already-applied debit so the operation is all-or-nothing.
    fn payout(&mut self, recipient: Address, amount: U256) -> Result<()>;
}

/// The account-balance store. Mutated only by the settlement engine.
#[derive(Debug, Default)]
pub struct Ledger {
    balances: HashMap<Address, U256>,
}

impl Ledger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            balances: HashMap::new(),
        }
    }

    /// Credit `amount` to `account`.
    pub fn deposit(&mut self, account: Address, amount: U256) {
        let balance = self.balances.entry(account).or_default();
        *balance = balance.saturating_add(amount);
    }

    /// Debit `amount` from `account`.
    ///
    /// # Errors
    /// Returns [`OpenchequeError::InsufficientFunds`] if `amount` exceeds
    /// the balance; the balance is unchanged on failure.
    pub fn withdraw(&mut self, account: Address, amount: U256) -> Result<()> {
        let available = self.balance_of(account);
        if amount > available {
            return Err(OpenchequeError::InsufficientFunds {
                needed: amount,
                available,
            });
        }
        // Checked above; entry exists for any non-zero balance.
        let balance = self.balances.entry(account).or_default();
        *balance -= amount;
        Ok(())
    }

    /// Move `amount` from `from` to `to` in one atomic step — no
    /// intermediate state is observable through any query.
    ///
    /// # Errors
    /// Returns [`OpenchequeError::InsufficientFunds`] if `from` cannot
    /// cover `amount`; neither balance changes on failure.
    pub fn transfer(&mut self, from: Address, to: Address, amount: U256) -> Result<()> {
        let available = self.balance_of(from);
        if amount > available {
            return Err(OpenchequeError::InsufficientFunds {
                needed: amount,
                available,
            });
        }
        *self.balances.entry(from).or_default() -= amount;
        let to_balance = self.balances.entry(to).or_default();
        *to_balance = to_balance.saturating_add(amount);
        Ok(())
    }

    /// The balance of `account` (zero for accounts never referenced).
    #[must_use]
    pub fn balance_of(&self, account: Address) -> U256 {
        self.balances.get(&account).copied().unwrap_or(U256::ZERO)
    }

    /// Sum of all balances. Conservation invariant: equals total deposits
    /// minus total withdrawals, regardless of internal transfers.
    #[must_use]
    pub fn total_supply(&self) -> U256 {
        self.balances
            .values()
            .fold(U256::ZERO, |acc, v| acc.saturating_add(*v))
    }
}
