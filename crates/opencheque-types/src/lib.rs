//! # opencheque-types
//!
//! Shared types, errors, and constants for the **OpenCheque** settlement core.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`ChequeId`] (account identifiers are
//!   [`alloy_primitives::Address`] values, re-exported here)
//! - **Cheque model**: [`ChequeInfo`], [`Cheque`], [`ChequeStatus`]
//! - **Receipt model**: [`RedemptionReceipt`]
//! - **Errors**: [`OpenchequeError`] with `OC_ERR_` prefix codes
//! - **Constants**: wire widths and system identifiers

pub mod cheque;
pub mod constants;
pub mod error;
pub mod ids;
pub mod receipt;

// Re-export all primary types at crate root for ergonomic imports:
//   use opencheque_types::{Cheque, ChequeInfo, ChequeStatus, ...};

pub use cheque::*;
pub use error::*;
pub use ids::*;
pub use receipt::*;

// The account identifier and amount types come straight from the external
// signature scheme's public-key space; re-exported so downstream crates
// don't need a direct alloy-primitives dependency for them.
pub use alloy_primitives::{Address, B256, U256};

// Constants are accessed via `opencheque_types::constants::FOO`
// (not re-exported to avoid name collisions).
