//! Globally unique identifiers used throughout OpenCheque.
//!
//! Account identifiers are 20-byte [`alloy_primitives::Address`] values bound
//! to the external signature scheme's public-key space. Cheque identifiers
//! are 32-byte caller-chosen random values.

use std::fmt;

use alloy_primitives::B256;
use serde::{Deserialize, Serialize};

/// Globally unique cheque identifier (32 bytes, caller-chosen).
///
/// Uniqueness among ever-issued cheques is the caller's responsibility;
/// the registry rejects a duplicate id at issuance. 128 bits of randomness
/// already make collisions negligible, the full 256-bit width matches the
/// signed wire encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ChequeId(pub B256);

impl ChequeId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(B256::random())
    }

    #[must_use]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(B256::from(bytes))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0.0
    }

    /// Short hex form for log lines.
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for ChequeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cheque:{}", hex::encode(&self.0[..8]))
    }
}

impl From<B256> for ChequeId {
    fn from(value: B256) -> Self {
        Self(value)
    }
}
