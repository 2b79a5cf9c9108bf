//! # opencheque-signing
//!
//! Deterministic commitment encoding and recoverable-signature
//! authentication for the OpenCheque settlement core.
//!
//! ## Architecture
//!
//! Authenticating a payer without their participation at redemption time
//! takes two primitives:
//!
//! 1. **Commitment encoder** ([`commitment`]): serializes a cheque's fields
//!    plus the settlement instance's identity into a fixed-layout byte
//!    sequence and keccak-hashes it to a 256-bit commitment.
//! 2. **Signature authenticator** ([`signature`]): given a commitment and a
//!    three-part recoverable signature `(r, s, v)`, recovers the signer's
//!    account identifier via secp256k1 public-key recovery.
//!
//! The payer signs the EIP-191-wrapped commitment off-system; at issuance
//! the registry re-derives the commitment and compares the recovered signer
//! against the claimed payer ([`verify_cheque`]).

pub mod commitment;
pub mod signature;

pub use commitment::{cheque_commitment, encode_cheque};
pub use signature::{recover_signer, split_signature, verify_cheque};
