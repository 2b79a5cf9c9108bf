//! Recoverable-signature splitting and signer recovery.
//!
//! The payer signs the EIP-191-wrapped commitment (the
//! `"\x19Ethereum Signed Message:\n32"` prefix followed by the 32-byte
//! commitment, keccak-hashed). [`recover_signer`] replicates that wrapping
//! before delegating to secp256k1 public-key recovery, so the recovered
//! identifier matches what wallet tooling actually signed.
//!
//! Malformed `v`/`r`/`s` values are rejected up front: recovery failure
//! always propagates as [`OpenchequeError::InvalidSignature`] and never
//! degrades to a zero or default address.

use alloy_primitives::utils::eip191_hash_message;
use alloy_primitives::{Address, B256, Signature, b256};
use opencheque_types::constants::SIGNATURE_WIDTH;
use opencheque_types::{Cheque, OpenchequeError, Result};

use crate::commitment::cheque_commitment;

/// secp256k1 curve order / 2. Signatures with `s` above this value are
/// malleable (the complement `(r, n - s, v')` verifies too) and rejected.
const SECP256K1N_HALF: B256 =
    b256!("7fffffffffffffffffffffffffffffff5d576e7357a4501ddfe92f46681b20a0");

/// Decompose a 65-byte raw signature into `(r, s, v)`.
///
/// Layout: bytes 0–31 = `r`, 32–63 = `s`, byte 64 = `v`.
///
/// # Errors
/// Returns [`OpenchequeError::InvalidSignature`] for any other length.
pub fn split_signature(raw: &[u8]) -> Result<(B256, B256, u8)> {
    if raw.len() != SIGNATURE_WIDTH {
        return Err(OpenchequeError::InvalidSignature {
            reason: format!(
                "invalid signature length: expected {SIGNATURE_WIDTH}, got {}",
                raw.len()
            ),
        });
    }
    let r = B256::from_slice(&raw[..32]);
    let s = B256::from_slice(&raw[32..64]);
    let v = raw[64];
    Ok((r, s, v))
}

/// Recover the account identifier that signed the given commitment.
///
/// # Errors
/// Returns [`OpenchequeError::InvalidSignature`] if `v` is outside the two
/// canonical values (27/28), `r` or `s` is zero, `s` violates the low-s
/// rule, or curve recovery itself fails.
pub fn recover_signer(hash: B256, v: u8, r: B256, s: B256) -> Result<Address> {
    let parity = match v {
        27 => false,
        28 => true,
        other => {
            return Err(OpenchequeError::InvalidSignature {
                reason: format!("invalid recovery id: {other}"),
            });
        }
    };
    if r.is_zero() || s.is_zero() {
        return Err(OpenchequeError::InvalidSignature {
            reason: "zero r or s scalar".into(),
        });
    }
    if s > SECP256K1N_HALF {
        return Err(OpenchequeError::InvalidSignature {
            reason: "s value above curve half order".into(),
        });
    }

    let digest = eip191_hash_message(hash);
    let signature = Signature::from_scalars_and_parity(r, s, parity);
    signature
        .recover_address_from_prehash(&digest)
        .map_err(|e| OpenchequeError::InvalidSignature {
            reason: format!("recovery failed: {e}"),
        })
}

/// Verify that a cheque was signed by its claimed payer for the given
/// settlement instance. Used by the registry at issuance.
///
/// # Errors
/// Returns [`OpenchequeError::InvalidSignature`] if the signature is
/// malformed or the recovered signer is not `cheque.info.payer`.
pub fn verify_cheque(cheque: &Cheque, settlement_identity: Address) -> Result<()> {
    let (r, s, v) = split_signature(&cheque.signature)?;
    let commitment = cheque_commitment(&cheque.info, settlement_identity);
    let recovered = recover_signer(commitment, v, r, s)?;
    if recovered != cheque.info.payer {
        return Err(OpenchequeError::InvalidSignature {
            reason: format!("recovered {recovered}, expected payer {}", cheque.info.payer),
        });
    }
    Ok(())
}
