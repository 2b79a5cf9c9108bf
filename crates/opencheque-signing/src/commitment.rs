//! Fixed-layout cheque encoding and keccak256 commitment.
//!
//! Wire layout (big-endian, no delimiters — every field has a fixed width,
//! so distinct field splits can never concatenate to the same bytes):
//!
//! ```text
//! offset   width  field
//!      0      32  cheque_id
//!     32      20  payer
//!     52      20  payee
//!     72      32  amount (big-endian U256)
//!    104      20  settlement identity
//!    124       4  valid_from (big-endian u32)
//!    128       4  valid_thru (big-endian u32)
//! ```
//!
//! The settlement identity binds the commitment to one engine instance:
//! a cheque signed for one instance can never be replayed against another.

use alloy_primitives::{Address, B256, keccak256};
use opencheque_types::ChequeInfo;
use opencheque_types::constants::{
    ACCOUNT_WIDTH, AMOUNT_WIDTH, CHEQUE_ID_WIDTH, ENCODED_CHEQUE_WIDTH, TIME_BOUND_WIDTH,
};

const PAYER_OFFSET: usize = CHEQUE_ID_WIDTH;
const PAYEE_OFFSET: usize = PAYER_OFFSET + ACCOUNT_WIDTH;
const AMOUNT_OFFSET: usize = PAYEE_OFFSET + ACCOUNT_WIDTH;
const IDENTITY_OFFSET: usize = AMOUNT_OFFSET + AMOUNT_WIDTH;
const VALID_FROM_OFFSET: usize = IDENTITY_OFFSET + ACCOUNT_WIDTH;
const VALID_THRU_OFFSET: usize = VALID_FROM_OFFSET + TIME_BOUND_WIDTH;

/// Serialize a cheque's signed fields plus the settlement instance identity
/// into the fixed 132-byte wire layout.
#[must_use]
pub fn encode_cheque(
    info: &ChequeInfo,
    settlement_identity: Address,
) -> [u8; ENCODED_CHEQUE_WIDTH] {
    let mut buf = [0u8; ENCODED_CHEQUE_WIDTH];
    buf[..PAYER_OFFSET].copy_from_slice(info.cheque_id.as_bytes());
    buf[PAYER_OFFSET..PAYEE_OFFSET].copy_from_slice(info.payer.as_slice());
    buf[PAYEE_OFFSET..AMOUNT_OFFSET].copy_from_slice(info.payee.as_slice());
    buf[AMOUNT_OFFSET..IDENTITY_OFFSET].copy_from_slice(&info.amount.to_be_bytes::<32>());
    buf[IDENTITY_OFFSET..VALID_FROM_OFFSET].copy_from_slice(settlement_identity.as_slice());
    buf[VALID_FROM_OFFSET..VALID_THRU_OFFSET].copy_from_slice(&info.valid_from.to_be_bytes());
    buf[VALID_THRU_OFFSET..].copy_from_slice(&info.valid_thru.to_be_bytes());
    buf
}

/// Compute the 256-bit commitment a payer signs: keccak256 of the encoded
/// fields. Purely a function of its inputs.
#[must_use]
pub fn cheque_commitment(info: &ChequeInfo, settlement_identity: Address) -> B256 {
    keccak256(encode_cheque(info, settlement_identity))
}
