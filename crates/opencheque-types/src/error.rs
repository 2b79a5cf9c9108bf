//! Error types for the OpenCheque settlement core.
//!
//! All errors use the `OC_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Ledger / balance errors
//! - 2xx: Cheque lifecycle errors
//! - 3xx: Redemption field-mismatch errors
//! - 4xx: Authorization errors
//! - 5xx: Signature errors
//!
//! Every precondition violation aborts the whole operation with no partial
//! effect; nothing is retried internally. Distinct failure reasons are never
//! collapsed — callers depend on telling them apart.

use alloy_primitives::U256;
use thiserror::Error;

use crate::ChequeId;

/// Central error enum for all OpenCheque operations.
#[derive(Debug, Error)]
pub enum OpenchequeError {
    // =================================================================
    // Ledger / Balance Errors (1xx)
    // =================================================================
    /// Not enough balance to withdraw or redeem.
    #[error("OC_ERR_100: Insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: U256, available: U256 },

    /// The external payout collaborator rejected the transfer.
    #[error("OC_ERR_101: External payout failed: {reason}")]
    PayoutFailed { reason: String },

    // =================================================================
    // Cheque Lifecycle Errors (2xx)
    // =================================================================
    /// The referenced cheque was never issued.
    #[error("OC_ERR_200: Cheque not found: {0}")]
    ChequeNotFound(ChequeId),

    /// A cheque with this id already exists (issued or terminal).
    #[error("OC_ERR_201: Cheque already issued: {0}")]
    DuplicateCheque(ChequeId),

    /// Redeem/revoke attempted on a cheque that is not in `Issued` state,
    /// was never issued, or is outside its validity window.
    #[error("OC_ERR_202: Cheque not redeemable: {0}")]
    ChequeNotRedeemable(ChequeId),

    // =================================================================
    // Redemption Field-Mismatch Errors (3xx)
    // =================================================================
    /// Submitted amount does not match the stored, signed instrument
    /// (or a zero amount was submitted at issuance).
    #[error("OC_ERR_300: Wrong amount")]
    InvalidAmount,

    /// Submitted `valid_from` does not match the stored, signed instrument.
    #[error("OC_ERR_301: Wrong validFrom")]
    InvalidValidFrom,

    /// Submitted `valid_thru` does not match the stored, signed instrument.
    #[error("OC_ERR_302: Wrong validThru")]
    InvalidValidThru,

    // =================================================================
    // Authorization Errors (4xx)
    // =================================================================
    /// The invoking or claimed payee does not match the stored payee.
    #[error("OC_ERR_400: Unmatched cheque and payee")]
    UnauthorizedPayee,

    /// The submitted payer does not match the stored payer.
    #[error("OC_ERR_401: Wrong payer")]
    UnauthorizedPayer,

    /// The caller is not the party authorized for this operation.
    #[error("OC_ERR_402: Unauthorized")]
    Unauthorized,

    // =================================================================
    // Signature Errors (5xx)
    // =================================================================
    /// Signature is malformed, recovery failed, or the recovered signer
    /// does not match the claimed payer.
    #[error("OC_ERR_500: Invalid signature: {reason}")]
    InvalidSignature { reason: String },
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, OpenchequeError>;
