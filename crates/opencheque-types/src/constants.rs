//! System-wide constants for the OpenCheque settlement core.

/// Width of a cheque identifier in the signed encoding (bytes).
pub const CHEQUE_ID_WIDTH: usize = 32;

/// Width of an account identifier in the signed encoding (bytes).
pub const ACCOUNT_WIDTH: usize = 20;

/// Width of the big-endian amount in the signed encoding (bytes).
pub const AMOUNT_WIDTH: usize = 32;

/// Width of each big-endian validity bound in the signed encoding (bytes).
pub const TIME_BOUND_WIDTH: usize = 4;

/// Total width of the fixed-layout signed encoding:
/// chequeId ‖ payer ‖ payee ‖ amount ‖ settlementIdentity ‖ validFrom ‖ validThru.
pub const ENCODED_CHEQUE_WIDTH: usize =
    CHEQUE_ID_WIDTH + 3 * ACCOUNT_WIDTH + AMOUNT_WIDTH + 2 * TIME_BOUND_WIDTH;

/// Width of a recoverable signature: r (32) ‖ s (32) ‖ v (1).
pub const SIGNATURE_WIDTH: usize = 65;

/// Sentinel meaning "no bound" for `valid_from` / `valid_thru`.
pub const NO_TIME_BOUND: u32 = 0;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "OpenCheque";
