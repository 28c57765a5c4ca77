//! Error types for TriPact agreement operations
//!
//! All errors are designed to fail closed - when in doubt, deny the action.
//! Every failure aborts the entire operation with no partial state change;
//! no error is swallowed or used for control-flow recovery.

use crate::{Amount, LifecycleState, PartyId, Role};
use thiserror::Error;

/// Result type for agreement operations
pub type Result<T> = std::result::Result<T, AgreementError>;

/// Errors that can occur during agreement operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgreementError {
    /// Caller does not hold the role the operation requires
    #[error("Caller {caller} is not the {required}")]
    Unauthorized { required: Role, caller: PartyId },

    /// Operation attempted outside its legal lifecycle state
    #[error("Operation {operation} not permitted while {state}")]
    InvalidState {
        operation: &'static str,
        state: LifecycleState,
    },

    /// Funding deposit does not equal the agreed amount
    #[error("Funding value {actual} does not equal agreed amount {expected}")]
    AmountMismatch { expected: Amount, actual: Amount },

    /// Custodied balance does not equal the agreed amount at a payout check
    #[error("Custodied balance {held} does not equal agreed amount {expected}")]
    BalanceInvariantViolation { held: Amount, expected: Amount },

    /// Outbound value transfer did not complete
    #[error("Outbound transfer failed: {reason}")]
    TransferFailed { reason: String },

    /// Nested call into a guarded operation while one is executing
    #[error("Reentrant call into a guarded operation")]
    ReentrancyDetected,
}

impl AgreementError {
    /// Get a stable error code for API responses and reporting
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "UNAUTHORIZED",
            Self::InvalidState { .. } => "INVALID_STATE",
            Self::AmountMismatch { .. } => "AMOUNT_MISMATCH",
            Self::BalanceInvariantViolation { .. } => "BALANCE_INVARIANT_VIOLATION",
            Self::TransferFailed { .. } => "TRANSFER_FAILED",
            Self::ReentrancyDetected => "REENTRANCY_DETECTED",
        }
    }
}
