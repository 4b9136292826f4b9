//! Ledger error types.
//!
//! Every ledger error is a field-level rejection: the operation that
//! returned it left the ledger unchanged.

use nomina_shared::types::LineItemId;
use thiserror::Error;

/// Rejections produced by ledger edits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// No row with this id.
    #[error("Line item not found: {0}")]
    RowNotFound(LineItemId),

    /// Input is neither blank nor a number.
    #[error("Unparseable amount: {0:?}")]
    UnparseableAmount(String),

    /// The recomputed value does not fit a decimal.
    #[error("Amount out of range: {0:?}")]
    AmountOutOfRange(String),

    /// Per-row benefit edits need per-row allocation mode.
    #[error("Per-row benefit editing requires per-row allocation mode")]
    PerRowBenefitInactive,
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::RowNotFound(_) => "ROW_NOT_FOUND",
            Self::UnparseableAmount(_) => "UNPARSEABLE_AMOUNT",
            Self::AmountOutOfRange(_) => "AMOUNT_OUT_OF_RANGE",
            Self::PerRowBenefitInactive => "PER_ROW_BENEFIT_INACTIVE",
        }
    }
}
