//! Payroll pipeline error types.
//!
//! Only run-level failures are errors. Per-row conditions (missing
//! identifier, unknown employee) are counted in the report instead.

use nomina_shared::AppError;
use thiserror::Error;

/// Errors that abort a reconciliation run.
#[derive(Debug, Error)]
pub enum PayrollError {
    /// No workbook was supplied with the upload.
    #[error("Missing payroll workbook upload")]
    MissingUpload,

    /// The bytes could not be opened as a workbook.
    #[error("Unreadable workbook: {0}")]
    UnreadableWorkbook(String),

    /// The workbook has no worksheet to read.
    #[error("Workbook contains no sheets")]
    NoSheets,

    /// The employee directory could not be queried.
    #[error("Employee directory unavailable: {0}")]
    Directory(String),
}

impl From<PayrollError> for AppError {
    fn from(err: PayrollError) -> Self {
        match err {
            PayrollError::MissingUpload => Self::Validation(err.to_string()),
            PayrollError::UnreadableWorkbook(_) | PayrollError::NoSheets => {
                Self::Ingestion(err.to_string())
            }
            PayrollError::Directory(_) => Self::Database(err.to_string()),
        }
    }
}
