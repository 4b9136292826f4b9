//! Payroll reconciliation pipeline.
//!
//! Turns an uploaded attendance/debt workbook plus the employee directory
//! into payroll lines with statutory deductions applied:
//! - Workbook rows are parsed once, before any directory lookup
//! - Rows without an identifier are skipped silently
//! - Rows whose identifier is not in the directory are skipped with a warning
//! - Net pay is computed from the directory base salary, never from the sheet

pub mod directory;
pub mod error;
pub mod service;
pub mod types;
pub mod workbook;

#[cfg(test)]
mod service_props;
#[cfg(test)]
mod tests;

pub use directory::{EmployeeDirectory, InMemoryDirectory};
pub use error::PayrollError;
pub use service::ReconciliationService;
pub use types::{
    CellValue, EmployeeRecord, PayrollBreakdown, PayrollPolicy, ProcessedLine, RawRow,
    ReconciliationReport,
};
