//! Reconciliation service: workbook rows + directory -> payroll lines.

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::directory::EmployeeDirectory;
use super::error::PayrollError;
use super::types::{
    CellValue, DEBT_LABELS, IDENTIFIER_LABELS, PayrollPolicy, ProcessedLine, RawRow,
    ReconciliationReport,
};
use super::workbook;

/// Reconciliation service for payroll uploads.
///
/// Holds no state besides the policy; every run is independent and only
/// reads from the directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconciliationService {
    policy: PayrollPolicy,
}

impl ReconciliationService {
    /// Creates a service applying `policy`.
    #[must_use]
    pub const fn new(policy: PayrollPolicy) -> Self {
        Self { policy }
    }

    /// Parses an uploaded workbook and reconciles its rows.
    ///
    /// The workbook is parsed completely before the first directory lookup,
    /// so a malformed upload fails without producing any line.
    ///
    /// # Errors
    ///
    /// Returns `PayrollError` if the workbook is unreadable or the
    /// directory fails.
    pub async fn process_workbook<D>(
        &self,
        bytes: &[u8],
        period: Option<String>,
        directory: &D,
    ) -> Result<ReconciliationReport, PayrollError>
    where
        D: EmployeeDirectory + ?Sized,
    {
        let rows = workbook::read_rows(bytes, self.policy.header_rows)?;
        self.reconcile(rows, period, directory).await
    }

    /// Reconciles already-parsed rows, preserving row order.
    ///
    /// # Errors
    ///
    /// Returns `PayrollError::Directory` if a lookup fails.
    pub async fn reconcile<D>(
        &self,
        rows: Vec<RawRow>,
        period: Option<String>,
        directory: &D,
    ) -> Result<ReconciliationReport, PayrollError>
    where
        D: EmployeeDirectory + ?Sized,
    {
        let mut report = ReconciliationReport {
            period,
            processed: Vec::with_capacity(rows.len()),
            skipped_missing_key: 0,
            skipped_unmatched: Vec::new(),
            skipped_out_of_range: Vec::new(),
        };

        for row in &rows {
            let Some(identifier) = row_identifier(row) else {
                debug!("Skipping row without identifier");
                report.skipped_missing_key += 1;
                continue;
            };

            let Some(employee) = directory.lookup(&identifier).await? else {
                warn!(identifier = %identifier, "Employee not found in directory, skipping row");
                report.skipped_unmatched.push(identifier);
                continue;
            };

            let debt = row_debt(row);
            let Some(breakdown) = self.policy.compute(employee.base_salary, debt) else {
                warn!(identifier = %identifier, debt = %debt, "Payroll amounts out of range, skipping row");
                report.skipped_out_of_range.push(identifier);
                continue;
            };

            report.processed.push(ProcessedLine {
                name: employee.name,
                identifier,
                net: breakdown.net,
                debt_deducted: breakdown.debt,
            });
        }

        info!(
            period = report.period.as_deref().unwrap_or("-"),
            processed = report.processed_count(),
            skipped_missing_key = report.skipped_missing_key,
            skipped_unmatched = report.skipped_unmatched.len(),
            skipped_out_of_range = report.skipped_out_of_range.len(),
            "Payroll reconciliation complete"
        );

        Ok(report)
    }
}

/// Strips thousands-separator periods and surrounding whitespace.
#[must_use]
pub fn normalize_identifier(raw: &str) -> String {
    raw.replace('.', "").trim().to_string()
}

/// Returns the normalized identifier of a row, if it has a non-empty one.
#[must_use]
pub fn row_identifier(row: &RawRow) -> Option<String> {
    let identifier = normalize_identifier(&row.find(IDENTIFIER_LABELS)?.as_text());
    (!identifier.is_empty()).then_some(identifier)
}

/// Returns the row debt; absent, unparseable or non-positive values are zero.
#[must_use]
pub fn row_debt(row: &RawRow) -> Decimal {
    row.find(DEBT_LABELS)
        .and_then(CellValue::as_decimal)
        .filter(|debt| *debt > Decimal::ZERO)
        .unwrap_or(Decimal::ZERO)
}
