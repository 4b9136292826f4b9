//! Payroll domain types for reconciliation.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Column label variants accepted for the employee identifier, in priority order.
pub const IDENTIFIER_LABELS: &[&str] = &["c.i", "c.i.", "cedula", "cédula"];

/// Column label variants accepted for the per-row debt.
pub const DEBT_LABELS: &[&str] = &["deuda", "debt"];

/// Fixed payroll rules applied to every matched employee.
///
/// These are statutory and document-layout constants, not user settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayrollPolicy {
    /// Title rows above the column-label row.
    pub header_rows: usize,
    /// Pay periods per month (semi-monthly payroll).
    pub pay_periods_per_month: u32,
    /// Flat benefit added to every payslip.
    pub flat_benefit: Decimal,
    /// Social security (IVSS) contribution rate.
    pub social_security_rate: Decimal,
    /// Housing fund (FAOV) contribution rate.
    pub housing_fund_rate: Decimal,
    /// Share of each contribution borne by the employee in one pay period.
    pub employee_share: Decimal,
}

impl PayrollPolicy {
    /// The statutory policy: 4 title rows, semi-monthly, 40 flat benefit,
    /// IVSS 4%, FAOV 1%, half of each contribution withheld.
    #[must_use]
    pub const fn statutory() -> Self {
        Self {
            header_rows: 4,
            pay_periods_per_month: 2,
            flat_benefit: Decimal::from_parts(40, 0, 0, false, 0),
            social_security_rate: Decimal::from_parts(4, 0, 0, false, 2),
            housing_fund_rate: Decimal::from_parts(1, 0, 0, false, 2),
            employee_share: Decimal::from_parts(5, 0, 0, false, 1),
        }
    }

    /// Computes one pay period for an employee.
    ///
    /// Non-positive debt is ignored. Returns `None` when an intermediate
    /// value does not fit a decimal.
    #[must_use]
    pub fn compute(&self, base_salary: Decimal, debt: Decimal) -> Option<PayrollBreakdown> {
        let period_base = base_salary.checked_div(Decimal::from(self.pay_periods_per_month))?;
        let social_security = base_salary
            .checked_mul(self.social_security_rate)?
            .checked_mul(self.employee_share)?;
        let housing_fund = base_salary
            .checked_mul(self.housing_fund_rate)?
            .checked_mul(self.employee_share)?;
        let debt = debt.max(Decimal::ZERO);

        let assignments = period_base.checked_add(self.flat_benefit)?;
        let deductions = social_security.checked_add(housing_fund)?.checked_add(debt)?;

        Some(PayrollBreakdown {
            period_base,
            flat_benefit: self.flat_benefit,
            social_security,
            housing_fund,
            debt,
            net: assignments.checked_sub(deductions)?,
        })
    }
}

impl Default for PayrollPolicy {
    fn default() -> Self {
        Self::statutory()
    }
}

/// Itemized result of [`PayrollPolicy::compute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PayrollBreakdown {
    /// Base salary apportioned to this pay period.
    pub period_base: Decimal,
    /// Flat benefit added to gross.
    pub flat_benefit: Decimal,
    /// Employee share of the social security contribution.
    pub social_security: Decimal,
    /// Employee share of the housing fund contribution.
    pub housing_fund: Decimal,
    /// Debt withheld from this payslip.
    pub debt: Decimal,
    /// Net pay: (base + benefit) - (contributions + debt).
    pub net: Decimal,
}

/// Directory record for one employee. Read-only for the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Normalized national identifier (digits only).
    pub identifier: String,
    /// Display name.
    pub name: String,
    /// Monthly base salary in the primary currency.
    pub base_salary: Decimal,
}

/// Scalar value of a non-empty spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    /// Text cell.
    Text(String),
    /// Numeric cell (dates arrive as serial numbers).
    Number(Decimal),
}

impl CellValue {
    /// Renders the cell the way it would read as text; integral numbers
    /// have no trailing zeros.
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => n.normalize().to_string(),
        }
    }

    /// Reads the cell as a number; text is parsed after trimming.
    #[must_use]
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Text(s) => Decimal::from_str(s.trim()).ok(),
            Self::Number(n) => Some(*n),
        }
    }
}

/// One spreadsheet line keyed by its column label, in column order.
///
/// Labels keep their original spelling; lookups tolerate case and
/// surrounding whitespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: Vec<(String, CellValue)>,
}

impl RawRow {
    /// Creates an empty row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a cell. A repeated label keeps its first value.
    pub fn insert(&mut self, label: impl Into<String>, value: CellValue) {
        let label = label.into();
        if !self.cells.iter().any(|(l, _)| *l == label) {
            self.cells.push((label, value));
        }
    }

    /// Builder form of [`RawRow::insert`].
    #[must_use]
    pub fn with(mut self, label: impl Into<String>, value: CellValue) -> Self {
        self.insert(label, value);
        self
    }

    /// Returns true if the row has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Column labels present in this row.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(l, _)| l.as_str())
    }

    /// Finds the first cell whose label matches one of `variants`,
    /// trying variants in order.
    #[must_use]
    pub fn find(&self, variants: &[&str]) -> Option<&CellValue> {
        variants.iter().find_map(|variant| {
            self.cells
                .iter()
                .find(|(label, _)| normalize_label(label) == *variant)
                .map(|(_, value)| value)
        })
    }
}

/// Normalizes a column label for comparison.
#[must_use]
pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Payroll line produced for one matched employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedLine {
    /// Employee display name from the directory.
    pub name: String,
    /// Normalized identifier.
    pub identifier: String,
    /// Net pay in the primary currency.
    pub net: Decimal,
    /// Debt withheld, as read from the row (zero when absent).
    pub debt_deducted: Decimal,
}

/// Outcome of one reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciliationReport {
    /// Opaque period token forwarded from the caller.
    pub period: Option<String>,
    /// Lines in workbook row order.
    pub processed: Vec<ProcessedLine>,
    /// Rows with no identifier cell (e.g. trailing totals).
    pub skipped_missing_key: usize,
    /// Identifiers that were not found in the directory.
    pub skipped_unmatched: Vec<String>,
    /// Identifiers whose pay could not be computed (amounts out of range).
    pub skipped_out_of_range: Vec<String>,
}

impl ReconciliationReport {
    /// Number of rows that produced a payroll line.
    #[must_use]
    pub fn processed_count(&self) -> usize {
        self.processed.len()
    }
}
