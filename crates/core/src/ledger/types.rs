//! Ledger domain types: line items and session settings.

use nomina_shared::types::{Currency, LineItemId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::amount::Amount;
use crate::payroll::ProcessedLine;

/// Exchange rate a new ledger starts with (VES per USD).
pub const DEFAULT_EXCHANGE_RATE: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// Name given to the single row of a blank ledger.
pub const BLANK_ROW_NAME: &str = "New Employee";

/// One employee's editable payroll row.
///
/// All amounts are stored in the primary currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Stable id, never reused.
    pub id: LineItemId,
    /// Display name.
    pub name: String,
    /// Normalized national identifier; empty for rows not yet identified.
    pub identifier: String,
    /// Gross before the row deduction.
    pub gross_base: Amount,
    /// Deduction taken from gross (the row debt on ingestion).
    pub deduction: Amount,
    /// Net pay.
    pub net: Amount,
    /// Per-row benefit override; `None` until set.
    pub benefit: Option<Amount>,
}

impl LineItem {
    /// Creates a row with the given identity and zero amounts.
    #[must_use]
    pub fn zeroed(name: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            id: LineItemId::new(),
            name: name.into(),
            identifier: identifier.into(),
            gross_base: Amount::ZERO,
            deduction: Amount::ZERO,
            net: Amount::ZERO,
            benefit: None,
        }
    }

    /// Builds a row from a reconciliation line; gross is `net + debt`.
    #[must_use]
    pub fn from_processed(line: ProcessedLine) -> Self {
        Self {
            id: LineItemId::new(),
            gross_base: Amount::Numeric(line.net.saturating_add(line.debt_deducted)),
            deduction: Amount::Numeric(line.debt_deducted),
            net: Amount::Numeric(line.net),
            name: line.name,
            identifier: line.identifier,
            benefit: None,
        }
    }

    /// Returns the value of one amount field.
    #[must_use]
    pub const fn amount(&self, field: AmountField) -> Amount {
        match field {
            AmountField::GrossBase => self.gross_base,
            AmountField::Deduction => self.deduction,
            AmountField::Net => self.net,
        }
    }

    /// Returns true when all three amounts are numeric and `net = gross - deduction`.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        match (self.gross_base, self.deduction, self.net) {
            (Amount::Numeric(g), Amount::Numeric(d), Amount::Numeric(n)) => g.checked_sub(d) == Some(n),
            _ => false,
        }
    }
}

/// Free-text fields of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextField {
    /// Display name.
    Name,
    /// National identifier.
    Identifier,
}

/// The three linked amount fields of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountField {
    /// Gross before deduction.
    GrossBase,
    /// Deduction.
    Deduction,
    /// Net pay.
    Net,
}

/// Which benefit value applies to each row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationMode {
    /// Every row gets the session's uniform benefit.
    #[default]
    Uniform,
    /// Every row gets its own `benefit` field.
    PerRow,
}

impl AllocationMode {
    /// Returns the other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Uniform => Self::PerRow,
            Self::PerRow => Self::Uniform,
        }
    }
}

/// User gesture for destructive actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// The user affirmed.
    Confirmed,
    /// The user cancelled.
    Declined,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed { Self::Confirmed } else { Self::Declined }
    }
}

/// Session-wide settings threaded through every projection and total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// Secondary units per primary unit.
    pub exchange_rate: Amount,
    /// Currency amounts are shown and typed in.
    pub display_currency: Currency,
    /// Uniform benefit, in the primary currency.
    pub default_benefit: Amount,
    /// Benefit allocation mode.
    pub allocation_mode: AllocationMode,
}

impl GlobalSettings {
    /// Session defaults with the given starting exchange rate.
    #[must_use]
    pub const fn with_exchange_rate(rate: Decimal) -> Self {
        Self {
            exchange_rate: Amount::Numeric(rate),
            display_currency: Currency::PRIMARY,
            default_benefit: Amount::ZERO,
            allocation_mode: AllocationMode::Uniform,
        }
    }
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self::with_exchange_rate(DEFAULT_EXCHANGE_RATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_processed_reconstructs_gross() {
        let item = LineItem::from_processed(ProcessedLine {
            name: "ANA".into(),
            identifier: "123".into(),
            net: dec!(2315),
            debt_deducted: dec!(100),
        });
        assert_eq!(item.gross_base, Amount::Numeric(dec!(2415)));
        assert_eq!(item.deduction, Amount::Numeric(dec!(100)));
        assert_eq!(item.net, Amount::Numeric(dec!(2315)));
        assert_eq!(item.benefit, None);
        assert!(item.is_balanced());
    }

    #[test]
    fn test_zeroed_row() {
        let item = LineItem::zeroed("", "");
        assert_eq!(item.amount(AmountField::GrossBase), Amount::ZERO);
        assert_eq!(item.amount(AmountField::Net), Amount::ZERO);
        assert!(item.is_balanced());
    }

    #[test]
    fn test_default_settings() {
        let settings = GlobalSettings::default();
        assert_eq!(settings.exchange_rate, Amount::Numeric(dec!(60)));
        assert_eq!(settings.display_currency, Currency::Usd);
        assert_eq!(settings.default_benefit, Amount::ZERO);
        assert_eq!(settings.allocation_mode, AllocationMode::Uniform);
    }

    #[test]
    fn test_allocation_mode_toggle() {
        assert_eq!(AllocationMode::Uniform.toggled(), AllocationMode::PerRow);
        assert_eq!(AllocationMode::PerRow.toggled(), AllocationMode::Uniform);
    }

    #[test]
    fn test_confirmation_from_bool() {
        assert_eq!(Confirmation::from(true), Confirmation::Confirmed);
        assert_eq!(Confirmation::from(false), Confirmation::Declined);
    }
}
