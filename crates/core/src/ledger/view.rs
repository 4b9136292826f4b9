//! Display-currency snapshot of a ledger, re-rendered after every edit.

use nomina_shared::types::{Currency, LineItemId, Money};
use serde::Serialize;

use super::amount::Amount;
use super::service::Ledger;
use super::types::{AllocationMode, GlobalSettings};
use crate::currency::{CurrencyService, DISPLAY_DECIMAL_PLACES};

/// Caption shown for the benefit column in per-row mode.
pub const VARIABLE_BENEFIT_CAPTION: &str = "variable";

/// One row as presented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    /// Row id.
    pub id: LineItemId,
    /// Display name.
    pub name: String,
    /// Identifier.
    pub identifier: String,
    /// Gross, in the display currency.
    pub gross_base: Amount,
    /// Deduction, in the display currency.
    pub deduction: Amount,
    /// Net, in the display currency.
    pub net: Amount,
    /// Benefit shown in the row: the row's own in per-row mode, else the uniform one.
    pub benefit: Amount,
    /// Per-row benefit differs from the uniform one.
    pub benefit_differs: bool,
}

/// Totals rounded for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TotalsView {
    /// Sum of effective benefits.
    pub benefit: Money,
    /// Grand total in the primary currency.
    pub primary: Money,
    /// Grand total in the secondary currency.
    pub secondary: Money,
}

/// Everything presentation needs from a ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerView {
    /// Stored settings (rate and uniform benefit in primary units).
    pub settings: GlobalSettings,
    /// Uniform benefit in the display currency.
    pub uniform_benefit: Amount,
    /// "variable" in per-row mode, otherwise the uniform amount with symbol.
    pub benefit_caption: String,
    /// Rows in order.
    pub rows: Vec<RowView>,
    /// Totals.
    pub totals: TotalsView,
}

impl Ledger {
    /// Renders the ledger in its display currency.
    #[must_use]
    pub fn view(&self) -> LedgerView {
        let settings = *self.settings();
        let uniform_benefit = self.project_for_display(settings.default_benefit);

        let rows = self
            .items()
            .iter()
            .map(|item| {
                let benefit = match settings.allocation_mode {
                    AllocationMode::Uniform => uniform_benefit,
                    AllocationMode::PerRow => {
                        self.project_for_display(item.benefit.unwrap_or(Amount::Empty))
                    }
                };
                RowView {
                    id: item.id,
                    name: item.name.clone(),
                    identifier: item.identifier.clone(),
                    gross_base: self.project_for_display(item.gross_base),
                    deduction: self.project_for_display(item.deduction),
                    net: self.project_for_display(item.net),
                    benefit,
                    benefit_differs: self.benefit_differs(item),
                }
            })
            .collect();

        let totals = self.totals();
        let round = |money: Money| {
            Money::new(
                CurrencyService::round(money.amount, DISPLAY_DECIMAL_PLACES),
                money.currency,
            )
        };

        LedgerView {
            settings,
            uniform_benefit,
            benefit_caption: benefit_caption(
                settings.allocation_mode,
                settings.display_currency,
                uniform_benefit,
            ),
            rows,
            totals: TotalsView {
                benefit: round(totals.total_benefit),
                primary: round(totals.total_primary),
                secondary: round(totals.total_secondary),
            },
        }
    }
}

fn benefit_caption(mode: AllocationMode, display: Currency, uniform: Amount) -> String {
    match mode {
        AllocationMode::PerRow => VARIABLE_BENEFIT_CAPTION.to_string(),
        AllocationMode::Uniform => format!("{} {:.2}", display.symbol(), uniform.or_zero()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::types::AmountField;
    use crate::payroll::ProcessedLine;
    use rust_decimal_macros::dec;

    fn ledger() -> Ledger {
        let mut ledger = Ledger::default();
        ledger.ingest([ProcessedLine {
            name: "ANA".into(),
            identifier: "123".into(),
            net: dec!(2315),
            debt_deducted: dec!(100),
        }]);
        ledger.set_uniform_benefit("40").unwrap();
        ledger
    }

    #[test]
    fn test_view_primary() {
        let view = ledger().view();
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].gross_base, Amount::Numeric(dec!(2415)));
        assert_eq!(view.rows[0].benefit, Amount::Numeric(dec!(40)));
        assert!(!view.rows[0].benefit_differs);
        assert_eq!(view.benefit_caption, "$ 40.00");
        assert_eq!(view.totals.primary, Money::new(dec!(2355), Currency::Usd));
        assert_eq!(view.totals.secondary, Money::new(dec!(141300), Currency::Ves));
    }

    #[test]
    fn test_view_secondary_projects_rows_only() {
        let mut ledger = ledger();
        ledger.toggle_display_currency();
        let view = ledger.view();
        assert_eq!(view.rows[0].net, Amount::Numeric(dec!(138900)));
        assert_eq!(view.uniform_benefit, Amount::Numeric(dec!(2400)));
        assert_eq!(view.benefit_caption, "Bs 2400.00");
        assert_eq!(view.settings.default_benefit, Amount::Numeric(dec!(40)));
        assert_eq!(view.totals.primary.currency, Currency::Usd);
    }

    #[test]
    fn test_view_per_row_mode() {
        let mut ledger = ledger();
        ledger.toggle_allocation_mode();
        let id = ledger.items()[0].id;
        let view = ledger.view();
        assert_eq!(view.benefit_caption, "variable");
        assert_eq!(view.rows[0].benefit, Amount::Empty);

        ledger.edit_benefit(id, "12.5").unwrap();
        let view = ledger.view();
        assert_eq!(view.rows[0].benefit, Amount::Numeric(dec!(12.5)));
        assert!(view.rows[0].benefit_differs);
    }

    #[test]
    fn test_view_keeps_empty_fields_empty() {
        let mut ledger = ledger();
        let id = ledger.items()[0].id;
        ledger.edit_amount(id, AmountField::Deduction, "").unwrap();
        assert_eq!(ledger.view().rows[0].deduction, Amount::Empty);
    }

    #[test]
    fn test_view_serializes() {
        let json = serde_json::to_value(ledger().view()).unwrap();
        assert_eq!(json["settings"]["allocation_mode"], "uniform");
        assert_eq!(json["settings"]["display_currency"], "USD");
        assert_eq!(json["totals"]["primary"]["currency"], "USD");
        assert_eq!(json["rows"][0]["identifier"], "123");
    }
}
