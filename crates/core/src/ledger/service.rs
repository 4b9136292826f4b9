//! The reactive ledger: editable line items plus session settings.
//!
//! Every mutating operation either applies completely or returns a
//! [`LedgerError`] and leaves the ledger untouched.

use nomina_shared::types::{Currency, LineItemId, Money};
use rust_decimal::Decimal;
use serde::Serialize;

use super::amount::Amount;
use super::error::LedgerError;
use super::types::{
    AllocationMode, AmountField, BLANK_ROW_NAME, Confirmation, GlobalSettings, LineItem, TextField,
};
use crate::currency::CurrencyService;
use crate::payroll::ProcessedLine;

/// Derived session totals, in full precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Totals {
    /// Sum of effective benefits, primary currency.
    pub total_benefit: Money,
    /// Sum of net pay plus benefits, primary currency.
    pub total_primary: Money,
    /// `total_primary` through the exchange rate.
    pub total_secondary: Money,
}

/// Editable payroll ledger for one session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ledger {
    items: Vec<LineItem>,
    settings: GlobalSettings,
}

impl Ledger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new(settings: GlobalSettings) -> Self {
        Self {
            items: Vec::new(),
            settings,
        }
    }

    /// Rows in display order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Current settings.
    #[must_use]
    pub const fn settings(&self) -> &GlobalSettings {
        &self.settings
    }

    /// Finds a row by id.
    #[must_use]
    pub fn item(&self, id: LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Replaces every row with the reconciliation output.
    pub fn ingest<I>(&mut self, lines: I)
    where
        I: IntoIterator<Item = ProcessedLine>,
    {
        self.items = lines.into_iter().map(LineItem::from_processed).collect();
    }

    /// Appends a row with blank text and zero amounts.
    pub fn add_manual_row(&mut self) -> LineItemId {
        let item = LineItem::zeroed("", "");
        let id = item.id;
        self.items.push(item);
        id
    }

    /// Replaces every row with a single placeholder row.
    pub fn start_blank(&mut self) -> LineItemId {
        let item = LineItem::zeroed(BLANK_ROW_NAME, "");
        let id = item.id;
        self.items = vec![item];
        id
    }

    /// Removes a row once the user confirmed.
    ///
    /// Returns true if a row was removed; declined or unknown ids are no-ops.
    pub fn remove_row(&mut self, id: LineItemId, confirmation: Confirmation) -> bool {
        if confirmation == Confirmation::Declined {
            return false;
        }
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Replaces a text field.
    pub fn edit_text(
        &mut self,
        id: LineItemId,
        field: TextField,
        value: impl Into<String>,
    ) -> Result<(), LedgerError> {
        let item = self.item_mut(id)?;
        let value = value.into();
        match field {
            TextField::Name => item.name = value,
            TextField::Identifier => item.identifier = value,
        }
        Ok(())
    }

    /// Edits one of the linked amount fields.
    ///
    /// Input is in the display currency. A number recomputes exactly one
    /// sibling; clearing the field touches nothing else:
    ///
    /// | edited       | recomputed | formula                    |
    /// |--------------|------------|----------------------------|
    /// | `gross_base` | `net`      | `gross_base - deduction`   |
    /// | `deduction`  | `net`      | `gross_base - deduction`   |
    /// | `net`        | `gross_base` | `net + deduction`        |
    ///
    /// Empty siblings read as zero.
    pub fn edit_amount(
        &mut self,
        id: LineItemId,
        field: AmountField,
        raw: &str,
    ) -> Result<(), LedgerError> {
        let value = self.parse_display_input(raw)?;
        let item = self.item_mut(id)?;

        let Amount::Numeric(v) = value else {
            match field {
                AmountField::GrossBase => item.gross_base = Amount::Empty,
                AmountField::Deduction => item.deduction = Amount::Empty,
                AmountField::Net => item.net = Amount::Empty,
            }
            return Ok(());
        };

        let out_of_range = || LedgerError::AmountOutOfRange(raw.to_string());
        match field {
            AmountField::GrossBase => {
                let net = v.checked_sub(item.deduction.or_zero()).ok_or_else(out_of_range)?;
                item.gross_base = Amount::Numeric(v);
                item.net = Amount::Numeric(net);
            }
            AmountField::Deduction => {
                let net = item.gross_base.or_zero().checked_sub(v).ok_or_else(out_of_range)?;
                item.deduction = Amount::Numeric(v);
                item.net = Amount::Numeric(net);
            }
            AmountField::Net => {
                let gross = v.checked_add(item.deduction.or_zero()).ok_or_else(out_of_range)?;
                item.net = Amount::Numeric(v);
                item.gross_base = Amount::Numeric(gross);
            }
        }
        Ok(())
    }

    /// Sets a row's own benefit. Only allowed in per-row mode.
    pub fn edit_benefit(&mut self, id: LineItemId, raw: &str) -> Result<(), LedgerError> {
        if self.settings.allocation_mode != AllocationMode::PerRow {
            return Err(LedgerError::PerRowBenefitInactive);
        }
        let value = self.parse_display_input(raw)?;
        self.item_mut(id)?.benefit = Some(value);
        Ok(())
    }

    /// Sets the uniform benefit. Rows already overridden keep their value.
    pub fn set_uniform_benefit(&mut self, raw: &str) -> Result<(), LedgerError> {
        self.settings.default_benefit = self.parse_display_input(raw)?;
        Ok(())
    }

    /// Copies the uniform benefit (empty as zero) into every row.
    pub fn apply_uniform_to_all(&mut self) {
        let value = Amount::Numeric(self.settings.default_benefit.or_zero());
        for item in &mut self.items {
            item.benefit = Some(value);
        }
    }

    /// Flips the allocation mode. Stored benefits are not touched.
    pub fn toggle_allocation_mode(&mut self) -> AllocationMode {
        self.settings.allocation_mode = self.settings.allocation_mode.toggled();
        self.settings.allocation_mode
    }

    /// Flips the display currency. Stored amounts are not touched.
    pub fn toggle_display_currency(&mut self) -> Currency {
        self.settings.display_currency = self.settings.display_currency.toggled();
        self.settings.display_currency
    }

    /// Sets the exchange rate. Blank clears it; zero and negative rates
    /// are accepted as typed.
    pub fn set_exchange_rate(&mut self, raw: &str) -> Result<(), LedgerError> {
        self.settings.exchange_rate = Amount::parse(raw)?;
        Ok(())
    }

    /// Projects a stored amount into the display currency.
    #[must_use]
    pub fn project_for_display(&self, amount: Amount) -> Amount {
        let display = self.settings.display_currency;
        let rate = self.settings.exchange_rate.value();
        amount.map(|v| CurrencyService::to_display(v, display, rate))
    }

    /// Benefit that counts for `item` under the current mode.
    ///
    /// In per-row mode an unset or empty row benefit is zero; the uniform
    /// value is not used as a fallback.
    #[must_use]
    pub fn effective_benefit(&self, item: &LineItem) -> Decimal {
        match self.settings.allocation_mode {
            AllocationMode::Uniform => self.settings.default_benefit.or_zero(),
            AllocationMode::PerRow => item.benefit.map_or(Decimal::ZERO, Amount::or_zero),
        }
    }

    /// True when, in per-row mode, the row's benefit differs from the
    /// uniform one. An unset row benefit reads as the uniform value.
    #[must_use]
    pub fn benefit_differs(&self, item: &LineItem) -> bool {
        if self.settings.allocation_mode != AllocationMode::PerRow {
            return false;
        }
        let uniform = self.settings.default_benefit;
        item.benefit.unwrap_or(uniform).or_zero() != uniform.or_zero()
    }

    /// Computes the session totals.
    #[must_use]
    pub fn totals(&self) -> Totals {
        let total_benefit = match self.settings.allocation_mode {
            AllocationMode::Uniform => self
                .settings
                .default_benefit
                .or_zero()
                .saturating_mul(Decimal::from(self.items.len())),
            AllocationMode::PerRow => self
                .items
                .iter()
                .fold(Decimal::ZERO, |acc, item| acc.saturating_add(self.effective_benefit(item))),
        };

        let total_net = self
            .items
            .iter()
            .fold(Decimal::ZERO, |acc, item| acc.saturating_add(item.net.or_zero()));
        let total_primary = total_net.saturating_add(total_benefit);
        let rate = CurrencyService::totals_rate(self.settings.exchange_rate.value());

        Totals {
            total_benefit: Money::new(total_benefit, Currency::PRIMARY),
            total_primary: Money::new(total_primary, Currency::PRIMARY),
            total_secondary: Money::new(total_primary.saturating_mul(rate), Currency::SECONDARY),
        }
    }

    /// Parses input typed in the display currency into a primary amount.
    fn parse_display_input(&self, raw: &str) -> Result<Amount, LedgerError> {
        match Amount::parse(raw)? {
            Amount::Empty => Ok(Amount::Empty),
            Amount::Numeric(v) => CurrencyService::to_primary(
                v,
                self.settings.display_currency,
                self.settings.exchange_rate.value(),
            )
            .map(Amount::Numeric)
            .ok_or_else(|| LedgerError::AmountOutOfRange(raw.to_string())),
        }
    }

    fn item_mut(&mut self, id: LineItemId) -> Result<&mut LineItem, LedgerError> {
        self.items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(LedgerError::RowNotFound(id))
    }
}
