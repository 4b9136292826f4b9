//! Money type with decimal precision and currency.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` for arbitrary precision.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents a monetary amount with currency.
///
/// Uses `Decimal` internally to avoid floating-point precision errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// The amount in major currency units.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency: Currency,
}

/// Currencies handled by the payroll ledger.
///
/// Amounts are always stored in [`Currency::PRIMARY`]; the secondary
/// currency only exists as a display projection through an exchange rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US Dollar (storage currency)
    Usd,
    /// Venezuelan Bolivar
    Ves,
}

impl Currency {
    /// Canonical storage currency for all ledger amounts.
    pub const PRIMARY: Self = Self::Usd;
    /// Display-only currency, derived through the exchange rate.
    pub const SECONDARY: Self = Self::Ves;

    /// Returns true for the storage currency.
    #[must_use]
    pub fn is_primary(self) -> bool {
        self == Self::PRIMARY
    }

    /// Returns the other currency of the pair.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Usd => Self::Ves,
            Self::Ves => Self::Usd,
        }
    }

    /// Symbol used in printed reports.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Ves => "Bs",
        }
    }
}

impl Money {
    /// Creates a new Money instance.
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Usd => write!(f, "USD"),
            Self::Ves => write!(f, "VES"),
        }
    }
}
