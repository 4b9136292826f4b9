//! Editable amount cell: either empty or a number.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::LedgerError;

/// Value of an editable numeric field.
///
/// `Empty` is an in-progress edit and is distinct from `Numeric(0)`.
/// Serialized as a nullable decimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<Decimal>", into = "Option<Decimal>")]
pub enum Amount {
    /// Field cleared by the user.
    #[default]
    Empty,
    /// Field holding a number.
    Numeric(Decimal),
}

impl Amount {
    /// Zero, as a numeric value.
    pub const ZERO: Self = Self::Numeric(Decimal::ZERO);

    /// Parses raw user input.
    ///
    /// Blank input is `Empty`. Plain and scientific notation are accepted.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::UnparseableAmount` for any other input.
    pub fn parse(raw: &str) -> Result<Self, LedgerError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Self::Empty);
        }

        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map(Self::Numeric)
            .map_err(|_| LedgerError::UnparseableAmount(raw.to_string()))
    }

    /// Returns the number, if any.
    #[must_use]
    pub const fn value(self) -> Option<Decimal> {
        match self {
            Self::Empty => None,
            Self::Numeric(v) => Some(v),
        }
    }

    /// Returns the number, treating `Empty` as zero.
    #[must_use]
    pub fn or_zero(self) -> Decimal {
        self.value().unwrap_or(Decimal::ZERO)
    }

    /// Returns true for `Empty`.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Applies `f` to a numeric value; `Empty` stays `Empty`.
    #[must_use]
    pub fn map(self, f: impl FnOnce(Decimal) -> Decimal) -> Self {
        match self {
            Self::Empty => Self::Empty,
            Self::Numeric(v) => Self::Numeric(f(v)),
        }
    }
}

impl From<Option<Decimal>> for Amount {
    fn from(value: Option<Decimal>) -> Self {
        value.map_or(Self::Empty, Self::Numeric)
    }
}

impl From<Amount> for Option<Decimal> {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self::Numeric(value)
    }
}
