//! Currency service for converting between stored and displayed amounts.
//!
//! Two rate fallbacks coexist under separate names: per-amount conversion
//! treats a missing (or zero) rate as 1, while the secondary-currency total
//! treats a missing rate as 0.

use nomina_shared::types::Currency;
use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

use super::conversion::convert_amount;

/// Decimal places shown for projected amounts.
pub const DISPLAY_DECIMAL_PLACES: u32 = 2;

/// Currency service for conversion operations.
///
/// Provides methods for moving amounts between the primary (storage)
/// currency and whichever currency is currently displayed.
pub struct CurrencyService;

impl CurrencyService {
    /// Rate used for per-amount conversion in both directions.
    ///
    /// A missing rate falls back to 1. Zero also falls back to 1 so that
    /// typed input is never divided by zero. Negative rates pass through.
    #[must_use]
    pub fn conversion_rate(rate: Option<Decimal>) -> Decimal {
        match rate {
            Some(r) if !r.is_zero() => r,
            _ => Decimal::ONE,
        }
    }

    /// Rate used for the secondary-currency grand total.
    ///
    /// A missing rate falls back to 0.
    #[must_use]
    pub fn totals_rate(rate: Option<Decimal>) -> Decimal {
        rate.unwrap_or(Decimal::ZERO)
    }

    /// Converts a value typed in `display` currency into the primary currency.
    ///
    /// Returns `None` when the division overflows.
    #[must_use]
    pub fn to_primary(value: Decimal, display: Currency, rate: Option<Decimal>) -> Option<Decimal> {
        if display.is_primary() {
            Some(value)
        } else {
            value.checked_div(Self::conversion_rate(rate))
        }
    }

    /// Projects a stored primary amount into the `display` currency,
    /// rounded to [`DISPLAY_DECIMAL_PLACES`] with Banker's Rounding.
    #[must_use]
    pub fn to_display(value: Decimal, display: Currency, rate: Option<Decimal>) -> Decimal {
        let rate = if display.is_primary() {
            Decimal::ONE
        } else {
            Self::conversion_rate(rate)
        };
        convert_amount(value, rate, DISPLAY_DECIMAL_PLACES)
    }

    /// Round a decimal value using Banker's Rounding.
    #[must_use]
    pub fn round(value: Decimal, decimal_places: u32) -> Decimal {
        value.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven)
    }
}
