//! Currency conversion logic.
//!
//! CRITICAL: Rounding strategy for display amounts:
//! - Always round to the display precision
//! - Use banker's rounding (round half to even)
//! - Stored amounts are never rounded, only their projections

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

/// Converts an amount using the given exchange rate.
///
/// Uses banker's rounding (round half to even) to minimize cumulative errors.
/// Saturates instead of overflowing for out-of-range products.
#[must_use]
pub fn convert_amount(amount: Decimal, rate: Decimal, decimal_places: u32) -> Decimal {
    let converted = amount.saturating_mul(rate);
    converted.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven)
}
