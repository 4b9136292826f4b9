//! Property-based tests for currency projection.
//!
//! - Display projection then re-entry returns the stored value within
//!   display precision.
//! - Primary view projection only rounds.

use nomina_shared::types::Currency;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::CurrencyService;

/// Strategy to generate amounts (-1,000,000.0000 to 1,000,000.0000).
fn amount() -> impl Strategy<Value = Decimal> {
    (-10_000_000_000i64..10_000_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

/// Strategy to generate exchange rates of at least 1 (1.00 to 10,000.00).
fn rate_at_least_one() -> impl Strategy<Value = Decimal> {
    (100i64..1_000_000i64).prop_map(|v| Decimal::new(v, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Projecting into the secondary view and typing the shown value back
    /// stores the original primary amount within 2 decimal places.
    #[test]
    fn prop_secondary_round_trip_within_display_precision(
        value in amount(),
        rate in rate_at_least_one(),
    ) {
        let shown = CurrencyService::to_display(value, Currency::SECONDARY, Some(rate));
        let stored = CurrencyService::to_primary(shown, Currency::SECONDARY, Some(rate)).unwrap();
        let tolerance = Decimal::new(5, 3) / rate + Decimal::new(1, 20);
        prop_assert!(
            (stored - value).abs() <= tolerance,
            "{} -> {} -> {} exceeds tolerance {}",
            value, shown, stored, tolerance
        );
    }

    /// Primary view re-entry differs from the stored amount by at most half a cent.
    #[test]
    fn prop_primary_round_trip_within_half_cent(
        value in amount(),
        rate in rate_at_least_one(),
    ) {
        let shown = CurrencyService::to_display(value, Currency::PRIMARY, Some(rate));
        let stored = CurrencyService::to_primary(shown, Currency::PRIMARY, Some(rate)).unwrap();
        prop_assert!((stored - value).abs() <= Decimal::new(5, 3));
    }

    /// Projection into the primary view never depends on the rate.
    #[test]
    fn prop_primary_projection_ignores_rate(
        value in amount(),
        rate in rate_at_least_one(),
    ) {
        prop_assert_eq!(
            CurrencyService::to_display(value, Currency::PRIMARY, Some(rate)),
            CurrencyService::to_display(value, Currency::PRIMARY, None)
        );
    }
}
