//! Primary/secondary currency handling.
//!
//! Ledger amounts are stored in the primary currency. The secondary currency
//! is a display projection through the session exchange rate.

pub mod conversion;
pub mod service;

#[cfg(test)]
mod service_props;

pub use conversion::convert_amount;
pub use service::{CurrencyService, DISPLAY_DECIMAL_PLACES};
