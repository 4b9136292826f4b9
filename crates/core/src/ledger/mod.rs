//! Reactive payroll ledger.
//!
//! Holds the editable line items of one session together with its
//! settings, and keeps them consistent:
//! - `net = gross_base - deduction` whenever all three are numeric
//! - amounts are stored in the primary currency, typed and shown in the
//!   display currency
//! - the allocation mode decides which benefit counts, without rewriting
//!   stored benefits

pub mod amount;
pub mod error;
pub mod service;
pub mod types;
pub mod view;

#[cfg(test)]
mod service_props;

pub use amount::Amount;
pub use error::LedgerError;
pub use service::{Ledger, Totals};
pub use types::{
    AllocationMode, AmountField, BLANK_ROW_NAME, Confirmation, DEFAULT_EXCHANGE_RATE,
    GlobalSettings, LineItem, TextField,
};
pub use view::{LedgerView, RowView, TotalsView};
