//! Core business logic for Nomina.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `currency` - Primary/secondary currency conversion and display projection
//! - `payroll` - Reconciliation of uploaded workbooks against the employee directory
//! - `ledger` - Editable per-employee net pay ledger with currency-aware projection

pub mod currency;
pub mod ledger;
pub mod payroll;
