#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! EMI loan form
//!
//! Holds the three loan fields, validates them, drives one calculation at a
//! time through an `EmiCalculatorClient`, and derives the totals shown next
//! to the monthly installment.
//!
//! State changes go through [`FormState::reduce`]; [`FormController`] runs
//! the effects the reducer asks for.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod config;
pub mod controller;
pub mod format;
pub mod state;
pub mod validation;

pub use config::DisplayConfig;
pub use controller::FormController;
pub use format::{CurrencyFormatter, Grouping, format_currency};
pub use state::{Effect, FormAction, FormOutcome, FormState, LoanSummary, SubmissionId};
pub use validation::{ValidationError, validate_input};
