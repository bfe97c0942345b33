//! Loan input validation.
//!
//! Fields are checked in the order amount, rate, term and the first failure
//! wins.

use emi_calculator_sdk::LoanInput;
use thiserror::Error;

/// Highest yearly interest rate the form accepts, in percent
pub const MAX_RATE_PERCENT: f64 = 100.0;

/// Longest loan term the form accepts, in years
pub const MAX_TERM_YEARS: f64 = 30.0;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Loan amount must be a positive number.")]
    Amount,

    #[error("Yearly interest rate must be a positive number between 0 and 100.")]
    Rate,

    #[error("Loan term must be a positive number between 0 and 30 years.")]
    Term,
}

/// Turn the raw form fields into a [`LoanInput`].
///
/// # Errors
/// Returns the first [`ValidationError`] in field order. Missing and
/// non-finite values count as invalid.
pub fn validate_input(
    amount: Option<f64>,
    rate: Option<f64>,
    term: Option<f64>,
) -> Result<LoanInput, ValidationError> {
    let amount = positive_at_most(amount, f64::INFINITY).ok_or(ValidationError::Amount)?;
    let annual_rate_percent =
        positive_at_most(rate, MAX_RATE_PERCENT).ok_or(ValidationError::Rate)?;
    let term_years = positive_at_most(term, MAX_TERM_YEARS).ok_or(ValidationError::Term)?;

    Ok(LoanInput {
        amount,
        annual_rate_percent,
        term_years,
    })
}

fn positive_at_most(value: Option<f64>, max: f64) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0 && *v <= max)
}
