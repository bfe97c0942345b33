//! EMI amortization service
//!
//! `EMI = P * r * (1+r)^n / ((1+r)^n - 1)` with `r` the monthly rate and `n`
//! the number of months; with a zero rate the principal is split evenly.

use tracing::debug;

/// Longest accepted term, in years
pub const MAX_TERM_YEARS: u32 = 30;

/// Highest accepted yearly rate, in percent
pub const MAX_YEARLY_RATE: f64 = 100.0;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Request broke one of the service's input rules
    #[error("{0}")]
    InvalidRequest(String),
}

impl ServiceError {
    fn invalid(message: &str) -> Self {
        Self::InvalidRequest(message.to_owned())
    }
}

/// Stateless EMI calculation service.
#[derive(Debug, Clone, Copy, Default)]
pub struct Service;

impl Service {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Raw (unrounded) monthly installment.
    ///
    /// # Errors
    /// Returns `ServiceError::InvalidRequest` when the term has no months or
    /// too many to count.
    pub fn calculate_emi(
        &self,
        loan_amount: f64,
        yearly_interest_rate: f64,
        loan_term_years: u32,
    ) -> Result<f64, ServiceError> {
        let months = match loan_term_years.checked_mul(12) {
            Some(0) => return Err(ServiceError::invalid("Loan term must be greater than zero")),
            Some(months) => months,
            None => return Err(ServiceError::invalid("Loan term is too long")),
        };
        let monthly_rate = yearly_interest_rate / 12.0 / 100.0;
        let n = f64::from(months);

        if monthly_rate == 0.0 {
            return Ok(loan_amount / n);
        }

        let factor = (1.0 + monthly_rate).powf(n);
        Ok(loan_amount * monthly_rate * factor / (factor - 1.0))
    }

    /// Check a request against the service rules, then return the EMI
    /// rounded to two decimals.
    ///
    /// Fractional terms are truncated to whole years.
    ///
    /// # Errors
    /// Returns `ServiceError::InvalidRequest` with the first rule that fails,
    /// checked in the order amount, rate, term.
    pub fn quote(
        &self,
        loan_amount: f64,
        yearly_interest_rate: f64,
        loan_term_years: f64,
    ) -> Result<f64, ServiceError> {
        if !(loan_amount.is_finite() && loan_amount > 0.0) {
            return Err(ServiceError::invalid("Loan amount must be a positive number"));
        }
        if !(yearly_interest_rate.is_finite() && yearly_interest_rate > 0.0) {
            return Err(ServiceError::invalid("Yearly interest rate must be positive"));
        }
        if yearly_interest_rate > MAX_YEARLY_RATE {
            return Err(ServiceError::invalid(
                "Yearly interest rate must be between 0 and 100",
            ));
        }
        let years = whole_years(loan_term_years)
            .ok_or_else(|| ServiceError::invalid("Loan term must be positive"))?;
        if years > MAX_TERM_YEARS {
            return Err(ServiceError::invalid(
                "Loan term must be between 0 and 30 years",
            ));
        }

        let emi = self.calculate_emi(loan_amount, yearly_interest_rate, years)?;
        let rounded = round_cents(emi);
        debug!(loan_amount, yearly_interest_rate, years, emi = rounded, "emi quoted");
        Ok(rounded)
    }
}

/// Positive whole years, or `None` when the truncated term is not positive.
fn whole_years(term: f64) -> Option<u32> {
    if !term.is_finite() || term < 1.0 {
        return None;
    }
    let years = term.trunc().min(f64::from(u32::MAX));
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Some(years as u32)
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() <= tolerance
    }

    #[test]
    fn test_typical_home_loan() {
        let emi = Service::new().calculate_emi(1_000_000.0, 8.0, 20).unwrap();
        assert!(emi > 0.0);
        assert!(approx(round_cents(emi), 8364.48, 0.01), "got {emi}");
    }

    #[test]
    fn test_zero_interest_is_simple_division() {
        let emi = Service::new().calculate_emi(120_000.0, 0.0, 1).unwrap();
        assert!(approx(emi, 10_000.0, 1e-4));
    }

    #[test]
    fn test_zero_term_rejected() {
        let err = Service::new().calculate_emi(1000.0, 5.0, 0).unwrap_err();
        assert_eq!(err.to_string(), "Loan term must be greater than zero");
    }

    #[test]
    fn test_month_count_overflow_rejected() {
        let service = Service::new();
        let err = service.calculate_emi(1000.0, 5.0, 400_000_000).unwrap_err();
        assert_eq!(err.to_string(), "Loan term is too long");
        assert!(service.calculate_emi(1000.0, 5.0, u32::MAX).is_err());
    }

    #[test]
    fn test_quote_rounds_to_cents() {
        let emi = Service::new().quote(100_000.0, 10.0, 2.0).unwrap();
        assert!(approx(emi, 4614.49, 1e-9), "got {emi}");
    }

    #[test]
    fn test_quote_truncates_fractional_term() {
        let service = Service::new();
        assert_eq!(
            service.quote(100_000.0, 10.0, 2.9).unwrap(),
            service.quote(100_000.0, 10.0, 2.0).unwrap()
        );
    }

    #[test]
    fn test_quote_rules_in_order() {
        let service = Service::new();
        let message = |r: Result<f64, ServiceError>| r.unwrap_err().to_string();

        assert_eq!(
            message(service.quote(0.0, 500.0, 99.0)),
            "Loan amount must be a positive number"
        );
        assert_eq!(
            message(service.quote(1000.0, 0.0, 99.0)),
            "Yearly interest rate must be positive"
        );
        assert_eq!(
            message(service.quote(1000.0, 100.5, 5.0)),
            "Yearly interest rate must be between 0 and 100"
        );
        assert_eq!(
            message(service.quote(1000.0, 5.0, 0.5)),
            "Loan term must be positive"
        );
        assert_eq!(
            message(service.quote(1000.0, 5.0, 31.0)),
            "Loan term must be between 0 and 30 years"
        );
        assert_eq!(
            message(service.quote(f64::NAN, 5.0, 5.0)),
            "Loan amount must be a positive number"
        );
    }

    #[test]
    fn test_quote_accepts_boundaries() {
        let service = Service::new();
        assert!(service.quote(1.0, MAX_YEARLY_RATE, 30.0).is_ok());
        assert!(service.quote(1.0, 0.01, 1.0).is_ok());
    }
}
