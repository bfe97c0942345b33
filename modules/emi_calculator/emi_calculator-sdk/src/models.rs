//! Public models for EMI calculation.
//!
//! Transport-agnostic; the HTTP wire format lives in the client.

/// Status value a service returns for a usable installment.
pub const SUCCESS_MESSAGE: &str = "SUCCESS";

/// Loan parameters that passed validation.
///
/// - `amount > 0`
/// - `0 < annual_rate_percent <= 100`
/// - `0 < term_years <= 30`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanInput {
    pub amount: f64,
    pub annual_rate_percent: f64,
    pub term_years: f64,
}

/// Outcome of a successful calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationResult {
    pub monthly_installment: f64,
}
