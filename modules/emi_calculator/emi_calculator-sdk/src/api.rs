//! Client trait for EMI calculation.

use async_trait::async_trait;

use crate::errors::CalculatorError;
use crate::models::{CalculationResult, LoanInput};

/// EMI calculation API
///
/// Implementations issue exactly one calculation per call and resolve with
/// exactly one outcome: a result, a business rejection, or a transport
/// error. They never retry.
#[async_trait]
pub trait EmiCalculatorClient: Send + Sync {
    /// Compute the monthly installment for an already validated input.
    async fn calculate(&self, input: &LoanInput) -> Result<CalculationResult, CalculatorError>;
}
