use async_trait::async_trait;
use emi_calculator_sdk::{CalculationResult, CalculatorError, EmiCalculatorClient, LoanInput};

use crate::domain::service::{Service, ServiceError};

impl From<ServiceError> for CalculatorError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidRequest(message) => CalculatorError::Rejected(message),
        }
    }
}

/// `EmiCalculatorClient` backed by the in-process [`Service`].
///
/// Rule violations come back as business rejections, the same way the
/// remote service reports them.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineCalculatorClient {
    service: Service,
}

impl OfflineCalculatorClient {
    #[must_use]
    pub fn new(service: Service) -> Self {
        Self { service }
    }
}

#[async_trait]
impl EmiCalculatorClient for OfflineCalculatorClient {
    async fn calculate(&self, input: &LoanInput) -> Result<CalculationResult, CalculatorError> {
        let monthly_installment =
            self.service
                .quote(input.amount, input.annual_rate_percent, input.term_years)?;
        Ok(CalculationResult {
            monthly_installment,
        })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_offline_client_success() {
        let client = OfflineCalculatorClient::default();
        let result = client
            .calculate(&LoanInput {
                amount: 100_000.0,
                annual_rate_percent: 10.0,
                term_years: 2.0,
            })
            .await
            .unwrap();
        assert!((result.monthly_installment - 4614.49).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_offline_client_rejection() {
        let client = OfflineCalculatorClient::new(Service::new());
        let err = client
            .calculate(&LoanInput {
                amount: 100_000.0,
                annual_rate_percent: 10.0,
                term_years: 0.5,
            })
            .await
            .unwrap_err();
        assert_eq!(err, CalculatorError::rejected("Loan term must be positive"));
    }
}
