//! HTTP implementation of `EmiCalculatorClient`.

use std::time::Duration;

use async_trait::async_trait;
use emi_http::{HttpClient, HttpError, TransportSecurity};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::api::EmiCalculatorClient;
use crate::config::CalculatorClientConfig;
use crate::errors::CalculatorError;
use crate::models::{CalculationResult, LoanInput, SUCCESS_MESSAGE};

/// Request body of `POST /api/emi/calculate`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmiRequest {
    loan_amount: f64,
    yearly_interest_rate: f64,
    loan_term_years: f64,
}

impl From<&LoanInput> for EmiRequest {
    fn from(input: &LoanInput) -> Self {
        Self {
            loan_amount: input.amount,
            yearly_interest_rate: input.annual_rate_percent,
            loan_term_years: input.term_years,
        }
    }
}

/// Response body on a business outcome. `emiAmount` is only meaningful when
/// `message` is the success sentinel.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EmiResponse {
    #[serde(default)]
    emi_amount: Option<f64>,
    #[serde(default)]
    message: Option<String>,
}

/// Any error body; only `message` is of interest.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Calculation client that posts to a remote EMI service.
#[derive(Debug, Clone)]
pub struct EmiHttpClient {
    http: HttpClient,
    endpoint: String,
}

impl EmiHttpClient {
    /// Build a client for the configured service.
    ///
    /// Plain `http://` base URLs are accepted; everything else goes over TLS.
    /// Must be called inside a tokio runtime.
    ///
    /// # Errors
    /// Returns `HttpError` if the underlying HTTP client cannot be built.
    pub fn new(config: &CalculatorClientConfig) -> Result<Self, HttpError> {
        let transport = if config.base_url.starts_with("http://") {
            TransportSecurity::AllowInsecureHttp
        } else {
            TransportSecurity::TlsOnly
        };

        let mut builder = HttpClient::builder()
            .user_agent(config.user_agent.clone())
            .max_body_size(config.max_body_size)
            .tls_roots(config.tls_roots)
            .transport(transport);
        if let Some(ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }

        Ok(Self {
            http: builder.build()?,
            endpoint: config.endpoint(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl EmiCalculatorClient for EmiHttpClient {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn calculate(&self, input: &LoanInput) -> Result<CalculationResult, CalculatorError> {
        let body = EmiRequest::from(input);

        let response: EmiResponse = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .map_err(transport_error)?
            .send()
            .await
            .map_err(transport_error)?
            .json()
            .await
            .map_err(transport_error)?;

        interpret(response)
    }
}

fn interpret(response: EmiResponse) -> Result<CalculationResult, CalculatorError> {
    match (response.message, response.emi_amount) {
        (Some(message), Some(emi)) if message == SUCCESS_MESSAGE => {
            debug!(emi, "calculation succeeded");
            Ok(CalculationResult {
                monthly_installment: emi,
            })
        }
        (Some(message), None) if message == SUCCESS_MESSAGE => {
            debug!("success reply without emiAmount");
            Err(CalculatorError::transport(None))
        }
        (Some(message), _) => {
            debug!(%message, "calculation rejected by service");
            Err(CalculatorError::Rejected(message))
        }
        (None, _) => {
            debug!("reply without message field");
            Err(CalculatorError::transport(None))
        }
    }
}

/// Map an HTTP failure to a transport outcome, surfacing the error body's
/// `message` when there is one.
fn transport_error(err: HttpError) -> CalculatorError {
    debug!(error = %err, "calculation request failed");
    let message = err
        .status_body()
        .and_then(|body| serde_json::from_str::<ErrorBody>(body).ok())
        .and_then(|body| body.message);
    CalculatorError::transport(message)
}
