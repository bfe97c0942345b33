//! Configuration of the HTTP calculation client.

use emi_http::TlsRootConfig;
use serde::{Deserialize, Serialize};

/// Settings for [`EmiHttpClient`](crate::EmiHttpClient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalculatorClientConfig {
    /// Scheme, host and port of the calculation service
    pub base_url: String,
    /// Optional timeout in milliseconds covering the request and the reply
    /// body; no timeout when unset
    pub timeout_ms: Option<u64>,
    /// User-Agent sent with every request
    pub user_agent: String,
    /// Upper bound on response body size in bytes
    pub max_body_size: usize,
    /// Trust store for `https://` services: `webpki` or `native`
    pub tls_roots: TlsRootConfig,
}

impl Default for CalculatorClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_owned(),
            timeout_ms: None,
            user_agent: concat!("emi-calculator-sdk/", env!("CARGO_PKG_VERSION")).to_owned(),
            max_body_size: 64 * 1024,
            tls_roots: TlsRootConfig::WebPki,
        }
    }
}

impl CalculatorClientConfig {
    /// Full URL of the calculation endpoint.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), crate::CALCULATE_PATH)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_path_once() {
        let mut config = CalculatorClientConfig::default();
        assert_eq!(config.endpoint(), "http://localhost:8080/api/emi/calculate");

        config.base_url = "https://emi.example.com/".to_owned();
        assert_eq!(config.endpoint(), "https://emi.example.com/api/emi/calculate");
    }

    #[test]
    fn test_defaults_have_no_timeout() {
        assert_eq!(CalculatorClientConfig::default().timeout_ms, None);
    }
}
