#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! EMI Calculator SDK
//!
//! Everything needed to talk to an EMI calculation service:
//! - `EmiCalculatorClient` trait (one async call, one outcome)
//! - Models (`LoanInput`, `CalculationResult`)
//! - Error taxonomy (`CalculatorError`)
//! - `EmiHttpClient`, the HTTP implementation of the trait
//!
//! ## Usage
//!
//! ```ignore
//! use emi_calculator_sdk::{CalculatorClientConfig, EmiCalculatorClient, EmiHttpClient, LoanInput};
//!
//! let client = EmiHttpClient::new(&CalculatorClientConfig::default())?;
//! let input = LoanInput { amount: 100_000.0, annual_rate_percent: 10.0, term_years: 2.0 };
//! match client.calculate(&input).await {
//!     Ok(result) => println!("EMI: {}", result.monthly_installment),
//!     Err(err) => println!("{}", err.message()),
//! }
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod api;
pub mod config;
pub mod errors;
pub mod models;

mod client;

pub use api::EmiCalculatorClient;
pub use client::EmiHttpClient;
pub use config::CalculatorClientConfig;
pub use errors::{CalculatorError, DEFAULT_ERROR_MESSAGE};
pub use models::{CalculationResult, LoanInput, SUCCESS_MESSAGE};

pub use emi_http::TlsRootConfig;

/// Path of the calculation endpoint, relative to the service base URL
pub const CALCULATE_PATH: &str = "/api/emi/calculate";
