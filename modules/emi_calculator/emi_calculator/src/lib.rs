#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Offline EMI Calculator
//!
//! The amortization formula and request rules of the EMI calculation
//! service, run in-process. `OfflineCalculatorClient` exposes them through
//! the SDK's `EmiCalculatorClient` trait so callers can swap it in for the
//! HTTP client.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod domain;

pub use domain::local_client::OfflineCalculatorClient;
pub use domain::service::{Service, ServiceError};
