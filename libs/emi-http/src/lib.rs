#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! HTTP transport for the EMI calculator
//!
//! A hyper client wrapped in a small tower stack:
//! - rustls TLS; plain `http://` only with `TransportSecurity::AllowInsecureHttp`
//! - pooled connections shared by all clones
//! - optional per-request timeout, off by default
//! - fixed User-Agent header
//! - gzip / brotli / deflate response decompression
//! - response body size limit
//!
//! Requests are sent once; there is no retry layer.
//!
//! ```ignore
//! use emi_http::HttpClient;
//!
//! let client = HttpClient::builder()
//!     .user_agent("emi-cli/0.1")
//!     .allow_insecure_http()
//!     .build()?;
//!
//! let reply: Reply = client
//!     .post("http://localhost:8080/api/emi/calculate")
//!     .json(&request)?
//!     .send()
//!     .await?
//!     .json()
//!     .await?;
//! ```

mod builder;
mod client;
mod config;
mod error;
mod response;
mod tls;

pub use builder::HttpClientBuilder;
pub use client::{HttpClient, PostRequest};
pub use config::{DEFAULT_USER_AGENT, HttpClientConfig, TlsRootConfig, TransportSecurity};
pub use error::HttpError;
pub use response::{ERROR_BODY_LIMIT, HttpResponse};
