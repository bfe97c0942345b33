use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_USER_AGENT: &str = concat!("emi-http/", env!("CARGO_PKG_VERSION"));

/// Where trusted root certificates come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TlsRootConfig {
    /// Bundled Mozilla roots
    #[default]
    WebPki,
    /// Operating system certificate store
    Native,
}

/// Which URL schemes a client will talk to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransportSecurity {
    #[default]
    TlsOnly,
    /// `http://` is accepted next to `https://`
    AllowInsecureHttp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Time allowed for the whole exchange, body included; `None` waits
    /// indefinitely
    pub request_timeout: Option<Duration>,
    /// Largest response body accepted, in bytes
    pub max_body_size: usize,
    pub user_agent: String,
    pub transport: TransportSecurity,
    pub tls_roots: TlsRootConfig,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: None,
            max_body_size: 1024 * 1024,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            transport: TransportSecurity::TlsOnly,
            tls_roots: TlsRootConfig::WebPki,
        }
    }
}
