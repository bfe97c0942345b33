use std::time::Duration;

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum HttpError {
    #[error("invalid User-Agent: {0}")]
    InvalidUserAgent(#[source] http::header::InvalidHeaderValue),

    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("URL scheme '{scheme}' is not allowed")]
    SchemeNotAllowed { scheme: String },

    #[error("failed to build request: {0}")]
    Request(#[from] http::Error),

    #[error("TLS setup failed: {0}")]
    Tls(#[source] BoxError),

    /// Connection, DNS or protocol failure
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    #[error("no response within {0:?}")]
    Timeout(Duration),

    #[error("response body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },

    /// Non-2xx reply. `body` is empty when the reply body was too large to keep.
    #[error("HTTP {status}: {body}")]
    Status {
        status: http::StatusCode,
        body: String,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The worker that owns the connection pool has stopped
    #[error("HTTP client worker stopped")]
    WorkerClosed,
}

impl HttpError {
    /// Body of a non-2xx reply.
    #[must_use]
    pub fn status_body(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

impl From<hyper_util::client::legacy::Error> for HttpError {
    fn from(err: hyper_util::client::legacy::Error) -> Self {
        Self::Transport(Box::new(err))
    }
}
