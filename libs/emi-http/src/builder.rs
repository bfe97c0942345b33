use std::time::Duration;

use bytes::Bytes;
use http::header::{HeaderValue, USER_AGENT};
use http::Response;
use http_body_util::{BodyExt, Full};
use hyper_util::client::legacy::Client;
use hyper_util::rt::{TokioExecutor, TokioTimer};
use tower::buffer::Buffer;
use tower::{ServiceBuilder, ServiceExt};
use tower_http::decompression::DecompressionLayer;
use tower_http::set_header::SetRequestHeaderLayer;

use crate::client::HttpClient;
use crate::config::{HttpClientConfig, TlsRootConfig, TransportSecurity};
use crate::error::HttpError;
use crate::response::ResponseBody;
use crate::tls;

const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);
const POOL_MAX_IDLE_PER_HOST: usize = 4;
const QUEUE_CAPACITY: usize = 8;

#[derive(Debug, Clone, Default)]
pub struct HttpClientBuilder {
    config: HttpClientConfig,
}

impl HttpClientBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_config(config: HttpClientConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn max_body_size(mut self, bytes: usize) -> Self {
        self.config.max_body_size = bytes;
        self
    }

    #[must_use]
    pub fn transport(mut self, transport: TransportSecurity) -> Self {
        self.config.transport = transport;
        self
    }

    #[must_use]
    pub fn tls_roots(mut self, roots: TlsRootConfig) -> Self {
        self.config.tls_roots = roots;
        self
    }

    /// Shorthand for `transport(TransportSecurity::AllowInsecureHttp)`.
    ///
    /// Release builds need the `allow-insecure-http` feature.
    #[must_use]
    #[cfg(any(debug_assertions, feature = "allow-insecure-http"))]
    pub fn allow_insecure_http(self) -> Self {
        self.transport(TransportSecurity::AllowInsecureHttp)
    }

    /// Assemble the client. Spawns the queue worker, so a tokio runtime
    /// must be running.
    ///
    /// # Errors
    /// `InvalidUserAgent` for a User-Agent that is not a valid header value,
    /// `Tls` when the root store cannot be set up.
    pub fn build(self) -> Result<HttpClient, HttpError> {
        let HttpClientConfig {
            request_timeout,
            max_body_size,
            user_agent,
            transport,
            tls_roots,
        } = self.config;

        if transport == TransportSecurity::AllowInsecureHttp {
            tracing::warn!("plain HTTP allowed; requests to http:// URLs are not encrypted");
        }

        let user_agent = HeaderValue::from_str(&user_agent).map_err(HttpError::InvalidUserAgent)?;
        let connector = tls::https_connector(tls_roots, transport)?;
        let hyper_client = Client::builder(TokioExecutor::new())
            .pool_timer(TokioTimer::new())
            .pool_idle_timeout(POOL_IDLE_TIMEOUT)
            .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
            .build::<_, Full<Bytes>>(connector);

        // User-Agent is set outermost; decompression sits right above hyper
        let stack = ServiceBuilder::new()
            .layer(SetRequestHeaderLayer::overriding(USER_AGENT, user_agent))
            .layer(DecompressionLayer::new())
            .service(hyper_client)
            .map_response(erase_body)
            .map_err(HttpError::from)
            .boxed();

        Ok(HttpClient {
            service: Buffer::new(stack, QUEUE_CAPACITY),
            max_body_size,
            request_timeout,
            transport,
        })
    }
}

fn erase_body<B>(response: Response<B>) -> Response<ResponseBody>
where
    B: hyper::body::Body<Data = Bytes> + Send + Sync + 'static,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    response.map(|body| body.map_err(Into::into).boxed())
}
