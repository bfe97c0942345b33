use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use bytes::Bytes;
use http::{Method, Request, Response, Uri, header};
use http_body_util::Full;
use serde::Serialize;
use tower::buffer::Buffer;
use tower::{Service, ServiceExt};

use crate::builder::HttpClientBuilder;
use crate::config::TransportSecurity;
use crate::error::HttpError;
use crate::response::{Deadline, HttpResponse, ResponseBody, within};

type StackFuture = Pin<Box<dyn Future<Output = Result<Response<ResponseBody>, HttpError>> + Send>>;

/// HTTP client; clones share one connection pool.
#[derive(Clone)]
pub struct HttpClient {
    pub(crate) service: Buffer<Request<Full<Bytes>>, StackFuture>,
    pub(crate) max_body_size: usize,
    pub(crate) request_timeout: Option<Duration>,
    pub(crate) transport: TransportSecurity,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("max_body_size", &self.max_body_size)
            .field("request_timeout", &self.request_timeout)
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    #[must_use]
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::new()
    }

    /// Start a POST to an absolute URL; the URL is checked on `send()`.
    pub fn post(&self, url: &str) -> PostRequest {
        PostRequest {
            client: self.clone(),
            url: url.to_owned(),
            body: None,
        }
    }

    async fn execute(&self, request: Request<Full<Bytes>>) -> Result<HttpResponse, HttpError> {
        let mut service = self.service.clone();
        let call = async move {
            service
                .ready()
                .await
                .map_err(unbox)?
                .call(request)
                .await
                .map_err(unbox)
        };

        let deadline = self.request_timeout.and_then(Deadline::after);
        let inner = within(deadline, call).await?;

        Ok(HttpResponse {
            inner,
            max_body_size: self.max_body_size,
            deadline,
        })
    }
}

/// Errors out of the buffer are either the stack's own `HttpError` or a
/// sign that the worker is gone.
fn unbox(err: tower::BoxError) -> HttpError {
    err.downcast::<HttpError>().map_or_else(
        |err| {
            tracing::error!(error = %err, "HTTP client worker failed");
            HttpError::WorkerClosed
        },
        |err| *err,
    )
}

fn check_url(url: &str, transport: TransportSecurity) -> Result<Uri, HttpError> {
    let invalid = |reason: String| HttpError::InvalidUrl {
        url: url.to_owned(),
        reason,
    };

    let uri: Uri = url.parse().map_err(|e: http::uri::InvalidUri| invalid(e.to_string()))?;
    if uri.host().is_none() {
        return Err(invalid("no host".to_owned()));
    }
    match (uri.scheme_str(), transport) {
        (Some("https"), _) | (Some("http"), TransportSecurity::AllowInsecureHttp) => Ok(uri),
        (Some(scheme), _) => Err(HttpError::SchemeNotAllowed {
            scheme: scheme.to_owned(),
        }),
        (None, _) => Err(invalid("no scheme".to_owned())),
    }
}

/// POST request under construction, see [`HttpClient::post`].
#[must_use = "nothing is sent until .send() is awaited"]
#[derive(Debug)]
pub struct PostRequest {
    client: HttpClient,
    url: String,
    body: Option<Bytes>,
}

impl PostRequest {
    /// Use `body` serialized as JSON.
    ///
    /// # Errors
    /// `Json` if serialization fails.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, HttpError> {
        self.body = Some(Bytes::from(serde_json::to_vec(body)?));
        Ok(self)
    }

    /// Send the request once. Every HTTP status comes back as `Ok`. A
    /// configured timeout covers the response body as well as the headers.
    ///
    /// # Errors
    /// `InvalidUrl` / `SchemeNotAllowed` before anything is sent, then
    /// `Transport`, `Timeout` or `WorkerClosed`.
    pub async fn send(self) -> Result<HttpResponse, HttpError> {
        let uri = check_url(&self.url, self.client.transport)?;

        let mut request = Request::builder().method(Method::POST).uri(uri);
        if self.body.is_some() {
            request = request.header(header::CONTENT_TYPE, "application/json");
        }
        let request = request.body(Full::new(self.body.unwrap_or_default()))?;

        self.client.execute(request).await
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    fn client() -> HttpClient {
        HttpClient::builder().allow_insecure_http().build().unwrap()
    }

    #[test]
    fn test_check_url() {
        let tls = TransportSecurity::TlsOnly;
        let plain = TransportSecurity::AllowInsecureHttp;

        assert!(check_url("https://emi.example.com/api/emi/calculate", tls).is_ok());
        assert!(check_url("http://localhost:8080/api/emi/calculate", plain).is_ok());
        assert!(matches!(
            check_url("http://localhost:8080/api/emi/calculate", tls),
            Err(HttpError::SchemeNotAllowed { ref scheme }) if scheme == "http"
        ));
        assert!(matches!(
            check_url("ftp://localhost/file", plain),
            Err(HttpError::SchemeNotAllowed { .. })
        ));
        assert!(matches!(
            check_url("/api/emi/calculate", plain),
            Err(HttpError::InvalidUrl { .. })
        ));
        assert!(matches!(
            check_url("http://exa mple.com", plain),
            Err(HttpError::InvalidUrl { .. })
        ));
    }

    #[tokio::test]
    async fn test_post_json() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/emi/calculate")
                .header("content-type", "application/json")
                .json_body(json!({"loanAmount": 1000.0}));
            then.status(200).json_body(json!({"message": "SUCCESS"}));
        });

        let reply: serde_json::Value = client()
            .post(&server.url("/api/emi/calculate"))
            .json(&json!({"loanAmount": 1000.0}))
            .unwrap()
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        mock.assert();
        assert_eq!(reply["message"], "SUCCESS");
    }

    #[tokio::test]
    async fn test_error_status_returned_as_response() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/emi/calculate");
            then.status(400)
                .json_body(json!({"message": "Loan term must be positive"}));
        });

        let response = client()
            .post(&server.url("/api/emi/calculate"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), http::StatusCode::BAD_REQUEST);

        let err = response.json::<serde_json::Value>().await.unwrap_err();
        assert!(err.status_body().unwrap().contains("Loan term must be positive"));
    }

    #[tokio::test]
    async fn test_user_agent_header() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/ua").header("user-agent", "emi-cli/1.0");
            then.status(204);
        });

        let client = HttpClient::builder()
            .allow_insecure_http()
            .user_agent("emi-cli/1.0")
            .build()
            .unwrap();
        client.post(&server.url("/ua")).send().await.unwrap();
        mock.assert();
    }

    #[tokio::test]
    async fn test_body_limit_applies() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/large");
            then.status(200).body("x".repeat(4096));
        });

        let client = HttpClient::builder()
            .allow_insecure_http()
            .max_body_size(1024)
            .build()
            .unwrap();
        let err = client
            .post(&server.url("/large"))
            .send()
            .await
            .unwrap()
            .bytes()
            .await
            .unwrap_err();
        assert!(matches!(err, HttpError::BodyTooLarge { limit: 1024 }));
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/slow");
            then.status(200).delay(Duration::from_millis(500));
        });

        let client = HttpClient::builder()
            .allow_insecure_http()
            .timeout(Duration::from_millis(50))
            .build()
            .unwrap();
        let err = client.post(&server.url("/slow")).send().await.unwrap_err();
        assert!(
            matches!(err, HttpError::Timeout(d) if d == Duration::from_millis(50)),
            "got {err:?}"
        );
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // Nothing listens on the discard port
        let err = client()
            .post("http://127.0.0.1:9/api/emi/calculate")
            .send()
            .await
            .unwrap_err();
        assert!(matches!(err, HttpError::Transport(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_plain_http_needs_opt_in() {
        let client = HttpClient::builder().build().unwrap();
        let err = client
            .post("http://localhost:8080/api/emi/calculate")
            .send()
            .await
            .unwrap_err();
        assert!(matches!(err, HttpError::SchemeNotAllowed { .. }));
    }
}
