use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use bytes::Bytes;
use http::{HeaderMap, Response, StatusCode};
use http_body_util::{BodyExt, Collected, LengthLimitError, Limited};
use serde::de::DeserializeOwned;

use crate::error::HttpError;

/// Most bytes of a non-2xx body kept in [`HttpError::Status`]
pub const ERROR_BODY_LIMIT: usize = 8 * 1024;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub(crate) type ResponseBody =
    http_body_util::combinators::BoxBody<Bytes, Box<dyn std::error::Error + Send + Sync>>;

/// Instant by which a request, body included, must be done.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Deadline {
    at: tokio::time::Instant,
    limit: Duration,
}

impl Deadline {
    /// `None` when `limit` is too far out to represent.
    pub(crate) fn after(limit: Duration) -> Option<Self> {
        tokio::time::Instant::now()
            .checked_add(limit)
            .map(|at| Self { at, limit })
    }
}

pub(crate) async fn within<T>(
    deadline: Option<Deadline>,
    work: impl Future<Output = Result<T, HttpError>>,
) -> Result<T, HttpError> {
    match deadline {
        Some(deadline) => tokio::time::timeout_at(deadline.at, work)
            .await
            .map_err(|_| HttpError::Timeout(deadline.limit))?,
        None => work.await,
    }
}

/// A received response whose body has not been read yet.
///
/// Body reads share the request's deadline.
#[derive(Debug)]
pub struct HttpResponse {
    pub(crate) inner: Response<ResponseBody>,
    pub(crate) max_body_size: usize,
    pub(crate) deadline: Option<Deadline>,
}

impl HttpResponse {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.inner.status()
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    /// Whole body, whatever the status.
    ///
    /// # Errors
    /// `BodyTooLarge` past the size limit, `Transport` if the stream breaks,
    /// `Timeout` once the request deadline passes.
    pub async fn bytes(self) -> Result<Bytes, HttpError> {
        within(self.deadline, collect(self.inner.into_body(), self.max_body_size)).await
    }

    /// Body of a 2xx reply decoded as JSON.
    ///
    /// # Errors
    /// `Status` (carrying the error body) for non-2xx replies, `Json` when
    /// decoding fails, plus the errors of [`bytes`](Self::bytes).
    pub async fn json<T: DeserializeOwned>(self) -> Result<T, HttpError> {
        let status = self.status();
        if !status.is_success() {
            return Err(status_error(status, self).await);
        }
        let body = self.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

async fn status_error(status: StatusCode, response: HttpResponse) -> HttpError {
    let limit = response.max_body_size.min(ERROR_BODY_LIMIT);
    match within(response.deadline, collect(response.inner.into_body(), limit)).await {
        Ok(bytes) => HttpError::Status {
            status,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        },
        Err(HttpError::BodyTooLarge { .. }) => HttpError::Status {
            status,
            body: String::new(),
        },
        Err(other) => other,
    }
}

async fn collect(body: ResponseBody, limit: usize) -> Result<Bytes, HttpError> {
    let collecting: Pin<Box<dyn Future<Output = Result<Collected<Bytes>, BoxError>> + Send>> =
        Box::pin(Limited::new(body, limit).collect());
    match collecting.await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(err) if err.is::<LengthLimitError>() => Err(HttpError::BodyTooLarge { limit }),
        Err(err) => Err(HttpError::Transport(err)),
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::pin::Pin;
    use std::task::{Context, Poll};

    use http_body_util::Full;
    use hyper::body::{Body, Frame};

    use super::*;

    fn reply(status: u16, body: &'static str, max_body_size: usize) -> HttpResponse {
        let body: ResponseBody = Full::new(Bytes::from_static(body.as_bytes()))
            .map_err(|never| match never {})
            .boxed();
        HttpResponse {
            inner: Response::builder().status(status).body(body).unwrap(),
            max_body_size,
            deadline: None,
        }
    }

    /// Body that never yields a frame.
    struct Stalled;

    impl Body for Stalled {
        type Data = Bytes;
        type Error = Box<dyn std::error::Error + Send + Sync>;

        fn poll_frame(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
        ) -> Poll<Option<Result<Frame<Bytes>, Self::Error>>> {
            Poll::Pending
        }
    }

    fn stalled(status: u16, limit: Duration) -> HttpResponse {
        HttpResponse {
            inner: Response::builder()
                .status(status)
                .body(Stalled.boxed())
                .unwrap(),
            max_body_size: 1024,
            deadline: Deadline::after(limit),
        }
    }

    #[tokio::test]
    async fn test_stalled_body_hits_deadline() {
        let limit = Duration::from_millis(50);
        let err = stalled(200, limit).bytes().await.unwrap_err();
        assert!(matches!(err, HttpError::Timeout(d) if d == limit), "got {err:?}");

        let err = stalled(500, limit).json::<Reply>().await.unwrap_err();
        assert!(matches!(err, HttpError::Timeout(_)), "got {err:?}");
    }

    #[test]
    fn test_unrepresentable_deadline() {
        assert!(Deadline::after(Duration::MAX).is_none());
    }

    #[derive(Debug, serde::Deserialize)]
    struct Reply {
        message: String,
    }

    #[tokio::test]
    async fn test_json_success() {
        let reply: Reply = reply(200, r#"{"message":"SUCCESS"}"#, 1024)
            .json()
            .await
            .unwrap();
        assert_eq!(reply.message, "SUCCESS");
    }

    #[tokio::test]
    async fn test_json_error_status_keeps_body() {
        let err = reply(500, r#"{"message":"boom"}"#, 1024)
            .json::<Reply>()
            .await
            .unwrap_err();
        assert!(matches!(err, HttpError::Status { status, .. } if status.as_u16() == 500));
        assert_eq!(err.status_body(), Some(r#"{"message":"boom"}"#));
    }

    #[tokio::test]
    async fn test_oversized_error_body_is_dropped() {
        let err = reply(502, "0123456789", 4).json::<Reply>().await.unwrap_err();
        assert_eq!(err.status_body(), Some(""));
    }

    #[tokio::test]
    async fn test_body_limit() {
        let err = reply(200, "0123456789", 5).bytes().await.unwrap_err();
        assert!(matches!(err, HttpError::BodyTooLarge { limit: 5 }));
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let err = reply(200, "<html>", 1024).json::<Reply>().await.unwrap_err();
        assert!(matches!(err, HttpError::Json(_)));
    }
}
