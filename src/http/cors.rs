//! CORS response layer
//!
//! Wraps any hyper service and stamps `Access-Control-Allow-Origin: *` on every
//! response it produces, whatever the status. There is no preflight handling
//! and no origin echoing, so credentialed requests are not supported.

use hyper::header::{HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN};
use hyper::service::Service;
use hyper::{Request, Response};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Service wrapper adding the wildcard CORS header
#[derive(Debug, Clone)]
pub struct AllowAnyOrigin<S> {
    inner: S,
}

impl<S> AllowAnyOrigin<S> {
    pub const fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for AllowAnyOrigin<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future = AllowAnyOriginFuture<S::Future>;

    fn call(&self, req: Request<ReqBody>) -> Self::Future {
        AllowAnyOriginFuture {
            inner: Box::pin(self.inner.call(req)),
        }
    }
}

/// Response future of [`AllowAnyOrigin`]
pub struct AllowAnyOriginFuture<F> {
    inner: Pin<Box<F>>,
}

impl<F, B, E> Future for AllowAnyOriginFuture<F>
where
    F: Future<Output = Result<Response<B>, E>>,
{
    type Output = Result<Response<B>, E>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.as_mut().poll(cx).map_ok(allow_any_origin)
    }
}

/// Insert the wildcard header, replacing any value already present
pub fn allow_any_origin<B>(mut response: Response<B>) -> Response<B> {
    response
        .headers_mut()
        .insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::response::build_error_response;
    use http_body_util::Full;
    use hyper::body::Bytes;
    use hyper::service::service_fn;
    use hyper::StatusCode;
    use std::convert::Infallible;

    #[tokio::test]
    async fn test_header_added_to_success() {
        let svc = AllowAnyOrigin::new(service_fn(|_req: Request<Full<Bytes>>| async {
            Ok::<_, Infallible>(Response::new(Full::new(Bytes::from_static(b"ok"))))
        }));

        let resp = svc.call(Request::new(Full::new(Bytes::new()))).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn test_header_added_to_error_status() {
        let svc = AllowAnyOrigin::new(service_fn(|_req: Request<Full<Bytes>>| async {
            Ok::<_, Infallible>(build_error_response(StatusCode::FORBIDDEN))
        }));

        let resp = svc.call(Request::new(Full::new(Bytes::new()))).await.unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert_eq!(resp.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[test]
    fn test_existing_origin_is_replaced() {
        let mut resp = Response::new(());
        resp.headers_mut().insert(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("https://example.com"),
        );

        let resp = allow_any_origin(resp);
        let count = resp
            .headers()
            .get_all(ACCESS_CONTROL_ALLOW_ORIGIN)
            .iter()
            .count();
        assert_eq!(count, 1);
        assert_eq!(resp.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
}
