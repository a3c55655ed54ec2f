//! Request dispatch module
//!
//! Entry point for HTTP request processing: method validation, dispatch to the
//! static file handler, error-to-status conversion and access logging.

use crate::config::AppState;
use crate::error::ServeError;
use crate::handler::static_files;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{
    HeaderName, HeaderValue, IF_MODIFIED_SINCE, IF_NONE_MATCH, REFERER, SERVER, USER_AGENT,
};
use hyper::http::request::Parts;
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    /// Raw URL path, still percent-encoded
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub if_modified_since: Option<&'a str>,
    pub has_if_none_match: bool,
}

impl<'a> RequestContext<'a> {
    fn from_parts(parts: &'a Parts) -> Self {
        Self {
            path: parts.uri.path(),
            query: parts.uri.query(),
            is_head: parts.method == Method::HEAD,
            if_modified_since: parts
                .headers
                .get(IF_MODIFIED_SINCE)
                .and_then(|v| v.to_str().ok()),
            has_if_none_match: parts.headers.contains_key(IF_NONE_MATCH),
        }
    }
}

/// Main entry point for HTTP request handling
///
/// Never fails: every error becomes a status response.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    // Bodies are never read; GET and HEAD carry none worth keeping
    let (parts, _body) = req.into_parts();

    let mut response = dispatch(&parts, &state).await;
    if let Ok(value) = HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert(SERVER, value);
    }

    if state.access_log() {
        log_access(&parts, &response, peer_addr, started, &state);
    }
    Ok(response)
}

async fn dispatch(parts: &Parts, state: &AppState) -> Response<Full<Bytes>> {
    if let Some(resp) = check_http_method(&parts.method) {
        return resp;
    }

    let ctx = RequestContext::from_parts(parts);
    match static_files::serve(&ctx, state).await {
        Ok(resp) => resp,
        Err(err) => error_response(&err),
    }
}

/// Only GET and HEAD are served; everything else, OPTIONS included, is 501
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        _ => {
            logger::log_warning(&format!("Unsupported method: {method}"));
            Some(http::build_501_response(method.as_str()))
        }
    }
}

fn error_response(err: &ServeError) -> Response<Full<Bytes>> {
    if let ServeError::BadRequest(reason) = err {
        logger::log_warning(&format!("Bad request path: {reason}"));
    }
    http::build_error_response(err.status())
}

fn log_access(
    parts: &Parts,
    response: &Response<Full<Bytes>>,
    peer_addr: SocketAddr,
    started: Instant,
    state: &AppState,
) {
    let header = |name: HeaderName| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let entry = AccessLogEntry {
        remote_addr: peer_addr,
        time: chrono::Local::now(),
        method: parts.method.to_string(),
        uri: parts
            .uri
            .path_and_query()
            .map_or_else(|| parts.uri.path().to_string(), ToString::to_string),
        http_version: version_str(parts.version),
        status: response.status().as_u16(),
        body_bytes: response.body().size_hint().exact().unwrap_or(0),
        referer: header(REFERER),
        user_agent: header(USER_AGENT),
        request_time_us: u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX),
    };
    logger::log_access(&entry, &state.config.logging.access_log_format);
}

fn version_str(version: Version) -> &'static str {
    if version == Version::HTTP_10 {
        "1.0"
    } else if version == Version::HTTP_2 {
        "2"
    } else {
        "1.1"
    }
}
