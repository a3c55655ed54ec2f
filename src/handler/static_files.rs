//! Static file serving module
//!
//! Resolves the request path under the root, then serves a file, an index
//! file, a directory listing or a trailing-slash redirect.

use crate::config::AppState;
use crate::error::ServeError;
use crate::handler::listing;
use crate::handler::path;
use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::fs::Metadata;
use std::path::Path;
use tokio::fs;

/// Serve the request path from the configured root
pub async fn serve(
    ctx: &RequestContext<'_>,
    state: &AppState,
) -> Result<Response<Full<Bytes>>, ServeError> {
    let resolved = path::resolve(state.root(), ctx.path)?;
    let target = path::ensure_within_root(state.root(), &resolved.fs_path)?;
    let meta = fs::metadata(&target).await.map_err(ServeError::from_io)?;

    if meta.is_dir() {
        if !resolved.trailing_slash {
            return Ok(http::build_redirect_response(&directory_location(
                ctx.path, ctx.query,
            )));
        }
        return serve_directory(ctx, state, &target, &resolved.url_path).await;
    }

    // A file cannot be addressed as a directory
    if resolved.trailing_slash {
        return Err(ServeError::NotFound);
    }
    serve_file(ctx, &target, &resolved.fs_path, &meta).await
}

/// Serve the first index file present in `dir`, else a listing
async fn serve_directory(
    ctx: &RequestContext<'_>,
    state: &AppState,
    dir: &Path,
    url_path: &str,
) -> Result<Response<Full<Bytes>>, ServeError> {
    for index_file in state.index_files() {
        let candidate = dir.join(index_file);
        let Ok(meta) = fs::metadata(&candidate).await else {
            continue;
        };
        if meta.is_file() {
            let target = path::ensure_within_root(state.root(), &candidate)?;
            return serve_file(ctx, &target, &candidate, &meta).await;
        }
    }

    let entries = listing::read_entries(dir).await?;
    let html = listing::render(url_path, &entries);
    Ok(http::build_html_response(html, ctx.is_head))
}

/// Serve a regular file
///
/// `name` is the path as requested; its extension picks the Content-Type even
/// when `target` is a symlink resolved elsewhere under the root.
async fn serve_file(
    ctx: &RequestContext<'_>,
    target: &Path,
    name: &Path,
    meta: &Metadata,
) -> Result<Response<Full<Bytes>>, ServeError> {
    let last_modified = meta.modified().ok();

    if let Some(modified) = last_modified {
        if cache::is_not_modified(
            ctx.if_modified_since,
            ctx.has_if_none_match,
            modified,
        ) {
            return Ok(http::build_304_response(&cache::format_http_date(modified)));
        }
    }

    let content = fs::read(target).await.map_err(|e| {
        let err = ServeError::from_io(e);
        if matches!(err, ServeError::Io(_)) {
            crate::logger::log_error(&format!(
                "Failed to read file '{}': {err}",
                target.display()
            ));
        }
        err
    })?;

    let last_modified = last_modified.map(cache::format_http_date);
    Ok(http::build_file_response(
        Bytes::from(content),
        mime::content_type_for(name),
        last_modified.as_deref(),
        ctx.is_head,
    ))
}

/// Redirect target for a directory requested without its trailing slash
///
/// Leading slashes collapse to one so `//host` never becomes a
/// protocol-relative `Location`.
fn directory_location(path: &str, query: Option<&str>) -> String {
    let path = path.trim_start_matches('/');
    match query {
        Some(q) => format!("/{path}/?{q}"),
        None => format!("/{path}/"),
    }
}
