//! HTTP cache validation module
//!
//! `Last-Modified` generation and `If-Modified-Since` handling. No other
//! caching headers are emitted.

use chrono::{DateTime, Utc};
use std::time::SystemTime;

/// IMF-fixdate, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Format a file modification time as an HTTP date
pub fn format_http_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time)
        .format(HTTP_DATE_FORMAT)
        .to_string()
}

/// Parse an HTTP date header value
///
/// Only IMF-fixdate and other RFC 2822 shapes are accepted; anything else is
/// treated as if the header were absent.
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Check whether a conditional GET can be answered with 304
///
/// `If-None-Match` takes precedence over `If-Modified-Since`; since no `ETag`
/// is produced, its presence disables the date check.
pub fn is_not_modified(
    if_modified_since: Option<&str>,
    has_if_none_match: bool,
    modified: SystemTime,
) -> bool {
    if has_if_none_match {
        return false;
    }
    let Some(since) = if_modified_since.and_then(parse_http_date) else {
        return false;
    };
    // HTTP dates have one-second resolution
    DateTime::<Utc>::from(modified).timestamp() <= since.timestamp()
}
