//! Error types
//!
//! Startup errors are fatal and end the process; serve errors are mapped to an
//! HTTP status for the single request that raised them.

use hyper::StatusCode;
use std::io;
use std::net::SocketAddr;
use thiserror::Error;

/// Errors that stop the server before it starts accepting connections
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid listen address '{0}'")]
    InvalidAddress(String),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("Failed to build runtime: {0}")]
    Runtime(#[source] io::Error),

    #[error("Failed to open log file: {0}")]
    LogInit(#[source] io::Error),
}

/// Per-request failures, each mapped to an HTTP status
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("malformed request path: {0}")]
    BadRequest(&'static str),

    #[error("access outside the served directory")]
    Forbidden,

    #[error("not found")]
    NotFound,

    #[error("I/O error: {0}")]
    Io(#[source] io::Error),
}

impl ServeError {
    /// Classify a filesystem error by its kind
    pub fn from_io(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::NotADirectory => Self::NotFound,
            io::ErrorKind::PermissionDenied => Self::Forbidden,
            _ => Self::Io(err),
        }
    }

    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
