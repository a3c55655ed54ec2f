//! Static file server that adds `Access-Control-Allow-Origin: *` to every
//! response.
//!
//! The binary serves `./public/` on port 9090; the library exposes the pieces
//! so the server can be driven from tests on any address and root.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

pub use error::{ServeError, StartupError};
