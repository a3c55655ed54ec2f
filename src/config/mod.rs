// Configuration module entry point
// Holds the immutable startup configuration and the state shared with handlers

mod state;
mod types;

use crate::error::StartupError;
use std::net::SocketAddr;

pub use state::AppState;
pub use types::{Config, FilesConfig, HttpConfig, LoggingConfig, ServerConfig};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 9090;
pub const DEFAULT_ROOT: &str = "./public/";
pub const DEFAULT_INDEX_FILES: [&str; 2] = ["index.html", "index.htm"];
pub const DEFAULT_SERVER_NAME: &str = "static-cors-server";

/// Optional config file (without extension), looked up in the working directory
pub const CONFIG_FILE: &str = "static-cors-server";

impl Config {
    /// Load configuration from the default file name
    pub fn load() -> Result<Self, StartupError> {
        Self::load_from(CONFIG_FILE)
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// A missing file is not an error: the built-in defaults serve `./public/`
    /// on port 9090.
    pub fn load_from(config_path: &str) -> Result<Self, StartupError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("server.port", DEFAULT_PORT)?
            .set_default("files.root", DEFAULT_ROOT)?
            .set_default("files.index_files", DEFAULT_INDEX_FILES.to_vec())?
            .set_default("http.server_name", DEFAULT_SERVER_NAME)?
            .set_default("logging.access_log", true)?
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, StartupError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|_| StartupError::InvalidAddress(addr))
    }
}
