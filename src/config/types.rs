// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    pub server: ServerConfig,
    pub files: FilesConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
}

/// Listen address
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: super::DEFAULT_HOST.to_string(),
            port: super::DEFAULT_PORT,
        }
    }
}

/// Served directory
#[derive(Debug, Deserialize, Clone)]
pub struct FilesConfig {
    /// Root directory every request path is resolved against
    pub root: String,
    /// Files tried, in order, when a directory is requested
    pub index_files: Vec<String>,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            root: super::DEFAULT_ROOT.to_string(),
            index_files: super::DEFAULT_INDEX_FILES
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            server_name: super::DEFAULT_SERVER_NAME.to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Access log format (combined, common or json)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stderr if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            access_log: true,
            access_log_format: default_access_log_format(),
            access_log_file: None,
            error_log_file: None,
        }
    }
}
