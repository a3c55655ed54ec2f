// Application state module
// Read-only view of the configuration shared by every connection

use std::path::{Path, PathBuf};

use super::types::Config;

/// Application state
pub struct AppState {
    pub config: Config,
    root: PathBuf,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let root = PathBuf::from(&config.files.root);
        Self { config, root }
    }

    /// Directory that request paths are resolved against
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn index_files(&self) -> &[String] {
        &self.config.files.index_files
    }

    pub fn access_log(&self) -> bool {
        self.config.logging.access_log
    }
}
