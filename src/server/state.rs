//! Shared server state
//!
//! Built once from the configuration and cloned into every request.

use log::info;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::ServerConfig;
use crate::error::StartupError;

#[derive(Debug, Clone)]
pub struct AppState {
    root: Arc<PathBuf>,
    max_body_bytes: usize,
}

impl AppState {
    /// Creates the server root if needed and pins it to its canonical path
    pub fn from_config(config: &ServerConfig) -> Result<Self, StartupError> {
        let root = config.server_root_path();
        std::fs::create_dir_all(&root)
            .map_err(|e| StartupError::ServerRoot(config.server_root.clone(), e))?;
        let root = root
            .canonicalize()
            .map_err(|e| StartupError::ServerRoot(config.server_root.clone(), e))?;

        info!("Server root directory: {}", root.display());
        Ok(Self::new(root, config.max_body_size_bytes()))
    }

    /// `root` must already be absolute and normalized
    pub fn new(root: PathBuf, max_body_bytes: usize) -> Self {
        Self {
            root: Arc::new(root),
            max_body_bytes,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn root_handle(&self) -> Arc<PathBuf> {
        Arc::clone(&self.root)
    }

    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
    }
}
