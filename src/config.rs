//! Configuration management for the file proxy
//!
//! Values are layered: built-in defaults, then an optional `config.toml`,
//! then `FILEPROXY_*` environment variables. Everything here is read once
//! at startup; the server never mutates its configuration afterwards.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Default configuration file, resolved relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config";

/// Prefix for environment overrides (`FILEPROXY_PORT`, `FILEPROXY_SERVER_ROOT`, ...)
const ENV_PREFIX: &str = "FILEPROXY";

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 7799;
pub const DEFAULT_SERVER_ROOT: &str = "./data";
pub const DEFAULT_MAX_BODY_SIZE_MB: u64 = 16;

/// Complete server configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
    /// IP address to bind the HTTP listener
    pub bind_address: String,

    /// TCP port for the HTTP listener; 0 picks an ephemeral port
    pub port: u16,

    /// Directory every operation is confined to
    pub server_root: String,

    /// Largest accepted request body
    pub max_body_size_mb: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            port: DEFAULT_PORT,
            server_root: DEFAULT_SERVER_ROOT.to_string(),
            max_body_size_mb: DEFAULT_MAX_BODY_SIZE_MB,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the given file stem, which may be absent,
    /// with environment overrides. `DEFAULT_CONFIG_PATH` picks up `config.toml`.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("server_root", DEFAULT_SERVER_ROOT)?
            .set_default("max_body_size_mb", DEFAULT_MAX_BODY_SIZE_MB as i64)?
            .add_source(File::with_name(config_path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;

        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Configuration rooted at `server_root`, listening on an ephemeral loopback port
    pub fn with_root(server_root: impl Into<PathBuf>) -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 0,
            server_root: server_root.into().to_string_lossy().to_string(),
            ..Self::default()
        }
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.bind_address.trim().is_empty() {
            return Err(config::ConfigError::Message(
                "bind_address cannot be empty".into(),
            ));
        }

        if self.server_root.is_empty() {
            return Err(config::ConfigError::Message(
                "server_root cannot be empty".into(),
            ));
        }

        if self.max_body_size_mb == 0 {
            return Err(config::ConfigError::Message(
                "max_body_size_mb must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Bind address and port as a socket address string
    pub fn listen_socket(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Server root as PathBuf
    pub fn server_root_path(&self) -> PathBuf {
        PathBuf::from(&self.server_root)
    }

    /// Maximum body size in bytes
    pub fn max_body_size_bytes(&self) -> usize {
        (self.max_body_size_mb as usize).saturating_mul(1024 * 1024)
    }
}
