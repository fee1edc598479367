//! Error types
//!
//! Defines the error types for each layer of the file proxy: storage
//! primitives, the HTTP-facing gateway, and server startup.

use std::fmt;
use std::io;

/// Storage module errors
#[derive(Debug)]
pub enum StorageError {
    /// Candidate path normalizes outside the root
    PathTraversal(String),
    /// Attempt to delete the root directory itself
    RootRemoval,
    NotFound(String),
    IoError(io::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::PathTraversal(p) => write!(f, "Path traversal attempt: {}", p),
            StorageError::RootRemoval => write!(f, "Refusing to remove the root directory"),
            StorageError::NotFound(p) => write!(f, "Not found: {}", p),
            StorageError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<io::Error> for StorageError {
    fn from(error: io::Error) -> Self {
        StorageError::IoError(error)
    }
}

/// Errors returned to HTTP clients
///
/// Every variant carries the exact message placed in the `{"error": ...}`
/// body, so nothing beyond it leaks to the client.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// Malformed or missing request field, invalid JSON body
    Validation(String),
    /// Candidate path escapes the root
    PathTraversal(String),
    /// Target absent on read/list, or no such route
    NotFound(String),
    /// Filesystem failure on a mutating operation
    Io(String),
    /// Request body exceeds the configured limit
    PayloadTooLarge,
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Validation(msg) => write!(f, "{}", msg),
            GatewayError::PathTraversal(p) => write!(f, "Invalid path: {}", p),
            GatewayError::NotFound(msg) => write!(f, "{}", msg),
            GatewayError::Io(msg) => write!(f, "{}", msg),
            GatewayError::PayloadTooLarge => write!(f, "Request body too large"),
        }
    }
}

impl std::error::Error for GatewayError {}

/// Errors that prevent the server from starting
#[derive(Debug)]
pub enum StartupError {
    Config(config::ConfigError),
    ServerRoot(String, io::Error),
    Bind(String, io::Error),
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupError::Config(e) => write!(f, "Configuration error: {}", e),
            StartupError::ServerRoot(root, e) => {
                write!(f, "Server root {} is unusable: {}", root, e)
            }
            StartupError::Bind(addr, e) => write!(f, "Failed to bind to {}: {}", addr, e),
        }
    }
}

impl std::error::Error for StartupError {}

impl From<config::ConfigError> for StartupError {
    fn from(error: config::ConfigError) -> Self {
        StartupError::Config(error)
    }
}
