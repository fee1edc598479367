//! Module `commands`
//!
//! Defines the parsed form of a gateway request and the per-operation
//! policy for turning storage failures into client-facing errors.

use crate::error::{GatewayError, StorageError};

/// A fully parsed and validated request, ready for dispatch.
///
/// Path arguments are still the client's relative strings; they are resolved
/// against the root only when the command executes.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Load { filename: String },
    /// `content` is already normalized (pretty-printed JSON or verbatim body)
    Save { filename: String, content: Vec<u8> },
    /// `None` lists the root
    List { dirname: Option<String> },
    Delete { filename: String },
    Mkdir { dirname: String },
    Rmdir { dirname: String },
}

/// The six operation kinds, without their arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Save,
    List,
    Delete,
    Mkdir,
    Rmdir,
}

impl Command {
    pub fn operation(&self) -> Operation {
        match self {
            Command::Load { .. } => Operation::Load,
            Command::Save { .. } => Operation::Save,
            Command::List { .. } => Operation::List,
            Command::Delete { .. } => Operation::Delete,
            Command::Mkdir { .. } => Operation::Mkdir,
            Command::Rmdir { .. } => Operation::Rmdir,
        }
    }

    /// The relative path argument as supplied by the client
    pub fn target(&self) -> &str {
        match self {
            Command::Load { filename }
            | Command::Save { filename, .. }
            | Command::Delete { filename } => filename,
            Command::List { dirname } => dirname.as_deref().unwrap_or("."),
            Command::Mkdir { dirname } | Command::Rmdir { dirname } => dirname,
        }
    }
}

impl Operation {
    /// Route path serving this operation
    pub fn route(self) -> &'static str {
        match self {
            Operation::Load => "/load",
            Operation::Save => "/save",
            Operation::List => "/list",
            Operation::Delete => "/delete",
            Operation::Mkdir => "/mkdir",
            Operation::Rmdir => "/rmdir",
        }
    }

    /// Generic message reported when the filesystem fails
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Load => "Read failed",
            Operation::Save => "Write failed",
            Operation::List => "List failed",
            Operation::Delete => "Delete failed",
            Operation::Mkdir => "Mkdir failed",
            Operation::Rmdir => "Rmdir failed",
        }
    }

    /// Converts a storage failure into the error the client sees.
    ///
    /// Read and list report every failure as not-found; mutating operations
    /// report a generic 500 and never disclose the underlying OS error.
    pub fn map_storage_error(self, target: &str, err: StorageError) -> GatewayError {
        match (self, err) {
            (_, StorageError::PathTraversal(candidate)) => GatewayError::PathTraversal(candidate),
            (_, StorageError::RootRemoval) => {
                GatewayError::Validation(StorageError::RootRemoval.to_string())
            }
            (Operation::Load, _) => GatewayError::NotFound(format!("File not found: {}", target)),
            (Operation::List, _) => GatewayError::NotFound("Directory not found".into()),
            (op, _) => GatewayError::Io(op.failure_message().into()),
        }
    }
}
