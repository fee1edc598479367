//! Command dispatch for the file proxy.
//!
//! Each command is resolved against the root and executed as its own tokio
//! task. The task is detached from the request: if the client disconnects
//! while the operation is running, the operation still completes, so an
//! accepted write never stops half-way.

use log::{error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::error::{GatewayError, StorageError};
use crate::protocol::commands::Command;
use crate::protocol::responses::Outcome;
use crate::storage::{is_root, operations, resolve_path};

/// Dispatches a parsed command and waits for its outcome.
pub async fn handle_command(root: Arc<PathBuf>, command: Command) -> Result<Outcome, GatewayError> {
    let operation = command.operation();
    match spawn_command(root, command).await {
        Ok(result) => result,
        Err(e) => {
            error!("{} task failed: {}", operation.route(), e);
            Err(GatewayError::Io(operation.failure_message().into()))
        }
    }
}

/// Starts a command on its own task; dropping the handle does not cancel it.
pub fn spawn_command(
    root: Arc<PathBuf>,
    command: Command,
) -> JoinHandle<Result<Outcome, GatewayError>> {
    tokio::spawn(async move { execute(&root, command).await })
}

async fn execute(root: &Path, command: Command) -> Result<Outcome, GatewayError> {
    let operation = command.operation();
    let target = command.target().to_string();

    let result = match command {
        Command::Load { filename } => handle_load(root, filename).await,
        Command::Save { filename, content } => handle_save(root, filename, content).await,
        Command::List { dirname } => handle_list(root, dirname).await,
        Command::Delete { filename } => handle_delete(root, filename).await,
        Command::Mkdir { dirname } => handle_mkdir(root, dirname).await,
        Command::Rmdir { dirname } => handle_rmdir(root, dirname).await,
    };

    result.map_err(|e| {
        if let StorageError::PathTraversal(_) | StorageError::RootRemoval = e {
            warn!("Rejected {} for {:?}: {}", operation.route(), target, e);
        }
        operation.map_storage_error(&target, e)
    })
}

async fn handle_load(root: &Path, filename: String) -> Result<Outcome, StorageError> {
    let path = resolve_path(root, &filename)?;
    let content = operations::read_file(&path).await?;
    Ok(Outcome::Loaded(content))
}

async fn handle_save(root: &Path, filename: String, content: Vec<u8>) -> Result<Outcome, StorageError> {
    let path = resolve_path(root, &filename)?;
    operations::write_file(&path, &content).await?;
    info!("Saved {}", filename);
    Ok(Outcome::Saved(filename))
}

async fn handle_list(root: &Path, dirname: Option<String>) -> Result<Outcome, StorageError> {
    let dirname = dirname.unwrap_or_else(|| ".".to_string());
    let path = resolve_path(root, &dirname)?;
    let list = operations::list_directory(&path).await?;
    Ok(Outcome::Listed { dirname, list })
}

async fn handle_delete(root: &Path, filename: String) -> Result<Outcome, StorageError> {
    let path = resolve_removable(root, &filename)?;
    if operations::remove_path(&path).await? {
        info!("Deleted {}", filename);
    }
    Ok(Outcome::Deleted(filename))
}

async fn handle_mkdir(root: &Path, dirname: String) -> Result<Outcome, StorageError> {
    let path = resolve_path(root, &dirname)?;
    operations::create_directory(&path).await?;
    Ok(Outcome::Created(dirname))
}

async fn handle_rmdir(root: &Path, dirname: String) -> Result<Outcome, StorageError> {
    let path = resolve_removable(root, &dirname)?;
    if operations::remove_path(&path).await? {
        info!("Removed directory {}", dirname);
    }
    Ok(Outcome::Removed(dirname))
}

/// Like `resolve_path`, but the root itself is never a valid removal target
fn resolve_removable(root: &Path, candidate: &str) -> Result<PathBuf, StorageError> {
    let path = resolve_path(root, candidate)?;
    if is_root(root, &path) {
        return Err(StorageError::RootRemoval);
    }
    Ok(path)
}
