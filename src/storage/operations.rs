//! Storage operations
//!
//! Async filesystem primitives behind the six gateway operations. Every
//! function takes an already-resolved absolute path; containment is checked
//! by `storage::validation` before any of these run.

use log::{error, info};
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;
use tokio::fs;

use crate::error::StorageError;
use crate::storage::results::{DirEntry, EntryKind, LoadedContent};

const REMOVE_RETRIES: u64 = 3;

/// Reads a whole file, returning parsed JSON when possible and raw text otherwise
pub async fn read_file(path: &Path) -> Result<LoadedContent, StorageError> {
    let bytes = fs::read(path).await.map_err(|e| {
        error!("Failed to read {}: {}", path.display(), e);
        not_found_or_io(path, e)
    })?;

    Ok(LoadedContent::from_bytes(&bytes))
}

/// Writes `content` to `path`, creating missing parent directories first
pub async fn write_file(path: &Path, content: &[u8]) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await.map_err(|e| {
            error!("Failed to create parent of {}: {}", path.display(), e);
            StorageError::from(e)
        })?;
    }

    fs::write(path, content).await.map_err(|e| {
        error!("Failed to write {}: {}", path.display(), e);
        StorageError::from(e)
    })?;

    info!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

/// Lists the immediate children of a directory, sorted by name
///
/// Symlinks are not followed, so a link to a directory is reported as a file.
pub async fn list_directory(path: &Path) -> Result<Vec<DirEntry>, StorageError> {
    let mut reader = fs::read_dir(path).await.map_err(|e| {
        error!("Failed to list directory {}: {}", path.display(), e);
        not_found_or_io(path, e)
    })?;

    let mut entries = Vec::new();
    while let Some(entry) = reader.next_entry().await? {
        let kind = match entry.file_type().await {
            Ok(file_type) if file_type.is_dir() => EntryKind::Dir,
            _ => EntryKind::File,
        };
        entries.push(DirEntry {
            name: entry.file_name().to_string_lossy().to_string(),
            kind,
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    info!("Listed directory {} - {} entries", path.display(), entries.len());
    Ok(entries)
}

/// Creates a directory and any missing ancestors; succeeds if it already exists
pub async fn create_directory(path: &Path) -> Result<(), StorageError> {
    fs::create_dir_all(path).await.map_err(|e| {
        error!("Failed to create directory {}: {}", path.display(), e);
        StorageError::from(e)
    })?;

    info!("Created directory {}", path.display());
    Ok(())
}

/// Removes a file or a whole directory tree
///
/// An absent target counts as already removed. Returns whether anything was
/// actually deleted.
pub async fn remove_path(path: &Path) -> Result<bool, StorageError> {
    let mut attempt = 1;
    loop {
        let metadata = match fs::symlink_metadata(path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(StorageError::from(e)),
        };

        let result = if metadata.is_dir() {
            fs::remove_dir_all(path).await
        } else {
            fs::remove_file(path).await
        };

        match result {
            Ok(()) => {
                info!("Removed {}", path.display());
                return Ok(true);
            }
            // raced with another removal
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
            Err(e) if attempt < REMOVE_RETRIES && e.kind() == ErrorKind::PermissionDenied => {
                tokio::time::sleep(Duration::from_millis(100 * attempt)).await;
                attempt += 1;
            }
            Err(e) => {
                error!("Failed to remove {}: {}", path.display(), e);
                return Err(StorageError::from(e));
            }
        }
    }
}

fn not_found_or_io(path: &Path, e: std::io::Error) -> StorageError {
    match e.kind() {
        ErrorKind::NotFound => StorageError::NotFound(path.display().to_string()),
        _ => StorageError::IoError(e),
    }
}
