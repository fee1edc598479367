//! Path validation
//!
//! Resolves client-supplied paths against the server root and rejects any
//! that would escape it. Resolution is purely lexical: no filesystem access
//! happens here, so a rejected path never reaches the disk.

use std::path::{Component, Path, PathBuf};

use crate::error::StorageError;

/// Joins `candidate` onto `root`, collapses `.` and `..`, and checks containment.
///
/// A leading `/` on the candidate does not replace the root: `"/etc"` resolves
/// to `<root>/etc`. The result must be `root` itself or lie beneath it,
/// compared component-wise so `/data2` never counts as inside `/data`.
///
/// A trailing `/` on the candidate is kept, so `"f.txt/"` still names a
/// directory and file operations on it fail instead of touching `f.txt`.
pub fn resolve_path(root: &Path, candidate: &str) -> Result<PathBuf, StorageError> {
    let mut joined = root.to_path_buf();
    for component in Path::new(candidate).components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {}
            other => joined.push(other.as_os_str()),
        }
    }

    let resolved = normalize(&joined);
    if !resolved.starts_with(root) {
        return Err(StorageError::PathTraversal(candidate.to_string()));
    }

    if candidate.ends_with('/') && !is_root(root, &resolved) {
        let mut with_separator = resolved.into_os_string();
        with_separator.push("/");
        return Ok(PathBuf::from(with_separator));
    }
    Ok(resolved)
}

/// Lexically normalizes a path. `..` at the filesystem root stays at the root.
fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }
    parts.iter().map(|c| c.as_os_str()).collect()
}

/// Whether `resolved` is the root directory itself
pub fn is_root(root: &Path, resolved: &Path) -> bool {
    resolved == root
}
