//! File system storage management
//!
//! Handles path containment and the filesystem operations behind each route.

pub mod operations;
pub mod results;
pub mod validation;

pub use results::{DirEntry, EntryKind, LoadedContent};
pub use validation::{is_root, resolve_path};
