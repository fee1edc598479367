//! Storage result types
//!
//! Defines result structures returned by storage operations.

use serde::Serialize;
use serde_json::Value;

/// Classification of a directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Dir,
    File,
}

/// One immediate child of a listed directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

/// Content of a loaded file: parsed JSON when it parses, raw text otherwise
#[derive(Debug, Clone, PartialEq)]
pub enum LoadedContent {
    Json(Value),
    Text(String),
}

impl LoadedContent {
    /// Decodes file bytes as UTF-8 (lossy) and tries to parse them as JSON
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let text = String::from_utf8_lossy(bytes).into_owned();
        match serde_json::from_str::<Value>(&text) {
            Ok(value) => LoadedContent::Json(value),
            Err(_) => LoadedContent::Text(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_loaded_content_json() {
        let content = LoadedContent::from_bytes(b"{\n  \"hello\": \"world\"\n}");
        assert_eq!(content, LoadedContent::Json(json!({ "hello": "world" })));
    }

    #[test]
    fn test_loaded_content_text() {
        let content = LoadedContent::from_bytes(b"just some notes\n");
        assert_eq!(content, LoadedContent::Text("just some notes\n".into()));

        // truncated JSON stays text
        let content = LoadedContent::from_bytes(b"{\"a\": ");
        assert_eq!(content, LoadedContent::Text("{\"a\": ".into()));
    }

    #[test]
    fn test_dir_entry_serializes_type_tag() {
        let entry = DirEntry {
            name: "sub".into(),
            kind: EntryKind::Dir,
        };
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({ "name": "sub", "type": "dir" })
        );
    }
}
