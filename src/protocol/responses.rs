//! Response formatting
//!
//! Success envelopes for each operation.

use axum::Json;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::storage::{DirEntry, LoadedContent};

/// Successful result of a dispatched command
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Loaded(LoadedContent),
    Saved(String),
    Listed { dirname: String, list: Vec<DirEntry> },
    Deleted(String),
    Created(String),
    Removed(String),
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        match self {
            Outcome::Loaded(LoadedContent::Json(value)) => Json(value).into_response(),
            Outcome::Loaded(LoadedContent::Text(text)) => {
                ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text).into_response()
            }
            Outcome::Saved(filename) => Json(json!({ "saved": filename })).into_response(),
            Outcome::Listed { dirname, list } => {
                Json(json!({ "dirname": dirname, "list": list })).into_response()
            }
            Outcome::Deleted(filename) => Json(json!({ "deleted": filename })).into_response(),
            Outcome::Created(dirname) => Json(json!({ "created": dirname })).into_response(),
            Outcome::Removed(dirname) => Json(json!({ "removed": dirname })).into_response(),
        }
    }
}
