//! Request parsing
//!
//! Turns raw request bodies and query strings into validated `Command`s.

use serde_json::Value;

use crate::error::GatewayError;
use crate::protocol::commands::Command;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Query string accepted by `/save`
#[derive(Debug, Default)]
pub struct SaveQuery {
    pub filename: Option<String>,
}

impl SaveQuery {
    /// Picks the first `filename` when the key repeats; other keys are ignored
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let filename = pairs
            .into_iter()
            .find_map(|(key, value)| (key == "filename").then_some(value));
        Self { filename }
    }
}

pub fn parse_load(body: &[u8]) -> Result<Command, GatewayError> {
    let fields = parse_body(body)?;
    Ok(Command::Load {
        filename: required_string(&fields, "filename")?,
    })
}

pub fn parse_list(body: &[u8]) -> Result<Command, GatewayError> {
    let fields = parse_body(body)?;
    let dirname = match fields.get("dirname") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => return Err(GatewayError::Validation("dirname must be a string".into())),
    };
    Ok(Command::List { dirname })
}

pub fn parse_delete(body: &[u8]) -> Result<Command, GatewayError> {
    let fields = parse_body(body)?;
    Ok(Command::Delete {
        filename: required_string(&fields, "filename")?,
    })
}

pub fn parse_mkdir(body: &[u8]) -> Result<Command, GatewayError> {
    let fields = parse_body(body)?;
    Ok(Command::Mkdir {
        dirname: required_string(&fields, "dirname")?,
    })
}

pub fn parse_rmdir(body: &[u8]) -> Result<Command, GatewayError> {
    let fields = parse_body(body)?;
    Ok(Command::Rmdir {
        dirname: required_string(&fields, "dirname")?,
    })
}

/// Builds a save command, pretty-printing the body when the content type is JSON
pub fn parse_save(
    query: SaveQuery,
    content_type: Option<&str>,
    body: &[u8],
) -> Result<Command, GatewayError> {
    let filename = match query.filename {
        Some(filename) if !filename.is_empty() => filename,
        _ => return Err(GatewayError::Validation("Missing filename".into())),
    };

    Ok(Command::Save {
        filename,
        content: normalize_content(content_type, body)?,
    })
}

/// JSON bodies are re-serialized with 2-space indentation; anything else is kept verbatim
pub fn normalize_content(content_type: Option<&str>, body: &[u8]) -> Result<Vec<u8>, GatewayError> {
    let is_json = content_type.is_some_and(|ct| ct.contains(JSON_CONTENT_TYPE));
    if !is_json {
        return Ok(body.to_vec());
    }

    let parsed: Value = serde_json::from_slice(body)
        .map_err(|_| GatewayError::Validation("Invalid JSON".into()))?;
    serde_json::to_vec_pretty(&parsed).map_err(|_| GatewayError::Validation("Invalid JSON".into()))
}

fn parse_body(body: &[u8]) -> Result<Value, GatewayError> {
    serde_json::from_slice(body).map_err(|_| GatewayError::Validation("Invalid JSON body".into()))
}

/// Non-empty string field; a non-object body simply has no fields
fn required_string(fields: &Value, name: &str) -> Result<String, GatewayError> {
    match fields.get(name) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        _ => Err(GatewayError::Validation(format!("Missing {}", name))),
    }
}
