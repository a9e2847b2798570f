//! Loading the artifact from disk.

use std::io;
use std::path::Path;

use serde_json::Value;

/// Whether the loaded record reports a failed scrape. Follows JSON
/// truthiness: `null`, `false`, `0`, `""` and empty containers are false.
pub fn is_failure(data: &Value) -> bool {
    match data.get("error") {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}

/// Why the artifact could not be served.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("File not found")]
    NotFound,

    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Error reading file: {0}")]
    Read(io::Error),
}

/// Read and parse the artifact. Called on every request so a fresh scrape
/// is picked up without a restart.
///
/// Any valid JSON is accepted and returned untouched; the server never
/// re-encodes what the scraper wrote.
pub fn load_scraped_data(path: &Path) -> Result<Value, LoadError> {
    let raw = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound,
        _ => LoadError::Read(e),
    })?;
    Ok(serde_json::from_str(&raw)?)
}
