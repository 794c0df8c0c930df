//! Script file export and import.
//!
//! Export writes one pretty-printed `.json` file per script, named from the
//! sanitized title. Import is the first half of a two-stage pipeline: it
//! gates on the extension, reads, and parses, returning the raw JSON value;
//! recognizing the value as a script document and persisting it is
//! [`ScriptStore::import_payload`](crate::store::ScriptStore::import_payload)'s
//! job.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{Result, ScriptError};
use crate::payload::Payload;
use crate::util::script_filename;

/// Serialize `payload` as pretty-printed JSON into `dir`, named
/// `<sanitized title>.json`. Returns the written path.
pub fn export_script(payload: &Payload, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(script_filename(&payload.title));
    let json = serde_json::to_string_pretty(payload)?;
    fs::write(&path, json)
        .map_err(|e| ScriptError::Store(format!("cannot write {}: {}", path.display(), e)))?;
    Ok(path)
}

/// Read and parse a script file. The extension is checked before any read:
/// a name not ending in `.json` (ASCII case-insensitive) is rejected with
/// [`ScriptError::InvalidFile`]. Read errors surface as
/// [`ScriptError::Read`], parse errors as [`ScriptError::Parse`]. The
/// returned value is not yet validated as a script document.
pub fn import_script(path: &Path) -> Result<Value> {
    let is_json = path
        .file_name()
        .and_then(|n| n.to_str())
        .map_or(false, |n| n.to_ascii_lowercase().ends_with(".json"));
    if !is_json {
        return Err(ScriptError::InvalidFile);
    }

    let content = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content)?;
    Ok(value)
}
