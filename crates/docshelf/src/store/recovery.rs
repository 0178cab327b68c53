//! Failure recovery on both sides of a document file.
//!
//! - **Read side**: [`decode`] parses strictly first. If that fails it repairs
//!   the text (unterminated strings, unbalanced brackets) and re-parses it
//!   leniently as JSON5, which also tolerates unquoted keys, single quotes,
//!   trailing commas and comments.
//! - **Write side**: [`backup`] stores the intended content of a failed write
//!   under `<root>/<backup_dir>/<collection>/<id>_<unixMillis>.json.bak`.
//!   Backups are never read back by the store.

use crate::error::{Result, ShelfError};
use chrono::Utc;
use serde_json::Value;
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Decode document text, repairing it if it is malformed.
///
/// `location` names the source (usually a file path) in diagnostics. When the
/// repair fails too, the error carries the original parse error, not the
/// repair error.
pub fn decode(text: &str, location: &str) -> Result<Value> {
    let original = match serde_json::from_str(text) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    warn!(location, error = %original, "Malformed JSON, attempting repair");

    match repair(text) {
        Some(value) => {
            debug!(location, "Repaired malformed JSON");
            Ok(value)
        }
        None => Err(ShelfError::CorruptData {
            location: location.to_string(),
            source: original,
        }),
    }
}

/// Decode raw file content. Bytes that are not valid UTF-8 are replaced
/// with U+FFFD before decoding.
pub fn decode_bytes(bytes: &[u8], location: &str) -> Result<Value> {
    let text = String::from_utf8_lossy(bytes);
    if matches!(text, Cow::Owned(_)) {
        warn!(location, "Document is not valid UTF-8, invalid bytes replaced");
    }
    decode(&text, location)
}

/// Best-effort repair of malformed JSON text.
pub fn repair(text: &str) -> Option<Value> {
    let balanced = balance_delimiters(text);
    json5::from_str::<Value>(&balanced).ok()
}

/// Close unterminated strings and brackets, and drop closers that match
/// nothing. A trailing comma left in front of an appended closer is removed.
fn balance_delimiters(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut open: Vec<char> = Vec::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in text.chars() {
        if let Some(q) = quote {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '"' | '\'' => {
                quote = Some(c);
                out.push(c);
            }
            '{' => {
                open.push('}');
                out.push(c);
            }
            '[' => {
                open.push(']');
                out.push(c);
            }
            '}' | ']' => {
                if open.last() == Some(&c) {
                    open.pop();
                    out.push(c);
                }
            }
            _ => out.push(c),
        }
    }

    if let Some(q) = quote {
        if escaped {
            out.pop();
        }
        out.push(q);
    }

    while let Some(closer) = open.pop() {
        out.truncate(out.trim_end().len());
        if out.ends_with(',') {
            out.pop();
        }
        out.push(closer);
    }

    out
}

/// Name of a backup file for `safe_id` written at `unix_millis`.
pub fn backup_file_name(safe_id: &str, unix_millis: i64) -> String {
    format!("{}_{}.json.bak", safe_id, unix_millis)
}

/// Persist `text` as a timestamped backup of document `safe_id`.
///
/// Returns the backup path. Failing to create the directory or to write the
/// file is reported as [`ShelfError::BackupFailed`].
pub fn backup(
    root: &Path,
    backup_dir: &str,
    collection: &str,
    safe_id: &str,
    text: &str,
) -> Result<PathBuf> {
    let dir = root.join(backup_dir).join(collection);
    fs::create_dir_all(&dir).map_err(|source| ShelfError::BackupFailed {
        path: dir.clone(),
        source,
    })?;

    let path = dir.join(backup_file_name(safe_id, Utc::now().timestamp_millis()));
    fs::write(&path, text).map_err(|source| ShelfError::BackupFailed {
        path: path.clone(),
        source,
    })?;

    warn!(path = %path.display(), "Document content saved to backup");
    Ok(path)
}
