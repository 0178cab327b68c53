//! Identifier to file name mapping.
//!
//! Sanitization strips characters that are unsafe in file names on any
//! platform, then rejects what is still dangerous. It is lossy on purpose:
//! `a/b` and `ab` both become `ab`.

use crate::error::{Result, ShelfError};

/// Default maximum identifier length, in characters, after sanitization.
pub const MAX_ID_LEN: usize = 200;

const STRIPPED: [char; 9] = ['/', '\\', '<', '>', ':', '"', '|', '?', '*'];

/// Turn a raw identifier into a file-name-safe string.
///
/// The raw id is trimmed; then path separators and `< > : " | ? *` are
/// removed. Fails when the result is empty, still contains `..`, or is longer
/// than `max_len` characters.
pub fn sanitize(raw_id: &str, max_len: usize) -> Result<String> {
    let invalid = |reason: &str| ShelfError::InvalidIdentifier {
        id: raw_id.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = raw_id.trim();
    if trimmed.is_empty() {
        return Err(invalid("identifier is empty"));
    }

    let safe: String = trimmed.chars().filter(|c| !STRIPPED.contains(c)).collect();

    if safe.is_empty() {
        return Err(invalid("identifier has no usable characters"));
    }
    if safe.contains("..") {
        return Err(invalid("path traversal is not allowed"));
    }
    if safe.chars().count() > max_len {
        return Err(invalid(&format!(
            "identifier exceeds {} characters",
            max_len
        )));
    }

    Ok(safe)
}

/// File name of a document: sanitized id plus suffix.
pub fn document_file_name(safe_id: &str, file_ext: &str) -> String {
    format!("{}{}", safe_id, file_ext)
}
