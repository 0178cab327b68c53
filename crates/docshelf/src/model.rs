//! Result types returned by collection operations.
//!
//! Documents themselves are plain [`serde_json::Value`]s: the tagged union
//! `Null | Bool | Number | String | Array | Object` is exactly the shape a
//! document can take, so no wrapper type is introduced for it.

use serde::{Deserialize, Serialize};

/// Returned by a successful `set`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetReceipt {
    /// The sanitized identifier the document was stored under.
    pub id: String,
    /// File name relative to the collection directory (`<id>.json`).
    pub file: String,
}

/// Returned by `delete`. Absence is reported here, not as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteOutcome {
    pub deleted: bool,
    pub not_found: bool,
}

impl DeleteOutcome {
    pub fn deleted() -> Self {
        Self {
            deleted: true,
            not_found: false,
        }
    }

    pub fn not_found() -> Self {
        Self {
            deleted: false,
            not_found: true,
        }
    }
}
