//! # Storage Layer
//!
//! The per-collection document engine. Files are the only truth: there is no
//! index, cache or metadata record to keep in sync, so a document exists
//! exactly when its file exists.
//!
//! ## Components
//!
//! - [`sanitize`]: Raw identifier → safe file name. Rejects traversal and
//!   oversized ids.
//! - [`recovery`]: Repair of malformed JSON on read; timestamped backups on
//!   failed writes.
//! - [`collection::Collection`]: `set` / `get` / `delete` / `scan_all` for one
//!   collection directory, built on the two above.
//!
//! ## Storage Layout
//!
//! ```text
//! <root>/
//! ├── shelf.toml                                   # Optional configuration
//! ├── <collection>/
//! │   └── <sanitizedId>.json                       # One pretty-printed document
//! └── .backup/
//!     └── <collection>/
//!         └── <sanitizedId>_<unixMillis>.json.bak  # Content of a failed write
//! ```
//!
//! ## Known Limitations
//!
//! - Writes go directly to the document file. A crash mid-write can leave a
//!   truncated file (repair on read may or may not recover it). Set
//!   `atomic_writes` to write a temp file and rename it instead.
//! - No locking: concurrent writers to one id race, the last write wins.
//! - Scans are not isolated from concurrent writes.

pub mod collection;
pub mod recovery;
pub mod sanitize;
