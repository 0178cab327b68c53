//! # Docshelf Architecture
//!
//! Docshelf is a **file-backed JSON document store**. A collection is a directory,
//! a document is one pretty-printed JSON file inside it, named after a sanitized
//! identifier. There is no index and no metadata record: the file is the document.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Shelf (shelf.rs)                                           │
//! │  - Database root, collection lifecycle (create/list/drop)   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Collection (store/collection.rs)                           │
//! │  - set / get / delete / scan_all for one directory          │
//! │  - Owns the (collection, id) → path mapping                 │
//! └─────────────────────────────────────────────────────────────┘
//!            │                   │                    │
//!            ▼                   ▼                    ▼
//! ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────┐
//! │ store/sanitize   │ │ store/recovery   │ │ query            │
//! │ id → file name   │ │ repair + backup  │ │ match / like     │
//! └──────────────────┘ └──────────────────┘ └──────────────────┘
//! ```
//!
//! ## Key Principle: No Terminal I/O
//!
//! Nothing in this crate prints or exits. Diagnostics (repair attempts, skipped
//! files during scans, rewritten identifiers) are emitted as `tracing` events and
//! it is up to the host to install a subscriber. The `shelf` binary is one such host.
//!
//! ## Failure Model
//!
//! - Reading a missing document is not an error (`Ok(None)`), neither is deleting one.
//! - Malformed JSON is repaired on read when possible, with a warning.
//! - A failed write leaves the intended content in `<root>/.backup/<collection>/`
//!   and the error says whether that backup succeeded.
//!
//! ## Module Overview
//!
//! - [`shelf`]: Database root and collection management
//! - [`store`]: The per-collection document engine
//! - [`query`]: `match` / `like` predicates
//! - [`model`]: Result types returned by the engine
//! - [`config`]: Layered configuration (`shelf.toml` + environment)
//! - [`error`]: Error types

pub mod config;
pub mod error;
pub mod model;
pub mod query;
pub mod shelf;
pub mod store;

#[cfg(test)]
mod test_utils;

pub use config::ShelfConfig;
pub use error::{Result, ShelfError};
pub use model::{DeleteOutcome, SetReceipt};
pub use query::Query;
pub use shelf::Shelf;
pub use store::collection::Collection;
