//! # CLI Behavior
//!
//! This is **one possible client** for docshelf, not the store itself.
//! The CLI is the only place that knows about terminal I/O, exit codes and
//! output formatting.
//!
//! ## Input
//!
//! `shelf set <collection> <id> [JSON]` takes the document from the argument,
//! or from stdin when the argument is omitted:
//!
//! ```text
//! echo '{"name": "Laptop Pro"}' | shelf set products laptop
//! ```
//!
//! Empty input is rejected: there is no "absent" document. Store `null`
//! explicitly if that is what you mean.
//!
//! ## Output
//!
//! Every command prints pretty JSON on stdout. `get` of a missing document
//! prints `null` and still succeeds; errors print `Error: ...` on stderr and
//! exit with status 1.
//!
//! ## Root Directory
//!
//! `--root` or `SHELF_ROOT`, falling back to the platform data directory.
//!
//! ## Module Structure
//!
//! - `setup`: Argument parsing via clap
//! - `commands`: Logging setup and per-command handlers
//! - `render`: JSON output

mod commands;
mod render;
pub mod setup;

pub use commands::run;
