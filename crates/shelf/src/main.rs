//! # Shelf CLI
//!
//! `shelf` is a thin command-line client over the `docshelf` library. This file
//! only invokes `cli::run()` and handles process termination; argument parsing,
//! dispatch and output live in `src/cli/`.
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/shelf/src/cli/)                          │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Logging setup + dispatch (commands.rs)                   │
//! │  - JSON output (render.rs)                                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Library (crates/docshelf)                                  │
//! │  - Shelf / Collection / Query                               │
//! │  - No knowledge of stdout/stderr or process exits           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Results go to stdout as JSON so they can be piped into other tools. Logs go
//! to stderr.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
