use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "shelf",
    bin_name = "shelf",
    version,
    disable_help_subcommand = true
)]
#[command(about = "File-backed JSON document store", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Shelf root directory
    #[arg(long, global = true, env = "SHELF_ROOT", help_heading = "Options")]
    pub root: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create or overwrite a document
    Set {
        collection: String,
        id: String,
        /// Document as JSON (read from stdin when omitted)
        json: Option<String>,
    },

    /// Print a document (`null` when it does not exist)
    Get { collection: String, id: String },

    /// Delete a document
    #[command(alias = "rm")]
    Delete { collection: String, id: String },

    /// List documents, optionally filtered
    Find {
        collection: String,

        /// Deep-equality filter, e.g. '{"category": "Books"}'
        #[arg(long = "match", value_name = "JSON")]
        match_json: Option<String>,

        /// Case-insensitive substring filter, e.g. '{"name": "pro"}'
        #[arg(long, value_name = "JSON")]
        like: Option<String>,
    },

    /// List document ids in a collection
    Ids { collection: String },

    /// List collections
    #[command(alias = "ls")]
    Collections,

    /// Create a collection
    Create { collection: String },

    /// Delete a collection with all its documents and backups
    Drop { collection: String },

    /// Show the resolved configuration
    Config,
}
