//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs a `tracing` subscriber
//! - Formats output for human or machine consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: Convert shell arguments into typed commands via clap
//! 2. **Context Setup**: Resolve the root, load configuration, open the shelf
//! 3. **Dispatch**: Route each command to its handler
//! 4. **Output Formatting**: Print results as JSON

use super::render::print_json;
use super::setup::{Cli, Commands};
use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use directories::ProjectDirs;
use docshelf::{Query, Shelf, ShelfError};
use serde_json::{json, Map, Value};
use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let root = resolve_root(cli.root)?;
    let shelf = Shelf::load(&root)
        .with_context(|| format!("Failed to open shelf at {}", root.display()))?;
    debug!(root = %root.display(), "Opened shelf");

    let result = dispatch(&shelf, cli.command);
    debug!(ok = result.is_ok(), "Command finished");
    result
}

/// `RUST_LOG` wins; otherwise warnings only, or debug with `--verbose`.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_root(root: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(root) = root {
        return Ok(root);
    }
    let dirs = ProjectDirs::from("org", "docshelf", "shelf")
        .ok_or_else(|| anyhow!("Could not determine a data directory; pass --root"))?;
    Ok(dirs.data_dir().to_path_buf())
}

fn dispatch(shelf: &Shelf, command: Commands) -> Result<()> {
    match command {
        Commands::Set {
            collection,
            id,
            json,
        } => handle_set(shelf, &collection, &id, json),
        Commands::Get { collection, id } => {
            let doc = shelf.existing_collection(&collection)?.get(&id)?;
            print_json(&doc)
        }
        Commands::Delete { collection, id } => {
            let outcome = shelf.existing_collection(&collection)?.delete(&id)?;
            print_json(&outcome)
        }
        Commands::Find {
            collection,
            match_json,
            like,
        } => handle_find(shelf, &collection, match_json, like),
        Commands::Ids { collection } => {
            print_json(&shelf.existing_collection(&collection)?.ids()?)
        }
        Commands::Collections => print_json(&shelf.collections()?),
        Commands::Create { collection } => {
            let created = !shelf.has_collection(&collection);
            let handle = shelf.collection(&collection)?;
            print_json(&json!({"collection": handle.name(), "created": created}))
        }
        Commands::Drop { collection } => {
            let dropped = shelf.drop_collection(&collection)?;
            print_json(&json!({"collection": collection, "dropped": dropped}))
        }
        Commands::Config => print_json(shelf.config()),
    }
}

fn handle_set(shelf: &Shelf, collection: &str, id: &str, json: Option<String>) -> Result<()> {
    let raw = match json {
        Some(text) => text,
        None => read_stdin()?,
    };
    let Some(value) = parse_document(&raw)? else {
        return Err(ShelfError::InvalidInput(
            "no document given; pass `null` to store an explicit null".to_string(),
        )
        .into());
    };

    let receipt = shelf.collection(collection)?.set(id, Some(&value))?;
    print_json(&receipt)
}

fn read_stdin() -> Result<String> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(String::new());
    }
    let mut buf = String::new();
    stdin
        .lock()
        .read_to_string(&mut buf)
        .context("Failed to read document from stdin")?;
    Ok(buf)
}

/// Blank input means "no value", which `set` rejects before touching disk.
fn parse_document(raw: &str) -> Result<Option<Value>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    let value = serde_json::from_str(raw).context("Document is not valid JSON")?;
    Ok(Some(value))
}

fn handle_find(
    shelf: &Shelf,
    collection: &str,
    match_json: Option<String>,
    like: Option<String>,
) -> Result<()> {
    let query = Query {
        match_fields: parse_fields("--match", match_json.as_deref())?,
        like: parse_fields("--like", like.as_deref())?,
    };

    let docs = shelf
        .existing_collection(collection)?
        .scan_all(Some(&query).filter(|q| !q.is_empty()))?;
    print_json(&docs)
}

fn parse_fields(flag: &str, raw: Option<&str>) -> Result<Map<String, Value>> {
    let Some(raw) = raw else {
        return Ok(Map::new());
    };
    let value = serde_json::from_str::<Value>(raw)
        .with_context(|| format!("{} is not valid JSON", flag))?;
    match value {
        Value::Object(fields) => Ok(fields),
        _ => bail!("{} must be a JSON object of field names to values", flag),
    }
}
