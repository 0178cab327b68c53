//! # Configuration
//!
//! Docshelf configuration is managed by [`confique`], which layers values from
//! environment variables, an optional TOML file and compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `SHELF_FILE_EXT`, `SHELF_MAX_ID_LEN`, etc.
//! 2. **Root Config**: `<root>/shelf.toml`, next to the collections it configures.
//! 3. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `file_ext` | `.json` | Suffix of document files |
//! | `max_id_len` | `200` | Maximum sanitized identifier length, in characters |
//! | `backup_dir` | `.backup` | Directory under the root receiving failed-write backups |
//! | `atomic_writes` | `false` | Write to a temp file and rename instead of writing in place |

use crate::error::Result;
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the optional configuration file inside a shelf root.
pub const CONFIG_FILE: &str = "shelf.toml";

/// Configuration for a shelf, stored in `shelf.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ShelfConfig {
    /// Suffix of document files (e.g. ".json")
    #[config(default = ".json", env = "SHELF_FILE_EXT")]
    pub file_ext: String,

    /// Maximum length of a sanitized document id, in characters.
    #[config(default = 200, env = "SHELF_MAX_ID_LEN")]
    pub max_id_len: usize,

    /// Name of the backup subtree under the shelf root.
    #[config(default = ".backup", env = "SHELF_BACKUP_DIR")]
    pub backup_dir: String,

    /// Write documents to a temp file and rename it into place.
    /// Off by default: documents are overwritten in place.
    #[config(default = false, env = "SHELF_ATOMIC_WRITES")]
    pub atomic_writes: bool,
}

impl Default for ShelfConfig {
    fn default() -> Self {
        Self {
            file_ext: ".json".to_string(),
            max_id_len: 200,
            backup_dir: ".backup".to_string(),
            atomic_writes: false,
        }
    }
}

impl ShelfConfig {
    /// Load configuration for the shelf rooted at `root`.
    /// A missing `shelf.toml` is not an error.
    pub fn load(root: &Path) -> Result<Self> {
        let config = Self::builder().env().file(root.join(CONFIG_FILE)).load()?;
        Ok(config)
    }

    /// Get the document suffix, normalized to start with a dot.
    pub fn file_ext(&self) -> String {
        if self.file_ext.starts_with('.') {
            self.file_ext.clone()
        } else {
            format!(".{}", self.file_ext)
        }
    }
}
