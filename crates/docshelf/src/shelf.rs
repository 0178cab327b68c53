//! # Shelf: the database root
//!
//! A [`Shelf`] is a directory of collections. It bootstraps the root, hands
//! out [`Collection`] handles and manages collection directories. Everything
//! document-level lives in [`crate::store`].
//!
//! Entries starting with `.` (including the backup subtree) are never
//! collections.

use crate::config::ShelfConfig;
use crate::error::{Result, ShelfError};
use crate::store::collection::Collection;
use crate::store::sanitize::sanitize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct Shelf {
    root: PathBuf,
    config: Arc<ShelfConfig>,
}

impl Shelf {
    /// Open the shelf at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>, config: ShelfConfig) -> Result<Self> {
        let root = root.into();
        if !root.exists() {
            fs::create_dir_all(&root)?;
            info!(root = %root.display(), "Created shelf root");
        }
        Ok(Self {
            root,
            config: Arc::new(config),
        })
    }

    /// Open the shelf at `root` with configuration loaded from
    /// `<root>/shelf.toml` and the environment.
    pub fn load(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let config = ShelfConfig::load(&root)?;
        Self::open(root, config)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &ShelfConfig {
        &self.config
    }

    /// Collection names must survive sanitization unchanged and must not be
    /// hidden entries.
    fn validate_name(&self, name: &str) -> Result<String> {
        let invalid = |reason: String| ShelfError::InvalidCollection {
            name: name.to_string(),
            reason,
        };

        let trimmed = name.trim();
        if trimmed.starts_with('.') {
            return Err(invalid("names starting with '.' are reserved".to_string()));
        }
        let safe = sanitize(trimmed, self.config.max_id_len).map_err(|e| match e {
            ShelfError::InvalidIdentifier { reason, .. } => invalid(reason),
            other => other,
        })?;
        if safe != trimmed {
            return Err(invalid("contains path or reserved characters".to_string()));
        }
        Ok(safe)
    }

    /// Get a collection, creating its directory if it does not exist.
    pub fn collection(&self, name: &str) -> Result<Collection> {
        let name = self.validate_name(name)?;
        let dir = self.root.join(&name);
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
            debug!(collection = %name, "Created collection");
        }
        Ok(Collection::new(&self.root, name, Arc::clone(&self.config)))
    }

    /// Get a collection that must already exist.
    pub fn existing_collection(&self, name: &str) -> Result<Collection> {
        let name = self.validate_name(name)?;
        if !self.root.join(&name).is_dir() {
            return Err(ShelfError::CollectionNotFound(name));
        }
        Ok(Collection::new(&self.root, name, Arc::clone(&self.config)))
    }

    pub fn has_collection(&self, name: &str) -> bool {
        self.validate_name(name)
            .map(|name| self.root.join(name).is_dir())
            .unwrap_or(false)
    }

    /// Names of all collections, sorted.
    pub fn collections(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ShelfError::Io(e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if !name.starts_with('.') && name != self.config.backup_dir {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Remove a collection with all its documents and backups.
    /// Returns `false` if there was no such collection.
    pub fn drop_collection(&self, name: &str) -> Result<bool> {
        let name = self.validate_name(name)?;

        let existed = match fs::remove_dir_all(self.root.join(&name)) {
            Ok(()) => true,
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(e) => return Err(ShelfError::Io(e)),
        };

        let backups = self.root.join(&self.config.backup_dir).join(&name);
        match fs::remove_dir_all(&backups) {
            Ok(()) => debug!(collection = %name, "Removed collection backups"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(ShelfError::Io(e)),
        }

        if existed {
            info!(collection = %name, "Dropped collection");
        }
        Ok(existed)
    }
}
