use super::recovery;
use super::sanitize::{document_file_name, sanitize};
use crate::config::ShelfConfig;
use crate::error::{Result, ShelfError};
use crate::model::{DeleteOutcome, SetReceipt};
use crate::query::Query;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, trace, warn};
use uuid::Uuid;

/// The document engine for one collection directory.
///
/// A `Collection` is a cheap handle: it holds paths and shared configuration,
/// no open files and no cached documents. Every call goes to disk.
#[derive(Debug, Clone)]
pub struct Collection {
    root: PathBuf,
    name: String,
    dir: PathBuf,
    config: Arc<ShelfConfig>,
}

impl Collection {
    /// Handle for the collection `name` under the shelf `root`.
    ///
    /// The directory is expected to exist already; [`crate::Shelf::collection`]
    /// takes care of that.
    pub fn new(
        root: impl Into<PathBuf>,
        name: impl Into<String>,
        config: Arc<ShelfConfig>,
    ) -> Self {
        let root = root.into();
        let name = name.into();
        let dir = root.join(&name);
        Self {
            root,
            name,
            dir,
            config,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Sanitize `raw_id` and map it to its file path.
    fn resolve(&self, raw_id: &str) -> Result<(String, PathBuf)> {
        let safe_id = sanitize(raw_id, self.config.max_id_len)?;
        if safe_id != raw_id.trim() {
            // Distinct raw ids can collapse onto the same file
            warn!(
                raw_id,
                id = %safe_id,
                collection = %self.name,
                "Document id rewritten by sanitization"
            );
        }
        let path = self
            .dir
            .join(document_file_name(&safe_id, &self.config.file_ext()));
        Ok((safe_id, path))
    }

    /// Path of the file backing document `id`.
    pub fn document_path(&self, id: &str) -> Result<PathBuf> {
        self.resolve(id).map(|(_, path)| path)
    }

    /// Create or fully overwrite document `id`.
    ///
    /// `None` stands for "no value at all" and is rejected before any I/O; pass
    /// `Some(&Value::Null)` to store an explicit null.
    ///
    /// When the write fails the serialized content is written to the backup
    /// directory, and the returned error says whether that succeeded.
    pub fn set(&self, id: &str, value: Option<&Value>) -> Result<SetReceipt> {
        trace!(id, collection = %self.name, "Setting document");
        let (safe_id, path) = self.resolve(id)?;

        let Some(value) = value else {
            return Err(ShelfError::InvalidInput(format!(
                "document '{}' has no value; store an explicit null instead",
                safe_id
            )));
        };

        let text = serde_json::to_string_pretty(value)?;

        if let Err(write_error) = self.write_text(&path, &text) {
            error!(
                id = %safe_id,
                path = %path.display(),
                error = %write_error,
                "Failed to write document"
            );
            return match recovery::backup(
                &self.root,
                &self.config.backup_dir,
                &self.name,
                &safe_id,
                &text,
            ) {
                Ok(backup) => Err(ShelfError::WriteFailed {
                    id: safe_id,
                    backup,
                    source: write_error,
                }),
                Err(backup_error) => Err(ShelfError::WriteAndBackupFailed {
                    id: safe_id,
                    write_error,
                    backup_error: Box::new(backup_error),
                }),
            };
        }

        debug!(id = %safe_id, collection = %self.name, "Document saved");
        let file = document_file_name(&safe_id, &self.config.file_ext());
        Ok(SetReceipt { id: safe_id, file })
    }

    /// Serialize `value` and store it as document `id`.
    pub fn put<T: Serialize + ?Sized>(&self, id: &str, value: &T) -> Result<SetReceipt> {
        let value = serde_json::to_value(value).map_err(|e| {
            ShelfError::InvalidInput(format!("value is not JSON-serializable: {}", e))
        })?;
        self.set(id, Some(&value))
    }

    fn write_text(&self, path: &Path, text: &str) -> std::io::Result<()> {
        if !self.config.atomic_writes {
            return fs::write(path, text);
        }

        let file_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("document");
        let tmp_path = self
            .dir
            .join(format!(".{}.{}.tmp", file_name, Uuid::new_v4()));
        fs::write(&tmp_path, text)?;
        if let Err(e) = fs::rename(&tmp_path, path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }
        Ok(())
    }

    /// Read document `id`. `Ok(None)` when it does not exist.
    pub fn get(&self, id: &str) -> Result<Option<Value>> {
        trace!(id, collection = %self.name, "Getting document");
        let (safe_id, path) = self.resolve(id)?;

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(id = %safe_id, collection = %self.name, "Document not found");
                return Ok(None);
            }
            Err(source) => {
                return Err(ShelfError::ReadFailed {
                    id: safe_id,
                    source,
                })
            }
        };

        recovery::decode_bytes(&bytes, &path.display().to_string()).map(Some)
    }

    /// Remove document `id`. Removing a missing document is not an error.
    pub fn delete(&self, id: &str) -> Result<DeleteOutcome> {
        trace!(id, collection = %self.name, "Deleting document");
        let (safe_id, path) = self.resolve(id)?;

        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(id = %safe_id, collection = %self.name, "Document deleted");
                Ok(DeleteOutcome::deleted())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(id = %safe_id, collection = %self.name, "Nothing to delete");
                Ok(DeleteOutcome::not_found())
            }
            Err(source) => Err(ShelfError::DeleteFailed {
                id: safe_id,
                source,
            }),
        }
    }

    /// Ids of all documents in the collection, sorted.
    pub fn ids(&self) -> Result<Vec<String>> {
        let ext = self.config.file_ext();
        let mut ids: Vec<String> = self
            .document_files()?
            .iter()
            .filter_map(|path| path.file_name().and_then(|s| s.to_str()))
            .filter_map(|name| name.strip_suffix(ext.as_str()))
            .map(str::to_string)
            .collect();
        ids.sort();
        Ok(ids)
    }

    /// Read every document, optionally keeping only those accepted by `query`.
    ///
    /// Files that cannot be read or decoded are logged and skipped. Falsy
    /// documents (`null`, `false`, `0`, `""`) count as absent. Results come in
    /// directory order.
    pub fn scan_all(&self, query: Option<&Query>) -> Result<Vec<Value>> {
        trace!(collection = %self.name, "Scanning collection");
        let mut docs = Vec::new();

        for path in self.document_files()? {
            let location = path.display().to_string();

            let bytes = match fs::read(&path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!(path = %location, error = %e, "Skipping unreadable document");
                    continue;
                }
            };

            let value = match recovery::decode_bytes(&bytes, &location) {
                Ok(value) => value,
                Err(e) => {
                    warn!(path = %location, error = %e, "Skipping corrupt document");
                    continue;
                }
            };

            if is_falsy(&value) {
                continue;
            }

            if query.is_some_and(|q| !q.accepts(&value)) {
                continue;
            }

            docs.push(value);
        }

        debug!(collection = %self.name, count = docs.len(), "Scan finished");
        Ok(docs)
    }

    /// Regular files in the collection directory carrying the document suffix.
    fn document_files(&self) -> Result<Vec<PathBuf>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(ShelfError::Io(e)),
        };

        let ext = self.config.file_ext();
        let mut files = Vec::new();

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(collection = %self.name, error = %e, "Skipping unreadable entry");
                    continue;
                }
            };
            match entry.file_type() {
                Ok(kind) if kind.is_file() => {}
                Ok(_) => continue,
                Err(e) => {
                    warn!(
                        path = %entry.path().display(),
                        error = %e,
                        "Skipping entry of unknown type"
                    );
                    continue;
                }
            }
            let path = entry.path();
            if let Some(name) = path.file_name().and_then(|s| s.to_str()) {
                if name.len() > ext.len() && name.ends_with(ext.as_str()) {
                    files.push(path);
                }
            }
        }
        Ok(files)
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
