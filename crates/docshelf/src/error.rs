use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShelfError {
    #[error("Invalid document id '{id}': {reason}")]
    InvalidIdentifier { id: String, reason: String },

    #[error("Invalid collection name '{name}': {reason}")]
    InvalidCollection { name: String, reason: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Corrupt data in {location}: {source}")]
    CorruptData {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read document '{id}': {source}")]
    ReadFailed {
        id: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to delete document '{id}': {source}")]
    DeleteFailed {
        id: String,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Document '{id}' was NOT saved ({source}); its content was backed up to {}",
        backup.display()
    )]
    WriteFailed {
        id: String,
        backup: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Document '{id}' was NOT saved ({write_error}) and the backup failed too ({backup_error})"
    )]
    WriteAndBackupFailed {
        id: String,
        write_error: std::io::Error,
        backup_error: Box<ShelfError>,
    },

    #[error("Backup failed for {}: {source}", path.display())]
    BackupFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),
}

pub type Result<T> = std::result::Result<T, ShelfError>;
