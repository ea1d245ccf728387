//! Storage-layer errors for the key-value persistence interface.

use super::error_code::{self, ShapeguardErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed at version {version}: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("failed to serialize value for key {key}: {message}")]
    Serialization { key: String, message: String },

    #[error("store unavailable: {message}")]
    Unavailable { message: String },
}

impl ShapeguardErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            _ => error_code::STORAGE_ERROR,
        }
    }
}
