//! Configuration errors.

use super::error_code::{self, ShapeguardErrorCode};

/// Errors raised while loading config files or importing persisted state.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Config parse error in {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Config validation failed for {field}: {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Malformed import document: {message}")]
    MalformedImport { message: String },
}

impl ShapeguardErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedImport { .. } => error_code::IMPORT_ERROR,
            _ => error_code::CONFIG_ERROR,
        }
    }
}
