//! Pattern definition errors.

use super::error_code::{self, ShapeguardErrorCode};

/// Errors that can occur while loading pattern definitions.
#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Duplicate pattern id: {0}")]
    DuplicatePattern(String),
}

impl ShapeguardErrorCode for DetectionError {
    fn error_code(&self) -> &'static str {
        error_code::DETECTION_ERROR
    }
}
