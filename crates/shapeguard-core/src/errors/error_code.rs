//! ShapeguardErrorCode trait for structured error codes.

/// Every error enum implements this to expose a stable code string that
/// callers (presentation layer, batch drivers) can match on.
pub trait ShapeguardErrorCode {
    /// Returns the error code string (e.g., "CONFIG_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const IMPORT_ERROR: &str = "IMPORT_ERROR";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const RULE_ERROR: &str = "RULE_ERROR";
pub const DETECTION_ERROR: &str = "DETECTION_ERROR";
