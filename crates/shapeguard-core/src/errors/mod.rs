//! Error handling for shapeguard.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod detection_error;
pub mod error_code;
pub mod rule_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use detection_error::DetectionError;
pub use error_code::ShapeguardErrorCode;
pub use rule_error::RuleError;
pub use storage_error::StorageError;
