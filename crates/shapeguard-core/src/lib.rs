//! shapeguard-core: shared vocabulary for the answer-format engine.
//!
//! Everything here is plain data or a thin trait. Detection, validation,
//! formatting and aggregation live in `shapeguard-analysis`; SQLite
//! persistence lives in `shapeguard-storage`.

pub mod config;
pub mod errors;
pub mod tracing;
pub mod traits;
pub mod types;

pub use config::ShapeguardConfig;
pub use errors::{ConfigError, DetectionError, RuleError, ShapeguardErrorCode, StorageError};
pub use traits::{KeyValueStore, MemoryStore};
