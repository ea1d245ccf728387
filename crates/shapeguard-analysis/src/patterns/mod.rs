//! Pattern library, TOML pattern loading and question → pattern detection.

pub mod defaults;
pub mod detector;
pub mod library;
pub mod toml_patterns;

pub use defaults::{default_patterns, DEFAULT_PATTERN_IDS};
pub use detector::{PatternDetector, ScoredPattern};
pub use library::PatternLibrary;
pub use toml_patterns::TomlPatternLoader;
