//! Configuration system for shapeguard.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod detection_config;
pub mod metrics_config;
pub mod override_config;
pub mod scoring_config;
pub mod shapeguard_config;
pub mod storage_config;

pub use detection_config::DetectionConfig;
pub use metrics_config::MetricsConfig;
pub use override_config::OverrideConfig;
pub use scoring_config::ScoringConfig;
pub use shapeguard_config::{CliOverrides, ShapeguardConfig};
pub use storage_config::StorageConfig;
