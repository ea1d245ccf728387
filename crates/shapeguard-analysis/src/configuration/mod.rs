//! Configuration manager: settings, rule toggles, overrides, local counters.

pub mod manager;
pub mod state;

pub use manager::ConfigurationManager;
pub use state::{ConfigurationExport, ConfigurationPatch, LocalMetrics, PatternConfiguration};
