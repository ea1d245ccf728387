//! Persisted configuration state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shapeguard_core::types::{ConfigurationSettings, OverrideRecord, ValidationRule};

pub const CONFIG_VERSION: &str = "1.0.0";

/// Lightweight counters kept next to the configuration. The full event
/// history lives in the metrics collector.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalMetrics {
    pub total_validations: u64,
    pub auto_formats_applied: u64,
    pub manual_overrides: u64,
    /// Running mean over all recorded validation scores.
    pub average_validation_score: f64,
    pub last_updated: Option<DateTime<Utc>>,
}

impl LocalMetrics {
    /// Fold one score into the running mean.
    pub fn record_score(&mut self, score: u8, now: DateTime<Utc>) {
        let n = self.total_validations as f64;
        self.average_validation_score = (self.average_validation_score * n + f64::from(score)) / (n + 1.0);
        self.total_validations += 1;
        self.last_updated = Some(now);
    }
}

/// Stored under `pattern-config`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternConfiguration {
    pub version: String,
    pub enabled: bool,
    #[serde(default)]
    pub default_pattern: Option<String>,
    #[serde(default)]
    pub validation_rules: Vec<ValidationRule>,
    #[serde(default)]
    pub metrics: LocalMetrics,
}

impl PatternConfiguration {
    pub fn with_rules(rules: Vec<ValidationRule>) -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            enabled: true,
            default_pattern: None,
            validation_rules: rules,
            metrics: LocalMetrics::default(),
        }
    }
}

/// Partial update for the top-level configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigurationPatch {
    pub enabled: Option<bool>,
    /// `Some(None)` clears the default pattern.
    pub default_pattern: Option<Option<String>>,
}

/// The single document produced by export and accepted by import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationExport {
    pub config: PatternConfiguration,
    pub settings: ConfigurationSettings,
    #[serde(default)]
    pub overrides: Vec<OverrideRecord>,
    #[serde(default)]
    pub metrics: LocalMetrics,
}
