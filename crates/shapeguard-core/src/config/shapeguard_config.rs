//! Top-level shapeguard configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{DetectionConfig, MetricsConfig, OverrideConfig, ScoringConfig, StorageConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`SHAPEGUARD_*`)
/// 3. Project config (`shapeguard.toml` in project root)
/// 4. User config (`~/.shapeguard/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ShapeguardConfig {
    pub detection: DetectionConfig,
    pub scoring: ScoringConfig,
    pub overrides: OverrideConfig,
    pub metrics: MetricsConfig,
    pub storage: StorageConfig,
}

/// Override arguments a front end can apply on top of file/env config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub database_path: Option<PathBuf>,
    pub trend_days: Option<u32>,
    pub min_question_length: Option<usize>,
}

impl ShapeguardConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // User config (lowest file priority). Unreadable files are skipped,
        // malformed TOML is reported.
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        ::tracing::warn!(error = %e, "skipping unreadable user config");
                    }
                }
            }
        }

        let project_config_path = root.join("shapeguard.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &ShapeguardConfig) -> Result<(), ConfigError> {
        if let Some(saturation) = config.detection.confidence_saturation {
            if saturation <= 0.0 {
                return Err(ConfigError::ValidationFailed {
                    field: "detection.confidence_saturation".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        let weights = [
            ("detection.exact_match_weight", config.detection.exact_match_weight),
            ("detection.word_match_weight", config.detection.word_match_weight),
            ("detection.substring_weight", config.detection.substring_weight),
        ];
        for (field, weight) in weights {
            if weight.is_some_and(|w| w <= 0.0) {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        let penalties = [
            ("scoring.error_penalty", config.scoring.error_penalty),
            ("scoring.warning_penalty", config.scoring.warning_penalty),
            ("scoring.info_penalty", config.scoring.info_penalty),
        ];
        for (field, penalty) in penalties {
            if penalty.is_some_and(|p| p > 100) {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must be between 0 and 100".to_string(),
                });
            }
        }
        if config.metrics.trend_days == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "metrics.trend_days".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.metrics.max_events == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "metrics.max_events".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        let min = config.overrides.effective_min_justification_length();
        let brief = config.overrides.effective_brief_justification_length();
        if brief < min {
            return Err(ConfigError::ValidationFailed {
                field: "overrides.brief_justification_length".to_string(),
                message: "must not be smaller than min_justification_length".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the user config path: `~/.shapeguard/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".shapeguard").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut ShapeguardConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: ShapeguardConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it has a value.
    fn merge(base: &mut ShapeguardConfig, other: &ShapeguardConfig) {
        // Detection
        if other.detection.min_question_length.is_some() {
            base.detection.min_question_length = other.detection.min_question_length;
        }
        if other.detection.exact_match_weight.is_some() {
            base.detection.exact_match_weight = other.detection.exact_match_weight;
        }
        if other.detection.word_match_weight.is_some() {
            base.detection.word_match_weight = other.detection.word_match_weight;
        }
        if other.detection.phrase_word_bonus.is_some() {
            base.detection.phrase_word_bonus = other.detection.phrase_word_bonus;
        }
        if other.detection.substring_weight.is_some() {
            base.detection.substring_weight = other.detection.substring_weight;
        }
        if other.detection.confidence_saturation.is_some() {
            base.detection.confidence_saturation = other.detection.confidence_saturation;
        }

        // Scoring
        if other.scoring.error_penalty.is_some() {
            base.scoring.error_penalty = other.scoring.error_penalty;
        }
        if other.scoring.warning_penalty.is_some() {
            base.scoring.warning_penalty = other.scoring.warning_penalty;
        }
        if other.scoring.info_penalty.is_some() {
            base.scoring.info_penalty = other.scoring.info_penalty;
        }

        // Overrides
        if other.overrides.min_justification_length.is_some() {
            base.overrides.min_justification_length = other.overrides.min_justification_length;
        }
        if other.overrides.brief_justification_length.is_some() {
            base.overrides.brief_justification_length =
                other.overrides.brief_justification_length;
        }
        if other.overrides.recent_days.is_some() {
            base.overrides.recent_days = other.overrides.recent_days;
        }

        // Metrics
        if other.metrics.trend_days.is_some() {
            base.metrics.trend_days = other.metrics.trend_days;
        }
        if other.metrics.max_events.is_some() {
            base.metrics.max_events = other.metrics.max_events;
        }

        // Storage
        if other.storage.database_path.is_some() {
            base.storage.database_path = other.storage.database_path.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `SHAPEGUARD_DETECTION_MIN_QUESTION_LENGTH`, `SHAPEGUARD_METRICS_TREND_DAYS`, etc.
    fn apply_env_overrides(config: &mut ShapeguardConfig) {
        if let Ok(val) = std::env::var("SHAPEGUARD_DETECTION_MIN_QUESTION_LENGTH") {
            if let Ok(v) = val.parse::<usize>() {
                config.detection.min_question_length = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SHAPEGUARD_SCORING_ERROR_PENALTY") {
            if let Ok(v) = val.parse::<u32>() {
                config.scoring.error_penalty = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SHAPEGUARD_SCORING_WARNING_PENALTY") {
            if let Ok(v) = val.parse::<u32>() {
                config.scoring.warning_penalty = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SHAPEGUARD_METRICS_TREND_DAYS") {
            if let Ok(v) = val.parse::<u32>() {
                config.metrics.trend_days = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SHAPEGUARD_METRICS_MAX_EVENTS") {
            if let Ok(v) = val.parse::<usize>() {
                config.metrics.max_events = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SHAPEGUARD_STORAGE_DATABASE_PATH") {
            config.storage.database_path = Some(PathBuf::from(val));
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut ShapeguardConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.database_path {
            config.storage.database_path = Some(v.clone());
        }
        if let Some(v) = cli.trend_days {
            config.metrics.trend_days = Some(v);
        }
        if let Some(v) = cli.min_question_length {
            config.detection.min_question_length = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
