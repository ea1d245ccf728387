//! ConfigurationManager: explicit handle over an injected `KeyValueStore`.
//!
//! State is loaded once on construction and written through on every
//! mutation. Missing or corrupt persisted data falls back to defaults, and
//! store failures are logged and otherwise ignored: the in-memory state stays
//! authoritative. `import_configuration` is the only fallible operation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use shapeguard_core::errors::ConfigError;
use shapeguard_core::traits::{keys, KeyValueStore};
use shapeguard_core::types::{
    ConfigurationSettings, OverrideRecord, OverrideRequest, RulePatch, SettingKey, SettingValue,
    SettingsPatch, ValidationOptions, ValidationResult, ValidationRule,
};

use super::state::{ConfigurationExport, ConfigurationPatch, LocalMetrics, PatternConfiguration};
use crate::patterns::PatternLibrary;

pub struct ConfigurationManager {
    store: Arc<dyn KeyValueStore>,
    /// Rules of the pattern library, used to rebuild the registry on reset.
    library_rules: Vec<ValidationRule>,
    config: PatternConfiguration,
    settings: ConfigurationSettings,
    overrides: Vec<OverrideRecord>,
}

impl std::fmt::Debug for ConfigurationManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigurationManager")
            .field("config", &self.config)
            .field("settings", &self.settings)
            .field("overrides", &self.overrides.len())
            .finish()
    }
}

impl ConfigurationManager {
    /// Load from `store`, mirroring the rules of the built-in library.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_library(store, &PatternLibrary::new())
    }

    /// Load from `store`, mirroring the rules of `library`.
    pub fn with_library(store: Arc<dyn KeyValueStore>, library: &PatternLibrary) -> Self {
        let library_rules = library.all_rules();
        let stored_config: Option<PatternConfiguration> = load_key(store.as_ref(), keys::PATTERN_CONFIG);
        let config = match stored_config {
            Some(mut config) => {
                config.validation_rules = mirror_rules(&library_rules, config.validation_rules);
                config
            }
            None => PatternConfiguration::with_rules(library_rules.clone()),
        };
        let settings = load_key(store.as_ref(), keys::SETTINGS).unwrap_or_default();
        let overrides = load_key(store.as_ref(), keys::OVERRIDES).unwrap_or_default();
        Self {
            store,
            library_rules,
            config,
            settings,
            overrides,
        }
    }

    // ---- Configuration ----

    pub fn configuration(&self) -> &PatternConfiguration {
        &self.config
    }

    pub fn update_configuration(&mut self, patch: ConfigurationPatch) {
        if let Some(enabled) = patch.enabled {
            self.config.enabled = enabled;
        }
        if let Some(default_pattern) = patch.default_pattern {
            self.config.default_pattern = default_pattern;
        }
        self.persist_config();
    }

    /// Restore the configuration and rule registry to defaults. Settings and
    /// overrides are kept.
    pub fn reset_configuration(&mut self) {
        self.config = PatternConfiguration::with_rules(self.library_rules.clone());
        self.persist_config();
        tracing::info!("configuration reset to defaults");
    }

    // ---- Settings ----

    pub fn settings(&self) -> &ConfigurationSettings {
        &self.settings
    }

    pub fn update_settings(&mut self, patch: &SettingsPatch) {
        self.settings.apply_patch(patch);
        self.persist_settings();
    }

    pub fn setting(&self, key: SettingKey) -> SettingValue {
        self.settings.get(key)
    }

    /// Returns false, changing nothing, when the value kind does not fit.
    pub fn set_setting(&mut self, key: SettingKey, value: SettingValue) -> bool {
        let applied = self.settings.set(key, value);
        if applied {
            self.persist_settings();
        }
        applied
    }

    // ---- Validation rules ----

    pub fn validation_rules(&self) -> &[ValidationRule] {
        &self.config.validation_rules
    }

    pub fn update_validation_rule(&mut self, id: &str, patch: &RulePatch) -> bool {
        let Some(rule) = self.config.validation_rules.iter_mut().find(|r| r.id == id) else {
            return false;
        };
        rule.apply_patch(patch);
        self.persist_config();
        true
    }

    /// Flip a rule's enabled flag. Returns the new state.
    pub fn toggle_validation_rule(&mut self, id: &str) -> Option<bool> {
        let rule = self.config.validation_rules.iter_mut().find(|r| r.id == id)?;
        rule.enabled = !rule.enabled;
        let enabled = rule.enabled;
        self.persist_config();
        Some(enabled)
    }

    pub fn enabled_rules_for_pattern(&self, pattern_id: &str) -> Vec<&ValidationRule> {
        self.config
            .validation_rules
            .iter()
            .filter(|r| r.pattern == pattern_id && r.enabled)
            .collect()
    }

    /// Validator options derived from strict mode and disabled rules.
    pub fn validation_options(&self) -> ValidationOptions {
        ValidationOptions {
            strict_mode: self.settings.strict_mode,
            disabled_rules: self
                .config
                .validation_rules
                .iter()
                .filter(|r| !r.enabled)
                .map(|r| r.id.clone())
                .collect(),
        }
    }

    /// True if `result` has no errors and scores at or above the configured
    /// pass threshold.
    pub fn meets_threshold(&self, result: &ValidationResult) -> bool {
        result.passes(self.settings.max_validation_score)
    }

    // ---- Overrides ----

    /// Stamp and append an override. Uniqueness per question is the caller's
    /// contract; lookups return the most recent record.
    pub fn add_override(&mut self, request: OverrideRequest) -> OverrideRecord {
        self.add_override_at(request, Utc::now())
    }

    pub fn add_override_at(&mut self, request: OverrideRequest, timestamp: DateTime<Utc>) -> OverrideRecord {
        let record = request.stamp(timestamp);
        self.overrides.push(record.clone());
        self.config.metrics.manual_overrides += 1;
        self.config.metrics.last_updated = Some(timestamp);
        self.persist_overrides();
        self.persist_config();
        record
    }

    pub fn overrides(&self) -> &[OverrideRecord] {
        &self.overrides
    }

    pub fn override_for_question(&self, question_id: &str) -> Option<&OverrideRecord> {
        self.overrides
            .iter()
            .rev()
            .find(|o| o.question_id == question_id)
    }

    pub fn has_override(&self, question_id: &str) -> bool {
        self.override_for_question(question_id).is_some()
    }

    /// Remove every override for the question. Returns true if any existed.
    pub fn remove_override(&mut self, question_id: &str) -> bool {
        let before = self.overrides.len();
        self.overrides.retain(|o| o.question_id != question_id);
        let removed = self.overrides.len() != before;
        if removed {
            self.persist_overrides();
        }
        removed
    }

    // ---- Local metrics ----

    pub fn record_validation(&mut self, score: u8) {
        self.config.metrics.record_score(score, Utc::now());
        self.persist_config();
    }

    pub fn record_auto_format(&mut self) {
        self.config.metrics.auto_formats_applied += 1;
        self.config.metrics.last_updated = Some(Utc::now());
        self.persist_config();
    }

    pub fn local_metrics(&self) -> &LocalMetrics {
        &self.config.metrics
    }

    pub fn reset_local_metrics(&mut self) {
        self.config.metrics = LocalMetrics::default();
        self.persist_config();
    }

    // ---- Import / export ----

    pub fn export_document(&self) -> ConfigurationExport {
        ConfigurationExport {
            config: self.config.clone(),
            settings: self.settings.clone(),
            overrides: self.overrides.clone(),
            metrics: self.config.metrics.clone(),
        }
    }

    /// Whole state as one pretty-printed JSON document.
    pub fn export_configuration(&self) -> String {
        serde_json::to_string_pretty(&self.export_document()).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "configuration export failed");
            String::new()
        })
    }

    /// Replace the whole state from an exported document.
    pub fn import_configuration(&mut self, document: &str) -> Result<(), ConfigError> {
        let doc: ConfigurationExport =
            serde_json::from_str(document).map_err(|e| ConfigError::MalformedImport {
                message: e.to_string(),
            })?;
        if doc.settings.max_validation_score > 100 {
            return Err(ConfigError::MalformedImport {
                message: format!(
                    "max_validation_score {} is outside 0-100",
                    doc.settings.max_validation_score
                ),
            });
        }
        if let Some(rule) = doc.config.validation_rules.iter().find(|r| r.id.trim().is_empty()) {
            return Err(ConfigError::MalformedImport {
                message: format!("validation rule for pattern '{}' has an empty id", rule.pattern),
            });
        }

        let mut config = doc.config;
        config.metrics = doc.metrics;
        self.config = config;
        self.settings = doc.settings;
        self.overrides = doc.overrides;
        self.persist_config();
        self.persist_settings();
        self.persist_overrides();
        tracing::info!(
            rules = self.config.validation_rules.len(),
            overrides = self.overrides.len(),
            "configuration imported"
        );
        Ok(())
    }

    /// Wipe persisted state and return to defaults.
    pub fn clear_configuration(&mut self) {
        for key in [keys::PATTERN_CONFIG, keys::SETTINGS, keys::OVERRIDES] {
            if let Err(e) = self.store.remove(key) {
                tracing::warn!(key, error = %e, "failed to remove persisted configuration");
            }
        }
        self.config = PatternConfiguration::with_rules(self.library_rules.clone());
        self.settings = ConfigurationSettings::default();
        self.overrides.clear();
        tracing::info!("configuration cleared");
    }

    // ---- Persistence ----

    fn persist_config(&self) {
        save_key(self.store.as_ref(), keys::PATTERN_CONFIG, &self.config);
    }

    fn persist_settings(&self) {
        save_key(self.store.as_ref(), keys::SETTINGS, &self.settings);
    }

    fn persist_overrides(&self) {
        save_key(self.store.as_ref(), keys::OVERRIDES, &self.overrides);
    }
}

/// Library rules overlaid with the stored state of matching ids. Stored rules
/// the library no longer knows are kept after the library's.
fn mirror_rules(library: &[ValidationRule], stored: Vec<ValidationRule>) -> Vec<ValidationRule> {
    let mut merged: Vec<ValidationRule> = library
        .iter()
        .map(|rule| {
            stored
                .iter()
                .find(|s| s.id == rule.id)
                .cloned()
                .unwrap_or_else(|| rule.clone())
        })
        .collect();
    for rule in stored {
        if !merged.iter().any(|m| m.id == rule.id) {
            merged.push(rule);
        }
    }
    merged
}

/// Read and decode a key. Missing, unreadable or corrupt data yields `None`.
pub(crate) fn load_key<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    match store.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "discarding corrupt persisted state");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            tracing::warn!(key, error = %e, "persisted state unavailable; using defaults");
            None
        }
    }
}

/// Encode and write a key, logging failures.
pub(crate) fn save_key<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) {
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to encode state for persistence");
            return;
        }
    };
    if let Err(e) = store.set(key, &raw) {
        tracing::warn!(key, error = %e, "failed to persist state; continuing in memory");
    }
}
