//! Process-wide feature flags and thresholds.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigurationSettings {
    pub auto_format_enabled: bool,
    pub strict_mode: bool,
    pub validation_enabled: bool,
    pub show_suggestions: bool,
    pub auto_apply_fixes: bool,
    /// Pass threshold (0-100).
    pub max_validation_score: u8,
}

impl Default for ConfigurationSettings {
    fn default() -> Self {
        Self {
            auto_format_enabled: true,
            strict_mode: false,
            validation_enabled: true,
            show_suggestions: true,
            auto_apply_fixes: false,
            max_validation_score: 70,
        }
    }
}

impl ConfigurationSettings {
    pub fn apply_patch(&mut self, patch: &SettingsPatch) {
        if let Some(v) = patch.auto_format_enabled {
            self.auto_format_enabled = v;
        }
        if let Some(v) = patch.strict_mode {
            self.strict_mode = v;
        }
        if let Some(v) = patch.validation_enabled {
            self.validation_enabled = v;
        }
        if let Some(v) = patch.show_suggestions {
            self.show_suggestions = v;
        }
        if let Some(v) = patch.auto_apply_fixes {
            self.auto_apply_fixes = v;
        }
        if let Some(v) = patch.max_validation_score {
            self.max_validation_score = v.min(100);
        }
    }

    pub fn get(&self, key: SettingKey) -> SettingValue {
        match key {
            SettingKey::AutoFormatEnabled => SettingValue::Flag(self.auto_format_enabled),
            SettingKey::StrictMode => SettingValue::Flag(self.strict_mode),
            SettingKey::ValidationEnabled => SettingValue::Flag(self.validation_enabled),
            SettingKey::ShowSuggestions => SettingValue::Flag(self.show_suggestions),
            SettingKey::AutoApplyFixes => SettingValue::Flag(self.auto_apply_fixes),
            SettingKey::MaxValidationScore => SettingValue::Threshold(self.max_validation_score),
        }
    }

    /// Set one field. Returns false when the value kind does not fit the key.
    pub fn set(&mut self, key: SettingKey, value: SettingValue) -> bool {
        match (key, value) {
            (SettingKey::AutoFormatEnabled, SettingValue::Flag(v)) => self.auto_format_enabled = v,
            (SettingKey::StrictMode, SettingValue::Flag(v)) => self.strict_mode = v,
            (SettingKey::ValidationEnabled, SettingValue::Flag(v)) => self.validation_enabled = v,
            (SettingKey::ShowSuggestions, SettingValue::Flag(v)) => self.show_suggestions = v,
            (SettingKey::AutoApplyFixes, SettingValue::Flag(v)) => self.auto_apply_fixes = v,
            (SettingKey::MaxValidationScore, SettingValue::Threshold(v)) => {
                self.max_validation_score = v.min(100)
            }
            _ => return false,
        }
        true
    }
}

/// Partial update for settings.
#[derive(Debug, Clone, Default)]
pub struct SettingsPatch {
    pub auto_format_enabled: Option<bool>,
    pub strict_mode: Option<bool>,
    pub validation_enabled: Option<bool>,
    pub show_suggestions: Option<bool>,
    pub auto_apply_fixes: Option<bool>,
    pub max_validation_score: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    AutoFormatEnabled,
    StrictMode,
    ValidationEnabled,
    ShowSuggestions,
    AutoApplyFixes,
    MaxValidationScore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingValue {
    Flag(bool),
    Threshold(u8),
}
