//! Validation rule and severity types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity levels for violations. Ordered most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    /// Backlog priority used when ranking fixes.
    pub fn fix_priority(&self) -> u32 {
        match self {
            Self::Error => 100,
            Self::Warning => 50,
            Self::Info => 25,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warning" | "warn" => Some(Self::Warning),
            "info" => Some(Self::Info),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
            Self::Info => "INFO",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// A custom rule attached to a pattern.
///
/// `predicate` names an entry in the validator's predicate registry. Rules
/// without a predicate exist only so they can be toggled in the
/// configuration manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRule {
    pub id: String,
    pub pattern: String,
    pub severity: Severity,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub auto_fix: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicate: Option<String>,
}

fn default_true() -> bool {
    true
}

impl ValidationRule {
    pub fn new(
        id: impl Into<String>,
        pattern: impl Into<String>,
        severity: Severity,
        predicate: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            pattern: pattern.into(),
            severity,
            enabled: true,
            auto_fix: false,
            description: String::new(),
            predicate: Some(predicate.into()),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_auto_fix(mut self, auto_fix: bool) -> Self {
        self.auto_fix = auto_fix;
        self
    }

    /// Apply a partial update in place.
    pub fn apply_patch(&mut self, patch: &RulePatch) {
        if let Some(severity) = patch.severity {
            self.severity = severity;
        }
        if let Some(enabled) = patch.enabled {
            self.enabled = enabled;
        }
        if let Some(auto_fix) = patch.auto_fix {
            self.auto_fix = auto_fix;
        }
        if let Some(ref description) = patch.description {
            self.description = description.clone();
        }
    }
}

/// Partial update for a `ValidationRule`. `id` and `pattern` are immutable.
#[derive(Debug, Clone, Default)]
pub struct RulePatch {
    pub severity: Option<Severity>,
    pub enabled: Option<bool>,
    pub auto_fix: Option<bool>,
    pub description: Option<String>,
}
