//! Validation output types.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::rule::Severity;

/// 1-based line/column position inside an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

/// Triage tag attached to an enriched violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FixPriority {
    MustFix,
    ShouldFix,
    Consider,
}

impl FixPriority {
    pub fn from_severity(severity: Severity) -> Self {
        match severity {
            Severity::Error => Self::MustFix,
            Severity::Warning => Self::ShouldFix,
            Severity::Info => Self::Consider,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::MustFix => "MUST FIX",
            Self::ShouldFix => "SHOULD FIX",
            Self::Consider => "CONSIDER",
        }
    }
}

/// One detected deviation from the required structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationViolation {
    pub rule: String,
    pub severity: Severity,
    pub message: String,
    pub fix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<FixPriority>,
}

impl ValidationViolation {
    pub fn new(
        rule: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
        fix: impl Into<String>,
    ) -> Self {
        Self {
            rule: rule.into(),
            severity,
            message: message.into(),
            fix: fix.into(),
            location: None,
            category: None,
            example: None,
            priority: None,
        }
    }

    pub fn error(rule: impl Into<String>, message: impl Into<String>, fix: impl Into<String>) -> Self {
        Self::new(rule, Severity::Error, message, fix)
    }

    pub fn warning(rule: impl Into<String>, message: impl Into<String>, fix: impl Into<String>) -> Self {
        Self::new(rule, Severity::Warning, message, fix)
    }

    pub fn info(rule: impl Into<String>, message: impl Into<String>, fix: impl Into<String>) -> Self {
        Self::new(rule, Severity::Info, message, fix)
    }

    pub fn at(mut self, location: Option<Location>) -> Self {
        self.location = location;
        self
    }
}

/// Outcome of validating one answer against one pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub score: u8,
    pub violations: Vec<ValidationViolation>,
    pub suggestions: Vec<String>,
}

impl ValidationResult {
    /// A result with no findings.
    pub fn clean() -> Self {
        Self {
            is_valid: true,
            score: 100,
            violations: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.violations.iter().filter(|v| v.severity == severity).count()
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// True if the score reaches `threshold` and no error is present.
    pub fn passes(&self, threshold: u8) -> bool {
        self.is_valid && self.score >= threshold
    }
}

/// Per-call knobs the configuration manager feeds into the validator.
#[derive(Debug, Clone, Default)]
pub struct ValidationOptions {
    /// Promote warnings to errors.
    pub strict_mode: bool,
    /// Rule ids whose violations are dropped.
    pub disabled_rules: HashSet<String>,
}
