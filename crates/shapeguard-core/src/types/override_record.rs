//! Manual override records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A human decision to redirect or bypass formatting for one question.
///
/// `override_pattern == None` means formatting is explicitly disabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideRecord {
    pub question_id: String,
    pub timestamp: DateTime<Utc>,
    pub justification: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl OverrideRecord {
    /// True if this override turns formatting off instead of redirecting it.
    pub fn disables_formatting(&self) -> bool {
        self.override_pattern.is_none()
    }
}

/// Input for creating an override; the manager stamps the timestamp.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideRequest {
    pub question_id: String,
    pub justification: String,
    #[serde(default)]
    pub original_pattern: Option<String>,
    #[serde(default)]
    pub override_pattern: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl OverrideRequest {
    pub fn new(question_id: impl Into<String>, justification: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            justification: justification.into(),
            ..Default::default()
        }
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.override_pattern = Some(pattern.into());
        self
    }

    pub fn with_original(mut self, pattern: impl Into<String>) -> Self {
        self.original_pattern = Some(pattern.into());
        self
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn stamp(self, timestamp: DateTime<Utc>) -> OverrideRecord {
        OverrideRecord {
            question_id: self.question_id,
            timestamp,
            justification: self.justification,
            original_pattern: self.original_pattern,
            override_pattern: self.override_pattern,
            user_id: self.user_id,
        }
    }
}
