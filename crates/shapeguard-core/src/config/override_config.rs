//! Manual override auditing configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OverrideConfig {
    /// Justifications shorter than this are rejected. Default: 10.
    pub min_justification_length: Option<usize>,
    /// Justifications shorter than this draw a warning. Default: 40.
    pub brief_justification_length: Option<usize>,
    /// Overrides younger than this many days count as recent. Default: 7.
    pub recent_days: Option<i64>,
}

impl OverrideConfig {
    pub fn effective_min_justification_length(&self) -> usize {
        self.min_justification_length.unwrap_or(10)
    }

    pub fn effective_brief_justification_length(&self) -> usize {
        self.brief_justification_length.unwrap_or(40)
    }

    pub fn effective_recent_days(&self) -> i64 {
        self.recent_days.unwrap_or(7)
    }
}
