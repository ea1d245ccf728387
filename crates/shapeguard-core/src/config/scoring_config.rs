//! Validation scoring configuration.

use serde::{Deserialize, Serialize};

/// Per-severity penalties subtracted from a starting score of 100.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScoringConfig {
    /// Penalty per error. Default: 20.
    pub error_penalty: Option<u32>,
    /// Penalty per warning. Default: 10.
    pub warning_penalty: Option<u32>,
    /// Penalty per info finding. Default: 5.
    pub info_penalty: Option<u32>,
}

impl ScoringConfig {
    pub fn effective_error_penalty(&self) -> u32 {
        self.error_penalty.unwrap_or(20)
    }

    pub fn effective_warning_penalty(&self) -> u32 {
        self.warning_penalty.unwrap_or(10)
    }

    pub fn effective_info_penalty(&self) -> u32 {
        self.info_penalty.unwrap_or(5)
    }
}
