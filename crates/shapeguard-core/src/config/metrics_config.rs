//! Metrics collector configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MetricsConfig {
    /// Days covered by the daily trend series. Default: 30.
    pub trend_days: Option<u32>,
    /// Maximum events kept per log; oldest are dropped first. Default: 10_000.
    pub max_events: Option<usize>,
}

impl MetricsConfig {
    pub fn effective_trend_days(&self) -> u32 {
        self.trend_days.unwrap_or(30)
    }

    pub fn effective_max_events(&self) -> usize {
        self.max_events.unwrap_or(10_000)
    }
}
