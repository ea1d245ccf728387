//! Metrics collector: append-only event logs and on-read aggregation.

pub mod aggregate;
pub mod collector;
pub mod events;

pub use aggregate::{
    AggregatedMetrics, ChannelStats, DailyTrend, DetectionStats, PatternUsage, UNKNOWN_CHANNEL,
};
pub use collector::MetricsCollector;
pub use events::{AutoFixEvent, MetricsData, PatternDetectionEvent, ValidationEvent};
