//! MetricsCollector: append-only event logs persisted under `metrics`.
//!
//! Aggregates are never stored; `metrics()` recomputes them from the logs on
//! every call.

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use shapeguard_core::config::MetricsConfig;
use shapeguard_core::errors::ConfigError;
use shapeguard_core::traits::{keys, KeyValueStore};

use super::aggregate::{aggregate, AggregatedMetrics};
use super::events::{AutoFixEvent, MetricsData, PatternDetectionEvent, ValidationEvent};
use crate::configuration::manager::{load_key, save_key};

pub struct MetricsCollector {
    store: Arc<dyn KeyValueStore>,
    config: MetricsConfig,
    data: MetricsData,
}

impl std::fmt::Debug for MetricsCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsCollector")
            .field("config", &self.config)
            .field("validations", &self.data.validations.len())
            .field("auto_fixes", &self.data.auto_fixes.len())
            .field("detections", &self.data.detections.len())
            .finish()
    }
}

impl MetricsCollector {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_config(store, MetricsConfig::default())
    }

    pub fn with_config(store: Arc<dyn KeyValueStore>, config: MetricsConfig) -> Self {
        let data = load_key(store.as_ref(), keys::METRICS).unwrap_or_default();
        let mut collector = Self { store, config, data };
        collector.enforce_retention();
        collector
    }

    pub fn data(&self) -> &MetricsData {
        &self.data
    }

    pub fn record_validation(&mut self, event: ValidationEvent) {
        tracing::debug!(
            question = %event.question_id,
            pattern = %event.pattern_id,
            score = event.score,
            "validation recorded"
        );
        self.data.validations.push(event);
        self.commit();
    }

    pub fn record_auto_fix(&mut self, event: AutoFixEvent) {
        tracing::debug!(
            question = %event.question_id,
            pattern = %event.pattern_id,
            success = event.success,
            "auto-fix recorded"
        );
        self.data.auto_fixes.push(event);
        self.commit();
    }

    pub fn record_pattern_detection(&mut self, event: PatternDetectionEvent) {
        self.data.detections.push(event);
        self.commit();
    }

    /// Aggregates over every retained event, as of now.
    pub fn metrics(&self) -> AggregatedMetrics {
        self.metrics_at(Utc::now())
    }

    pub fn metrics_at(&self, now: DateTime<Utc>) -> AggregatedMetrics {
        aggregate(&self.data, now, self.config.effective_trend_days())
    }

    /// Aggregates over events with `start <= timestamp <= end`. The trend
    /// series ends on `end`.
    pub fn metrics_for_date_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> AggregatedMetrics {
        aggregate(&self.data.within(start, end), end, self.config.effective_trend_days())
    }

    pub fn clear_metrics(&mut self) {
        self.data = MetricsData::default();
        if let Err(e) = self.store.remove(keys::METRICS) {
            tracing::warn!(error = %e, "failed to remove persisted metrics");
        }
        tracing::info!("metrics cleared");
    }

    /// The raw logs as pretty-printed JSON.
    pub fn export_data(&self) -> String {
        serde_json::to_string_pretty(&self.data).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "metrics export failed");
            String::new()
        })
    }

    /// Replace the logs with an exported document.
    pub fn import_data(&mut self, document: &str) -> Result<(), ConfigError> {
        let data: MetricsData = serde_json::from_str(document).map_err(|e| ConfigError::MalformedImport {
            message: e.to_string(),
        })?;
        if let Some(event) = data.validations.iter().find(|e| e.score > 100) {
            return Err(ConfigError::MalformedImport {
                message: format!("validation score {} is outside 0-100", event.score),
            });
        }
        self.data = data;
        self.commit();
        tracing::info!(
            validations = self.data.validations.len(),
            auto_fixes = self.data.auto_fixes.len(),
            detections = self.data.detections.len(),
            "metrics imported"
        );
        Ok(())
    }

    fn commit(&mut self) {
        self.enforce_retention();
        save_key(self.store.as_ref(), keys::METRICS, &self.data);
    }

    /// Drop the oldest events, by timestamp, of any log longer than
    /// `max_events`.
    fn enforce_retention(&mut self) {
        let max = self.config.effective_max_events();
        truncate_oldest(&mut self.data.validations, max, ValidationEvent::chronological);
        truncate_oldest(&mut self.data.auto_fixes, max, AutoFixEvent::chronological);
        truncate_oldest(&mut self.data.detections, max, PatternDetectionEvent::chronological);
    }
}

fn truncate_oldest<T>(log: &mut Vec<T>, max: usize, order: impl Fn(&T, &T) -> Ordering) {
    if log.len() > max {
        log.sort_by(order);
        let excess = log.len() - max;
        log.drain(..excess);
        tracing::debug!(dropped = excess, kept = max, "metrics retention applied");
    }
}
