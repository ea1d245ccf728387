//! Raw metrics events.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shapeguard_core::types::ValidationResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationEvent {
    pub question_id: String,
    pub pattern_id: String,
    pub score: u8,
    pub is_valid: bool,
    pub violation_count: usize,
    #[serde(default)]
    pub channel: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl ValidationEvent {
    pub fn from_result(
        question_id: impl Into<String>,
        pattern_id: impl Into<String>,
        result: &ValidationResult,
    ) -> Self {
        Self {
            question_id: question_id.into(),
            pattern_id: pattern_id.into(),
            score: result.score,
            is_valid: result.is_valid,
            violation_count: result.violations.len(),
            channel: None,
            timestamp: Utc::now(),
        }
    }

    /// Oldest first; events with equal timestamps are ordered by content.
    pub fn chronological(&self, other: &Self) -> Ordering {
        (self.timestamp, &self.question_id, &self.pattern_id, self.score, self.is_valid)
            .cmp(&(other.timestamp, &other.question_id, &other.pattern_id, other.score, other.is_valid))
            .then_with(|| self.violation_count.cmp(&other.violation_count))
            .then_with(|| self.channel.cmp(&other.channel))
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoFixEvent {
    pub question_id: String,
    pub pattern_id: String,
    pub score_before: u8,
    pub score_after: u8,
    /// The formatted answer validated cleanly.
    pub success: bool,
    #[serde(default)]
    pub channel: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl AutoFixEvent {
    pub fn new(
        question_id: impl Into<String>,
        pattern_id: impl Into<String>,
        before: &ValidationResult,
        after: &ValidationResult,
    ) -> Self {
        Self {
            question_id: question_id.into(),
            pattern_id: pattern_id.into(),
            score_before: before.score,
            score_after: after.score,
            success: after.is_valid,
            channel: None,
            timestamp: Utc::now(),
        }
    }

    pub fn chronological(&self, other: &Self) -> Ordering {
        (self.timestamp, &self.question_id, &self.pattern_id, self.score_before, self.score_after)
            .cmp(&(other.timestamp, &other.question_id, &other.pattern_id, other.score_before, other.score_after))
            .then_with(|| self.success.cmp(&other.success))
            .then_with(|| self.channel.cmp(&other.channel))
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternDetectionEvent {
    pub question_id: String,
    /// `None` when no pattern matched.
    pub pattern_id: Option<String>,
    pub confidence: f64,
    pub timestamp: DateTime<Utc>,
}

impl PatternDetectionEvent {
    pub fn new(question_id: impl Into<String>, pattern_id: Option<String>, confidence: f64) -> Self {
        Self {
            question_id: question_id.into(),
            pattern_id,
            confidence: confidence.clamp(0.0, 1.0),
            timestamp: Utc::now(),
        }
    }

    pub fn chronological(&self, other: &Self) -> Ordering {
        (self.timestamp, self.question_id.as_str(), self.pattern_id.as_deref())
            .cmp(&(other.timestamp, other.question_id.as_str(), other.pattern_id.as_deref()))
            .then_with(|| self.confidence.total_cmp(&other.confidence))
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// The three logs as persisted under `metrics` and exchanged by
/// export/import.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsData {
    pub validations: Vec<ValidationEvent>,
    pub auto_fixes: Vec<AutoFixEvent>,
    pub detections: Vec<PatternDetectionEvent>,
}

impl MetricsData {
    pub fn is_empty(&self) -> bool {
        self.validations.is_empty() && self.auto_fixes.is_empty() && self.detections.is_empty()
    }

    /// Events with `start <= timestamp <= end`.
    pub fn within(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        let keep = |ts: &DateTime<Utc>| *ts >= start && *ts <= end;
        Self {
            validations: self.validations.iter().filter(|e| keep(&e.timestamp)).cloned().collect(),
            auto_fixes: self.auto_fixes.iter().filter(|e| keep(&e.timestamp)).cloned().collect(),
            detections: self.detections.iter().filter(|e| keep(&e.timestamp)).cloned().collect(),
        }
    }
}
