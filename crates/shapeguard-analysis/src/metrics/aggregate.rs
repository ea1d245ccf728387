//! Pure aggregation over the metrics logs.
//!
//! Every figure is recomputed from the raw events. Scores are integers, so
//! sums are exact and the result does not depend on event order.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::events::{MetricsData, ValidationEvent};

/// Channel label for events recorded without one.
pub const UNKNOWN_CHANNEL: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PatternUsage {
    pub validations: u64,
    pub passed: u64,
    pub average_score: f64,
    pub auto_fixes: u64,
    pub auto_fix_successes: u64,
    pub detections: u64,
    #[serde(skip)]
    score_sum: u64,
}

impl PatternUsage {
    pub fn success_rate(&self) -> f64 {
        percent(self.passed, self.validations)
    }

    fn compute_average(&mut self) {
        self.average_score = mean(self.score_sum, self.validations);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelStats {
    pub channel: String,
    pub validations: u64,
    pub compliance_rate: f64,
    pub average_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTrend {
    pub date: NaiveDate,
    pub validations: u64,
    pub compliance_rate: f64,
    pub average_score: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DetectionStats {
    pub total: u64,
    pub detected: u64,
    pub undetected: u64,
    pub average_confidence: f64,
    pub by_pattern: BTreeMap<String, u64>,
}

/// Derived view over all events. Rates are percentages in `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedMetrics {
    pub total_questions: u64,
    pub total_validations: u64,
    /// Share of validations with no error-severity violation.
    pub compliance_rate: f64,
    pub average_score: f64,
    /// Share of questions whose first recorded validation passed.
    pub validation_pass_rate: f64,
    pub auto_fix_success_rate: f64,
    /// Mean violation count across all validation events.
    pub average_violations_per_question: f64,
    pub pattern_usage: BTreeMap<String, PatternUsage>,
    pub channel_breakdown: Vec<ChannelStats>,
    pub trends: Vec<DailyTrend>,
    pub detection: DetectionStats,
    pub generated_at: DateTime<Utc>,
}

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

fn mean(sum: u64, count: u64) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

/// Recompute every aggregate from `data`. The trend series covers
/// `trend_days` days ending on `now`'s date.
pub fn aggregate(data: &MetricsData, now: DateTime<Utc>, trend_days: u32) -> AggregatedMetrics {
    let validations = &data.validations;
    let total = validations.len() as u64;
    let passed = validations.iter().filter(|v| v.is_valid).count() as u64;
    let score_sum: u64 = validations.iter().map(|v| u64::from(v.score)).sum();
    let violation_sum: u64 = validations.iter().map(|v| v.violation_count as u64).sum();

    let firsts = first_validation_per_question(validations);
    let first_passed = firsts.values().filter(|v| v.is_valid).count() as u64;

    let fixes = data.auto_fixes.len() as u64;
    let fix_successes = data.auto_fixes.iter().filter(|f| f.success).count() as u64;

    AggregatedMetrics {
        total_questions: firsts.len() as u64,
        total_validations: total,
        compliance_rate: percent(passed, total),
        average_score: mean(score_sum, total),
        validation_pass_rate: percent(first_passed, firsts.len() as u64),
        auto_fix_success_rate: percent(fix_successes, fixes),
        average_violations_per_question: mean(violation_sum, total),
        pattern_usage: pattern_usage(data),
        channel_breakdown: channel_breakdown(validations),
        trends: trends(validations, now, trend_days),
        detection: detection_stats(data),
        generated_at: now,
    }
}

/// Earliest validation per question; ties on timestamp go to the lower
/// score, then to the failing one.
fn first_validation_per_question(events: &[ValidationEvent]) -> BTreeMap<&str, &ValidationEvent> {
    let mut firsts: BTreeMap<&str, &ValidationEvent> = BTreeMap::new();
    for event in events {
        let key = (event.timestamp, event.score, event.is_valid);
        firsts
            .entry(event.question_id.as_str())
            .and_modify(|cur| {
                if key < (cur.timestamp, cur.score, cur.is_valid) {
                    *cur = event;
                }
            })
            .or_insert(event);
    }
    firsts
}

fn pattern_usage(data: &MetricsData) -> BTreeMap<String, PatternUsage> {
    let mut usage: BTreeMap<String, PatternUsage> = BTreeMap::new();
    for v in &data.validations {
        let entry = usage.entry(v.pattern_id.clone()).or_default();
        entry.validations += 1;
        entry.score_sum += u64::from(v.score);
        if v.is_valid {
            entry.passed += 1;
        }
    }
    for f in &data.auto_fixes {
        let entry = usage.entry(f.pattern_id.clone()).or_default();
        entry.auto_fixes += 1;
        if f.success {
            entry.auto_fix_successes += 1;
        }
    }
    for d in &data.detections {
        if let Some(pattern) = &d.pattern_id {
            usage.entry(pattern.clone()).or_default().detections += 1;
        }
    }
    for entry in usage.values_mut() {
        entry.compute_average();
    }
    usage
}

fn channel_breakdown(events: &[ValidationEvent]) -> Vec<ChannelStats> {
    // channel → (validations, passed, score sum)
    let mut by_channel: BTreeMap<&str, (u64, u64, u64)> = BTreeMap::new();
    for v in events {
        let channel = v.channel.as_deref().unwrap_or(UNKNOWN_CHANNEL);
        let entry = by_channel.entry(channel).or_default();
        entry.0 += 1;
        entry.1 += u64::from(v.is_valid);
        entry.2 += u64::from(v.score);
    }
    by_channel
        .into_iter()
        .map(|(channel, (n, passed, sum))| ChannelStats {
            channel: channel.to_string(),
            validations: n,
            compliance_rate: percent(passed, n),
            average_score: mean(sum, n),
        })
        .collect()
}

fn trends(events: &[ValidationEvent], now: DateTime<Utc>, days: u32) -> Vec<DailyTrend> {
    let today = now.date_naive();
    let mut by_day: BTreeMap<NaiveDate, (u64, u64, u64)> = BTreeMap::new();
    for v in events {
        let entry = by_day.entry(v.timestamp.date_naive()).or_default();
        entry.0 += 1;
        entry.1 += u64::from(v.is_valid);
        entry.2 += u64::from(v.score);
    }
    (0..i64::from(days))
        .rev()
        .map(|back| {
            let date = today - Duration::days(back);
            let (n, passed, sum) = by_day.get(&date).copied().unwrap_or_default();
            DailyTrend {
                date,
                validations: n,
                compliance_rate: percent(passed, n),
                average_score: mean(sum, n),
            }
        })
        .collect()
}

fn detection_stats(data: &MetricsData) -> DetectionStats {
    let mut stats = DetectionStats {
        total: data.detections.len() as u64,
        ..Default::default()
    };
    let mut confidences: Vec<f64> = Vec::with_capacity(data.detections.len());
    for d in &data.detections {
        match &d.pattern_id {
            Some(pattern) => {
                stats.detected += 1;
                *stats.by_pattern.entry(pattern.clone()).or_default() += 1;
            }
            None => stats.undetected += 1,
        }
        confidences.push(d.confidence);
    }
    // Sorted so the float sum is independent of event order.
    confidences.sort_by(f64::total_cmp);
    if !confidences.is_empty() {
        stats.average_confidence = confidences.iter().sum::<f64>() / confidences.len() as f64;
    }
    stats
}
