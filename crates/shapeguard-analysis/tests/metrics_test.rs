//! Metrics collection and aggregation.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use shapeguard_analysis::metrics::{
    aggregate::aggregate, AutoFixEvent, MetricsCollector, MetricsData, PatternDetectionEvent,
    ValidationEvent, UNKNOWN_CHANNEL,
};
use shapeguard_analysis::patterns::PatternLibrary;
use shapeguard_analysis::validation::FormatValidator;
use shapeguard_core::config::MetricsConfig;
use shapeguard_core::errors::ConfigError;
use shapeguard_core::traits::{keys, KeyValueStore, MemoryStore};

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 10, 9, 0, 0).unwrap()
}

fn validation(question: &str, pattern: &str, score: u8, valid: bool, at: DateTime<Utc>) -> ValidationEvent {
    ValidationEvent {
        question_id: question.into(),
        pattern_id: pattern.into(),
        score,
        is_valid: valid,
        violation_count: usize::from(!valid) * 2,
        channel: None,
        timestamp: at,
    }
}

fn make_collector(store: &Arc<MemoryStore>) -> MetricsCollector {
    MetricsCollector::new(store.clone())
}

#[test]
fn empty_metrics_are_zero() {
    let collector = make_collector(&Arc::new(MemoryStore::new()));
    let m = collector.metrics_at(base_time());
    assert_eq!(m.total_validations, 0);
    assert_eq!(m.compliance_rate, 0.0);
    assert_eq!(m.average_score, 0.0);
    assert_eq!(m.trends.len(), 30);
    assert!(m.trends.iter().all(|d| d.validations == 0));
    assert_eq!(m.trends.last().unwrap().date, base_time().date_naive());
}

/// T-MET-01: rates, per-pattern usage and channel breakdown.
#[test]
fn aggregates_validations_fixes_and_detections() {
    let store = Arc::new(MemoryStore::new());
    let mut collector = make_collector(&store);
    let t = base_time();

    collector.record_validation(validation("q1", "process", 60, false, t));
    collector.record_validation(validation("q1", "process", 100, true, t + Duration::hours(1)));
    collector.record_validation(validation("q2", "list", 90, true, t).with_channel("web"));
    collector.record_auto_fix(AutoFixEvent {
        question_id: "q1".into(),
        pattern_id: "process".into(),
        score_before: 60,
        score_after: 100,
        success: true,
        channel: None,
        timestamp: t,
    });
    collector.record_pattern_detection(PatternDetectionEvent::new("q1", Some("process".into()), 0.6).at(t));
    collector.record_pattern_detection(PatternDetectionEvent::new("q3", None, 0.0).at(t));

    let m = collector.metrics_at(t + Duration::hours(2));
    assert_eq!(m.total_questions, 2);
    assert_eq!(m.total_validations, 3);
    assert!((m.compliance_rate - 200.0 / 3.0).abs() < 1e-9);
    assert!((m.average_score - 250.0 / 3.0).abs() < 1e-9);
    // q1's first validation failed, q2's passed
    assert!((m.validation_pass_rate - 50.0).abs() < 1e-9);
    assert_eq!(m.auto_fix_success_rate, 100.0);

    let process = &m.pattern_usage["process"];
    assert_eq!(process.validations, 2);
    assert_eq!(process.passed, 1);
    assert_eq!(process.average_score, 80.0);
    assert_eq!(process.auto_fixes, 1);
    assert_eq!(process.detections, 1);
    assert_eq!(process.success_rate(), 50.0);

    let channels: Vec<&str> = m.channel_breakdown.iter().map(|c| c.channel.as_str()).collect();
    assert_eq!(channels, vec![UNKNOWN_CHANNEL, "web"]);

    assert_eq!(m.detection.total, 2);
    assert_eq!(m.detection.detected, 1);
    assert_eq!(m.detection.undetected, 1);
    assert!((m.detection.average_confidence - 0.3).abs() < 1e-9);

    let today = m.trends.last().unwrap();
    assert_eq!(today.validations, 3);
}

#[test]
fn date_range_filters_events() {
    let store = Arc::new(MemoryStore::new());
    let mut collector = make_collector(&store);
    let t = base_time();
    collector.record_validation(validation("q1", "list", 50, false, t - Duration::days(10)));
    collector.record_validation(validation("q2", "list", 100, true, t - Duration::days(1)));

    let recent = collector.metrics_for_date_range(t - Duration::days(2), t);
    assert_eq!(recent.total_validations, 1);
    assert_eq!(recent.average_score, 100.0);
    assert_eq!(recent.generated_at, t);

    let all = collector.metrics_at(t);
    assert_eq!(all.total_validations, 2);
}

#[test]
fn events_persist_and_reload() {
    let store = Arc::new(MemoryStore::new());
    {
        let mut collector = make_collector(&store);
        collector.record_validation(validation("q1", "list", 70, true, base_time()));
    }
    let collector = make_collector(&store);
    assert_eq!(collector.data().validations.len(), 1);
}

#[test]
fn corrupt_metrics_are_discarded() {
    let store = Arc::new(MemoryStore::new());
    store.set(keys::METRICS, "{\"validations\": 7}").unwrap();
    let collector = make_collector(&store);
    assert!(collector.data().is_empty());
}

/// T-MET-02: oldest events are dropped past the cap.
#[test]
fn retention_cap_drops_oldest() {
    let store = Arc::new(MemoryStore::new());
    let config = MetricsConfig {
        max_events: Some(3),
        ..Default::default()
    };
    let mut collector = MetricsCollector::with_config(store.clone(), config);
    for i in 0..5u8 {
        let at = base_time() + Duration::minutes(i64::from(i));
        collector.record_validation(validation(&format!("q{i}"), "list", i, true, at));
    }
    let ids: Vec<&str> = collector
        .data()
        .validations
        .iter()
        .map(|v| v.question_id.as_str())
        .collect();
    assert_eq!(ids, vec!["q2", "q3", "q4"]);
}

#[test]
fn retention_keeps_newest_regardless_of_arrival() {
    let config = MetricsConfig {
        max_events: Some(2),
        ..Default::default()
    };
    let t = base_time();
    let mut collector = MetricsCollector::with_config(Arc::new(MemoryStore::new()), config);
    // a late-arriving event is older than everything already recorded
    collector.record_validation(validation("b", "list", 40, false, t + Duration::hours(1)));
    collector.record_validation(validation("c", "list", 40, false, t + Duration::hours(2)));
    collector.record_validation(validation("a", "list", 100, true, t));

    let mut ids: Vec<&str> = collector
        .data()
        .validations
        .iter()
        .map(|v| v.question_id.as_str())
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["b", "c"]);
    let m = collector.metrics_at(t + Duration::hours(3));
    assert_eq!(m.compliance_rate, 0.0);
    assert_eq!(m.average_score, 40.0);
}

#[test]
fn event_from_result_feeds_collector() {
    let validator = FormatValidator::new();
    let library = PatternLibrary::new();
    let pattern = library.get_pattern("process").unwrap();
    let result = validator.validate("- Install it\n- Run it", pattern);
    assert!(!result.is_valid);

    let event = ValidationEvent::from_result("q9", &pattern.id, &result).with_channel("cli");
    assert_eq!(event.score, result.score);
    assert_eq!(event.violation_count, result.violations.len());

    let mut collector = make_collector(&Arc::new(MemoryStore::new()));
    collector.record_validation(event);
    let m = collector.metrics();
    assert_eq!(m.total_validations, 1);
    assert_eq!(m.compliance_rate, 0.0);
    assert_eq!(m.average_score, f64::from(result.score));
    assert_eq!(m.pattern_usage["process"].validations, 1);
    assert_eq!(m.channel_breakdown[0].channel, "cli");
}

#[test]
fn export_import_and_clear() {
    let store = Arc::new(MemoryStore::new());
    let mut source = make_collector(&store);
    source.record_validation(validation("q1", "list", 70, true, base_time()));
    source.record_pattern_detection(PatternDetectionEvent::new("q1", Some("list".into()), 0.4).at(base_time()));
    let exported = source.export_data();

    let mut target = make_collector(&Arc::new(MemoryStore::new()));
    target.import_data(&exported).unwrap();
    assert_eq!(target.data(), source.data());

    let err = target.import_data("{ \"validations\": 7 }").unwrap_err();
    assert!(matches!(err, ConfigError::MalformedImport { .. }));
    assert_eq!(target.data(), source.data());

    source.clear_metrics();
    assert!(source.data().is_empty());
    assert!(store.get(keys::METRICS).unwrap().is_none());
}

fn arb_event() -> impl Strategy<Value = ValidationEvent> {
    (0u8..4, 0u8..=100, any::<bool>(), 0i64..72, prop::option::of("[a-c]"))
        .prop_map(|(q, score, valid, hours, channel)| ValidationEvent {
            question_id: format!("q{q}"),
            pattern_id: if q % 2 == 0 { "list".into() } else { "process".into() },
            score,
            is_valid: valid,
            violation_count: usize::from(score % 5),
            channel,
            timestamp: base_time() - Duration::hours(hours),
        })
}

proptest! {
    /// T-MET-03: aggregation does not depend on event order.
    #[test]
    fn aggregation_is_order_independent(
        events in prop::collection::vec(arb_event(), 0..40),
        seed in any::<u64>(),
    ) {
        let mut shuffled = events.clone();
        // deterministic Fisher-Yates driven by the seed
        let mut state = seed;
        for i in (1..shuffled.len()).rev() {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let j = (state >> 33) as usize % (i + 1);
            shuffled.swap(i, j);
        }
        let a = aggregate(&MetricsData { validations: events, ..Default::default() }, base_time(), 7);
        let b = aggregate(&MetricsData { validations: shuffled, ..Default::default() }, base_time(), 7);
        prop_assert_eq!(a, b);
    }

    /// Retention keeps the same events whichever order they arrive in.
    #[test]
    fn retention_is_order_independent(
        events in prop::collection::vec(arb_event(), 1..30),
        cap in 1usize..10,
    ) {
        let config = MetricsConfig { max_events: Some(cap), ..Default::default() };
        let mut forward = MetricsCollector::with_config(Arc::new(MemoryStore::new()), config.clone());
        let mut backward = MetricsCollector::with_config(Arc::new(MemoryStore::new()), config);
        for event in &events {
            forward.record_validation(event.clone());
        }
        for event in events.iter().rev() {
            backward.record_validation(event.clone());
        }

        let kept = |c: &MetricsCollector| {
            let mut v = c.data().validations.clone();
            v.sort_by(ValidationEvent::chronological);
            v
        };
        prop_assert_eq!(kept(&forward).len(), events.len().min(cap));
        prop_assert_eq!(kept(&forward), kept(&backward));
        prop_assert_eq!(forward.metrics_at(base_time()), backward.metrics_at(base_time()));
    }

    #[test]
    fn rates_are_percentages(events in prop::collection::vec(arb_event(), 0..40)) {
        let m = aggregate(&MetricsData { validations: events, ..Default::default() }, base_time(), 7);
        for rate in [m.compliance_rate, m.validation_pass_rate, m.average_score] {
            prop_assert!((0.0..=100.0).contains(&rate));
        }
        prop_assert_eq!(m.trends.len(), 7);
    }
}
