//! Override validation, resolution and reporting.

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use shapeguard_analysis::configuration::ConfigurationManager;
use shapeguard_analysis::overrides::OverrideUtils;
use shapeguard_core::traits::MemoryStore;
use shapeguard_core::types::{OverrideRequest, Question};

fn make_manager() -> ConfigurationManager {
    ConfigurationManager::new(Arc::new(MemoryStore::new()))
}

#[test]
fn short_or_missing_justification_is_rejected() {
    let manager = make_manager();
    let utils = OverrideUtils::new(&manager);

    let empty = utils.validate_override("q1", "  ", None);
    assert!(!empty.is_valid);
    assert_eq!(empty.errors.len(), 1);

    let short = utils.validate_override("q1", "too short", None);
    assert!(!short.is_valid);

    let no_id = utils.validate_override("", "The answer is a narrative walkthrough of an incident", None);
    assert!(!no_id.is_valid);
}

#[test]
fn brief_or_vague_justification_warns() {
    let manager = make_manager();
    let utils = OverrideUtils::new(&manager);
    let result = utils.validate_override("q1", "Maybe this is better", Some("list"));
    assert!(result.is_valid, "errors: {:?}", result.errors);
    assert_eq!(result.warnings.len(), 2, "warnings: {:?}", result.warnings);

    let blank = utils.validate_override(
        "q1",
        "The answer is a narrative walkthrough of an incident timeline",
        Some(" "),
    );
    assert!(blank.is_valid);
    assert_eq!(blank.warnings.len(), 1);
}

/// T-OVR-01: a second override for the same question is rejected.
#[test]
fn duplicate_override_is_an_error() {
    let mut manager = make_manager();
    manager.add_override(OverrideRequest::new("q1", "Narrative answer, tables would hide the story"));
    let utils = OverrideUtils::new(&manager);
    let result = utils.validate_override("q1", "Another long enough justification text", None);
    assert!(!result.is_valid);
    assert!(result.errors.iter().any(|e| e.contains("already exists")));
}

/// T-OVR-02: a pattern-less override disables formatting.
#[test]
fn override_without_pattern_disables_formatting() {
    let mut manager = make_manager();
    manager.add_override(OverrideRequest::new("q1", "Verbatim legal text must not be reshaped"));
    manager.add_override(
        OverrideRequest::new("q2", "This is really a list of tools, not a comparison").with_pattern("list"),
    );
    let utils = OverrideUtils::new(&manager);

    assert!(utils.should_bypass_formatting("q1"));
    assert_eq!(utils.effective_pattern("q1", Some("comparison-table")), None);

    assert!(!utils.should_bypass_formatting("q2"));
    assert_eq!(
        utils.effective_pattern("q2", Some("comparison-table")).as_deref(),
        Some("list")
    );

    assert!(!utils.should_bypass_formatting("q3"));
    assert_eq!(
        utils.effective_pattern("q3", Some("process")).as_deref(),
        Some("process")
    );
}

#[test]
fn enrich_question_copies_override_fields() {
    let mut manager = make_manager();
    manager.add_override(OverrideRequest::new("q1", "Verbatim legal text must not be reshaped"));
    let utils = OverrideUtils::new(&manager);

    let question = Question::new("q1", "What does clause 4 say?", "Clause 4 states ...");
    let enriched = utils.enrich_question(&question);
    assert!(enriched.has_override);
    assert!(enriched.bypass_formatting);
    assert_eq!(enriched.question, question);

    let plain = utils.enrich_question(&Question::new("q2", "Q", "A"));
    assert!(!plain.has_override);
    assert!(plain.override_justification.is_none());
}

#[test]
fn stats_bucket_missing_pattern_and_user() {
    let mut manager = make_manager();
    manager.add_override(OverrideRequest::new("q1", "Diagram answers need freeform layout").with_user("ana"));
    manager.add_override(
        OverrideRequest::new("q2", "Diagram layout conflicts with table format").with_pattern("architecture"),
    );
    let utils = OverrideUtils::new(&manager);
    let stats = utils.override_stats();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.by_pattern.get("no-pattern"), Some(&1));
    assert_eq!(stats.by_pattern.get("architecture"), Some(&1));
    assert_eq!(stats.by_user.get("anonymous"), Some(&1));
    assert_eq!(stats.by_user.get("ana"), Some(&1));
    assert_eq!(stats.most_common_reasons.first().map(String::as_str), Some("diagram"));
    assert!(stats.average_justification_length > 0.0);
}

#[test]
fn report_is_none_without_overrides() {
    let manager = make_manager();
    assert!(OverrideUtils::new(&manager).generate_override_report().is_none());
}

#[test]
fn age_recency_and_cleanup() {
    let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    let mut manager = make_manager();
    manager.add_override_at(
        OverrideRequest::new("old", "Historical answer kept as written"),
        now - Duration::days(40),
    );
    manager.add_override_at(
        OverrideRequest::new("older", "Historical answer kept as written"),
        now - Duration::days(90),
    );
    manager.add_override_at(
        OverrideRequest::new("new", "Fresh content still being reviewed"),
        now - Duration::days(2),
    );
    let utils = OverrideUtils::new(&manager);

    assert_eq!(utils.override_age_days_at("old", now), Some(40));
    assert!(utils.is_recent_override_at("new", now));
    assert!(!utils.is_recent_override_at("old", now));
    assert_eq!(utils.override_age_days_at("missing", now), None);

    let stale: Vec<&str> = utils
        .suggest_override_cleanup_at(30, now)
        .iter()
        .map(|o| o.question_id.as_str())
        .collect();
    assert_eq!(stale, vec!["older", "old"]);

    let report = utils.generate_override_report_at(now).unwrap();
    assert!(report.contains("Total overrides: 3"));
    assert!(report.contains("Recent (last 7 days): 1"));
}

#[test]
fn justification_quality_rewards_specifics() {
    let manager = make_manager();
    let utils = OverrideUtils::new(&manager);

    let weak = utils.validate_justification_quality("maybe stuff");
    let strong = utils.validate_justification_quality(
        "The answer documents 3 incompatible configuration formats. A single table would misrepresent them.",
    );
    assert!(strong.score > weak.score);
    assert!(strong.score >= 80, "strong score {}", strong.score);
    assert!(!weak.feedback.is_empty());
}
