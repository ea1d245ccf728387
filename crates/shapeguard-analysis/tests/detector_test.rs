//! Pattern detection: keyword scoring, confidence, determinism.

use proptest::prelude::*;
use shapeguard_analysis::patterns::{PatternDetector, PatternLibrary};
use shapeguard_core::config::DetectionConfig;

fn make_detector() -> PatternDetector {
    PatternDetector::new(PatternLibrary::new())
}

/// T-DET-01: comparison questions beat the weaker "what is" definition hit.
#[test]
fn difference_question_detects_comparison_table() {
    let mut detector = make_detector();
    let pattern = detector
        .detect_pattern("What is the difference between REST and GraphQL?")
        .expect("a pattern should be detected");
    assert_eq!(pattern.id, "comparison-table");
    assert!(
        (detector.confidence() - 0.8).abs() < 1e-9,
        "expected confidence 0.8, got {}",
        detector.confidence()
    );

    let ranked = detector.suggested_patterns("What is the difference between REST and GraphQL?");
    assert_eq!(ranked[0].pattern.id, "comparison-table");
    assert!(
        ranked.iter().any(|s| s.pattern.id == "definition" && s.score < ranked[0].score),
        "definition should rank below comparison"
    );
}

/// T-DET-02: matching ignores case.
#[test]
fn detection_is_case_insensitive() {
    let mut detector = make_detector();
    let lower = detector.detect_pattern("how to deploy a service").map(|p| p.id);
    let upper = detector.detect_pattern("HOW TO DEPLOY A SERVICE").map(|p| p.id);
    assert_eq!(lower.as_deref(), Some("process"));
    assert_eq!(lower, upper);
}

/// T-DET-03: exact keyword questions saturate confidence.
#[test]
fn exact_keyword_question_is_fully_confident() {
    let mut detector = make_detector();
    let pattern = detector.detect_pattern("Pros and cons?").unwrap();
    assert_eq!(pattern.id, "pros-cons");
    assert_eq!(detector.confidence(), 1.0);
}

#[test]
fn short_or_unmatched_text_detects_nothing() {
    let mut detector = make_detector();
    assert!(detector.detect_pattern("hi").is_none());
    assert_eq!(detector.confidence(), 0.0);
    assert!(detector.detect_pattern("Tell me about lunch").is_none());
    assert_eq!(detector.last_question(), Some("Tell me about lunch"));

    detector.reset();
    assert!(detector.last_question().is_none());
}

#[test]
fn empty_library_detects_nothing() {
    let mut detector = PatternDetector::new(PatternLibrary::empty());
    assert!(detector.detect_pattern("What is the difference between A and B?").is_none());
}

#[test]
fn min_question_length_is_configurable() {
    let config = DetectionConfig {
        min_question_length: Some(50),
        ..Default::default()
    };
    let detector = PatternDetector::with_config(PatternLibrary::new(), config);
    assert!(detector.suggested_patterns("How to configure nginx").is_empty());
}

#[test]
fn replace_library_rebuilds_index() {
    let mut detector = make_detector();
    let mut library = PatternLibrary::empty();
    library
        .load_toml(
            r#"
[[patterns]]
id = "glossary"
name = "Glossary"
keywords = ["glossary"]

[[patterns.sections]]
name = "terms"
format = "list"
"#,
        )
        .unwrap();
    detector.replace_library(library);
    assert_eq!(
        detector.detect_pattern("Give me a glossary of terms").map(|p| p.id).as_deref(),
        Some("glossary")
    );
    assert!(detector.detect_pattern("How to configure nginx").is_none());
}

#[test]
fn equal_scores_rank_by_priority_then_library_order() {
    let mut library = PatternLibrary::empty();
    let count = library
        .load_toml(
            r#"
[[patterns]]
id = "zeta"
name = "Zeta"
keywords = ["widget"]
priority = 1

[[patterns.sections]]
name = "body"
format = "text"

[[patterns]]
id = "alpha"
name = "Alpha"
keywords = ["gadget"]
priority = 1

[[patterns.sections]]
name = "body"
format = "text"

[[patterns]]
id = "beta"
name = "Beta"
keywords = ["gizmo"]
priority = 3

[[patterns.sections]]
name = "body"
format = "text"
"#,
        )
        .unwrap();
    assert_eq!(count, 3);

    let mut detector = PatternDetector::new(library);
    let ranked: Vec<String> = detector
        .suggested_patterns("compare the widget, gadget and gizmo")
        .into_iter()
        .map(|s| s.pattern.id)
        .collect();
    assert_eq!(ranked, ["beta", "zeta", "alpha"]);
    assert_eq!(
        detector.detect_pattern("compare the widget, gadget and gizmo").map(|p| p.id).as_deref(),
        Some("beta")
    );
}

proptest! {
    /// T-DET-04: same input, same answer; confidence stays in [0, 1].
    #[test]
    fn detection_is_deterministic_and_bounded(text in "\\PC{0,80}") {
        let mut detector = make_detector();
        let first = detector.detect_pattern(&text).map(|p| p.id);
        let c1 = detector.confidence();
        let second = detector.detect_pattern(&text).map(|p| p.id);
        let c2 = detector.confidence();
        prop_assert_eq!(first, second);
        prop_assert_eq!(c1, c2);
        prop_assert!((0.0..=1.0).contains(&c1));
    }

    #[test]
    fn suggestions_are_sorted_by_score(text in "[a-z ]{0,60}") {
        let detector = make_detector();
        let ranked = detector.suggested_patterns(&text);
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }
}
