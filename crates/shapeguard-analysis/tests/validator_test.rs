//! Format validation: checker dispatch, scoring, strict mode, rule isolation.

use std::collections::HashSet;
use std::sync::Arc;

use proptest::prelude::*;
use shapeguard_analysis::patterns::PatternLibrary;
use shapeguard_analysis::validation::{FormatValidator, RulePredicate, RulePredicateRegistry};
use shapeguard_core::config::ScoringConfig;
use shapeguard_core::errors::RuleError;
use shapeguard_core::types::{
    FixPriority, FormatPattern, Location, PatternStructure, Section, SectionFormat, Severity,
    ValidationOptions, ValidationRule, ValidationViolation,
};

fn make_pattern(id: &str) -> FormatPattern {
    PatternLibrary::new()
        .get_pattern(id)
        .cloned()
        .unwrap_or_else(|| panic!("built-in pattern {id} missing"))
}

fn rule_ids(violations: &[ValidationViolation]) -> Vec<&str> {
    violations.iter().map(|v| v.rule.as_str()).collect()
}

const GOOD_STEPS: &str = "1. Configure the database connection\n2. Run the migrations\n3. Deploy the service";

/// T-VAL-01: a comparison answer without a table fails with table-missing.
#[test]
fn missing_table_is_an_error() {
    let validator = FormatValidator::new();
    let result = validator.validate(
        "REST uses many endpoints while GraphQL exposes a single one.",
        &make_pattern("comparison-table"),
    );
    assert!(!result.is_valid, "answer without a table must be invalid");
    assert!(result.score <= 80, "score {} should be at most 80", result.score);
    let missing = result
        .violations
        .iter()
        .find(|v| v.rule == "table-missing")
        .expect("table-missing violation");
    assert_eq!(missing.severity, Severity::Error);
    assert!(missing.message.starts_with("[ERROR] "), "message: {}", missing.message);
    assert_eq!(missing.category.as_deref(), Some("Table Structure"));
    assert_eq!(missing.priority, Some(FixPriority::MustFix));
    assert!(!result.suggestions.is_empty());
}

/// T-VAL-02: well-formed numbered steps validate cleanly.
#[test]
fn well_formed_process_is_clean() {
    let validator = FormatValidator::new();
    let result = validator.validate(GOOD_STEPS, &make_pattern("process"));
    assert!(result.is_valid, "violations: {:?}", rule_ids(&result.violations));
    assert_eq!(result.error_count(), 0);
    assert_eq!(result.score, 100);
}

#[test]
fn out_of_order_steps_fail_numbering() {
    let validator = FormatValidator::new();
    let result = validator.validate(
        "1. Install the CLI\n3. Configure credentials\n4. Run the deploy",
        &make_pattern("process"),
    );
    assert!(rule_ids(&result.violations).contains(&"process-numbering"));
    assert!(!result.is_valid);
}

#[test]
fn bullets_instead_of_steps_are_flagged() {
    let validator = FormatValidator::new();
    let result = validator.validate("- Install it\n- Run it", &make_pattern("process"));
    assert!(rule_ids(&result.violations).contains(&"process-missing-steps"));
}

#[test]
fn empty_answer_is_clean() {
    let validator = FormatValidator::new();
    for answer in ["", "   \n\t"] {
        let result = validator.validate(answer, &make_pattern("comparison-table"));
        assert!(result.is_valid);
        assert_eq!(result.score, 100);
        assert!(result.violations.is_empty());
    }
}

/// T-VAL-03: strict mode promotes warnings to errors.
#[test]
fn strict_mode_promotes_warnings() {
    let validator = FormatValidator::new();
    let answer = "1. the database is configured\n2. Run the migrations";
    let pattern = make_pattern("process");

    let relaxed = validator.validate(answer, &pattern);
    assert!(relaxed.is_valid);
    assert!(rule_ids(&relaxed.violations).contains(&"process-action-verb"));

    let options = ValidationOptions {
        strict_mode: true,
        ..Default::default()
    };
    let strict = validator.validate_with(answer, &pattern, &options);
    assert!(!strict.is_valid, "strict mode must fail on warnings");
    let promoted = strict
        .violations
        .iter()
        .find(|v| v.rule == "process-action-verb")
        .unwrap();
    assert_eq!(promoted.severity, Severity::Error);
    assert!(promoted.message.starts_with("[ERROR] "));
    assert!(strict.score < relaxed.score);
}

#[test]
fn disabled_rules_are_dropped() {
    let validator = FormatValidator::new();
    let answer = "1. the database is configured\n2. Run the migrations";
    let options = ValidationOptions {
        strict_mode: false,
        disabled_rules: HashSet::from(["process-action-verb".to_string()]),
    };
    let result = validator.validate_with(answer, &make_pattern("process"), &options);
    assert!(!rule_ids(&result.violations).contains(&"process-action-verb"));
    assert_eq!(result.score, 100);
}

const GOOD_TABLE: &str = "| Feature | REST | GraphQL |\n|---------|------|---------|\n| Endpoints | Many | One |\n| Fetching | Fixed | Client-defined |\n| Caching | HTTP-native | Custom |";

#[test]
fn placeholder_rule_fires_on_template_text() {
    let validator = FormatValidator::new();
    let answer = format!("{GOOD_STEPS}\n\nLorem ipsum dolor sit amet.");
    let result = validator.validate(&answer, &make_pattern("process"));
    assert!(!result.is_valid, "a failing custom rule is an error");
    let placeholder = result
        .violations
        .iter()
        .find(|v| v.rule == "process:no-placeholders")
        .expect("placeholder violation");
    assert_eq!(placeholder.severity, Severity::Error);
    assert_eq!(placeholder.location, Some(Location { line: 5, column: 1 }));
}

#[test]
fn placeholder_text_invalidates_a_clean_table() {
    let validator = FormatValidator::new();
    let pattern = make_pattern("comparison-table");
    assert!(validator.validate(GOOD_TABLE, &pattern).violations.is_empty());

    let answer = format!("{GOOD_TABLE}\n\nLorem ipsum dolor sit amet.");
    let result = validator.validate(&answer, &pattern);
    assert!(!result.is_valid);
    assert_eq!(rule_ids(&result.violations), vec!["comparison-table:no-placeholders"]);
    let v = &result.violations[0];
    assert_eq!(v.severity, Severity::Error);
    assert_eq!(v.location, Some(Location { line: 7, column: 1 }));
}

#[test]
fn raw_html_rule_points_at_the_tag() {
    let validator = FormatValidator::new();
    let answer = format!("{GOOD_TABLE}\n\nBoth work well.<br>");
    let result = validator.validate(&answer, &make_pattern("comparison-table"));
    assert!(!result.is_valid);
    let html = result
        .violations
        .iter()
        .find(|v| v.rule == "comparison-table:no-raw-html")
        .expect("raw html violation");
    assert_eq!(html.location, Some(Location { line: 7, column: 16 }));
}

#[test]
fn scoring_config_changes_penalties() {
    let answer = "REST uses many endpoints while GraphQL exposes a single one.";
    let pattern = make_pattern("comparison-table");
    let default = FormatValidator::new().validate(answer, &pattern);
    assert_eq!(default.score, 80);

    let harsh = FormatValidator::with_scoring(ScoringConfig {
        error_penalty: Some(50),
        ..Default::default()
    });
    let result = harsh.validate(answer, &pattern);
    assert_eq!(rule_ids(&result.violations), vec!["table-missing"]);
    assert_eq!(result.score, 50);
    assert_eq!(harsh.score(&[ValidationViolation::warning("w", "m", "f")]), 90);
}

struct Exploding;

impl RulePredicate for Exploding {
    fn name(&self) -> &str {
        "exploding"
    }

    fn check(&self, _answer: &str) -> Result<bool, RuleError> {
        panic!("predicate bug")
    }
}

struct AlwaysFails;

impl RulePredicate for AlwaysFails {
    fn name(&self) -> &str {
        "always-fails"
    }

    fn check(&self, _answer: &str) -> Result<bool, RuleError> {
        Ok(false)
    }
}

fn make_custom_pattern(rules: Vec<ValidationRule>) -> FormatPattern {
    FormatPattern {
        id: "custom".into(),
        name: "Custom".into(),
        description: String::new(),
        keywords: vec![],
        priority: 0,
        structure: PatternStructure {
            sections: vec![Section::new("steps", SectionFormat::Process)],
            rules,
        },
        template: String::new(),
        examples: vec![],
    }
}

/// T-VAL-04: a panicking predicate is isolated and its rule skipped.
#[test]
fn panicking_predicate_is_skipped() {
    let mut registry = RulePredicateRegistry::with_builtins();
    registry.register(Arc::new(Exploding));
    registry.register(Arc::new(AlwaysFails));
    let validator = FormatValidator::new().with_predicates(registry);

    let pattern = make_custom_pattern(vec![
        ValidationRule::new("custom:boom", "custom", Severity::Error, "exploding"),
        ValidationRule::new("custom:never", "custom", Severity::Warning, "always-fails")
            .with_description("Never passes"),
        ValidationRule::new("custom:ghost", "custom", Severity::Error, "not-registered"),
    ]);
    let result = validator.validate(GOOD_STEPS, &pattern);

    let ids = rule_ids(&result.violations);
    assert!(!ids.contains(&"custom:boom"));
    assert!(!ids.contains(&"custom:ghost"));
    let never = result.violations.iter().find(|v| v.rule == "custom:never").unwrap();
    assert_eq!(never.severity, Severity::Warning);
    assert_eq!(never.category.as_deref(), Some("Custom Rule"));
    assert!(result.is_valid);
}

#[test]
fn predicates_registered_in_place_take_effect() {
    let pattern = make_custom_pattern(vec![ValidationRule::new(
        "custom:never",
        "custom",
        Severity::Error,
        "always-fails",
    )]);
    let mut validator = FormatValidator::new();
    assert!(validator.validate(GOOD_STEPS, &pattern).is_valid, "unknown predicates are skipped");

    validator.predicates_mut().register(Arc::new(AlwaysFails));
    let result = validator.validate(GOOD_STEPS, &pattern);
    assert!(!result.is_valid);
    assert_eq!(rule_ids(&result.violations), vec!["custom:never"]);
    assert_eq!(result.violations[0].location, None);
}

#[test]
fn registry_reports_failures() {
    let mut registry = RulePredicateRegistry::empty();
    registry.register(Arc::new(Exploding));
    assert!(matches!(
        registry.evaluate("exploding", "x"),
        Err(RuleError::PredicatePanicked { .. })
    ));
    assert!(matches!(
        registry.evaluate("missing", "x"),
        Err(RuleError::UnknownPredicate(_))
    ));
}

#[test]
fn score_penalizes_by_severity() {
    let validator = FormatValidator::new();
    assert_eq!(validator.score(&[]), 100);
    let info = vec![ValidationViolation::info("x", "m", "f")];
    assert_eq!(validator.score(&info), 95);
    let mixed = vec![
        ValidationViolation::error("a", "m", "f"),
        ValidationViolation::warning("b", "m", "f"),
    ];
    assert_eq!(validator.score(&mixed), 70);
    let many: Vec<_> = (0..10).map(|i| ValidationViolation::error(format!("e{i}"), "m", "f")).collect();
    assert_eq!(validator.score(&many), 0);
}

proptest! {
    /// T-VAL-05: score bounds and validity agree with the violation list.
    #[test]
    fn result_invariants_hold(answer in "\\PC{0,300}", idx in 0usize..9) {
        let library = PatternLibrary::new();
        let pattern = &library.all_patterns()[idx];
        let result = FormatValidator::new().validate(&answer, pattern);
        prop_assert!(result.score <= 100);
        prop_assert_eq!(result.score == 100, result.violations.is_empty());
        prop_assert_eq!(result.is_valid, result.error_count() == 0);
    }
}
