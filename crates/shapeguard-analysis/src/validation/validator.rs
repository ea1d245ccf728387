//! FormatValidator: validates an answer against a pattern's sections and
//! custom rules, then scores and enriches the findings.

use shapeguard_core::config::ScoringConfig;
use shapeguard_core::types::{
    FormatPattern, Severity, ValidationOptions, ValidationResult, ValidationRule,
    ValidationViolation,
};

use super::checkers;
use super::enrich::enrich;
use super::location;
use super::predicates::RulePredicateRegistry;

/// Stateless validator. Cheap to clone; share one per process.
#[derive(Debug, Clone, Default)]
pub struct FormatValidator {
    scoring: ScoringConfig,
    predicates: RulePredicateRegistry,
}

impl FormatValidator {
    /// Default penalties and the built-in predicates.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scoring(scoring: ScoringConfig) -> Self {
        Self {
            scoring,
            predicates: RulePredicateRegistry::with_builtins(),
        }
    }

    pub fn with_predicates(mut self, predicates: RulePredicateRegistry) -> Self {
        self.predicates = predicates;
        self
    }

    pub fn predicates(&self) -> &RulePredicateRegistry {
        &self.predicates
    }

    pub fn predicates_mut(&mut self) -> &mut RulePredicateRegistry {
        &mut self.predicates
    }

    /// Validate with default options. Never fails.
    pub fn validate(&self, answer: &str, pattern: &FormatPattern) -> ValidationResult {
        self.validate_with(answer, pattern, &ValidationOptions::default())
    }

    /// Validate honoring strict mode and disabled rules.
    pub fn validate_with(
        &self,
        answer: &str,
        pattern: &FormatPattern,
        options: &ValidationOptions,
    ) -> ValidationResult {
        if answer.trim().is_empty() {
            return ValidationResult::clean();
        }

        let mut violations: Vec<ValidationViolation> = pattern
            .structure
            .sections
            .iter()
            .flat_map(|section| checkers::check_section(answer, section, pattern))
            .collect();

        for rule in pattern.structure.rules.iter().filter(|r| r.enabled) {
            if options.disabled_rules.contains(&rule.id) {
                continue;
            }
            if let Some(violation) = self.evaluate_rule(rule, answer) {
                violations.push(violation);
            }
        }

        violations.retain(|v| !options.disabled_rules.contains(&v.rule));
        if options.strict_mode {
            for v in &mut violations {
                if v.severity == Severity::Warning {
                    v.severity = Severity::Error;
                }
            }
        }
        let violations: Vec<ValidationViolation> = violations.into_iter().map(enrich).collect();

        let score = self.score(&violations);
        let is_valid = !violations.iter().any(|v| v.severity == Severity::Error);
        let suggestions = suggestions(&violations);

        tracing::debug!(
            pattern = %pattern.id,
            score,
            violations = violations.len(),
            "validated answer"
        );

        ValidationResult {
            is_valid,
            score,
            violations,
            suggestions,
        }
    }

    /// 100 minus per-severity penalties, floored at 0. Any finding keeps the
    /// score below 100.
    pub fn score(&self, violations: &[ValidationViolation]) -> u8 {
        if violations.is_empty() {
            return 100;
        }
        let penalty: u32 = violations
            .iter()
            .map(|v| match v.severity {
                Severity::Error => self.scoring.effective_error_penalty(),
                Severity::Warning => self.scoring.effective_warning_penalty(),
                Severity::Info => self.scoring.effective_info_penalty(),
            })
            .fold(0u32, |acc, p| acc.saturating_add(p));
        let score = 100u32.saturating_sub(penalty).min(99);
        score as u8
    }

    /// Run one custom rule. Predicate errors and panics are logged and the
    /// rule is skipped.
    fn evaluate_rule(&self, rule: &ValidationRule, answer: &str) -> Option<ValidationViolation> {
        let predicate = rule.predicate.as_deref()?;
        match self.predicates.evaluate(predicate, answer) {
            Ok(true) => None,
            Ok(false) => {
                let message = if rule.description.is_empty() {
                    format!("Custom rule '{}' failed", rule.id)
                } else {
                    rule.description.clone()
                };
                let found = self
                    .predicates
                    .offending_text(predicate, answer)
                    .and_then(|needle| location::resolve(answer, &needle, None));
                Some(
                    ValidationViolation::new(
                        rule.id.clone(),
                        rule.severity,
                        message,
                        format!("Revise the answer so that rule '{}' passes", rule.id),
                    )
                    .at(found),
                )
            }
            Err(e) => {
                tracing::warn!(rule = %rule.id, error = %e, "skipping rule after predicate failure");
                None
            }
        }
    }
}

/// Distinct fix texts, most severe first.
fn suggestions(violations: &[ValidationViolation]) -> Vec<String> {
    let mut ordered: Vec<&ValidationViolation> = violations.iter().collect();
    ordered.sort_by_key(|v| v.severity);
    let mut out: Vec<String> = Vec::new();
    for v in ordered {
        if !v.fix.is_empty() && !out.contains(&v.fix) {
            out.push(v.fix.clone());
        }
    }
    out
}
