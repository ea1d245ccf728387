//! Rule predicate errors.

use super::error_code::{self, ShapeguardErrorCode};

/// Errors raised while evaluating a custom validation rule. These never fail a
/// validation run; the validator logs them and skips the rule.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("Unknown rule predicate: {0}")]
    UnknownPredicate(String),

    #[error("Predicate {predicate} failed: {message}")]
    PredicateFailed { predicate: String, message: String },

    #[error("Predicate {predicate} panicked")]
    PredicatePanicked { predicate: String },
}

impl ShapeguardErrorCode for RuleError {
    fn error_code(&self) -> &'static str {
        error_code::RULE_ERROR
    }
}
