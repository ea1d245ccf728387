//! Format validation: per-format section checkers, custom rule predicates,
//! violation enrichment and scoring.

pub mod checkers;
pub mod enrich;
pub mod location;
pub mod predicates;
pub mod scan;
pub mod validator;
pub mod vocab;

pub use predicates::{RulePredicate, RulePredicateRegistry};
pub use validator::FormatValidator;
