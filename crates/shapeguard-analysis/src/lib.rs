//! shapeguard-analysis: pattern detection, format validation, auto-formatting,
//! configuration, override auditing and compliance metrics.
//!
//! Detector, validator and formatter are pure functions over strings and
//! pattern definitions. `ConfigurationManager` and `MetricsCollector` are
//! explicit handles over an injected `KeyValueStore`.

pub mod configuration;
pub mod formatting;
pub mod metrics;
pub mod overrides;
pub mod patterns;
pub mod validation;

pub use configuration::{ConfigurationManager, LocalMetrics, PatternConfiguration};
pub use formatting::{suggest_fixes, AutoFormatter, FixSuggestion};
pub use metrics::{AggregatedMetrics, MetricsCollector};
pub use overrides::OverrideUtils;
pub use patterns::{PatternDetector, PatternLibrary};
pub use validation::{FormatValidator, RulePredicate, RulePredicateRegistry};
