//! Shared data model: patterns, rules, violations, overrides, settings.

pub mod override_record;
pub mod pattern;
pub mod question;
pub mod rule;
pub mod settings;
pub mod validation;

pub use override_record::{OverrideRecord, OverrideRequest};
pub use pattern::{Constraint, FormatPattern, PatternPatch, PatternStructure, Section, SectionFormat};
pub use question::Question;
pub use rule::{RulePatch, Severity, ValidationRule};
pub use settings::{ConfigurationSettings, SettingKey, SettingValue, SettingsPatch};
pub use validation::{FixPriority, Location, ValidationOptions, ValidationResult, ValidationViolation};
