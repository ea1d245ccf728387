//! Fix backlog generation from a validation result.

use serde::{Deserialize, Serialize};
use shapeguard_core::types::{Location, Severity, ValidationResult};

/// Rules the auto-formatter knows how to address.
const AUTO_FIXABLE_RULES: &[&str] = &[
    "table-missing",
    "table-header-separator",
    "table-separator-mismatch",
    "table-inconsistent-columns",
    "definition-blank-line",
    "definition-characteristics",
    "list-missing",
    "list-inconsistent-bullets",
    "list-numbering",
    "process-missing-steps",
    "process-numbering",
    "code-language-tag",
    "diagram-missing",
    "pros-cons-missing-pros",
    "pros-cons-missing-cons",
    "troubleshooting-missing-problem",
    "troubleshooting-missing-solutions",
];

/// One entry in the fix backlog. Applying it is the caller's decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixSuggestion {
    pub rule: String,
    pub severity: Severity,
    /// 100 for errors, 50 for warnings, 25 for info.
    pub priority: u32,
    pub description: String,
    pub location: Option<Location>,
    /// The auto-formatter has a transform aimed at this rule.
    pub auto_fixable: bool,
}

/// Rank the violations of `result` into a backlog, highest priority first.
/// Equal priorities keep their validation order.
pub fn suggest_fixes(result: &ValidationResult) -> Vec<FixSuggestion> {
    let mut fixes: Vec<FixSuggestion> = result
        .violations
        .iter()
        .map(|v| FixSuggestion {
            rule: v.rule.clone(),
            severity: v.severity,
            priority: v.severity.fix_priority(),
            description: v.fix.clone(),
            location: v.location,
            auto_fixable: AUTO_FIXABLE_RULES.contains(&v.rule.as_str()),
        })
        .collect();
    fixes.sort_by(|a, b| b.priority.cmp(&a.priority));
    fixes
}
