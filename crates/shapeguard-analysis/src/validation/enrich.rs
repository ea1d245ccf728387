//! Violation enrichment: severity-prefixed message, category hint, worked
//! example and triage tag.

use shapeguard_core::types::{FixPriority, ValidationViolation};

/// Category label for a rule id, derived from its family prefix.
pub fn category_for(rule: &str) -> &'static str {
    let family = rule.split([':', '-']).next().unwrap_or(rule);
    match family {
        "table" => "Table Structure",
        "list" => "List Formatting",
        "process" => "Process Steps",
        "code" => "Code Quality",
        "diagram" => "Diagram",
        "definition" => "Definition Structure",
        "pros" => "Pros/Cons Balance",
        "troubleshooting" => "Troubleshooting Structure",
        _ => "Custom Rule",
    }
}

/// A short snippet showing the compliant shape for a rule family.
pub fn example_for(rule: &str) -> Option<&'static str> {
    let family = rule.split([':', '-']).next().unwrap_or(rule);
    let example = match family {
        "table" => "| Feature | Option A | Option B |\n|---------|----------|----------|\n| Speed   | Fast     | Slow     |",
        "list" => "- First item\n- Second item\n- Third item",
        "process" => "1. Install the package\n2. Configure the service\n3. Run the tests",
        "code" => "```python\n# Fetch the user record\nuser = fetch_user(user_id)\n```",
        "diagram" => "```mermaid\ngraph TD\n  Client --> API\n  API --> Database\n```",
        "definition" => "X is a Y that does Z.\n\n- Key trait one\n- Key trait two\n- Key trait three",
        "pros" => "## Pros\n- Fast startup\n\n## Cons\n- Higher memory use",
        "troubleshooting" => "## Problem\nThe service fails with a timeout error.\n\n## Causes\n- Network latency\n- Exhausted pool\n\n## Solutions\n1. Increase the timeout\n2. Restart the pool",
        _ => return None,
    };
    Some(example)
}

/// Fill in the presentation fields of a violation. Idempotent.
pub fn enrich(mut violation: ValidationViolation) -> ValidationViolation {
    let prefix = format!("[{}] ", violation.severity.label());
    if !violation.message.starts_with(&prefix) {
        violation.message = format!("{prefix}{}", strip_severity_prefix(&violation.message));
    }
    if violation.category.is_none() {
        violation.category = Some(category_for(&violation.rule).to_string());
    }
    if violation.example.is_none() {
        violation.example = example_for(&violation.rule).map(str::to_string);
    }
    violation.priority = Some(FixPriority::from_severity(violation.severity));
    violation
}

/// Drop a stale `[LABEL] ` prefix, e.g. after strict mode changed severity.
fn strip_severity_prefix(message: &str) -> &str {
    for label in ["[ERROR] ", "[WARNING] ", "[INFO] "] {
        if let Some(rest) = message.strip_prefix(label) {
            return rest;
        }
    }
    message
}
