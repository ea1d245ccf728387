//! Auto-formatting transforms and fix ranking.

use shapeguard_analysis::formatting::{suggest_fixes, AutoFormatter, FormatKind};
use shapeguard_analysis::patterns::PatternLibrary;
use shapeguard_analysis::validation::scan;
use shapeguard_analysis::FormatValidator;
use shapeguard_core::types::{FormatPattern, PatternStructure, Section, SectionFormat, Severity};

fn make_pattern(id: &str) -> FormatPattern {
    PatternLibrary::new().get_pattern(id).cloned().unwrap()
}

fn format(answer: &str, id: &str) -> String {
    AutoFormatter::new().format(answer, &make_pattern(id))
}

/// T-FMT-01: a table missing its separator gets one.
#[test]
fn table_gets_separator_row() {
    let out = format("| Feature | A | B |\n| Speed | fast | slow |", "comparison-table");
    assert_eq!(
        out,
        "| Feature | A | B |\n| --- | --- | --- |\n| Speed | fast | slow |"
    );
}

#[test]
fn short_rows_are_padded_to_header_width() {
    let out = format("| Feature | A | B |\n|---|---|---|\n| Speed | fast |", "comparison-table");
    assert!(out.ends_with("| Speed | fast |  |"), "got: {out}");
}

#[test]
fn missing_table_gets_placeholder() {
    let out = format("REST and GraphQL differ in many ways.", "comparison-table");
    assert!(out.starts_with("REST and GraphQL differ in many ways.\n\n| Feature |"));
    assert_eq!(scan::tables(&out).len(), 1);
    let result = FormatValidator::new().validate(&out, &make_pattern("comparison-table"));
    assert!(!result.violations.iter().any(|v| v.rule == "table-missing"));
}

/// T-FMT-02: plain lines become numbered steps that validate cleanly.
#[test]
fn plain_lines_become_steps() {
    let out = format("Install the CLI\nConfigure credentials\nRun the deploy", "process");
    assert_eq!(out, "1. Install the CLI\n2. Configure credentials\n3. Run the deploy");
    let result = FormatValidator::new().validate(&out, &make_pattern("process"));
    assert!(result.is_valid);
    assert_eq!(result.score, 100);
}

#[test]
fn steps_are_renumbered() {
    let out = format("1. Install the CLI\n1. Configure credentials\n5. Run the deploy", "process");
    assert_eq!(out, "1. Install the CLI\n2. Configure credentials\n3. Run the deploy");
}

#[test]
fn code_inside_fences_is_not_numbered() {
    let answer = "Run the build:\n```bash\ncargo build\n```";
    let out = format(answer, "process");
    assert!(out.contains("```bash\ncargo build\n```"), "got: {out}");
}

#[test]
fn bullets_are_normalized() {
    assert_eq!(format("* one\n+ two\n- three", "list"), "- one\n- two\n- three");
    assert_eq!(format("alpha\nbeta", "best-practices"), "- alpha\n- beta");
}

#[test]
fn definition_gets_blank_line_and_bullets() {
    let out = format("A mutex is a lock.\nGuards data\nBlocks threads", "definition");
    assert_eq!(out, "A mutex is a lock.\n\n- Guards data\n- Blocks threads");
}

#[test]
fn untagged_fence_gets_language() {
    let out = format("```\nfn main() { let x = 1; }\n```", "code-example");
    assert!(out.starts_with("```rust\n"), "got: {out}");
    let out = format("```\nSELECT * FROM users;\n```", "code-example");
    assert!(out.starts_with("```sql\n"), "got: {out}");
}

#[test]
fn diagram_is_inserted_between_paragraphs() {
    let out = format("The client calls the API.\n\nThe API reads the database.", "architecture");
    let parts: Vec<&str> = out.split("\n\n").collect();
    assert_eq!(parts.len(), 3);
    assert!(parts[1].starts_with("```mermaid"));
    // already has a diagram: untouched
    let with_diagram = "```mermaid\ngraph TD\n  A --> B\n```";
    assert_eq!(format(with_diagram, "architecture"), with_diagram);
}

#[test]
fn untagged_diagram_is_recognized() {
    let answer = "Intro text.\n\n```\ngraph TD\n  A --> B\n```";
    assert_eq!(format(answer, "architecture"), answer);
    let result = FormatValidator::new().validate(answer, &make_pattern("architecture"));
    assert!(!result.violations.iter().any(|v| v.rule == "diagram-missing"));
}

#[test]
fn pros_heading_is_inserted_before_cons() {
    let out = format("## Cons\n- Slow", "pros-cons");
    let pros = out.find("## Pros").expect("pros heading");
    let cons = out.find("## Cons").expect("cons heading");
    assert!(pros < cons);
    assert_eq!(out.matches("## Cons").count(), 1);
}

#[test]
fn troubleshooting_gets_problem_and_solutions() {
    let out = format("The server returns 500 after deploy.", "troubleshooting");
    assert!(out.starts_with("## Problem\nThe server returns 500 after deploy."));
    assert!(out.contains("## Solutions\n1. "));
}

#[test]
fn blank_answer_is_unchanged() {
    assert_eq!(format("  ", "process"), "  ");
}

#[test]
fn unknown_pattern_falls_back_to_first_section() {
    let pattern = FormatPattern {
        id: "feature-matrix".into(),
        name: "Feature Matrix".into(),
        description: String::new(),
        keywords: vec![],
        priority: 0,
        structure: PatternStructure {
            sections: vec![Section::new("matrix", SectionFormat::Table)],
            rules: vec![],
        },
        template: String::new(),
        examples: vec![],
    };
    assert_eq!(FormatKind::for_pattern(&pattern), Some(FormatKind::Table));

    let empty = FormatPattern {
        structure: PatternStructure::default(),
        ..pattern
    };
    assert_eq!(FormatKind::for_pattern(&empty), None);
    assert_eq!(AutoFormatter::new().format("text", &empty), "text");
}

/// T-FMT-03: fix backlog is ordered by severity priority.
#[test]
fn fixes_are_ranked_by_priority() {
    let answer = "| Feature | A |\n|---|---|\n| Speed | |";
    let result = FormatValidator::new().validate(answer, &make_pattern("comparison-table"));
    let fixes = suggest_fixes(&result);
    assert_eq!(fixes.len(), result.violations.len());
    for pair in fixes.windows(2) {
        assert!(pair[0].priority >= pair[1].priority);
    }
    let first = &fixes[0];
    assert_eq!(first.severity, Severity::Error);
    assert_eq!(first.priority, 100);
    assert!(fixes.iter().any(|f| f.rule == "table-min-columns"));
}
