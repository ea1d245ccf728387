//! Locating violations inside an answer.

use shapeguard_analysis::patterns::PatternLibrary;
use shapeguard_analysis::validation::location::{line_start, resolve};
use shapeguard_analysis::validation::FormatValidator;
use shapeguard_core::types::Location;

const ANSWER: &str = "alpha beta\ngamma beta\nDelta";

fn at(line: usize, column: usize) -> Option<Location> {
    Some(Location { line, column })
}

#[test]
fn hinted_line_wins() {
    assert_eq!(resolve(ANSWER, "beta", Some(2)), at(2, 7));
}

#[test]
fn wrong_hint_falls_back_to_full_scan() {
    assert_eq!(resolve(ANSWER, "beta", Some(3)), at(1, 7));
    assert_eq!(resolve(ANSWER, "beta", None), at(1, 7));
}

#[test]
fn case_insensitive_scan_is_last() {
    assert_eq!(resolve(ANSWER, "delta", None), at(3, 1));
    assert_eq!(resolve(ANSWER, "GAMMA", Some(1)), at(2, 1));
}

#[test]
fn no_match_uses_hint_or_nothing() {
    assert_eq!(resolve(ANSWER, "omega", None), None);
    assert_eq!(resolve(ANSWER, "omega", Some(2)), at(2, 1));
    assert_eq!(resolve(ANSWER, "omega", Some(9)), None);
    assert_eq!(resolve(ANSWER, "   ", Some(3)), at(3, 1));
    assert_eq!(resolve("", "beta", None), None);
}

#[test]
fn columns_count_characters() {
    assert_eq!(resolve("héllo wörld", "wörld", None), at(1, 7));
}

#[test]
fn line_start_skips_indent() {
    assert_eq!(line_start("first\n   - nested", 2), at(2, 4));
    assert_eq!(line_start("first", 0), None);
    assert_eq!(line_start("first", 2), None);
}

#[test]
fn checker_findings_point_at_content() {
    let library = PatternLibrary::new();
    let process = library.get_pattern("process").unwrap();
    let result = FormatValidator::new().validate(
        "1. Run the migrations\n2. the database is configured",
        process,
    );
    let verb = result
        .violations
        .iter()
        .find(|v| v.rule == "process-action-verb")
        .unwrap();
    assert_eq!(verb.location, at(2, 4));

    let result = FormatValidator::new().validate(
        "1. Install the CLI\n2. Run it, maybe twice",
        process,
    );
    let vague = result
        .violations
        .iter()
        .find(|v| v.rule == "process-vague-language")
        .unwrap();
    assert_eq!(vague.location, at(2, 12));
}
