//! Resolve where in an answer a violation applies.
//!
//! Resolution never fails: a hinted line is tried first, then an exact scan
//! of every line, then a case-insensitive scan. When nothing matches, the
//! hint (if in range) is returned at column 1, otherwise `None`.

use shapeguard_core::types::Location;

pub fn resolve(answer: &str, needle: &str, hint: Option<usize>) -> Option<Location> {
    let lines: Vec<&str> = answer.lines().collect();
    let needle = needle.trim();
    let in_range = |line: usize| line >= 1 && line <= lines.len();

    if !needle.is_empty() {
        if let Some(line) = hint.filter(|l| in_range(*l)) {
            if let Some(col) = column_of(lines[line - 1], needle) {
                return Some(Location { line, column: col });
            }
        }
        for (idx, text) in lines.iter().enumerate() {
            if let Some(col) = column_of(text, needle) {
                return Some(Location {
                    line: idx + 1,
                    column: col,
                });
            }
        }
        let lower_needle = needle.to_lowercase();
        for (idx, text) in lines.iter().enumerate() {
            if let Some(col) = column_of(&text.to_lowercase(), &lower_needle) {
                return Some(Location {
                    line: idx + 1,
                    column: col,
                });
            }
        }
    }

    hint.filter(|l| in_range(*l))
        .map(|line| Location { line, column: 1 })
}

/// Location of the first non-blank character on `line`.
pub fn line_start(answer: &str, line: usize) -> Option<Location> {
    let text = answer.lines().nth(line.checked_sub(1)?)?;
    let column = text.chars().take_while(|c| c.is_whitespace()).count() + 1;
    Some(Location { line, column })
}

fn column_of(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .find(needle)
        .map(|byte| haystack[..byte].chars().count() + 1)
}
