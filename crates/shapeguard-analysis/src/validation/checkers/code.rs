//! Code block checks.

use std::sync::LazyLock;

use regex::Regex;
use shapeguard_core::types::{Constraint, Section, ValidationViolation};

use crate::validation::location::line_start;
use crate::validation::scan::{self, CodeBlock};
use crate::validation::vocab;

static ELLIPSIS_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(//|#|--|/\*)?\s*(\.\.\.|…)\s*(\*/)?\s*$").expect("static regex")
});

const COMMENT_PREFIXES: &[&str] = &["//", "#", "--", "/*", "*", "<!--", ";", "\"\"\""];

pub fn check(answer: &str, section: &Section) -> Vec<ValidationViolation> {
    let mut out = Vec::new();
    let blocks: Vec<CodeBlock> = scan::code_blocks(answer)
        .into_iter()
        .filter(|b| !b.lang.as_deref().is_some_and(vocab::is_diagram_language))
        .collect();

    if blocks.is_empty() {
        if section.required && !scan::has_inline_code(answer) {
            out.push(ValidationViolation::error(
                "code-missing",
                format!("Section '{}' requires a code example", section.name),
                "Add a fenced code block: ```language ... ```",
            ));
        }
        return out;
    }

    let comment_threshold = section.find(|c| match c {
        Constraint::CommentThreshold(n) => Some(*n),
        _ => None,
    });
    let min_lines = section.find(|c| match c {
        Constraint::MinLines(n) => Some(*n),
        _ => None,
    });
    let max_lines = section.find(|c| match c {
        Constraint::MaxLines(n) => Some(*n),
        _ => None,
    });

    for block in &blocks {
        let at = line_start(answer, block.start_line);

        if !block.is_closed() {
            out.push(
                ValidationViolation::error(
                    "code-unclosed-fence",
                    "Code block is never closed",
                    "Close the block with a matching ``` fence",
                )
                .at(at),
            );
        }
        if block.is_empty() {
            out.push(
                ValidationViolation::error(
                    "code-empty-block",
                    "Code block is empty",
                    "Put the example code inside the fences or remove the block",
                )
                .at(at),
            );
            continue;
        }

        match block.lang.as_deref() {
            None if section.has(&Constraint::RequireLanguageTag) => out.push(
                ValidationViolation::warning(
                    "code-language-tag",
                    "Code block has no language tag",
                    "Name the language after the opening fence, e.g. ```python",
                )
                .at(at),
            ),
            Some(lang) if !vocab::is_known_language(lang) => out.push(
                ValidationViolation::info(
                    "code-unknown-language",
                    format!("Unrecognized language tag '{lang}'"),
                    "Use a common tag such as python, javascript, rust or bash",
                )
                .at(at),
            ),
            _ => {}
        }

        if section.has(&Constraint::BalancedBrackets) && !brackets_balanced(&block.text()) {
            out.push(
                ValidationViolation::warning(
                    "code-unbalanced-brackets",
                    "Brackets in the code block are unbalanced",
                    "Check that every (, [ and { has a matching closer",
                )
                .at(at),
            );
        }

        if section.has(&Constraint::NoPlaceholders)
            && block.body.iter().any(|l| ELLIPSIS_LINE_RE.is_match(l))
        {
            out.push(
                ValidationViolation::warning(
                    "code-placeholder",
                    "Code block elides code with '...'",
                    "Show complete, runnable code instead of ellipsis placeholders",
                )
                .at(at),
            );
        }

        let lines = block.line_count();
        if let Some(min) = min_lines.filter(|m| lines < *m) {
            out.push(
                ValidationViolation::info(
                    "code-min-lines",
                    format!("Code block has {lines} lines, at least {min} expected"),
                    "Expand the example so it shows the full idea",
                )
                .at(at),
            );
        }
        if let Some(max) = max_lines.filter(|m| lines > *m) {
            out.push(
                ValidationViolation::warning(
                    "code-max-lines",
                    format!("Code block has {lines} lines, at most {max} allowed"),
                    "Trim the example to the lines that matter",
                )
                .at(at),
            );
        }
        if let Some(threshold) = comment_threshold {
            if lines > threshold && !has_comment(block) {
                out.push(
                    ValidationViolation::info(
                        "code-comments",
                        format!("Code block has {lines} lines and no comments"),
                        "Add a short comment explaining the key step",
                    )
                    .at(at),
                );
            }
        }
    }

    out
}

fn has_comment(block: &CodeBlock) -> bool {
    block.body.iter().any(|l| {
        let t = l.trim_start();
        COMMENT_PREFIXES.iter().any(|p| t.starts_with(p)) || l.contains(" // ") || l.contains(" # ")
    })
}

/// Bracket balance outside double-quoted strings and `//` comments.
pub fn brackets_balanced(code: &str) -> bool {
    let mut stack: Vec<char> = Vec::new();
    for line in code.lines() {
        let mut in_string = false;
        let mut escaped = false;
        let mut prev = '\0';
        for c in line.chars() {
            if in_string {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == '"' {
                    in_string = false;
                }
                continue;
            }
            match c {
                '"' => in_string = true,
                '/' if prev == '/' => break,
                '(' | '[' | '{' => stack.push(c),
                ')' | ']' | '}' => {
                    let open = match c {
                        ')' => '(',
                        ']' => '[',
                        _ => '{',
                    };
                    if stack.pop() != Some(open) {
                        return false;
                    }
                }
                _ => {}
            }
            prev = c;
        }
    }
    stack.is_empty()
}
