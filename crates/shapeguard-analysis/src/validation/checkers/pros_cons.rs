//! Pros/cons balance checks.

use shapeguard_core::types::{Constraint, Section, ValidationViolation};

use crate::validation::location::resolve;
use crate::validation::scan::{self, Heading};

const PRO_WORDS: &[&str] = &["pros", "pro", "advantages", "advantage", "benefits", "strengths", "upsides"];
const CON_WORDS: &[&str] = &[
    "cons", "con", "disadvantages", "disadvantage", "drawbacks", "limitations", "weaknesses",
    "downsides",
];
const DEFAULT_MAX_RATIO: f64 = 3.0;

pub fn check(answer: &str, section: &Section) -> Vec<ValidationViolation> {
    let mut out = Vec::new();
    let headings = scan::headings(answer);
    // A title like "Pros and Cons of X" names both sides and is neither.
    let side = |words: &[&str], other: &[&str]| -> Option<Heading> {
        headings
            .iter()
            .find(|h| h.mentions(words) && !h.mentions(other))
            .cloned()
    };
    let pros = side(PRO_WORDS, CON_WORDS);
    let cons = side(CON_WORDS, PRO_WORDS);
    if !section.required && pros.is_none() && cons.is_none() {
        return out;
    }

    if pros.is_none() {
        out.push(ValidationViolation::error(
            "pros-cons-missing-pros",
            "No 'Pros' or 'Advantages' heading found",
            "Add a '## Pros' heading followed by bullet points",
        ));
    }
    if cons.is_none() {
        out.push(ValidationViolation::error(
            "pros-cons-missing-cons",
            "No 'Cons' or 'Disadvantages' heading found",
            "Add a '## Cons' heading followed by bullet points",
        ));
    }
    let (Some(pros), Some(cons)) = (pros, cons) else {
        return out;
    };

    let count = |h: &Heading| {
        scan::list_items_between(answer, h.line, scan::section_end(&headings, h.line)).len()
    };
    let pro_count = count(&pros);
    let con_count = count(&cons);

    for (heading, n) in [(&pros, pro_count), (&cons, con_count)] {
        if n == 0 {
            out.push(
                ValidationViolation::warning(
                    "pros-cons-empty-section",
                    format!("'{}' has no bullet points", heading.text),
                    "List at least one point under each heading",
                )
                .at(resolve(answer, &heading.text, Some(heading.line))),
            );
        }
    }

    let max_ratio = section
        .constraints
        .iter()
        .find_map(|c| match c {
            Constraint::MaxImbalanceRatio(r) => Some(*r),
            _ => None,
        })
        .unwrap_or(DEFAULT_MAX_RATIO);
    if pro_count > 0 && con_count > 0 {
        let (hi, lo) = (pro_count.max(con_count), pro_count.min(con_count));
        let ratio = hi as f64 / lo as f64;
        if ratio > max_ratio {
            out.push(ValidationViolation::warning(
                "pros-cons-imbalance",
                format!("Pros and cons are imbalanced ({pro_count} vs {con_count})"),
                "Give both sides comparable coverage",
            ));
        }
    }

    if cons.line < pros.line {
        out.push(
            ValidationViolation::info(
                "pros-cons-ordering",
                "Cons are listed before pros",
                "Present the pros first, then the cons",
            )
            .at(resolve(answer, &cons.text, Some(cons.line))),
        );
    }

    out
}
