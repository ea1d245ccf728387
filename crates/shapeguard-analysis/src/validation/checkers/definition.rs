//! Text section checks. With definition constraints present this enforces
//! the "one-sentence opener, blank line, 3-5 bullets" shape.

use shapeguard_core::types::{Constraint, Section, ValidationViolation};

use crate::validation::location::line_start;
use crate::validation::scan;

use super::list::top_level;

pub fn check(answer: &str, section: &Section) -> Vec<ValidationViolation> {
    let mut out = Vec::new();
    let wants_opener = section.has(&Constraint::SingleSentenceOpener)
        || section.has(&Constraint::BlankLineAfterOpener);
    let Some(first) = scan::first_content_line(answer) else {
        return out;
    };

    if wants_opener {
        let opener_is_structure = scan::heading_text(first.text).is_some()
            || scan::parse_list_item(first.number, first.text).is_some()
            || scan::is_table_row(first.text);
        if opener_is_structure {
            out.push(
                ValidationViolation::warning(
                    "definition-opener",
                    "Definition should open with a plain summary sentence",
                    "Begin with one sentence of the form 'X is a Y that Z'",
                )
                .at(line_start(answer, first.number)),
            );
        } else {
            if section.has(&Constraint::SingleSentenceOpener) {
                let sentences = scan::sentence_count(first.text);
                if sentences > 1 {
                    out.push(
                        ValidationViolation::warning(
                            "definition-single-sentence",
                            format!("Opening line has {sentences} sentences, expected one"),
                            "Condense the opener to a single defining sentence",
                        )
                        .at(line_start(answer, first.number)),
                    );
                }
            }
            if section.has(&Constraint::BlankLineAfterOpener) {
                let next = answer.lines().nth(first.number);
                if next.is_some_and(|l| !l.trim().is_empty()) {
                    out.push(
                        ValidationViolation::warning(
                            "definition-blank-line",
                            "Opener is not followed by a blank line",
                            "Leave an empty line between the opener and the details",
                        )
                        .at(line_start(answer, first.number + 1)),
                    );
                }
            }
        }
    }

    let min = section.find(|c| match c {
        Constraint::MinItems(n) => Some(*n),
        _ => None,
    });
    let max = section.find(|c| match c {
        Constraint::MaxItems(n) => Some(*n),
        _ => None,
    });
    if min.is_none() && max.is_none() {
        return out;
    }

    let items = scan::list_items_between(answer, first.number, usize::MAX);
    if items.is_empty() {
        out.push(ValidationViolation::warning(
            "definition-characteristics",
            "Definition has no bullet list of key characteristics",
            "Follow the opener with 3-5 bullets describing key characteristics",
        ));
        return out;
    }
    let count = top_level(&items).len();
    let below = min.is_some_and(|m| count < m);
    let above = max.is_some_and(|m| count > m);
    if below || above {
        let range = match (min, max) {
            (Some(lo), Some(hi)) => format!("{lo}-{hi}"),
            (Some(lo), None) => format!("at least {lo}"),
            (None, Some(hi)) => format!("at most {hi}"),
            (None, None) => String::new(),
        };
        out.push(
            ValidationViolation::info(
                "definition-item-count",
                format!("Definition lists {count} characteristics, expected {range}"),
                "Keep the characteristic list focused on the essentials",
            )
            .at(line_start(answer, items[0].line)),
        );
    }

    out
}
