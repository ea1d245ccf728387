//! Bulleted and numbered list checks.

use shapeguard_core::types::{Constraint, Section, ValidationViolation};

use crate::validation::location::{line_start, resolve};
use crate::validation::scan::{self, ListItem, Marker};

const DEFAULT_MAX_DEPTH: usize = 3;

pub fn check(answer: &str, section: &Section) -> Vec<ValidationViolation> {
    let mut out = Vec::new();
    let items = scan::list_items(answer);
    if items.is_empty() {
        if section.required {
            out.push(ValidationViolation::error(
                "list-missing",
                format!("Section '{}' requires a bulleted or numbered list", section.name),
                "Present the points as '- item' bullets or '1.' numbered items",
            ));
        }
        return out;
    }

    let top = top_level(&items);

    if let Some(min) = section.find(|c| match c {
        Constraint::MinItems(n) => Some(*n),
        _ => None,
    }) {
        if top.len() < min {
            out.push(
                ValidationViolation::warning(
                    "list-min-items",
                    format!("List has {} items, at least {min} expected", top.len()),
                    "Add items until the list covers the topic",
                )
                .at(line_start(answer, top[0].line)),
            );
        }
    }
    if let Some(max) = section.find(|c| match c {
        Constraint::MaxItems(n) => Some(*n),
        _ => None,
    }) {
        if top.len() > max {
            out.push(
                ValidationViolation::warning(
                    "list-max-items",
                    format!("List has {} items, at most {max} allowed", top.len()),
                    "Merge related items or move detail into sub-bullets",
                )
                .at(line_start(answer, top[max].line)),
            );
        }
    }

    if section.has(&Constraint::ConsistentBullets) {
        let mut bullets: Vec<char> = Vec::new();
        for item in &top {
            if let Marker::Bullet(b) = item.marker {
                if !bullets.contains(&b) {
                    bullets.push(b);
                }
            }
        }
        if bullets.len() > 1 {
            out.push(
                ValidationViolation::warning(
                    "list-inconsistent-bullets",
                    format!("List mixes bullet markers: {}", bullets.iter().collect::<String>()),
                    "Use a single bullet marker such as '-' throughout the list",
                )
                .at(line_start(answer, top[0].line)),
            );
        }
    }

    if section.has(&Constraint::SequentialNumbering) {
        if let Some(item) = first_out_of_sequence(&top) {
            out.push(
                ValidationViolation::warning(
                    "list-numbering",
                    "Numbered items are not sequential",
                    "Number the items 1, 2, 3 without gaps or repeats",
                )
                .at(line_start(answer, item.line)),
            );
        }
    }

    let base = top.first().map(|i| i.indent).unwrap_or(0);
    let step = items
        .iter()
        .map(|i| i.indent.saturating_sub(base))
        .filter(|d| *d > 0)
        .min();
    if let Some(step) = step {
        if step != 2 && step != 4 {
            out.push(
                ValidationViolation::warning(
                    "list-indentation",
                    format!("Nested items are indented by {step} spaces"),
                    "Indent nested items by 2 or 4 spaces",
                )
                .at(line_start(answer, first_nested(&items, base).unwrap_or(top[0].line))),
            );
        }
        let max_depth = section
            .find(|c| match c {
                Constraint::MaxNestingDepth(n) => Some(*n),
                _ => None,
            })
            .unwrap_or(DEFAULT_MAX_DEPTH);
        let too_deep = items
            .iter()
            .find(|i| i.indent.saturating_sub(base) / step + 1 > max_depth);
        if let Some(item) = too_deep {
            out.push(
                ValidationViolation::warning(
                    "list-nesting-depth",
                    format!("List nests deeper than {max_depth} levels"),
                    "Flatten the list or split it into separate sections",
                )
                .at(line_start(answer, item.line)),
            );
        }
    }

    if let Some(max_sentences) = section.find(|c| match c {
        Constraint::MaxSentencesPerItem(n) => Some(*n),
        _ => None,
    }) {
        let long: Vec<&ListItem> = items
            .iter()
            .filter(|i| scan::sentence_count(&i.content) > max_sentences)
            .collect();
        if let Some(first) = long.first() {
            out.push(
                ValidationViolation::info(
                    "list-item-length",
                    format!(
                        "{} item(s) exceed {max_sentences} sentence(s)",
                        long.len()
                    ),
                    "Keep each item to a short phrase or a single sentence",
                )
                .at(resolve(answer, &first.content, Some(first.line))),
            );
        }
    }

    out
}

/// Items at the shallowest indent.
pub(crate) fn top_level(items: &[ListItem]) -> Vec<&ListItem> {
    let base = items.iter().map(|i| i.indent).min().unwrap_or(0);
    items.iter().filter(|i| i.indent == base).collect()
}

/// First numbered item that breaks the 1, 2, 3 sequence.
pub(crate) fn first_out_of_sequence<'a>(items: &[&'a ListItem]) -> Option<&'a ListItem> {
    let mut expected = 1;
    for &item in items {
        if let Marker::Numbered(n) = item.marker {
            if n != expected {
                return Some(item);
            }
            expected += 1;
        }
    }
    None
}

fn first_nested(items: &[ListItem], base: usize) -> Option<usize> {
    items.iter().find(|i| i.indent > base).map(|i| i.line)
}
