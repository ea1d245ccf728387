//! Numbered step checks for how-to answers.

use shapeguard_core::types::{Constraint, Section, ValidationViolation};

use crate::validation::location::{line_start, resolve};
use crate::validation::scan;
use crate::validation::vocab;

use super::list::{first_out_of_sequence, top_level};

pub fn check(answer: &str, section: &Section) -> Vec<ValidationViolation> {
    let mut out = Vec::new();
    let items = scan::list_items(answer);
    let top = top_level(&items);
    let steps: Vec<_> = top.into_iter().filter(|i| i.is_numbered()).collect();

    if steps.is_empty() {
        if section.required {
            let fix = if items.is_empty() {
                "Write the procedure as numbered steps: 1. ..., 2. ..., 3. ..."
            } else {
                "Replace the bullets with numbered steps: 1. ..., 2. ..., 3. ..."
            };
            out.push(ValidationViolation::error(
                "process-missing-steps",
                format!("Section '{}' requires numbered steps", section.name),
                fix,
            ));
        }
        return out;
    }

    if let Some(step) = first_out_of_sequence(&steps) {
        out.push(
            ValidationViolation::error(
                "process-numbering",
                "Steps are not numbered 1, 2, 3 in order",
                "Renumber the steps sequentially starting at 1",
            )
            .at(line_start(answer, step.line)),
        );
    }

    if section.has(&Constraint::ActionVerbs) {
        for step in &steps {
            let word = scan::first_word(&step.content).unwrap_or_default();
            if !vocab::is_action_verb(&word) {
                out.push(
                    ValidationViolation::warning(
                        "process-action-verb",
                        format!("Step does not start with an action verb: '{}'", step.content),
                        "Start each step with an imperative verb such as Install, Configure or Run",
                    )
                    .at(resolve(answer, &step.content, Some(step.line))),
                );
            }
        }
    }

    if section.has(&Constraint::NoVagueLanguage) {
        for step in &steps {
            let vague = vocab::vague_terms_in(&step.content);
            if !vague.is_empty() {
                out.push(
                    ValidationViolation::warning(
                        "process-vague-language",
                        format!("Step uses vague language: {}", vague.join(", ")),
                        "State exactly what to do instead of hedging",
                    )
                    .at(resolve(answer, &vague[0], Some(step.line))),
                );
            }
        }
    }

    if let Some(min) = section.find(|c| match c {
        Constraint::MinSteps(n) => Some(*n),
        _ => None,
    }) {
        if steps.len() < min {
            out.push(ValidationViolation::warning(
                "process-min-steps",
                format!("Process has {} steps, at least {min} expected", steps.len()),
                "Break the procedure into smaller discrete steps",
            ));
        }
    }
    if let Some(max) = section.find(|c| match c {
        Constraint::MaxSteps(n) => Some(*n),
        _ => None,
    }) {
        if steps.len() > max {
            out.push(ValidationViolation::warning(
                "process-max-steps",
                format!("Process has {} steps, at most {max} allowed", steps.len()),
                "Group related steps into phases",
            ));
        }
    }

    out
}
