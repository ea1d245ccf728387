//! Problem / Causes / Solutions checks.

use shapeguard_core::types::{Constraint, Section, ValidationViolation};

use crate::validation::location::{line_start, resolve};
use crate::validation::scan;
use crate::validation::vocab;

use super::list::{first_out_of_sequence, top_level};

const PROBLEM_WORDS: &[&str] = &["problem", "issue", "symptom", "symptoms"];
const CAUSE_WORDS: &[&str] = &["cause", "causes", "reasons"];
const SOLUTION_WORDS: &[&str] = &[
    "solution", "solutions", "fix", "fixes", "resolution", "remedy", "remedies", "workaround",
];

pub fn check(answer: &str, section: &Section) -> Vec<ValidationViolation> {
    let mut out = Vec::new();
    let headings = scan::headings(answer);
    let problem = scan::find_heading(&headings, PROBLEM_WORDS);
    let causes = scan::find_heading(&headings, CAUSE_WORDS);
    let solutions = scan::find_heading(&headings, SOLUTION_WORDS);

    if !section.required && problem.is_none() && causes.is_none() && solutions.is_none() {
        return out;
    }

    match problem {
        None => out.push(ValidationViolation::error(
            "troubleshooting-missing-problem",
            "No 'Problem' heading describing the issue",
            "Open with a '## Problem' section that states the observed symptom",
        )),
        Some(h) => {
            let text = scan::text_between(answer, h.line, scan::section_end(&headings, h.line));
            let min = section
                .find(|c| match c {
                    Constraint::MinProblemLength(n) => Some(*n),
                    _ => None,
                })
                .unwrap_or(0);
            let len = text.chars().count();
            if len < min {
                out.push(
                    ValidationViolation::warning(
                        "troubleshooting-problem-detail",
                        format!("Problem description has {len} characters, at least {min} expected"),
                        "Describe what fails, when, and what the user sees",
                    )
                    .at(resolve(answer, &h.text, Some(h.line))),
                );
            }
            if !text.is_empty() && !vocab::mentions_symptoms(&text) {
                out.push(
                    ValidationViolation::info(
                        "troubleshooting-symptoms",
                        "Problem statement does not mention an observable symptom",
                        "Quote the error message or describe the failing behavior",
                    )
                    .at(resolve(answer, &h.text, Some(h.line))),
                );
            }
        }
    }

    match causes {
        None => out.push(ValidationViolation::warning(
            "troubleshooting-missing-causes",
            "No 'Causes' heading listing likely causes",
            "Add a '## Causes' section with the likely root causes as bullets",
        )),
        Some(h) => {
            let min = section
                .find(|c| match c {
                    Constraint::MinCauses(n) => Some(*n),
                    _ => None,
                })
                .unwrap_or(2);
            let items =
                scan::list_items_between(answer, h.line, scan::section_end(&headings, h.line));
            let n = top_level(&items).len();
            if n < min {
                out.push(
                    ValidationViolation::warning(
                        "troubleshooting-causes",
                        format!("{n} cause(s) listed, at least {min} expected"),
                        "List each plausible cause as its own bullet",
                    )
                    .at(line_start(answer, h.line)),
                );
            }
        }
    }

    match solutions {
        None => out.push(ValidationViolation::error(
            "troubleshooting-missing-solutions",
            "No 'Solutions' heading with remediation steps",
            "Add a '## Solutions' section with numbered steps",
        )),
        Some(h) => {
            let items =
                scan::list_items_between(answer, h.line, scan::section_end(&headings, h.line));
            let top = top_level(&items);
            let steps: Vec<_> = top.into_iter().filter(|i| i.is_numbered()).collect();
            if steps.is_empty() {
                out.push(
                    ValidationViolation::warning(
                        "troubleshooting-solution-steps",
                        "Solutions are not written as numbered steps",
                        "Number the remediation steps 1, 2, 3",
                    )
                    .at(line_start(answer, h.line)),
                );
            } else {
                if let Some(step) = first_out_of_sequence(&steps) {
                    out.push(
                        ValidationViolation::warning(
                            "troubleshooting-numbering",
                            "Solution steps are not numbered sequentially",
                            "Renumber the steps 1, 2, 3 in order",
                        )
                        .at(line_start(answer, step.line)),
                    );
                }
                for step in &steps {
                    let word = scan::first_word(&step.content).unwrap_or_default();
                    if !vocab::is_action_verb(&word) {
                        out.push(
                            ValidationViolation::info(
                                "troubleshooting-action-verb",
                                format!("Solution step does not start with an action verb: '{}'", step.content),
                                "Lead each step with what to do: Restart, Check, Update",
                            )
                            .at(resolve(answer, &step.content, Some(step.line))),
                        );
                    }
                }
            }
        }
    }

    out
}
