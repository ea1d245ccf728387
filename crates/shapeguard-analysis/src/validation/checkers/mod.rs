//! Per-format section checkers.
//!
//! Each checker reads the constraints it understands from its `Section` and
//! ignores the rest. An optional section that is absent produces nothing.

pub mod code;
pub mod definition;
pub mod diagram;
pub mod list;
pub mod process;
pub mod pros_cons;
pub mod table;
pub mod troubleshooting;

use shapeguard_core::types::{FormatPattern, Section, SectionFormat, ValidationViolation};

/// Run the checker matching `section.format`.
pub fn check_section(
    answer: &str,
    section: &Section,
    pattern: &FormatPattern,
) -> Vec<ValidationViolation> {
    match section.format {
        SectionFormat::Table => table::check(answer, section),
        SectionFormat::List => list::check(answer, section),
        SectionFormat::Process => process::check(answer, section),
        SectionFormat::Code => code::check(answer, section),
        SectionFormat::Diagram => diagram::check(answer, section, &pattern.id),
        SectionFormat::Text => definition::check(answer, section),
        SectionFormat::ProsCons => pros_cons::check(answer, section),
        SectionFormat::Troubleshooting => troubleshooting::check(answer, section),
    }
}
