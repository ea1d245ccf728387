//! Pipe-table checks.

use shapeguard_core::types::{Constraint, Section, ValidationViolation};

use crate::validation::location::{line_start, resolve};
use crate::validation::scan::{self, Table};
use crate::validation::vocab;

const DEFAULT_MIN_COLUMNS: usize = 2;

pub fn check(answer: &str, section: &Section) -> Vec<ValidationViolation> {
    let mut out = Vec::new();
    let tables = scan::tables(answer);
    let Some(table) = largest(&tables) else {
        if section.required {
            out.push(ValidationViolation::error(
                "table-missing",
                format!("Section '{}' requires a markdown table but none was found", section.name),
                "Add a pipe-delimited table with a header row followed by a | --- | separator row",
            ));
        }
        return out;
    };

    let Some(header) = table.header() else {
        out.push(
            ValidationViolation::error(
                "table-header-separator",
                "Table starts with a separator row instead of a header",
                "Put the column names in the first row, then the | --- | separator",
            )
            .at(line_start(answer, table.start_line())),
        );
        return out;
    };
    let columns = header.cells.len();

    match table.separator() {
        None => out.push(
            ValidationViolation::error(
                "table-header-separator",
                "Table header is not followed by a separator row",
                "Insert a row like | --- | --- | directly under the header",
            )
            .at(line_start(answer, header.line)),
        ),
        Some(sep) if sep.cells.len() != columns => out.push(
            ValidationViolation::error(
                "table-separator-mismatch",
                format!(
                    "Separator has {} columns but the header has {columns}",
                    sep.cells.len()
                ),
                "Give the separator row one --- cell per header column",
            )
            .at(line_start(answer, sep.line)),
        ),
        Some(_) => {}
    }

    let min_columns = section
        .find(|c| match c {
            Constraint::MinColumns(n) => Some(*n),
            _ => None,
        })
        .unwrap_or(DEFAULT_MIN_COLUMNS);
    if columns < min_columns {
        out.push(
            ValidationViolation::error(
                "table-min-columns",
                format!("Table has {columns} columns, at least {min_columns} required"),
                "Add a column for each item being compared",
            )
            .at(line_start(answer, header.line)),
        );
    }

    if section.has(&Constraint::ConsistentColumns) {
        let uneven: Vec<usize> = table
            .data_rows()
            .filter(|r| r.cells.len() != columns)
            .map(|r| r.line)
            .collect();
        if let Some(first) = uneven.first() {
            out.push(
                ValidationViolation::warning(
                    "table-inconsistent-columns",
                    format!(
                        "{} row(s) do not match the header's {columns} columns",
                        uneven.len()
                    ),
                    "Make every row carry the same number of cells as the header",
                )
                .at(line_start(answer, *first)),
            );
        }
    }

    if section.has(&Constraint::NoEmptyCells) {
        let empty_cell = table.data_rows().find_map(|r| {
            r.cells
                .iter()
                .find(|c| vocab::is_placeholder_cell(c))
                .map(|c| (r.line, c.as_str()))
        });
        if let Some((line, cell)) = empty_cell {
            out.push(
                ValidationViolation::warning(
                    "table-empty-cells",
                    "Table contains empty or placeholder cells",
                    "Fill every cell with a concrete value; write 'None' or 'N/A' when nothing applies",
                )
                .at(resolve(answer, cell, Some(line))),
            );
        }
    }

    if let Some(min_rows) = section.find(|c| match c {
        Constraint::MinRows(n) => Some(*n),
        _ => None,
    }) {
        let rows = table.data_rows().count();
        if rows < min_rows {
            out.push(
                ValidationViolation::warning(
                    "table-min-rows",
                    format!("Table has {rows} data rows, at least {min_rows} expected"),
                    "Add rows for the remaining points of comparison",
                )
                .at(line_start(answer, header.line)),
            );
        }
    }

    if section.has(&Constraint::ComparisonHeader) {
        let first = header
            .cells
            .first()
            .map(|c| c.trim_matches('*').to_ascii_lowercase())
            .unwrap_or_default();
        if !vocab::COMPARISON_HEADERS.iter().any(|h| first.starts_with(h)) {
            out.push(
                ValidationViolation::info(
                    "table-first-column",
                    "First column should name the compared dimension",
                    "Label the first header cell 'Feature' or 'Aspect'",
                )
                .at(resolve(answer, header.cells.first().map_or("", String::as_str), Some(header.line))),
            );
        }
    }

    out
}

/// The table with the most rows; earliest wins ties.
fn largest(tables: &[Table]) -> Option<&Table> {
    tables
        .iter()
        .rev()
        .max_by_key(|t| t.rows.len())
}
