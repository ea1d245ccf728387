//! AutoFormatter: best-effort rewrites toward a pattern's shape.
//!
//! Transforms are keyed by pattern id; unknown ids fall back to the pattern's
//! first section format. Every transform is pure and leaves text it does not
//! understand alone. The output is not guaranteed to validate cleanly.

use shapeguard_core::types::{FormatPattern, SectionFormat};

use crate::validation::checkers::diagram;
use crate::validation::scan::{self, Marker};

/// Plain lines longer than this are treated as prose, not list material.
const MAX_BULLET_LINE: usize = 120;

const PLACEHOLDER_TABLE: &str = "| Feature | Option A | Option B |\n|---------|----------|----------|\n| TBD | TBD | TBD |";

const PLACEHOLDER_DIAGRAM: &str = "```mermaid\ngraph TD\n  Client --> Service\n  Service --> Database\n```";

/// The transform applied for a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    Table,
    Definition,
    Bullets,
    Steps,
    Code,
    Diagram,
    ProsCons,
    Troubleshooting,
}

impl FormatKind {
    pub fn for_pattern(pattern: &FormatPattern) -> Option<Self> {
        let kind = match pattern.id.as_str() {
            "comparison-table" => Self::Table,
            "definition" => Self::Definition,
            "list" | "best-practices" => Self::Bullets,
            "process" => Self::Steps,
            "code-example" => Self::Code,
            "architecture" => Self::Diagram,
            "pros-cons" => Self::ProsCons,
            "troubleshooting" => Self::Troubleshooting,
            _ => match pattern.primary_format()? {
                SectionFormat::Table => Self::Table,
                SectionFormat::Text => Self::Definition,
                SectionFormat::List => Self::Bullets,
                SectionFormat::Process => Self::Steps,
                SectionFormat::Code => Self::Code,
                SectionFormat::Diagram => Self::Diagram,
                SectionFormat::ProsCons => Self::ProsCons,
                SectionFormat::Troubleshooting => Self::Troubleshooting,
            },
        };
        Some(kind)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AutoFormatter;

impl AutoFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Rewrite `answer` toward `pattern`. Blank answers and patterns without
    /// a known shape are returned unchanged.
    pub fn format(&self, answer: &str, pattern: &FormatPattern) -> String {
        if answer.trim().is_empty() {
            return answer.to_string();
        }
        let Some(kind) = FormatKind::for_pattern(pattern) else {
            return answer.to_string();
        };
        let formatted = match kind {
            FormatKind::Table => format_table(answer),
            FormatKind::Definition => format_definition(answer),
            FormatKind::Bullets => format_bullets(answer),
            FormatKind::Steps => format_steps(answer),
            FormatKind::Code => format_code(answer),
            FormatKind::Diagram => format_diagram(answer),
            FormatKind::ProsCons => format_pros_cons(answer),
            FormatKind::Troubleshooting => format_troubleshooting(answer),
        };
        tracing::debug!(pattern = %pattern.id, ?kind, changed = formatted != answer, "auto-format");
        formatted
    }
}

/// A line the list/step transforms may rewrite.
fn is_plain(line: &scan::Line<'_>) -> bool {
    let text = line.text.trim();
    !line.in_code
        && !text.is_empty()
        && text.chars().count() <= MAX_BULLET_LINE
        && scan::parse_list_item(line.number, line.text).is_none()
        && scan::heading_text(line.text).is_none()
        && !scan::is_table_row(line.text)
}

fn format_table(answer: &str) -> String {
    let tables = scan::tables(answer);
    if tables.is_empty() {
        return format!("{}\n\n{PLACEHOLDER_TABLE}", answer.trim_end());
    }

    let mut replacement: Vec<Option<Vec<String>>> = vec![None; answer.lines().count() + 1];
    for table in &tables {
        let Some(header) = table.header() else { continue };
        let width = header.cells.len();
        let mut rendered = vec![render_row(&header.cells, width)];
        rendered.push(render_row(&vec!["---".to_string(); width], width));
        for row in table.data_rows() {
            rendered.push(render_row(&row.cells, width));
        }
        // The whole table is emitted at its first line; the rest are dropped.
        replacement[table.start_line()] = Some(rendered);
        for row in table.rows.iter().skip(1) {
            replacement[row.line] = Some(Vec::new());
        }
    }

    let mut out = Vec::new();
    for (idx, line) in answer.lines().enumerate() {
        match &replacement[idx + 1] {
            Some(lines) => out.extend(lines.iter().cloned()),
            None => out.push(line.to_string()),
        }
    }
    out.join("\n")
}

fn render_row(cells: &[String], width: usize) -> String {
    let mut cells: Vec<&str> = cells.iter().map(String::as_str).take(width).collect();
    cells.resize(width, "");
    format!("| {} |", cells.join(" | "))
}

fn format_definition(answer: &str) -> String {
    let lines = scan::lines(answer);
    let Some(opener) = lines.iter().find(|l| !l.in_code && !l.text.trim().is_empty()) else {
        return answer.to_string();
    };
    let opener_line = opener.number;

    let mut out: Vec<String> = Vec::new();
    for line in &lines {
        if line.number < opener_line {
            out.push(line.text.to_string());
            continue;
        }
        if line.number == opener_line {
            out.push(line.text.to_string());
            let next_blank = lines
                .get(line.number)
                .map(|n| n.text.trim().is_empty())
                .unwrap_or(true);
            if !next_blank {
                out.push(String::new());
            }
            continue;
        }
        if is_plain(line) {
            out.push(format!("- {}", line.text.trim()));
        } else {
            out.push(line.text.to_string());
        }
    }
    out.join("\n")
}

fn format_bullets(answer: &str) -> String {
    let lines = scan::lines(answer);
    lines
        .iter()
        .map(|line| {
            if let Some(item) = scan::parse_list_item(line.number, line.text).filter(|_| !line.in_code) {
                if matches!(item.marker, Marker::Bullet(c) if c != '-') && item.indent == 0 {
                    return format!("- {}", item.content);
                }
                return line.text.to_string();
            }
            if is_plain(line) && !ends_with_colon(line.text) {
                format!("- {}", line.text.trim())
            } else {
                line.text.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_steps(answer: &str) -> String {
    let lines = scan::lines(answer);
    let mut step = 0;
    lines
        .iter()
        .map(|line| {
            let item = scan::parse_list_item(line.number, line.text).filter(|_| !line.in_code);
            match item {
                Some(item) if item.indent == 0 => {
                    step += 1;
                    format!("{step}. {}", item.content)
                }
                Some(_) => line.text.to_string(),
                None if is_plain(line) && !ends_with_colon(line.text) => {
                    step += 1;
                    format!("{step}. {}", line.text.trim())
                }
                None => line.text.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn ends_with_colon(text: &str) -> bool {
    text.trim_end().ends_with(':')
}

fn format_code(answer: &str) -> String {
    let blocks = scan::code_blocks(answer);
    let mut tags: Vec<(usize, &'static str)> = Vec::new();
    for block in &blocks {
        if block.lang.is_none() {
            tags.push((block.start_line, sniff_language(&block.text())));
        }
    }
    if tags.is_empty() {
        return answer.to_string();
    }
    answer
        .lines()
        .enumerate()
        .map(|(idx, line)| match tags.iter().find(|(l, _)| *l == idx + 1) {
            Some((_, lang)) => format!("{}{lang}", line.trim_end()),
            None => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Guess a fence tag from the code. Falls back to `text`.
pub fn sniff_language(code: &str) -> &'static str {
    let trimmed = code.trim_start();
    if code.contains("fn ") && (code.contains("let ") || code.contains("->")) {
        "rust"
    } else if code.contains("def ") || (code.contains("import ") && code.contains(':')) {
        "python"
    } else if code.contains("function ") || code.contains("const ") || code.contains("=>") {
        "javascript"
    } else if code.contains("public class ") || code.contains("System.out") {
        "java"
    } else if code.contains("func ") && code.contains("package ") {
        "go"
    } else if ["select ", "insert ", "update ", "create table"]
        .iter()
        .any(|k| trimmed.to_ascii_lowercase().starts_with(k))
    {
        "sql"
    } else if trimmed.starts_with('{') || trimmed.starts_with('[') {
        "json"
    } else if trimmed.starts_with("$ ")
        || ["npm ", "cargo ", "pip ", "git ", "docker ", "kubectl ", "cd ", "sudo "]
            .iter()
            .any(|k| trimmed.starts_with(k))
    {
        "bash"
    } else {
        "text"
    }
}

fn format_diagram(answer: &str) -> String {
    if scan::code_blocks(answer).iter().any(|b| diagram::is_diagram(b)) {
        return answer.to_string();
    }
    let paragraphs: Vec<&str> = answer
        .split("\n\n")
        .filter(|p| !p.trim().is_empty())
        .collect();
    let mid = paragraphs.len().div_ceil(2);
    let mut out: Vec<&str> = Vec::with_capacity(paragraphs.len() + 1);
    out.extend(&paragraphs[..mid]);
    out.push(PLACEHOLDER_DIAGRAM);
    out.extend(&paragraphs[mid..]);
    out.iter()
        .map(|p| p.trim_matches('\n'))
        .collect::<Vec<_>>()
        .join("\n\n")
}

const PRO_NAMES: &[&str] = &["pros", "pro", "advantages", "advantage", "benefits", "strengths"];
const CON_NAMES: &[&str] = &["cons", "con", "disadvantages", "disadvantage", "drawbacks", "limitations", "weaknesses"];

fn format_pros_cons(answer: &str) -> String {
    let headings = scan::headings(answer);
    let has_pros = headings.iter().any(|h| h.mentions(PRO_NAMES) && !h.mentions(CON_NAMES));
    let cons_line = headings
        .iter()
        .find(|h| h.mentions(CON_NAMES) && !h.mentions(PRO_NAMES))
        .map(|h| h.line);

    let pros_block = "## Pros\n- Add the main advantages here";
    let cons_block = "## Cons\n- Add the main disadvantages here";

    let mut text = answer.trim_end().to_string();
    if !has_pros {
        text = match cons_line {
            Some(line) => insert_before_line(&text, line, &format!("{pros_block}\n")),
            None => format!("{text}\n\n{pros_block}"),
        };
    }
    if cons_line.is_none() {
        text = format!("{text}\n\n{cons_block}");
    }
    text
}

fn format_troubleshooting(answer: &str) -> String {
    let headings = scan::headings(answer);
    let has_problem = headings
        .iter()
        .any(|h| h.mentions(&["problem", "issue", "symptom", "symptoms"]));
    let has_solutions = headings.iter().any(|h| {
        h.mentions(&["solution", "solutions", "fix", "fixes", "resolution", "remedy", "workaround"])
    });

    let mut text = answer.trim_end().to_string();
    if !has_problem {
        text = format!("## Problem\n{text}");
    }
    if !has_solutions {
        text = format!("{text}\n\n## Solutions\n1. Describe the first corrective step\n2. Verify the fix");
    }
    text
}

/// Insert `block` before 1-based `line`.
fn insert_before_line(text: &str, line: usize, block: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    for (idx, l) in text.lines().enumerate() {
        if idx + 1 == line {
            out.extend(block.lines().map(str::to_string));
        }
        out.push(l.to_string());
    }
    out.join("\n")
}
