//! Line scanners for markdown-flavored answers.
//!
//! These are not a markdown parser. Each scanner looks at one line (or one run
//! of lines) at a time and accepts the common shapes authors actually write.
//! Tolerance notes:
//! - List items: `-`, `*`, `+` or `N.` / `N)` followed by whitespace. A line
//!   such as `**Bold**` is not an item because the marker must be followed by
//!   a space. Tabs count as four columns of indent.
//! - Fences: a line whose trimmed text starts with three backticks or three
//!   tildes opens a block; the same fence string closes it. An unclosed block
//!   runs to the end of the answer.
//! - Table rows: any non-code line that starts with `|` or carries at least two
//!   pipes. Prose with two literal pipes is a false positive we accept.
//! - Headings: ATX (`#`), a fully bold line, or a short line ending in `:`.

use std::sync::LazyLock;

use regex::Regex;

static BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([ \t]*)([-*+])[ \t]+(.*)$").expect("static regex"));
static NUMBERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([ \t]*)(\d{1,3})[.)][ \t]+(.*)$").expect("static regex"));
static SEPARATOR_CELL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^:?-+:?$").expect("static regex"));
static ATX_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#{1,6}[ \t]+(.+?)[ \t#]*$").expect("static regex"));

/// Longest line we still treat as a `Label:` heading.
const MAX_LABEL_HEADING_LEN: usize = 60;

/// One physical line of an answer.
#[derive(Debug, Clone, Copy)]
pub struct Line<'a> {
    /// 1-based line number.
    pub number: usize,
    pub text: &'a str,
    /// Inside a fenced block (fence lines included).
    pub in_code: bool,
}

/// Split an answer into lines, marking fenced code.
pub fn lines(answer: &str) -> Vec<Line<'_>> {
    let mut out = Vec::new();
    let mut open_fence: Option<&str> = None;
    for (idx, text) in answer.lines().enumerate() {
        let trimmed = text.trim_start();
        let fence = fence_marker(trimmed);
        let in_code = match (open_fence, fence) {
            (None, Some(f)) => {
                open_fence = Some(f);
                true
            }
            (Some(open), Some(f)) if f == open && trimmed[f.len()..].trim().is_empty() => {
                open_fence = None;
                true
            }
            (Some(_), _) => true,
            (None, None) => false,
        };
        out.push(Line {
            number: idx + 1,
            text,
            in_code,
        });
    }
    out
}

fn fence_marker(trimmed: &str) -> Option<&'static str> {
    if trimmed.starts_with("```") {
        Some("```")
    } else if trimmed.starts_with("~~~") {
        Some("~~~")
    } else {
        None
    }
}

/// Indentation width in columns, tabs counting as four.
pub fn indent_width(text: &str) -> usize {
    text.chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum()
}

/// How a list item is introduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Bullet(char),
    Numbered(u32),
}

#[derive(Debug, Clone)]
pub struct ListItem {
    pub line: usize,
    pub indent: usize,
    pub marker: Marker,
    pub content: String,
}

impl ListItem {
    pub fn is_numbered(&self) -> bool {
        matches!(self.marker, Marker::Numbered(_))
    }
}

/// Parse one line as a list item.
pub fn parse_list_item(number: usize, text: &str) -> Option<ListItem> {
    if let Some(caps) = NUMBERED_RE.captures(text) {
        let n = caps[2].parse::<u32>().ok()?;
        return Some(ListItem {
            line: number,
            indent: indent_width(&caps[1]),
            marker: Marker::Numbered(n),
            content: caps[3].trim().to_string(),
        });
    }
    let caps = BULLET_RE.captures(text)?;
    let bullet = caps[2].chars().next()?;
    Some(ListItem {
        line: number,
        indent: indent_width(&caps[1]),
        marker: Marker::Bullet(bullet),
        content: caps[3].trim().to_string(),
    })
}

/// All list items outside fenced code.
pub fn list_items(answer: &str) -> Vec<ListItem> {
    lines(answer)
        .into_iter()
        .filter(|l| !l.in_code)
        .filter_map(|l| parse_list_item(l.number, l.text))
        .collect()
}

/// List items between `start` (exclusive) and `end` (exclusive) line numbers.
pub fn list_items_between(answer: &str, start: usize, end: usize) -> Vec<ListItem> {
    list_items(answer)
        .into_iter()
        .filter(|i| i.line > start && i.line < end)
        .collect()
}

/// A fenced code block.
#[derive(Debug, Clone)]
pub struct CodeBlock {
    /// Line of the opening fence.
    pub start_line: usize,
    /// Line of the closing fence, `None` when unclosed.
    pub end_line: Option<usize>,
    pub lang: Option<String>,
    pub body: Vec<String>,
}

impl CodeBlock {
    pub fn is_closed(&self) -> bool {
        self.end_line.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.body.iter().all(|l| l.trim().is_empty())
    }

    /// Non-blank body lines.
    pub fn line_count(&self) -> usize {
        self.body.iter().filter(|l| !l.trim().is_empty()).count()
    }

    pub fn text(&self) -> String {
        self.body.join("\n")
    }
}

pub fn code_blocks(answer: &str) -> Vec<CodeBlock> {
    let mut blocks = Vec::new();
    let mut current: Option<(CodeBlock, &'static str)> = None;
    for (idx, text) in answer.lines().enumerate() {
        let number = idx + 1;
        let trimmed = text.trim_start();
        match current.take() {
            None => {
                if let Some(fence) = fence_marker(trimmed) {
                    let info = trimmed[fence.len()..].trim_start_matches(['`', '~']).trim();
                    let lang = info
                        .split_whitespace()
                        .next()
                        .map(|l| l.to_ascii_lowercase());
                    current = Some((
                        CodeBlock {
                            start_line: number,
                            end_line: None,
                            lang,
                            body: Vec::new(),
                        },
                        fence,
                    ));
                }
            }
            Some((mut block, fence)) => {
                if trimmed.starts_with(fence) && trimmed[fence.len()..].trim().is_empty() {
                    block.end_line = Some(number);
                    blocks.push(block);
                } else {
                    block.body.push(text.to_string());
                    current = Some((block, fence));
                }
            }
        }
    }
    if let Some((block, _)) = current {
        blocks.push(block);
    }
    blocks
}

/// True if any non-fenced line carries a backtick span.
pub fn has_inline_code(answer: &str) -> bool {
    lines(answer).iter().any(|l| {
        !l.in_code && {
            let ticks = l.text.matches('`').count();
            ticks >= 2
        }
    })
}

/// One pipe-delimited row.
#[derive(Debug, Clone)]
pub struct TableRow {
    pub line: usize,
    pub cells: Vec<String>,
    pub separator: bool,
}

/// A run of consecutive table rows.
#[derive(Debug, Clone)]
pub struct Table {
    pub rows: Vec<TableRow>,
}

impl Table {
    pub fn header(&self) -> Option<&TableRow> {
        self.rows.first().filter(|r| !r.separator)
    }

    /// The separator row, if it directly follows the header.
    pub fn separator(&self) -> Option<&TableRow> {
        self.rows.get(1).filter(|r| r.separator)
    }

    pub fn data_rows(&self) -> impl Iterator<Item = &TableRow> {
        self.rows.iter().skip(1).filter(|r| !r.separator)
    }

    pub fn start_line(&self) -> usize {
        self.rows.first().map(|r| r.line).unwrap_or(1)
    }
}

pub fn is_table_row(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.len() < 2 {
        return false;
    }
    trimmed.starts_with('|') || trimmed.matches('|').count() >= 2
}

/// Cells of a row with outer pipes stripped and whitespace trimmed.
pub fn split_cells(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(|c| c.trim().to_string()).collect()
}

pub fn is_separator_row(cells: &[String]) -> bool {
    !cells.is_empty() && cells.iter().all(|c| SEPARATOR_CELL_RE.is_match(c))
}

pub fn tables(answer: &str) -> Vec<Table> {
    let mut out = Vec::new();
    let mut rows: Vec<TableRow> = Vec::new();
    for line in lines(answer) {
        if !line.in_code && is_table_row(line.text) {
            let cells = split_cells(line.text);
            let separator = is_separator_row(&cells);
            rows.push(TableRow {
                line: line.number,
                cells,
                separator,
            });
        } else if !rows.is_empty() {
            out.push(Table {
                rows: std::mem::take(&mut rows),
            });
        }
    }
    if !rows.is_empty() {
        out.push(Table { rows });
    }
    out
}

/// Heading text without markers or trailing colon.
pub fn heading_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Some(caps) = ATX_HEADING_RE.captures(trimmed) {
        return Some(clean_heading(&caps[1]));
    }
    if trimmed.len() > 4 && trimmed.starts_with("**") {
        let inner = trimmed.trim_end_matches(':');
        if let Some(inner) = inner.strip_prefix("**").and_then(|t| t.strip_suffix("**")) {
            if !inner.contains("**") {
                return Some(clean_heading(inner));
            }
        }
    }
    if trimmed.ends_with(':')
        && trimmed.len() <= MAX_LABEL_HEADING_LEN
        && parse_list_item(0, text).is_none()
        && !is_table_row(trimmed)
    {
        return Some(clean_heading(trimmed));
    }
    None
}

fn clean_heading(raw: &str) -> String {
    raw.trim()
        .trim_matches('*')
        .trim_end_matches(':')
        .trim()
        .to_string()
}

/// A heading found in an answer.
#[derive(Debug, Clone)]
pub struct Heading {
    pub line: usize,
    pub text: String,
}

pub fn headings(answer: &str) -> Vec<Heading> {
    lines(answer)
        .into_iter()
        .filter(|l| !l.in_code)
        .filter_map(|l| {
            heading_text(l.text).map(|text| Heading {
                line: l.number,
                text,
            })
        })
        .collect()
}

impl Heading {
    /// True if any word of the heading is in `names`.
    pub fn mentions(&self, names: &[&str]) -> bool {
        self.text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .any(|w| names.contains(&w.to_ascii_lowercase().as_str()))
    }
}

/// First heading that mentions any of `names`.
pub fn find_heading<'h>(headings: &'h [Heading], names: &[&str]) -> Option<&'h Heading> {
    headings.iter().find(|h| h.mentions(names))
}

/// Line of the heading after `line`, or one past the last line.
pub fn section_end(headings: &[Heading], line: usize) -> usize {
    headings
        .iter()
        .map(|h| h.line)
        .find(|l| *l > line)
        .unwrap_or(usize::MAX)
}

/// Non-blank, non-heading text strictly between two line numbers.
pub fn text_between(answer: &str, start: usize, end: usize) -> String {
    lines(answer)
        .into_iter()
        .filter(|l| l.number > start && l.number < end && !l.in_code)
        .map(|l| l.text.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

const ABBREVIATIONS: &[&str] = &[
    "e.g.", "i.e.", "etc.", "vs.", "mr.", "mrs.", "dr.", "approx.", "no.", "fig.",
];

/// Rough sentence count: terminal punctuation followed by whitespace or end.
/// Common abbreviations and decimals do not end a sentence. Non-empty text
/// without terminal punctuation counts as one sentence.
pub fn sentence_count(text: &str) -> usize {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0;
    }
    let mut count = 0;
    let words: Vec<&str> = trimmed.split_whitespace().collect();
    for word in &words {
        let lower = word.to_ascii_lowercase();
        let ends = lower.ends_with(['.', '!', '?']);
        if ends && !ABBREVIATIONS.contains(&lower.as_str()) {
            count += 1;
        }
    }
    let last_terminated = words
        .last()
        .is_some_and(|w| w.ends_with(['.', '!', '?']));
    if !last_terminated {
        count += 1;
    }
    count.max(1)
}

/// First alphabetic word, lowercased, with markdown emphasis removed.
pub fn first_word(text: &str) -> Option<String> {
    text.split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_ascii_lowercase()
        })
        .find(|w| !w.is_empty())
}

/// Non-code lines joined with newlines.
pub fn prose(answer: &str) -> String {
    lines(answer)
        .into_iter()
        .filter(|l| !l.in_code)
        .map(|l| l.text)
        .collect::<Vec<_>>()
        .join("\n")
}

/// First non-blank, non-code line.
pub fn first_content_line(answer: &str) -> Option<Line<'_>> {
    lines(answer)
        .into_iter()
        .find(|l| !l.in_code && !l.text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_line_is_not_a_bullet() {
        assert!(parse_list_item(1, "**Bold** text").is_none());
        assert!(parse_list_item(1, "- item").is_some());
        assert!(parse_list_item(1, "\t- nested").is_some_and(|i| i.indent == 4));
    }

    #[test]
    fn unclosed_fence_runs_to_end() {
        let blocks = code_blocks("intro\n```rust\nfn main() {}\n");
        assert_eq!(blocks.len(), 1);
        assert!(!blocks[0].is_closed());
        assert_eq!(blocks[0].lang.as_deref(), Some("rust"));
    }

    #[test]
    fn abbreviations_do_not_split_sentences() {
        assert_eq!(sentence_count("Use tools, e.g. cargo and rustc."), 1);
        assert_eq!(sentence_count("One. Two! Three?"), 3);
        assert_eq!(sentence_count("no punctuation"), 1);
    }
}
