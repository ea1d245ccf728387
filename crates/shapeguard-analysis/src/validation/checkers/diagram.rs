//! Diagram block checks.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use shapeguard_core::types::{Constraint, Section, ValidationViolation};

use crate::validation::location::line_start;
use crate::validation::scan::{self, CodeBlock};
use crate::validation::vocab;

static EDGE_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-\.->|-->|==>|<->|<--|->|<-|=>|---|--").expect("static regex"));
static EDGE_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\|[^|]*\|").expect("static regex"));
static NODE_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)").expect("static regex"));
static SEQ_PARTICIPANT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(participant|actor)\s+\S+").expect("static regex"));
/// `Alice->>Bob: text`, `A-->>B: text`, `A-xB: text`, `A-)B: text`.
static SEQ_MESSAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[A-Za-z_][A-Za-z0-9_]*\s*--?(>>|>|x|\))\s*[+-]?[A-Za-z_][A-Za-z0-9_]*\s*:")
        .expect("static regex")
});

pub fn check(answer: &str, section: &Section, pattern_id: &str) -> Vec<ValidationViolation> {
    let mut out = Vec::new();
    let blocks = scan::code_blocks(answer);
    let Some(block) = blocks.iter().find(|b| is_diagram(b)) else {
        if section.required {
            out.push(ValidationViolation::error(
                "diagram-missing",
                format!("Section '{}' requires a diagram", section.name),
                "Add a fenced ```mermaid block that shows the components and their connections",
            ));
        }
        return out;
    };
    let at = line_start(answer, block.start_line);
    let keyword = leading_keyword(block);

    if keyword.is_none() && !has_edges(block) {
        out.push(
            ValidationViolation::warning(
                "diagram-syntax",
                "Diagram has neither a diagram keyword nor any edges",
                "Start with a diagram type such as 'graph TD' and connect nodes with -->",
            )
            .at(at),
        );
    }

    if let Some(max) = section.find(|c| match c {
        Constraint::MaxNodes(n) => Some(*n),
        _ => None,
    }) {
        let nodes = count_nodes(block);
        if nodes > max {
            out.push(
                ValidationViolation::warning(
                    "diagram-too-complex",
                    format!("Diagram has {nodes} nodes, at most {max} recommended"),
                    "Collapse related nodes or split the diagram in two",
                )
                .at(at),
            );
        }
    }

    if let Some(min) = section.find(|c| match c {
        Constraint::MinExplanationLength(n) => Some(*n),
        _ => None,
    }) {
        let explanation = scan::prose(answer);
        let len = explanation.trim().chars().count();
        if len < min {
            out.push(ValidationViolation::warning(
                "diagram-explanation",
                format!("Diagram is explained in {len} characters, at least {min} expected"),
                "Describe what the diagram shows and how the components interact",
            ));
        }
    }

    if keyword == Some("sequencediagram") {
        out.extend(check_sequence(block).map(|v| v.at(at)));
    }

    if pattern_id == "architecture" {
        if let Some(kw) = keyword.filter(|k| !vocab::ARCHITECTURE_DIAGRAM_KEYWORDS.contains(k)) {
            out.push(
                ValidationViolation::info(
                    "diagram-type-mismatch",
                    format!("A '{kw}' diagram rarely suits an architecture overview"),
                    "Use a graph, flowchart, class or sequence diagram",
                )
                .at(at),
            );
        }
    }

    out
}

/// A sequence diagram is only plausible when it exchanges messages between
/// named participants, and reads best when those participants are declared.
fn check_sequence(block: &CodeBlock) -> Option<ValidationViolation> {
    let messages = block.body.iter().filter(|l| SEQ_MESSAGE_RE.is_match(l)).count();
    if messages == 0 {
        return Some(ValidationViolation::warning(
            "diagram-sequence-messages",
            "Sequence diagram has no messages between participants",
            "Draw each interaction as 'Client->>Server: request'",
        ));
    }
    let declared = block.body.iter().any(|l| SEQ_PARTICIPANT_RE.is_match(l));
    if !declared {
        return Some(ValidationViolation::info(
            "diagram-sequence-participants",
            format!("Sequence diagram has {messages} message(s) but declares no participants"),
            "List the participants first: 'participant Client', 'participant Server'",
        ));
    }
    None
}

/// A fenced block in a diagram language, or an untagged block that opens
/// with a diagram keyword or draws edges.
pub(crate) fn is_diagram(block: &CodeBlock) -> bool {
    if block.lang.as_deref().is_some_and(vocab::is_diagram_language) {
        return true;
    }
    leading_keyword(block).is_some() || (block.lang.is_none() && has_edges(block))
}

/// Diagram dialect keyword on the first non-blank line, lowercased.
fn leading_keyword(block: &CodeBlock) -> Option<&'static str> {
    let first = block.body.iter().find(|l| !l.trim().is_empty())?;
    let word = first
        .split_whitespace()
        .next()?
        .to_ascii_lowercase();
    let word = word.trim_end_matches(['{', ';']);
    vocab::DIAGRAM_KEYWORDS.iter().copied().find(|k| *k == word)
}

fn has_edges(block: &CodeBlock) -> bool {
    block
        .body
        .iter()
        .any(|l| vocab::EDGE_TOKENS.iter().any(|t| l.contains(t)))
}

/// Distinct node identifiers appearing on either side of an edge.
pub fn count_nodes(block: &CodeBlock) -> usize {
    let mut nodes = BTreeSet::new();
    for line in &block.body {
        if !EDGE_SPLIT_RE.is_match(line) {
            continue;
        }
        for segment in EDGE_SPLIT_RE.split(line) {
            let segment = EDGE_LABEL_RE.replace(segment, "");
            if let Some(caps) = NODE_ID_RE.captures(&segment) {
                let id = caps[1].to_string();
                if !vocab::DIAGRAM_KEYWORDS.contains(&id.to_ascii_lowercase().as_str()) {
                    nodes.insert(id);
                }
            }
        }
    }
    nodes.len()
}
