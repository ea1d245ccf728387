//! Format pattern definitions: sections, typed constraints, rules.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::rule::ValidationRule;

/// The structural shape a section must take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionFormat {
    Table,
    List,
    Code,
    Diagram,
    Text,
    Process,
    ProsCons,
    Troubleshooting,
}

impl SectionFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::List => "list",
            Self::Code => "code",
            Self::Diagram => "diagram",
            Self::Text => "text",
            Self::Process => "process",
            Self::ProsCons => "pros-cons",
            Self::Troubleshooting => "troubleshooting",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Some(Self::Table),
            "list" => Some(Self::List),
            "code" => Some(Self::Code),
            "diagram" => Some(Self::Diagram),
            "text" => Some(Self::Text),
            "process" => Some(Self::Process),
            "pros-cons" | "pros_cons" => Some(Self::ProsCons),
            "troubleshooting" => Some(Self::Troubleshooting),
            _ => None,
        }
    }
}

impl fmt::Display for SectionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parameterized check attached to a section.
///
/// Serialized as `{"kind": "min-columns", "value": 2}`. Each checker reads the
/// constraints it understands and ignores the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum Constraint {
    // Tables
    MinColumns(usize),
    MinRows(usize),
    ConsistentColumns,
    NoEmptyCells,
    ComparisonHeader,

    // Lists
    MinItems(usize),
    MaxItems(usize),
    ConsistentBullets,
    SequentialNumbering,
    MaxNestingDepth(usize),
    MaxSentencesPerItem(usize),

    // Process steps
    ActionVerbs,
    NoVagueLanguage,
    MinSteps(usize),
    MaxSteps(usize),

    // Code
    RequireLanguageTag,
    BalancedBrackets,
    NoPlaceholders,
    MinLines(usize),
    MaxLines(usize),
    CommentThreshold(usize),

    // Diagrams
    MaxNodes(usize),
    MinExplanationLength(usize),

    // Definitions
    SingleSentenceOpener,
    BlankLineAfterOpener,

    // Pros/cons
    MaxImbalanceRatio(f64),

    // Troubleshooting
    MinProblemLength(usize),
    MinCauses(usize),
}

/// One structural requirement within a pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub format: SectionFormat,
    #[serde(default = "default_required")]
    pub required: bool,
    #[serde(default)]
    pub constraints: Vec<Constraint>,
}

fn default_required() -> bool {
    true
}

impl Section {
    pub fn new(name: impl Into<String>, format: SectionFormat) -> Self {
        Self {
            name: name.into(),
            format,
            required: true,
            constraints: Vec::new(),
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// True if a unit constraint is present.
    pub fn has(&self, constraint: &Constraint) -> bool {
        self.constraints.iter().any(|c| c == constraint)
    }

    /// First `usize` payload matching `pick`.
    pub fn find<F>(&self, pick: F) -> Option<usize>
    where
        F: Fn(&Constraint) -> Option<usize>,
    {
        self.constraints.iter().find_map(pick)
    }
}

/// Sections and custom rules of a pattern.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PatternStructure {
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub rules: Vec<ValidationRule>,
}

/// A named structural template an answer should follow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatPattern {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub structure: PatternStructure,
    #[serde(default)]
    pub template: String,
    #[serde(default)]
    pub examples: Vec<String>,
}

impl FormatPattern {
    /// Format of the first declared section, used as a fallback key.
    pub fn primary_format(&self) -> Option<SectionFormat> {
        self.structure.sections.first().map(|s| s.format)
    }

    /// Apply a partial update. The id never changes.
    pub fn apply_patch(&mut self, patch: PatternPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(keywords) = patch.keywords {
            self.keywords = keywords;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(structure) = patch.structure {
            self.structure = structure;
        }
        if let Some(template) = patch.template {
            self.template = template;
        }
        if let Some(examples) = patch.examples {
            self.examples = examples;
        }
    }
}

/// Partial update for a `FormatPattern`.
#[derive(Debug, Clone, Default)]
pub struct PatternPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub priority: Option<i32>,
    pub structure: Option<PatternStructure>,
    pub template: Option<String>,
    pub examples: Option<Vec<String>>,
}
