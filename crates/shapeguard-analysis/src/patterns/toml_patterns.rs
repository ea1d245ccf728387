//! Declarative TOML pattern definitions, user-extensible without recompiling.
//!
//! ```toml
//! [[patterns]]
//! id = "faq"
//! name = "FAQ"
//! keywords = ["faq", "frequently asked"]
//! priority = 4
//!
//! [[patterns.sections]]
//! name = "answers"
//! format = "list"
//! constraints = [{ kind = "min-items", value = 3 }, { kind = "consistent-bullets" }]
//!
//! [[patterns.rules]]
//! id = "faq:no-html"
//! severity = "warning"
//! predicate = "no-raw-html"
//! ```

use serde::{Deserialize, Serialize};

use shapeguard_core::errors::DetectionError;
use shapeguard_core::types::{
    Constraint, FormatPattern, PatternStructure, Section, SectionFormat, Severity, ValidationRule,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlPatternDef {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub sections: Vec<TomlSectionDef>,
    #[serde(default)]
    pub rules: Vec<TomlRuleDef>,
    #[serde(default)]
    pub template: String,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlSectionDef {
    pub name: String,
    pub format: String,
    pub required: Option<bool>,
    #[serde(default)]
    pub constraints: Vec<Constraint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlRuleDef {
    pub id: String,
    /// A failing rule is an error unless the definition says otherwise.
    #[serde(default = "default_rule_severity")]
    pub severity: String,
    pub predicate: Option<String>,
    pub description: Option<String>,
    pub auto_fix: Option<bool>,
    pub enabled: Option<bool>,
}

fn default_rule_severity() -> String {
    "error".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlPatternFile {
    #[serde(default)]
    pub patterns: Vec<TomlPatternDef>,
}

/// Loader for TOML pattern definitions.
pub struct TomlPatternLoader;

impl TomlPatternLoader {
    /// Load patterns from a TOML string. Disabled definitions are skipped.
    pub fn load_from_str(toml_str: &str) -> Result<Vec<FormatPattern>, DetectionError> {
        let file: TomlPatternFile = toml::from_str(toml_str)
            .map_err(|e| DetectionError::InvalidPattern(format!("TOML parse error: {e}")))?;

        let mut patterns: Vec<FormatPattern> = Vec::new();
        for def in file.patterns {
            if def.enabled == Some(false) {
                continue;
            }
            let pattern = Self::compile(def)?;
            if patterns.iter().any(|p| p.id == pattern.id) {
                return Err(DetectionError::DuplicatePattern(pattern.id));
            }
            patterns.push(pattern);
        }
        Ok(patterns)
    }

    pub fn load_from_file(path: &std::path::Path) -> Result<Vec<FormatPattern>, DetectionError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DetectionError::InvalidPattern(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::load_from_str(&content)
    }

    fn compile(def: TomlPatternDef) -> Result<FormatPattern, DetectionError> {
        if def.id.trim().is_empty() {
            return Err(DetectionError::InvalidPattern(format!(
                "pattern '{}' has an empty id",
                def.name
            )));
        }

        let mut sections = Vec::with_capacity(def.sections.len());
        for s in def.sections {
            let format = SectionFormat::parse_str(&s.format).ok_or_else(|| {
                DetectionError::InvalidPattern(format!(
                    "unknown section format '{}' in pattern '{}'",
                    s.format, def.id
                ))
            })?;
            sections.push(Section {
                name: s.name,
                format,
                required: s.required.unwrap_or(true),
                constraints: s.constraints,
            });
        }

        let mut rules = Vec::with_capacity(def.rules.len());
        for r in def.rules {
            let severity = Severity::parse(&r.severity).ok_or_else(|| {
                DetectionError::InvalidPattern(format!(
                    "unknown severity '{}' in rule '{}'",
                    r.severity, r.id
                ))
            })?;
            rules.push(ValidationRule {
                id: r.id,
                pattern: def.id.clone(),
                severity,
                enabled: r.enabled.unwrap_or(true),
                auto_fix: r.auto_fix.unwrap_or(false),
                description: r.description.unwrap_or_default(),
                predicate: r.predicate,
            });
        }

        Ok(FormatPattern {
            id: def.id,
            name: def.name,
            description: def.description.unwrap_or_default(),
            keywords: def.keywords,
            priority: def.priority,
            structure: PatternStructure { sections, rules },
            template: def.template,
            examples: def.examples,
        })
    }
}
