//! PatternLibrary: the active set of format patterns.

use std::path::Path;

use shapeguard_core::errors::DetectionError;
use shapeguard_core::types::{FormatPattern, PatternPatch, ValidationRule};

use super::defaults::default_patterns;
use super::toml_patterns::TomlPatternLoader;

/// Ordered registry of patterns, keyed by id.
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    patterns: Vec<FormatPattern>,
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternLibrary {
    /// A library holding the built-in patterns.
    pub fn new() -> Self {
        Self {
            patterns: default_patterns(),
        }
    }

    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    pub fn get_pattern(&self, id: &str) -> Option<&FormatPattern> {
        self.patterns.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get_pattern(id).is_some()
    }

    /// Add a new pattern. Ids are unique.
    pub fn add_pattern(&mut self, pattern: FormatPattern) -> Result<(), DetectionError> {
        if self.contains(&pattern.id) {
            return Err(DetectionError::DuplicatePattern(pattern.id));
        }
        self.patterns.push(pattern);
        Ok(())
    }

    /// Apply a partial update. Returns false if no pattern has this id.
    pub fn update_pattern(&mut self, id: &str, patch: PatternPatch) -> bool {
        match self.patterns.iter_mut().find(|p| p.id == id) {
            Some(pattern) => {
                pattern.apply_patch(patch);
                true
            }
            None => false,
        }
    }

    pub fn all_patterns(&self) -> &[FormatPattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn clear_patterns(&mut self) {
        self.patterns.clear();
    }

    /// Replace the active set. A later pattern with a repeated id wins.
    pub fn initialize_patterns(&mut self, patterns: Vec<FormatPattern>) {
        self.patterns.clear();
        for pattern in patterns {
            match self.patterns.iter_mut().find(|p| p.id == pattern.id) {
                Some(existing) => *existing = pattern,
                None => self.patterns.push(pattern),
            }
        }
    }

    pub fn reset_to_defaults(&mut self) {
        self.patterns = default_patterns();
        tracing::info!(count = self.patterns.len(), "pattern library reset to defaults");
    }

    /// Patterns whose keyword list contains any of `keywords`
    /// (case-insensitive substring), sorted by match count then priority.
    pub fn search_patterns(&self, keywords: &[&str]) -> Vec<&FormatPattern> {
        let needles: Vec<String> = keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        if needles.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<(usize, &FormatPattern)> = self
            .patterns
            .iter()
            .filter_map(|p| {
                let lowered: Vec<String> = p.keywords.iter().map(|k| k.to_lowercase()).collect();
                let count = needles
                    .iter()
                    .filter(|n| lowered.iter().any(|k| k.contains(n.as_str())))
                    .count();
                (count > 0).then_some((count, p))
            })
            .collect();
        hits.sort_by(|(ca, a), (cb, b)| {
            cb.cmp(ca)
                .then_with(|| b.priority.cmp(&a.priority))
                .then_with(|| a.id.cmp(&b.id))
        });
        hits.into_iter().map(|(_, p)| p).collect()
    }

    /// Every custom rule across all patterns.
    pub fn all_rules(&self) -> Vec<ValidationRule> {
        self.patterns
            .iter()
            .flat_map(|p| p.structure.rules.iter().cloned())
            .collect()
    }

    /// Add user-defined patterns from TOML. Nothing is added on error.
    pub fn load_toml(&mut self, toml_str: &str) -> Result<usize, DetectionError> {
        let loaded = TomlPatternLoader::load_from_str(toml_str)?;
        self.extend_checked(loaded)
    }

    pub fn load_toml_file(&mut self, path: &Path) -> Result<usize, DetectionError> {
        let loaded = TomlPatternLoader::load_from_file(path)?;
        self.extend_checked(loaded)
    }

    fn extend_checked(&mut self, loaded: Vec<FormatPattern>) -> Result<usize, DetectionError> {
        if let Some(dup) = loaded.iter().find(|p| self.contains(&p.id)) {
            return Err(DetectionError::DuplicatePattern(dup.id.clone()));
        }
        let count = loaded.len();
        self.patterns.extend(loaded);
        tracing::debug!(count, "loaded TOML patterns");
        Ok(count)
    }
}
