//! PatternDetector: question text → best-fitting pattern and confidence.
//!
//! Scoring sums one hit per (pattern, keyword) pair, taking the strongest
//! kind of hit found for that keyword:
//! - the whole question equals the keyword: `exact_match_weight`
//! - a whole-word/phrase occurrence: `word_match_weight + phrase_word_bonus * words`
//! - a bare substring occurrence: `substring_weight`
//!
//! Confidence is `min(1, score / confidence_saturation)`.

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use rustc_hash::FxHashMap;
use shapeguard_core::config::DetectionConfig;
use shapeguard_core::types::FormatPattern;

use super::library::PatternLibrary;

/// A candidate pattern with its raw score and normalized confidence.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPattern {
    pub pattern: FormatPattern,
    pub score: f64,
    pub confidence: f64,
}

/// Keyword automaton over the library, rebuilt when the library changes.
#[derive(Debug)]
struct KeywordIndex {
    automaton: Option<AhoCorasick>,
    /// Automaton pattern index → (library index, lowercased keyword).
    owners: Vec<(usize, String)>,
}

impl KeywordIndex {
    fn build(library: &PatternLibrary) -> Self {
        let mut owners = Vec::new();
        for (idx, pattern) in library.all_patterns().iter().enumerate() {
            for keyword in &pattern.keywords {
                let keyword = keyword.trim().to_lowercase();
                if !keyword.is_empty() {
                    owners.push((idx, keyword));
                }
            }
        }
        let automaton = if owners.is_empty() {
            None
        } else {
            match AhoCorasickBuilder::new()
                .match_kind(MatchKind::Standard)
                .build(owners.iter().map(|(_, k)| k.as_str()))
            {
                Ok(ac) => Some(ac),
                Err(e) => {
                    tracing::warn!(error = %e, "keyword automaton build failed; detection disabled");
                    None
                }
            }
        };
        Self { automaton, owners }
    }
}

#[derive(Debug)]
pub struct PatternDetector {
    library: PatternLibrary,
    config: DetectionConfig,
    index: KeywordIndex,
    last_question: Option<String>,
    last_confidence: f64,
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self::new(PatternLibrary::new())
    }
}

impl PatternDetector {
    pub fn new(library: PatternLibrary) -> Self {
        Self::with_config(library, DetectionConfig::default())
    }

    pub fn with_config(library: PatternLibrary, config: DetectionConfig) -> Self {
        let index = KeywordIndex::build(&library);
        Self {
            library,
            config,
            index,
            last_question: None,
            last_confidence: 0.0,
        }
    }

    pub fn library(&self) -> &PatternLibrary {
        &self.library
    }

    /// Swap in a new pattern set and rebuild the keyword index.
    pub fn replace_library(&mut self, library: PatternLibrary) {
        self.index = KeywordIndex::build(&library);
        self.library = library;
    }

    /// Best pattern for `text`, or `None` when nothing matches or the text is
    /// too short. Updates `confidence()` and `last_question()`.
    pub fn detect_pattern(&mut self, text: &str) -> Option<FormatPattern> {
        self.last_question = Some(text.to_string());
        let best = self.suggested_patterns(text).into_iter().next();
        self.last_confidence = best.as_ref().map(|b| b.confidence).unwrap_or(0.0);
        tracing::debug!(
            pattern = best.as_ref().map(|b| b.pattern.id.as_str()).unwrap_or("none"),
            confidence = self.last_confidence,
            "pattern detection"
        );
        best.map(|b| b.pattern)
    }

    /// All patterns with a positive score, best first. Ties break on higher
    /// priority, then library order.
    pub fn suggested_patterns(&self, text: &str) -> Vec<ScoredPattern> {
        let normalized = text.trim().to_lowercase();
        if normalized.chars().count() < self.config.effective_min_question_length() {
            return Vec::new();
        }
        let Some(automaton) = &self.index.automaton else {
            return Vec::new();
        };
        let whole = normalized.trim_end_matches(['?', '.', '!']).trim();

        // automaton pattern index → strongest hit weight for that keyword
        let mut best_hit: FxHashMap<usize, f64> = FxHashMap::default();
        for m in automaton.find_overlapping_iter(normalized.as_str()) {
            let key = m.pattern().as_usize();
            let keyword = &self.index.owners[key].1;
            let weight = if whole == keyword.as_str() {
                self.config.effective_exact_match_weight()
            } else if on_word_boundary(&normalized, m.start(), m.end()) {
                let words = keyword.split_whitespace().count() as f64;
                self.config.effective_word_match_weight()
                    + self.config.effective_phrase_word_bonus() * words
            } else {
                self.config.effective_substring_weight()
            };
            let entry = best_hit.entry(key).or_insert(0.0);
            if weight > *entry {
                *entry = weight;
            }
        }

        let mut scores: FxHashMap<usize, f64> = FxHashMap::default();
        for (key, weight) in best_hit {
            *scores.entry(self.index.owners[key].0).or_insert(0.0) += weight;
        }

        let saturation = self.config.effective_confidence_saturation();
        let patterns = self.library.all_patterns();
        let mut ranked: Vec<(usize, f64)> = scores
            .into_iter()
            .filter(|(_, score)| *score > 0.0)
            .collect();
        ranked.sort_by(|(ia, sa), (ib, sb)| {
            sb.total_cmp(sa)
                .then_with(|| patterns[*ib].priority.cmp(&patterns[*ia].priority))
                .then_with(|| ia.cmp(ib))
        });
        ranked
            .into_iter()
            .map(|(idx, score)| ScoredPattern {
                pattern: patterns[idx].clone(),
                score,
                confidence: (score / saturation).clamp(0.0, 1.0),
            })
            .collect()
    }

    /// Confidence of the last detection, in `[0, 1]`.
    pub fn confidence(&self) -> f64 {
        self.last_confidence
    }

    pub fn last_question(&self) -> Option<&str> {
        self.last_question.as_deref()
    }

    pub fn reset(&mut self) {
        self.last_question = None;
        self.last_confidence = 0.0;
    }
}

fn on_word_boundary(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}
