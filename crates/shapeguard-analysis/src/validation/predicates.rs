//! Named rule predicates.
//!
//! A `ValidationRule` refers to its check by name. The registry resolves the
//! name to a `RulePredicate` trait object and isolates each call: an `Err` or
//! a panic becomes a `RuleError` that the validator logs before skipping the
//! rule.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, LazyLock};

use regex::Regex;
use rustc_hash::FxHashMap;
use shapeguard_core::errors::RuleError;

use super::scan;

/// A custom answer check. `Ok(true)` means the answer passes.
pub trait RulePredicate: Send + Sync {
    fn name(&self) -> &str;
    fn check(&self, answer: &str) -> Result<bool, RuleError>;

    /// Text in the answer that made the check fail, used to place the
    /// violation. `None` leaves the violation unlocated.
    fn offending_text(&self, _answer: &str) -> Option<String> {
        None
    }
}

/// Name → predicate lookup.
#[derive(Clone)]
pub struct RulePredicateRegistry {
    predicates: FxHashMap<String, Arc<dyn RulePredicate>>,
}

impl RulePredicateRegistry {
    /// An empty registry.
    pub fn empty() -> Self {
        Self {
            predicates: FxHashMap::default(),
        }
    }

    /// A registry holding the built-in predicates.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(NoPlaceholderText));
        registry.register(Arc::new(ReasonableLength::default()));
        registry.register(Arc::new(NoRawHtml));
        registry
    }

    /// Register a predicate, replacing any previous one with the same name.
    pub fn register(&mut self, predicate: Arc<dyn RulePredicate>) {
        self.predicates
            .insert(predicate.name().to_string(), predicate);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn RulePredicate>> {
        self.predicates.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.predicates.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Run the named predicate with panic isolation.
    pub fn evaluate(&self, name: &str, answer: &str) -> Result<bool, RuleError> {
        let predicate = self
            .predicates
            .get(name)
            .ok_or_else(|| RuleError::UnknownPredicate(name.to_string()))?;
        match catch_unwind(AssertUnwindSafe(|| predicate.check(answer))) {
            Ok(result) => result,
            Err(_) => Err(RuleError::PredicatePanicked {
                predicate: name.to_string(),
            }),
        }
    }

    /// The named predicate's offending text, isolated like `evaluate`.
    pub fn offending_text(&self, name: &str, answer: &str) -> Option<String> {
        let predicate = self.predicates.get(name)?;
        catch_unwind(AssertUnwindSafe(|| predicate.offending_text(answer)))
            .ok()
            .flatten()
    }
}

impl Default for RulePredicateRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl std::fmt::Debug for RulePredicateRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.predicates.keys().collect();
        names.sort();
        f.debug_struct("RulePredicateRegistry")
            .field("predicates", &names)
            .finish()
    }
}

const PLACEHOLDER_MARKERS: &[&str] = &[
    "lorem ipsum",
    "[insert",
    "[todo",
    "<placeholder",
    "{{",
    "your content here",
];

/// Fails when prose carries template filler. Code blocks are ignored.
pub struct NoPlaceholderText;

impl RulePredicate for NoPlaceholderText {
    fn name(&self) -> &str {
        "no-placeholder-text"
    }

    fn check(&self, answer: &str) -> Result<bool, RuleError> {
        Ok(self.offending_text(answer).is_none())
    }

    fn offending_text(&self, answer: &str) -> Option<String> {
        let prose = scan::prose(answer).to_lowercase();
        PLACEHOLDER_MARKERS
            .iter()
            .find(|m| prose.contains(**m))
            .map(|m| m.to_string())
    }
}

/// Fails when an answer is too short to be useful or implausibly long.
pub struct ReasonableLength {
    pub min_chars: usize,
    pub max_chars: usize,
}

impl Default for ReasonableLength {
    fn default() -> Self {
        Self {
            min_chars: 20,
            max_chars: 20_000,
        }
    }
}

impl RulePredicate for ReasonableLength {
    fn name(&self) -> &str {
        "reasonable-length"
    }

    fn check(&self, answer: &str) -> Result<bool, RuleError> {
        let len = answer.trim().chars().count();
        Ok(len >= self.min_chars && len <= self.max_chars)
    }
}

static RAW_HTML_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<\s*/?\s*(div|span|br|table|tr|td|p|script|style|font)\b[^>]*>")
        .expect("static regex")
});

/// Fails when prose embeds raw HTML tags. Code blocks are ignored.
pub struct NoRawHtml;

impl RulePredicate for NoRawHtml {
    fn name(&self) -> &str {
        "no-raw-html"
    }

    fn check(&self, answer: &str) -> Result<bool, RuleError> {
        Ok(!RAW_HTML_RE.is_match(&scan::prose(answer)))
    }

    fn offending_text(&self, answer: &str) -> Option<String> {
        RAW_HTML_RE
            .find(&scan::prose(answer))
            .map(|m| m.as_str().to_string())
    }
}
