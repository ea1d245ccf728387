//! OverrideUtils: read-side helpers over the configuration manager's
//! override records.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;
use shapeguard_core::config::OverrideConfig;
use shapeguard_core::types::{OverrideRecord, Question};

use super::types::{EnrichedQuestion, JustificationQuality, OverrideStats, OverrideValidation};
use crate::configuration::ConfigurationManager;
use crate::validation::{scan, vocab};

const NO_PATTERN: &str = "no-pattern";
const ANONYMOUS: &str = "anonymous";
const MIN_REASON_TERM_LEN: usize = 4;
const MAX_REASONS: usize = 5;

pub struct OverrideUtils<'a> {
    manager: &'a ConfigurationManager,
    config: OverrideConfig,
}

impl<'a> OverrideUtils<'a> {
    pub fn new(manager: &'a ConfigurationManager) -> Self {
        Self::with_config(manager, OverrideConfig::default())
    }

    pub fn with_config(manager: &'a ConfigurationManager, config: OverrideConfig) -> Self {
        Self { manager, config }
    }

    /// Check a proposed override before it is added.
    pub fn validate_override(
        &self,
        question_id: &str,
        justification: &str,
        pattern: Option<&str>,
    ) -> OverrideValidation {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let justification = justification.trim();
        let len = justification.chars().count();
        let min = self.config.effective_min_justification_length();
        let brief = self.config.effective_brief_justification_length();

        if question_id.trim().is_empty() {
            errors.push("Question id is required".to_string());
        }
        if justification.is_empty() {
            errors.push("Justification is required".to_string());
        } else if len < min {
            errors.push(format!("Justification must be at least {min} characters"));
        } else if len < brief {
            warnings.push(format!(
                "Justification is brief ({len} characters); explain why the detected pattern does not fit"
            ));
        }
        if !question_id.trim().is_empty() && self.manager.has_override(question_id) {
            errors.push(format!("An override already exists for question '{question_id}'"));
        }

        let vague = vocab::vague_terms_in(justification);
        if !vague.is_empty() {
            warnings.push(format!("Justification uses vague language: {}", vague.join(", ")));
        }
        if pattern.is_some_and(|p| p.trim().is_empty()) {
            warnings.push("Override pattern is blank; omit it to disable formatting".to_string());
        }

        OverrideValidation {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    pub fn override_stats(&self) -> OverrideStats {
        let overrides = self.manager.overrides();
        let mut by_pattern: BTreeMap<String, usize> = BTreeMap::new();
        let mut by_user: BTreeMap<String, usize> = BTreeMap::new();
        let mut total_len = 0usize;
        for o in overrides {
            let pattern = o.override_pattern.as_deref().unwrap_or(NO_PATTERN);
            *by_pattern.entry(pattern.to_string()).or_default() += 1;
            let user = o.user_id.as_deref().unwrap_or(ANONYMOUS);
            *by_user.entry(user.to_string()).or_default() += 1;
            total_len += o.justification.chars().count();
        }
        let average_justification_length = if overrides.is_empty() {
            0.0
        } else {
            total_len as f64 / overrides.len() as f64
        };
        OverrideStats {
            total: overrides.len(),
            by_pattern,
            by_user,
            average_justification_length,
            most_common_reasons: most_common_reasons(overrides),
        }
    }

    /// True when the question's override turns formatting off.
    pub fn should_bypass_formatting(&self, question_id: &str) -> bool {
        self.manager
            .override_for_question(question_id)
            .is_some_and(OverrideRecord::disables_formatting)
    }

    /// The override's pattern if an override exists (`None` when it disables
    /// formatting), otherwise the detected pattern.
    pub fn effective_pattern(&self, question_id: &str, detected: Option<&str>) -> Option<String> {
        match self.manager.override_for_question(question_id) {
            Some(record) => record.override_pattern.clone(),
            None => detected.map(str::to_string),
        }
    }

    pub fn enrich_question(&self, question: &Question) -> EnrichedQuestion {
        match self.manager.override_for_question(&question.id) {
            Some(record) => EnrichedQuestion::with_override(question, record),
            None => EnrichedQuestion::plain(question),
        }
    }

    /// Human-readable summary, or `None` when there are no overrides.
    pub fn generate_override_report(&self) -> Option<String> {
        self.generate_override_report_at(Utc::now())
    }

    pub fn generate_override_report_at(&self, now: DateTime<Utc>) -> Option<String> {
        let overrides = self.manager.overrides();
        if overrides.is_empty() {
            return None;
        }
        let stats = self.override_stats();
        let mut report = String::new();
        let _ = writeln!(report, "Manual Override Report");
        let _ = writeln!(report, "======================");
        let _ = writeln!(report, "Total overrides: {}", stats.total);
        let _ = writeln!(
            report,
            "Average justification length: {:.1} characters",
            stats.average_justification_length
        );
        let _ = writeln!(report);
        let _ = writeln!(report, "By pattern:");
        for (pattern, count) in &stats.by_pattern {
            let _ = writeln!(report, "  {pattern}: {count}");
        }
        let _ = writeln!(report);
        let _ = writeln!(report, "By user:");
        for (user, count) in &stats.by_user {
            let _ = writeln!(report, "  {user}: {count}");
        }
        if !stats.most_common_reasons.is_empty() {
            let _ = writeln!(report);
            let _ = writeln!(report, "Common reasons: {}", stats.most_common_reasons.join(", "));
        }
        let recent = overrides
            .iter()
            .filter(|o| self.age_days(o, now) < self.config.effective_recent_days())
            .count();
        let _ = writeln!(report);
        let _ = writeln!(
            report,
            "Recent (last {} days): {recent}",
            self.config.effective_recent_days()
        );
        Some(report)
    }

    pub fn is_recent_override(&self, question_id: &str) -> bool {
        self.is_recent_override_at(question_id, Utc::now())
    }

    pub fn is_recent_override_at(&self, question_id: &str, now: DateTime<Utc>) -> bool {
        self.override_age_days_at(question_id, now)
            .is_some_and(|age| age < self.config.effective_recent_days())
    }

    /// Whole days since the question's override was added.
    pub fn override_age_days(&self, question_id: &str) -> Option<i64> {
        self.override_age_days_at(question_id, Utc::now())
    }

    pub fn override_age_days_at(&self, question_id: &str, now: DateTime<Utc>) -> Option<i64> {
        self.manager
            .override_for_question(question_id)
            .map(|o| self.age_days(o, now))
    }

    /// Overrides at least `threshold_days` old, oldest first.
    pub fn suggest_override_cleanup(&self, threshold_days: i64) -> Vec<&'a OverrideRecord> {
        self.suggest_override_cleanup_at(threshold_days, Utc::now())
    }

    pub fn suggest_override_cleanup_at(
        &self,
        threshold_days: i64,
        now: DateTime<Utc>,
    ) -> Vec<&'a OverrideRecord> {
        let mut stale: Vec<&'a OverrideRecord> = self
            .manager
            .overrides()
            .iter()
            .filter(|o| self.age_days(o, now) >= threshold_days)
            .collect();
        stale.sort_by_key(|o| o.timestamp);
        stale
    }

    /// Score a justification 0-100: brevity and vague terms cost points,
    /// multi-sentence specific explanations earn them.
    pub fn validate_justification_quality(&self, text: &str) -> JustificationQuality {
        let text = text.trim();
        let len = text.chars().count();
        let mut score: i32 = 50;
        let mut feedback = Vec::new();

        if len < self.config.effective_min_justification_length() {
            score -= 40;
            feedback.push("Justification is too short to be meaningful".to_string());
        } else if len < self.config.effective_brief_justification_length() {
            score -= 10;
            feedback.push("Add more detail about why the override is needed".to_string());
        } else {
            score += 20;
        }

        if scan::sentence_count(text) >= 2 {
            score += 15;
        } else if len > 0 {
            feedback.push("Explain the reasoning in more than one sentence".to_string());
        }

        let specific = text
            .split_whitespace()
            .any(|w| w.chars().any(|c| c.is_ascii_digit()) || w.chars().count() >= 8);
        if specific {
            score += 15;
        } else if len > 0 {
            feedback.push("Mention the specific content or layout that requires the override".to_string());
        }

        let vague = vocab::vague_terms_in(text);
        if !vague.is_empty() {
            score -= 15 * vague.len().min(3) as i32;
            feedback.push(format!("Avoid vague terms: {}", vague.join(", ")));
        }

        JustificationQuality {
            score: score.clamp(0, 100) as u8,
            feedback,
        }
    }

    fn age_days(&self, record: &OverrideRecord, now: DateTime<Utc>) -> i64 {
        (now - record.timestamp).num_days().max(0)
    }
}

/// Frequent justification terms: lowercase words of at least four letters,
/// stopwords removed, ties broken alphabetically.
fn most_common_reasons(overrides: &[OverrideRecord]) -> Vec<String> {
    let mut counts: FxHashMap<String, usize> = FxHashMap::default();
    for o in overrides {
        for word in o.justification.split(|c: char| !c.is_alphanumeric()) {
            let word = word.to_lowercase();
            if word.chars().count() >= MIN_REASON_TERM_LEN && !vocab::STOPWORDS.contains(&word.as_str()) {
                *counts.entry(word).or_default() += 1;
            }
        }
    }
    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|(wa, ca), (wb, cb)| cb.cmp(ca).then_with(|| wa.cmp(wb)));
    ranked.into_iter().take(MAX_REASONS).map(|(w, _)| w).collect()
}
