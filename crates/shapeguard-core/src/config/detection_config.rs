//! Pattern detector configuration.

use serde::{Deserialize, Serialize};

/// Keyword weights used by the pattern detector.
///
/// Any monotonic scheme works as long as whole-question matches outweigh
/// whole-word matches, which outweigh bare substring matches.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DetectionConfig {
    /// Minimum trimmed question length before detection runs. Default: 3.
    pub min_question_length: Option<usize>,
    /// Weight when the whole question equals a keyword. Default: 10.0.
    pub exact_match_weight: Option<f64>,
    /// Base weight for a whole-word/phrase hit. Default: 2.0.
    pub word_match_weight: Option<f64>,
    /// Extra weight per word of a multi-word phrase hit. Default: 1.0.
    pub phrase_word_bonus: Option<f64>,
    /// Weight for a bare substring hit. Default: 1.0.
    pub substring_weight: Option<f64>,
    /// Score at which confidence saturates to 1.0. Default: 10.0.
    pub confidence_saturation: Option<f64>,
}

impl DetectionConfig {
    pub fn effective_min_question_length(&self) -> usize {
        self.min_question_length.unwrap_or(3)
    }

    pub fn effective_exact_match_weight(&self) -> f64 {
        self.exact_match_weight.unwrap_or(10.0)
    }

    pub fn effective_word_match_weight(&self) -> f64 {
        self.word_match_weight.unwrap_or(2.0)
    }

    pub fn effective_phrase_word_bonus(&self) -> f64 {
        self.phrase_word_bonus.unwrap_or(1.0)
    }

    pub fn effective_substring_weight(&self) -> f64 {
        self.substring_weight.unwrap_or(1.0)
    }

    pub fn effective_confidence_saturation(&self) -> f64 {
        self.confidence_saturation.unwrap_or(10.0)
    }
}
