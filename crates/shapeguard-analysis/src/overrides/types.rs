//! Override audit result types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shapeguard_core::types::{OverrideRecord, Question};

/// Outcome of checking a proposed override. Problems are data, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OverrideValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OverrideStats {
    pub total: usize,
    /// Override pattern → count; overrides without a pattern count as "no-pattern".
    pub by_pattern: BTreeMap<String, usize>,
    /// User id → count; overrides without a user count as "anonymous".
    pub by_user: BTreeMap<String, usize>,
    pub average_justification_length: f64,
    /// Most frequent justification terms, most common first.
    pub most_common_reasons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JustificationQuality {
    /// 0-100.
    pub score: u8,
    pub feedback: Vec<String>,
}

/// A question with its override fields merged in. The input is not touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedQuestion {
    #[serde(flatten)]
    pub question: Question,
    pub has_override: bool,
    pub override_pattern: Option<String>,
    pub override_justification: Option<String>,
    pub bypass_formatting: bool,
}

impl EnrichedQuestion {
    pub fn plain(question: &Question) -> Self {
        Self {
            question: question.clone(),
            has_override: false,
            override_pattern: None,
            override_justification: None,
            bypass_formatting: false,
        }
    }

    pub fn with_override(question: &Question, record: &OverrideRecord) -> Self {
        Self {
            question: question.clone(),
            has_override: true,
            override_pattern: record.override_pattern.clone(),
            override_justification: Some(record.justification.clone()),
            bypass_formatting: record.disables_formatting(),
        }
    }
}
