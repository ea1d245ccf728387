//! Tests for core data types and the in-memory store.

use shapeguard_core::errors::{ConfigError, ShapeguardErrorCode, StorageError};
use shapeguard_core::traits::{keys, KeyValueStore, MemoryStore};
use shapeguard_core::types::*;

#[test]
fn test_constraint_serializes_as_kind_value() {
    let json = serde_json::to_value(Constraint::MinColumns(2)).unwrap();
    assert_eq!(json, serde_json::json!({"kind": "min-columns", "value": 2}));

    let parsed: Constraint =
        serde_json::from_value(serde_json::json!({"kind": "max-imbalance-ratio", "value": 3.0}))
            .unwrap();
    assert_eq!(parsed, Constraint::MaxImbalanceRatio(3.0));

    let unit: Constraint = serde_json::from_value(serde_json::json!({"kind": "action-verbs"})).unwrap();
    assert_eq!(unit, Constraint::ActionVerbs);
}

#[test]
fn test_section_format_names() {
    assert_eq!(SectionFormat::ProsCons.as_str(), "pros-cons");
    assert_eq!(SectionFormat::parse_str("Pros_Cons"), Some(SectionFormat::ProsCons));
    assert_eq!(SectionFormat::parse_str("chart"), None);
    let json = serde_json::to_string(&SectionFormat::Troubleshooting).unwrap();
    assert_eq!(json, "\"troubleshooting\"");
}

#[test]
fn test_severity_priority_and_order() {
    assert!(Severity::Error < Severity::Warning);
    assert!(Severity::Warning < Severity::Info);
    assert_eq!(Severity::Error.fix_priority(), 100);
    assert_eq!(Severity::Warning.fix_priority(), 50);
    assert_eq!(Severity::Info.fix_priority(), 25);
    assert_eq!(Severity::parse("WARN"), Some(Severity::Warning));
    assert_eq!(FixPriority::from_severity(Severity::Info).label(), "CONSIDER");
}

#[test]
fn test_settings_set_rejects_mismatched_kind() {
    let mut settings = ConfigurationSettings::default();
    assert!(!settings.set(SettingKey::StrictMode, SettingValue::Threshold(5)));
    assert!(settings.set(SettingKey::MaxValidationScore, SettingValue::Threshold(250)));
    assert_eq!(settings.get(SettingKey::MaxValidationScore), SettingValue::Threshold(100));
}

#[test]
fn test_pattern_patch_keeps_id() {
    let mut pattern = FormatPattern {
        id: "p".into(),
        name: "P".into(),
        description: String::new(),
        keywords: vec!["a".into()],
        priority: 1,
        structure: PatternStructure::default(),
        template: String::new(),
        examples: Vec::new(),
    };
    pattern.apply_patch(PatternPatch {
        priority: Some(9),
        keywords: Some(vec!["b".into()]),
        ..Default::default()
    });
    assert_eq!(pattern.id, "p");
    assert_eq!(pattern.priority, 9);
    assert_eq!(pattern.keywords, vec!["b".to_string()]);
}

#[test]
fn test_memory_store_roundtrip() {
    let store = MemoryStore::new();
    assert!(store.is_empty());
    store.set("k", "v").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    store.remove("k").unwrap();
    assert_eq!(store.get("k").unwrap(), None);
}

#[test]
fn test_memory_store_keys_are_sorted() {
    let store = MemoryStore::new();
    for key in [keys::OVERRIDES, keys::METRICS, keys::PATTERN_CONFIG] {
        store.set(key, "{}").unwrap();
    }
    assert_eq!(store.len(), 3);
    assert_eq!(
        store.keys().unwrap(),
        vec!["metrics", "pattern-config", "pattern-config:overrides"]
    );
}

#[test]
fn test_error_codes() {
    let e = ConfigError::MalformedImport { message: "x".into() };
    assert_eq!(e.error_code(), "IMPORT_ERROR");
    assert!(e.coded_string().starts_with("[IMPORT_ERROR]"));
    let s = StorageError::MigrationFailed { version: 1, message: "x".into() };
    assert_eq!(s.error_code(), "MIGRATION_FAILED");
}
