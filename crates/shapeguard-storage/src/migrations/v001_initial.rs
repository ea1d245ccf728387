//! V001: key-value table for configuration, overrides and metrics logs.

pub const MIGRATION_SQL: &str = r#"
-- One JSON document per key. Keys are namespaced by the caller
-- (pattern-config, pattern-config:settings, pattern-config:overrides, metrics).
CREATE TABLE IF NOT EXISTS kv_entries (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL
) STRICT;
"#;
