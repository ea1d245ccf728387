//! Persistence configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite database path. Default: `.shapeguard/state.db` under the project root.
    pub database_path: Option<PathBuf>,
}

impl StorageConfig {
    pub fn effective_database_path(&self, root: &std::path::Path) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(|| root.join(".shapeguard").join("state.db"))
    }
}
