//! shapeguard-storage: SQLite persistence for configuration and metrics.
//!
//! `SqliteStore` implements `KeyValueStore` over a single `kv_entries` table,
//! so the configuration manager and metrics collector can persist across
//! process restarts.

pub mod connection;
pub mod migrations;
pub mod queries;

pub use connection::SqliteStore;
