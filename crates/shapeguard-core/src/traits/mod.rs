//! Trait seams shared across shapeguard crates.

pub mod kv_store;

pub use kv_store::{keys, KeyValueStore, MemoryStore};
