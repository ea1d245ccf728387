//! Query modules, one per table.

pub mod kv;
