//! Override validation, resolution and auditing.

pub mod types;
pub mod utils;

pub use types::{EnrichedQuestion, JustificationQuality, OverrideStats, OverrideValidation};
pub use utils::OverrideUtils;
