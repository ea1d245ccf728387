//! Auto-formatting and fix ranking.

pub mod fixes;
pub mod formatter;

pub use fixes::{suggest_fixes, FixSuggestion};
pub use formatter::{AutoFormatter, FormatKind};
