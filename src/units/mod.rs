//! Unit detection and conversion.
//!
//! - `pattern`: finds `<number><unit>` matches in a string
//! - `context`: builds the sibling text window and tests it for keywords
//! - `convert`: the US customary to metric conversion table

mod context;
mod convert;
mod pattern;

pub use context::{DEFAULT_CONTEXT_BUDGET, MEASUREMENT_KEYWORDS, has_measurement_keyword, visible_context};
pub use convert::{Conversion, ConversionRule, RULES, convert, rule_for};
pub use pattern::{UnitMatch, find_units, replace_units};
