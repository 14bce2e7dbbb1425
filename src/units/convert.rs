//! Conversion rules from US customary units to metric.
//!
//! Seven rules, one per unit family. Each rule maps a set of accepted
//! spellings to an affine conversion `(value + offset) * scale` and the label
//! of the metric unit it produces.

use std::fmt;
use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use crate::error::{RewriteError, RewriteResult};

/// One static conversion table entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionRule {
    /// Unit family name, for diagnostics
    pub family: &'static str,
    /// Accepted token spellings, lowercase
    pub spellings: &'static [&'static str],
    /// Added to the value before scaling
    pub offset: f64,
    /// Multiplier applied after the offset
    pub scale: f64,
    /// Metric unit label
    pub label: &'static str,
}

impl ConversionRule {
    /// Apply the rule to a value.
    pub fn apply(&self, value: f64) -> Conversion {
        Conversion {
            value: (value + self.offset) * self.scale,
            label: self.label,
        }
    }
}

/// The conversion table.
pub static RULES: [ConversionRule; 7] = [
    ConversionRule {
        family: "inch",
        spellings: &["inches", "in", "\"", "''"],
        offset: 0.0,
        scale: 2.54,
        label: "cm",
    },
    ConversionRule {
        family: "foot",
        spellings: &["feet", "ft"],
        offset: 0.0,
        scale: 0.3048,
        label: "m",
    },
    ConversionRule {
        family: "yard",
        spellings: &["yards", "yd"],
        offset: 0.0,
        scale: 0.9144,
        label: "m",
    },
    ConversionRule {
        family: "mile",
        spellings: &["miles", "mi"],
        offset: 0.0,
        scale: 1.60934,
        label: "km",
    },
    ConversionRule {
        family: "pound",
        spellings: &["pounds", "lbs"],
        offset: 0.0,
        scale: 0.453592,
        label: "kg",
    },
    ConversionRule {
        family: "ounce",
        spellings: &["ounces", "oz"],
        offset: 0.0,
        scale: 28.3495,
        label: "g",
    },
    ConversionRule {
        family: "fahrenheit",
        spellings: &["fahrenheit", "°f"],
        offset: -32.0,
        scale: 5.0 / 9.0,
        label: "°C",
    },
];

static RULE_INDEX: LazyLock<FxHashMap<&'static str, &'static ConversionRule>> =
    LazyLock::new(|| {
        RULES
            .iter()
            .flat_map(|rule| rule.spellings.iter().map(move |&s| (s, rule)))
            .collect()
    });

/// Find the rule for a unit token, ignoring case.
pub fn rule_for(token: &str) -> Option<&'static ConversionRule> {
    RULE_INDEX.get(token.to_lowercase().as_str()).copied()
}

/// Convert `value` expressed in `token` units.
pub fn convert(value: f64, token: &str) -> RewriteResult<Conversion> {
    rule_for(token)
        .map(|rule| rule.apply(value))
        .ok_or_else(|| RewriteError::unknown_unit(token))
}

// =============================================================================
// Conversion
// =============================================================================

/// A converted quantity.
///
/// Displays as `"<value> <label>"` with exactly two decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conversion {
    /// Converted value, unrounded
    pub value: f64,
    /// Metric unit label
    pub label: &'static str,
}

impl Conversion {
    /// Value rounded to two decimals, halves away from zero.
    ///
    /// Negative zero is normalized so it never renders as `-0.00`.
    pub fn rounded(&self) -> f64 {
        let rounded = (self.value * 100.0).round() / 100.0;
        if rounded == 0.0 { 0.0 } else { rounded }
    }
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.rounded(), self.label)
    }
}
