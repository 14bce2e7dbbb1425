//! Unit pattern matching.
//!
//! Recognizes `<number><optional whitespace><unit token>`:
//!
//! - number: ASCII digits with an optional fractional part. No sign, no
//!   thousands separator, no exponent. In `1,000 ft` only `000 ft` matches.
//! - unit token, ignoring case: `inches in feet ft yards yd miles mi pounds
//!   lbs ounces oz fahrenheit °F`, each followed by a word boundary, or one
//!   of the symbols `"` and `''`, which need none.
//!
//! Longer spellings are listed first so `inches` wins over `in`. The boundary
//! keeps `in` from matching the start of `inside` and `mi` the start of
//! `mixed`.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static UNIT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)([0-9]+(?:\.[0-9]+)?)\s*(?:(inches|in|feet|ft|yards|yd|miles|mi|pounds|lbs|ounces|oz|fahrenheit|°F)\b|(''|"))"#,
    )
    .expect("unit pattern is a valid regex")
});

/// A number followed by a unit token, found in a text string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitMatch<'t> {
    /// Whole matched substring, as written
    pub matched: &'t str,
    /// The number, as written
    pub number: &'t str,
    /// The unit token, as written
    pub unit: &'t str,
    /// Byte offset of the match in the scanned text
    pub start: usize,
}

impl UnitMatch<'_> {
    /// Byte offset one past the end of the match.
    pub fn end(&self) -> usize {
        self.start + self.matched.len()
    }
}

/// Find all unit matches in `text`, left to right, non-overlapping.
pub fn find_units(text: &str) -> impl Iterator<Item = UnitMatch<'_>> {
    UNIT_PATTERN.captures_iter(text).filter_map(|caps| {
        let whole = caps.get(0)?;
        let number = caps.get(1)?;
        let unit = caps.get(2).or_else(|| caps.get(3))?;
        Some(UnitMatch {
            matched: whole.as_str(),
            number: number.as_str(),
            unit: unit.as_str(),
            start: whole.start(),
        })
    })
}

/// Rebuild `text` with each match replaced by what `replace` returns.
///
/// `None` keeps the matched substring verbatim. The input is read in full
/// before anything is produced; text without matches is borrowed unchanged.
pub fn replace_units<'t, F>(text: &'t str, mut replace: F) -> Cow<'t, str>
where
    F: FnMut(&UnitMatch<'t>) -> Option<String>,
{
    let mut output: Option<String> = None;
    let mut last = 0;

    for unit_match in find_units(text) {
        let Some(replacement) = replace(&unit_match) else {
            continue;
        };
        let buf = output.get_or_insert_with(|| String::with_capacity(text.len()));
        buf.push_str(&text[last..unit_match.start]);
        buf.push_str(&replacement);
        last = unit_match.end();
    }

    match output {
        Some(mut buf) => {
            buf.push_str(&text[last..]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(text),
    }
}
