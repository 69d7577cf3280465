//! Tag stripping: HTML → plain text by pattern removal.
//!
//! This is a single regex sweep, not an HTML parser. It removes every
//! `<`…`>` run and leaves everything else exactly as it was: entities such as
//! `&amp;` stay encoded, the newlines between block elements stay in place,
//! and a `<` with no closing `>` is kept verbatim.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Remove every substring matching `<[^>]*>`.
pub fn strip_tags(input: &str) -> String {
    RE_TAG.replace_all(input, "").into_owned()
}
