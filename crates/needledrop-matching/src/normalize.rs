// SPDX-License-Identifier: GPL-3.0-or-later

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PARENTHETICAL: Regex =
        Regex::new(r"\(.+?\)").expect("parenthetical regex is valid");
}

/// Canonicalize a display name for comparison.
///
/// Strips every shortest non-overlapping `(...)` span, left to right, then
/// lowercases the remainder. A `(` with no closing `)` is left untouched,
/// as is a bare `()` with nothing between the delimiters. Surrounding
/// whitespace is preserved.
pub fn normalize_name(name: &str) -> String {
    PARENTHETICAL.replace_all(name, "").to_lowercase()
}
