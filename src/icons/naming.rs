//! Icon naming
//!
//! Converts free-form icon identifiers (`icon-home-outline`, `arrowLeft`,
//! `Search_24.svg`) into the canonical form used for generated file names.

use crate::icons::classify::Rule;
use once_cell::sync::Lazy;
use regex::Regex;

/// Outlined-style suffixes stripped by [`split_variant`], in priority order.
/// The delimiter is optional and matching is case-insensitive.
const VARIANT_SUFFIX_PATTERNS: &[(&str, &str)] = &[
    ("outlined-suffix", r"(?i)[-_\s]?outlined?$"),
    ("outline-suffix", r"(?i)[-_\s]?outline$"),
    ("line-suffix", r"(?i)[-_\s]?line$"),
    ("stroke-suffix", r"(?i)[-_\s]?stroke$"),
];

pub static VARIANT_SUFFIX_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    VARIANT_SUFFIX_PATTERNS
        .iter()
        .map(|&(meaning, pattern)| Rule {
            meaning,
            pattern: Regex::new(pattern).unwrap(),
        })
        .collect()
});

/// One or more trailing file extensions (`.svg`, `.png`, `.jpg`).
static FILE_EXTENSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:\.(?:svg|png|jpg))+$").unwrap());

static WORD_DELIMITERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-_\s]+").unwrap());

fn is_delimiter(c: char) -> bool {
    c == '-' || c == '_' || c.is_whitespace()
}

/// Split a name into its base identity and whether it names the outlined variant.
///
/// Only the first matching suffix rule is applied. On a match the suffix is removed
/// and leftover delimiters are trimmed from both ends of the base.
pub fn split_variant(name: &str) -> (String, bool) {
    for rule in VARIANT_SUFFIX_RULES.iter() {
        if let Some(found) = rule.pattern.find(name) {
            let base = name[..found.start()].trim_matches(is_delimiter);
            return (base.to_string(), true);
        }
    }

    (name.to_string(), false)
}

/// Convert any naming convention to the canonical joined-word (PascalCase) form.
///
/// 1. strip trailing file extensions
/// 2. split on hyphen / underscore / whitespace runs
/// 3. split each word again at lowercase -> uppercase boundaries
/// 4. uppercase the first letter of every word and join
///
/// Casing past the first letter is preserved, so `"HTTPServer"` stays
/// `"HTTPServer"`. The joined result never ends in a file extension, which keeps
/// the transform idempotent for inputs like `"logo.-svg"`.
pub fn to_canonical_word_form(name: &str) -> String {
    let stem = FILE_EXTENSION.replace(name, "");

    let joined: String = WORD_DELIMITERS
        .split(&stem)
        .flat_map(split_camel_case)
        .filter(|word| !word.is_empty())
        .map(capitalize_first)
        .collect();

    FILE_EXTENSION.replace(&joined, "").into_owned()
}

/// Split a word at every lowercase -> uppercase boundary without dropping characters.
fn split_camel_case(word: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;

    for (idx, c) in word.char_indices() {
        if let Some(p) = prev {
            if p.is_lowercase() && c.is_uppercase() {
                parts.push(&word[start..idx]);
                start = idx;
            }
        }
        prev = Some(c);
    }
    parts.push(&word[start..]);
    parts
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
