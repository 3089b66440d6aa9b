//! Icon Classification
//!
//! Heuristics deciding whether a design node is an icon, and whether an icon name
//! denotes the outlined (stroke-only) style.
//!
//! The rules are data, not control flow: each table is an ordered list of
//! `(meaning, pattern)` pairs matched against the lowercased name, so the rule set
//! can be inspected and tested on its own. These are heuristics over naming
//! conventions. Misclassifications are expected and accepted, for example:
//! - `"form-icon"` is an icon (the name rule wins over the exclusion vocabulary)
//! - `"Platform"` as a COMPONENT is not an icon (it contains `form`)
//! - `"Airline"` is not outlined (no delimiter before `line`)

use once_cell::sync::Lazy;
use regex::Regex;

/// A single classification rule: a named pattern over a lowercased identifier.
#[derive(Debug)]
pub struct Rule {
    pub meaning: &'static str,
    pub pattern: Regex,
}

/// Names that look like icon identifiers. Tried in declaration order.
const ICON_NAME_PATTERNS: &[(&str, &str)] = &[
    ("icon-prefix", r"^icon[-_]"),
    ("icon-suffix", r"[-_]icon$"),
    ("ic-prefix", r"^ic[-_]"),
    ("ic-suffix", r"[-_]ic$"),
    ("size-prefix", r"^\d+[-_]"),
];

/// Names that denote the outlined style. A delimiter is required.
const OUTLINED_NAME_PATTERNS: &[(&str, &str)] = &[
    ("outlined-suffix", r"[-_\s]outlined?$"),
    ("outline-suffix", r"[-_\s]outline$"),
    ("line-suffix", r"[-_\s]line$"),
    ("stroke-suffix", r"[-_\s]stroke$"),
    ("outline-prefix", r"^outline[-_\s]"),
];

/// Node kinds that are containers and never icons themselves.
pub const CONTAINER_KINDS: &[&str] = &["DOCUMENT", "PAGE", "SECTION"];

/// Node kinds whose name becomes the section of everything below them.
pub const SECTION_KINDS: &[&str] = &["PAGE", "FRAME", "SECTION"];

/// Reusable component kinds, icons unless their name says otherwise.
pub const COMPONENT_KINDS: &[&str] = &["COMPONENT", "COMPONENT_SET", "INSTANCE"];

/// Words marking a component as a UI element rather than an icon.
pub const EXCLUDED_WORDS: &[&str] = &["button", "input", "card", "modal", "dialog", "form"];

pub static ICON_NAME_RULES: Lazy<Vec<Rule>> = Lazy::new(|| compile(ICON_NAME_PATTERNS));

pub static OUTLINED_NAME_RULES: Lazy<Vec<Rule>> = Lazy::new(|| compile(OUTLINED_NAME_PATTERNS));

fn compile(table: &[(&'static str, &str)]) -> Vec<Rule> {
    table
        .iter()
        .map(|&(meaning, pattern)| Rule {
            meaning,
            pattern: Regex::new(pattern).unwrap(),
        })
        .collect()
}

/// Return the first rule in `rules` matching the lowercased `name`.
pub fn first_match<'a>(rules: &'a [Rule], name: &str) -> Option<&'a Rule> {
    let lower = name.to_lowercase();
    rules.iter().find(|rule| rule.pattern.is_match(&lower))
}

fn kind_is_one_of(kind: &str, kinds: &[&str]) -> bool {
    kinds.iter().any(|k| k.eq_ignore_ascii_case(kind))
}

/// Check if a node kind opens a new section (page, frame or section).
pub fn is_section_kind(kind: &str) -> bool {
    kind_is_one_of(kind, SECTION_KINDS)
}

/// Determine if a node is likely an icon.
///
/// Containers are never icons. Otherwise either condition is sufficient:
/// 1. the name matches an icon naming rule
/// 2. the kind is a component kind and the name avoids the exclusion vocabulary
pub fn is_icon_candidate(name: &str, kind: &str) -> bool {
    if kind_is_one_of(kind, CONTAINER_KINDS) {
        return false;
    }

    if first_match(&ICON_NAME_RULES, name).is_some() {
        return true;
    }

    if kind_is_one_of(kind, COMPONENT_KINDS) {
        let lower = name.to_lowercase();
        return !EXCLUDED_WORDS.iter().any(|word| lower.contains(word));
    }

    false
}

/// Check if an icon name indicates an outlined variant.
pub fn is_outlined_variant(name: &str) -> bool {
    first_match(&OUTLINED_NAME_RULES, name).is_some()
}
