//! Markup (tag scan) metadata extraction
//!
//! Scans XML-like metadata such as
//!
//! ```text
//! <frame id="1:2" name="Navigation" x="0" y="0">
//!   <instance id="1:3" name="icon-arrow-left" width="24" height="24" />
//! </frame>
//! ```
//!
//! once, left to right, without building a tree. Every opening tag carrying both a
//! non-empty `name` and `id` attribute is a node; its tag name is the node kind.
//! Frame, page and section tags only move the current section. Nesting is not
//! tracked, so a section stays current until the next section tag, even past its
//! closing tag.

use super::{join_path, IconRecord};
use crate::icons::classify::{is_icon_candidate, is_outlined_variant, is_section_kind};
use once_cell::sync::Lazy;
use regex::Regex;

/// Opening tag: kind, then the raw attribute text up to `>`.
static ELEMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"<(\w+)(\s[^>]*)?").unwrap());

/// One `key="value"` or `key='value'` attribute.
static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:^|\s)([\w:.-]+)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

/// A node found by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedNode {
    pub kind: String,
    pub name: String,
    pub identifier: String,
}

/// Extract icon records from markup text, in order of appearance.
pub fn extract(text: &str) -> Vec<IconRecord> {
    let mut section = String::new();
    let mut icons = Vec::new();

    for node in scan(text) {
        if is_section_kind(&node.kind) {
            section = node.name;
            continue;
        }

        if is_icon_candidate(&node.name, &node.kind) {
            icons.push(IconRecord {
                is_outlined: is_outlined_variant(&node.name),
                path: join_path(&section, &node.name),
                section: section.clone(),
                identifier: node.identifier,
                name: node.name,
            });
        }
    }

    icons
}

/// Find every tag carrying both a `name` and an `id`, in document order.
pub fn scan(text: &str) -> Vec<TaggedNode> {
    ELEMENT
        .captures_iter(text)
        .filter_map(|caps| {
            let kind = caps.get(1)?.as_str();
            let attributes = caps.get(2)?.as_str();
            let (name, identifier) = name_and_id(attributes)?;
            Some(TaggedNode {
                kind: kind.to_string(),
                name,
                identifier,
            })
        })
        .collect()
}

fn name_and_id(attributes: &str) -> Option<(String, String)> {
    let mut name = None;
    let mut identifier = None;

    for caps in ATTRIBUTE.captures_iter(attributes) {
        let key = &caps[1];
        let value = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
        if key.eq_ignore_ascii_case("name") && name.is_none() {
            name = Some(decode_entities(value));
        } else if key.eq_ignore_ascii_case("id") && identifier.is_none() {
            identifier = Some(decode_entities(value));
        }
    }

    match (name, identifier) {
        (Some(name), Some(id)) if !name.is_empty() && !id.is_empty() => Some((name, id)),
        _ => None,
    }
}

/// Decode the five predefined XML entities.
fn decode_entities(value: &str) -> String {
    if !value.contains('&') {
        return value.to_string();
    }
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
