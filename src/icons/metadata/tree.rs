//! Structured (JSON) metadata extraction
//!
//! Walks a node tree of the shape
//!
//! ```text
//! { "name": "...", "type": "PAGE", "id": "0:1", "children": [ ... ] }
//! ```
//!
//! pre-order, depth-first, emitting a record for every icon candidate. Missing or
//! non-string fields read as empty strings (numeric ids are kept as text), and
//! non-object children are skipped. Depth is bounded by `serde_json`'s recursion
//! limit, and a decoded `Value` is a strict tree, so no cycle handling is needed.
//!
//! An icon candidate nested below another candidate is emitted as its own record;
//! nothing is deduplicated.

use super::{ExtractionContext, IconRecord};
use crate::icons::classify::{is_icon_candidate, is_outlined_variant};
use serde_json::{Map, Value};

const NAME_KEY: &str = "name";
const KIND_KEY: &str = "type";
const ID_KEY: &str = "id";
const CHILDREN_KEY: &str = "children";

/// Extract icon records from `node` and its descendants, starting from `context`.
pub fn extract(node: &Value, context: ExtractionContext) -> Vec<IconRecord> {
    let mut icons = Vec::new();
    collect(node, context, &mut icons);
    icons
}

fn collect(node: &Value, context: ExtractionContext, icons: &mut Vec<IconRecord>) {
    let Value::Object(fields) = node else {
        return;
    };

    let name = text_field(fields, NAME_KEY);
    let kind = text_field(fields, KIND_KEY);
    let current = context.enter(&name, &kind);

    if is_icon_candidate(&name, &kind) {
        icons.push(IconRecord {
            is_outlined: is_outlined_variant(&name),
            identifier: text_field(fields, ID_KEY),
            section: current.section.clone(),
            path: current.path.clone(),
            name,
        });
    }

    if let Some(Value::Array(children)) = fields.get(CHILDREN_KEY) {
        for child in children {
            collect(child, current.clone(), icons);
        }
    }
}

fn text_field(fields: &Map<String, Value>, key: &str) -> String {
    match fields.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}
