//! Design metadata parsing
//!
//! Metadata dumps arrive in one of two shapes: a JSON node tree, or XML-like
//! markup listing nodes as tags. Both are reduced to the same flat list of
//! [`IconRecord`]s.
//!
//! Strategy selection is explicit: [`MetadataSource::detect`] decodes the text as a
//! JSON object if it can, and otherwise falls back to scanning the raw text for
//! tags. Exactly one strategy runs per input; results are never merged.

pub mod tags;
pub mod tree;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// A single icon discovered in design metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconRecord {
    /// Raw node name, not guaranteed unique.
    pub name: String,
    /// Opaque node id in the design tool.
    #[serde(rename = "node_id")]
    pub identifier: String,
    /// Nearest enclosing page / frame / section name, empty if none.
    pub section: String,
    pub is_outlined: bool,
    /// Slash-joined ancestor chain ending in `name`.
    pub path: String,
}

/// Traversal state threaded through extraction.
///
/// Always passed by value: each child derives its own context from its parent's,
/// so sibling subtrees never observe each other's section changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionContext {
    pub section: String,
    pub path: String,
}

impl ExtractionContext {
    /// Context for a node named `name` of kind `kind` below `self`.
    pub fn enter(&self, name: &str, kind: &str) -> ExtractionContext {
        let section = if crate::icons::classify::is_section_kind(kind) {
            name.to_string()
        } else {
            self.section.clone()
        };

        ExtractionContext {
            section,
            path: join_path(&self.path, name),
        }
    }
}

/// Join a path prefix and a name with `/`, omitting the separator for an empty prefix.
pub fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}

/// The parsing strategy chosen for a metadata dump.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataSource<'a> {
    /// The text decoded to a JSON object: walk it as a node tree.
    Structured(Value),
    /// Anything else: scan the raw text for tagged elements.
    Markup(&'a str),
}

impl<'a> MetadataSource<'a> {
    /// Pick the strategy for `text`. A decode failure, or JSON that is not an
    /// object, selects [`MetadataSource::Markup`].
    pub fn detect(text: &'a str) -> MetadataSource<'a> {
        match serde_json::from_str::<Value>(text) {
            Ok(value @ Value::Object(_)) => MetadataSource::Structured(value),
            Ok(_) => {
                debug!("metadata is JSON but not an object, scanning as markup");
                MetadataSource::Markup(text)
            }
            Err(err) => {
                debug!(%err, "metadata is not JSON, scanning as markup");
                MetadataSource::Markup(text)
            }
        }
    }

    /// Short name of the strategy, for logs and diagnostics.
    pub fn strategy_name(&self) -> &'static str {
        match self {
            MetadataSource::Structured(_) => "structured",
            MetadataSource::Markup(_) => "markup",
        }
    }

    /// Run the selected strategy.
    pub fn extract(&self) -> Vec<IconRecord> {
        match self {
            MetadataSource::Structured(root) => tree::extract(root, ExtractionContext::default()),
            MetadataSource::Markup(text) => tags::extract(text),
        }
    }
}

/// Parse a metadata dump into icon records. Never fails: input with no
/// recognizable icons yields an empty list.
pub fn parse(text: &str) -> Vec<IconRecord> {
    let source = MetadataSource::detect(text);
    let icons = source.extract();
    debug!(
        strategy = source.strategy_name(),
        count = icons.len(),
        "parsed icon metadata"
    );
    icons
}
