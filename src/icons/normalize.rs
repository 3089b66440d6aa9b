//! SVG normalization
//!
//! Rewrites an exported SVG into a consistent icon asset: a fixed square canvas, no
//! design-tool residue, compact markup, and a default fill when the document sets
//! none. Each step is a plain text-to-text rewrite driven by patterns. This is not
//! an XML parser and does not validate that the result renders.
//!
//! The steps run in a fixed order (see [`PIPELINE`]). Removal steps repeat until
//! nothing matches, since deleting one match can splice its neighbours into a new
//! one (`da data-x="1"ta-y="2"`). The whole pipeline then repeats until a pass
//! changes nothing, which covers splices across steps (a comment removed from the
//! middle of a tag name). The result is idempotent:
//! `normalize(normalize(d)) == normalize(d)`.
//!
//! Canvas size, dimensions and the default fill are applied to the root `<svg>`
//! tag only, so nested `width` / `stroke-width` attributes are left alone. A
//! `<svg` inside a comment is never taken for the root.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::ops::Range;
use tracing::{trace, warn};

/// Knobs for the rewrite pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Target width and height; the canvas becomes `0 0 size size`.
    pub size: u32,
    /// Fill injected on the root tag when the document declares no fill at all.
    pub default_fill: String,
    /// Design-tool XML namespaces whose declarations and attributes are removed.
    pub tool_namespaces: Vec<String>,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            size: 24,
            default_fill: "currentColor".to_string(),
            tool_namespaces: vec!["figma".to_string()],
        }
    }
}

impl NormalizeOptions {
    /// The canvas declaration value, e.g. `0 0 24 24`.
    pub fn view_box(&self) -> String {
        format!("0 0 {0} {0}", self.size)
    }
}

/// Options plus the patterns derived from them, compiled once and reused for
/// every document.
#[derive(Debug, Clone)]
pub struct Normalizer {
    options: NormalizeOptions,
    /// `xmlns:<ns>=` declarations and `<ns>:attr=` attributes; `None` when there
    /// are no tool namespaces.
    tool_attributes: Option<Regex>,
}

impl Normalizer {
    pub fn new(options: NormalizeOptions) -> Self {
        let tool_attributes = tool_attribute_pattern(&options.tool_namespaces);
        Self {
            options,
            tool_attributes,
        }
    }

    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Run [`PIPELINE`] over `doc` until a full pass leaves it unchanged.
    pub fn normalize(&self, doc: &str) -> String {
        let mut current = self.run_pipeline(doc);
        for _ in 1..MAX_PASSES {
            let next = self.run_pipeline(&current);
            if next == current {
                return current;
            }
            current = next;
        }
        warn!(passes = MAX_PASSES, "normalization did not settle");
        current
    }

    fn run_pipeline(&self, doc: &str) -> String {
        PIPELINE
            .iter()
            .fold(doc.to_string(), |current, (step, rewrite)| {
                let next = rewrite(&current, self);
                if next != current {
                    trace!(step = *step, "rewrote document");
                }
                next
            })
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(NormalizeOptions::default())
    }
}

fn tool_attribute_pattern(namespaces: &[String]) -> Option<Regex> {
    if namespaces.is_empty() {
        return None;
    }

    let names = namespaces
        .iter()
        .map(|name| regex::escape(name))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!(
        r#"\s+(?:xmlns:(?:{names})|(?:{names}):[\w.-]+)\s*=\s*(?:"[^"]*"|'[^']*')"#
    );

    match Regex::new(&pattern) {
        Ok(re) => Some(re),
        Err(err) => {
            warn!(%err, "tool namespace cleanup disabled");
            None
        }
    }
}

/// Upper bound on full pipeline passes. Each pass that changes anything removes
/// text or adds a root attribute that later passes keep, so real documents
/// settle in two or three.
const MAX_PASSES: usize = 8;

type Rewrite = fn(&str, &Normalizer) -> String;

/// The rewrite steps, in application order.
pub const PIPELINE: &[(&str, Rewrite)] = &[
    ("canvas-size", set_canvas_size),
    ("dimensions", set_dimensions),
    ("data-attributes", strip_data_attributes),
    ("prologue", strip_prologue),
    ("doctype", strip_doctype),
    ("comments", strip_comments),
    ("empty-groups", strip_empty_groups),
    ("tool-namespaces", strip_tool_namespaces),
    ("ids", strip_ids),
    ("whitespace", collapse_whitespace),
    ("default-fill", inject_default_fill),
];

static DEFAULT_NORMALIZER: Lazy<Normalizer> = Lazy::new(Normalizer::default);

static ROOT_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<(?i-u:svg)(?:[\s/][^>]*)?>").unwrap());
static COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static PROLOGUE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<\?xml[^>]*\?>\s*").unwrap());
/// A document type declaration, including an internal `[ ... ]` subset whose
/// `<!ENTITY ...>` lines carry their own `>`.
static DOCTYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<!DOCTYPE[^>\[]*(?:\[.*?\])?\s*>\s*").unwrap());

static VIEW_BOX_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(\s)viewBox\s*=\s*(?:"[^"]*"|'[^']*')"#).unwrap());
static WIDTH_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(\s)width\s*=\s*(?:"[^"]*"|'[^']*')"#).unwrap());
static HEIGHT_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(\s)height\s*=\s*(?:"[^"]*"|'[^']*')"#).unwrap());

static DATA_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\s+data-[\w.:-]*\s*=\s*(?:"[^"]*"|'[^']*')"#).unwrap());
static ID_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\s+id\s*=\s*(?:"[^"]*"|'[^']*')"#).unwrap());

/// `<g ...>` + whitespace + `</g>`, or a self-closing `<g ... />`.
static EMPTY_GROUP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<g(?:\s(?:[^>]*[^/>])?)?>\s*</g>|<g(?:\s[^>]*)?/>").unwrap()
});

static BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());
static INTER_TAG_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r">\s+<").unwrap());

/// A fill declared as an attribute (`fill="..."`) or as a style property (`fill:`).
static FILL_DECLARATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)(?:^|[\s;"'{])fill\s*[=:]"#).unwrap());

/// Normalize an SVG document with the default options.
pub fn normalize(doc: &str) -> String {
    DEFAULT_NORMALIZER.normalize(doc)
}

/// Normalize with one-off options. Build a [`Normalizer`] to reuse them.
pub fn normalize_with(doc: &str, options: &NormalizeOptions) -> String {
    Normalizer::new(options.clone()).normalize(doc)
}

/// Locate the root `<svg ...>` opening tag, skipping any inside comments.
pub fn root_tag(doc: &str) -> Option<Range<usize>> {
    let comments: Vec<Range<usize>> = COMMENT.find_iter(doc).map(|m| m.range()).collect();
    ROOT_TAG
        .find_iter(doc)
        .map(|m| m.range())
        .find(|tag| !comments.iter().any(|comment| comment.contains(&tag.start)))
}

/// Delete every match of `pattern`, repeating until the text stops changing.
fn remove_all(doc: &str, pattern: &Regex) -> String {
    let mut current = doc.to_string();
    loop {
        let next = pattern.replace_all(&current, "").into_owned();
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Set `name="value"` on the root tag: replace the first existing declaration, or
/// insert one right after `<svg`.
fn set_root_attribute(doc: &str, attr: &Regex, name: &str, value: &str) -> String {
    let Some(range) = root_tag(doc) else {
        return doc.to_string();
    };

    let tag = &doc[range.clone()];
    let rewritten = if attr.is_match(tag) {
        attr.replace(tag, |caps: &Captures| format!(r#"{}{name}="{value}""#, &caps[1]))
            .into_owned()
    } else {
        // "<svg" is 4 bytes of ASCII, whatever its case
        format!(r#"{} {name}="{value}"{}"#, &tag[..4], &tag[4..])
    };

    format!("{}{}{}", &doc[..range.start], rewritten, &doc[range.end..])
}

fn set_canvas_size(doc: &str, normalizer: &Normalizer) -> String {
    set_root_attribute(doc, &VIEW_BOX_ATTR, "viewBox", &normalizer.options.view_box())
}

fn set_dimensions(doc: &str, normalizer: &Normalizer) -> String {
    let size = normalizer.options.size.to_string();
    let doc = set_root_attribute(doc, &WIDTH_ATTR, "width", &size);
    set_root_attribute(&doc, &HEIGHT_ATTR, "height", &size)
}

fn strip_data_attributes(doc: &str, _: &Normalizer) -> String {
    remove_all(doc, &DATA_ATTR)
}

fn strip_prologue(doc: &str, _: &Normalizer) -> String {
    remove_all(doc, &PROLOGUE)
}

fn strip_doctype(doc: &str, _: &Normalizer) -> String {
    remove_all(doc, &DOCTYPE)
}

fn strip_comments(doc: &str, _: &Normalizer) -> String {
    remove_all(doc, &COMMENT)
}

/// Removing an empty group can empty its parent.
fn strip_empty_groups(doc: &str, _: &Normalizer) -> String {
    remove_all(doc, &EMPTY_GROUP)
}

fn strip_tool_namespaces(doc: &str, normalizer: &Normalizer) -> String {
    match &normalizer.tool_attributes {
        Some(pattern) => remove_all(doc, pattern),
        None => doc.to_string(),
    }
}

fn strip_ids(doc: &str, _: &Normalizer) -> String {
    remove_all(doc, &ID_ATTR)
}

fn collapse_whitespace(doc: &str, _: &Normalizer) -> String {
    let doc = BLANK_LINES.replace_all(doc, "\n");
    let doc = INTER_TAG_SPACE.replace_all(&doc, "><");
    doc.trim().to_string()
}

/// Check if the document declares a fill anywhere.
pub fn has_fill(doc: &str) -> bool {
    FILL_DECLARATION.is_match(doc)
}

fn inject_default_fill(doc: &str, normalizer: &Normalizer) -> String {
    if has_fill(doc) {
        return doc.to_string();
    }
    match root_tag(doc) {
        Some(range) => format!(
            r#"{} fill="{}"{}"#,
            &doc[..range.start + 4],
            normalizer.options.default_fill,
            &doc[range.start + 4..]
        ),
        None => doc.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIGMA_EXPORT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">
<!-- Generator: Figma -->
<svg width="32" height="32" viewBox="0 0 32 32" xmlns="http://www.w3.org/2000/svg" xmlns:figma="http://www.figma.com/figma/ns" data-name="Home">
  <g id="Frame 1">

  </g>
  <path id="Vector" d="M4 12L12 4L20 12" stroke="black" stroke-width="2" data-node-id="1:2"/>
</svg>
"#;

    #[test]
    fn test_normalize_figma_export() {
        insta::assert_snapshot!(
            normalize(FIGMA_EXPORT),
            @r#"<svg fill="currentColor" width="24" height="24" viewBox="0 0 24 24" xmlns="http://www.w3.org/2000/svg"><path d="M4 12L12 4L20 12" stroke="black" stroke-width="2"/></svg>"#
        );
    }

    #[test]
    fn test_injects_missing_canvas_and_dimensions() {
        let doc = r#"<svg xmlns="http://www.w3.org/2000/svg"><path d="M0 0h24v24H0z"/></svg>"#;
        assert_eq!(
            normalize(doc),
            r#"<svg fill="currentColor" height="24" width="24" viewBox="0 0 24 24" xmlns="http://www.w3.org/2000/svg"><path d="M0 0h24v24H0z"/></svg>"#
        );
    }

    #[test]
    fn test_bare_root_tag() {
        assert_eq!(
            normalize("<svg><path fill=\"#000\" d=\"M0\"/></svg>"),
            r##"<svg height="24" width="24" viewBox="0 0 24 24"><path fill="#000" d="M0"/></svg>"##
        );
    }

    #[test]
    fn test_existing_fill_prevents_injection() {
        let styled = normalize(r#"<svg viewBox="0 0 1 1"><path style="fill:red" d="M0"/></svg>"#);
        assert!(!styled.contains("currentColor"));

        let attr = normalize(r#"<svg viewBox="0 0 1 1" fill='none'><path d="M0"/></svg>"#);
        assert!(!attr.contains("currentColor"));
        assert!(attr.contains("fill='none'"));
    }

    #[test]
    fn test_nested_width_attributes_untouched() {
        let out = normalize(r#"<svg width="10"><rect width="4" stroke-width="2"/></svg>"#);
        assert!(out.contains(r#"<rect width="4" stroke-width="2"/>"#));
        assert!(out.starts_with(
            r#"<svg fill="currentColor" height="24" viewBox="0 0 24 24" width="24">"#
        ));
    }

    #[test]
    fn test_nested_empty_groups_removed() {
        let out = normalize(r#"<svg><g><g id="a"> </g><g/></g><path fill="red" d="M1"/></svg>"#);
        assert!(!out.contains("<g"));
        assert!(out.ends_with(r#"><path fill="red" d="M1"/></svg>"#));
    }

    #[test]
    fn test_self_closed_group_keeps_parent_closing_tag() {
        let out = normalize(r#"<svg><g id="x"><g/><path fill="red" d="M1"/></g></svg>"#);
        assert!(out.contains(r#"<g><path fill="red" d="M1"/></g>"#));
    }

    #[test]
    fn test_root_inside_comment_is_skipped() {
        let doc = r#"<!-- <svg width="1"> --><svg><path fill="red" d="M0"/></svg>"#;
        assert_eq!(
            normalize(doc),
            r#"<svg height="24" width="24" viewBox="0 0 24 24"><path fill="red" d="M0"/></svg>"#
        );
    }

    #[test]
    fn test_lookalike_attributes_survive() {
        let out = normalize(r#"<svg fill="none"><rect grid="1" paid="2"/></svg>"#);
        assert!(out.contains(r#"grid="1""#));
        assert!(out.contains(r#"paid="2""#));
    }

    #[test]
    fn test_tool_namespace_attributes_removed() {
        let out = normalize(
            r#"<svg xmlns:figma="https://figma.com" figma:type="frame" fill="none"><path figma:id="1"/></svg>"#,
        );
        assert!(!out.contains("figma"));
    }

    #[test]
    fn test_custom_options() {
        let options = NormalizeOptions {
            size: 16,
            default_fill: "black".to_string(),
            tool_namespaces: vec!["sketch".to_string()],
        };
        let out = normalize_with(r#"<svg xmlns:sketch="s"><path/></svg>"#, &options);
        assert_eq!(
            out,
            r#"<svg fill="black" height="16" width="16" viewBox="0 0 16 16"><path/></svg>"#
        );
    }

    #[test]
    fn test_document_without_root_is_only_cleaned() {
        assert_eq!(normalize("<!-- x -->\n\n<path d=\"M0\"/>  "), "<path d=\"M0\"/>");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_is_idempotent_on_samples() {
        for doc in [
            FIGMA_EXPORT,
            "<svg><g><g></g></g></svg>",
            "<SVG WIDTH=\"3\"></SVG>",
            "<svg width='5' data-x='1'>\n\n\n<g>\n</g>\n</svg>",
            r#"<svg fill="none"><path da data-x="1"ta-y="2" d="M0"/></svg>"#,
            r#"<svg><!<!-- a -->-- b --><path fill="red" d="M0"/></svg>"#,
            r#"<svg><path i id="1"d="2" fill="red"/></svg>"#,
            r#"<svg xmlns:fig xmlns:figma="x"ma:a="1" fill="none"/>"#,
            "<s<!-- x -->vg></svg>",
            "<svg><g><!-- x --></g><g <!-- y -->/></svg>",
        ] {
            let once = normalize(doc);
            assert_eq!(normalize(&once), once, "document {doc:?}");
        }
    }

    #[test]
    fn test_spliced_data_attributes_removed_in_one_pass() {
        assert_eq!(
            normalize(r#"<svg fill="none"><path da data-x="1"ta-y="2" d="M0"/></svg>"#),
            r#"<svg height="24" width="24" viewBox="0 0 24 24" fill="none"><path d="M0"/></svg>"#
        );
    }

    #[test]
    fn test_spliced_comment_removed_in_one_pass() {
        let out = normalize(r#"<svg><!<!-- a -->-- b --><path fill="red" d="M0"/></svg>"#);
        assert!(!out.contains("<!--"));
        assert!(!out.contains("b -->"));
        assert!(out.ends_with(r#"<path fill="red" d="M0"/></svg>"#));
    }

    #[test]
    fn test_root_revealed_by_comment_removal_gets_canvas() {
        assert_eq!(
            normalize("<s<!-- x -->vg></svg>"),
            r#"<svg height="24" width="24" viewBox="0 0 24 24" fill="currentColor"></svg>"#
        );
    }

    #[test]
    fn test_doctype_with_internal_subset_removed() {
        let doc = concat!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n",
            "<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" ",
            "\"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\" [\n",
            "\t<!ENTITY ns_extend \"http://ns.adobe.com/Extensibility/1.0/\">\n",
            "\t<!ENTITY ns_svg \"http://www.w3.org/2000/svg\">\n",
            "]>\n",
            "<svg><path fill=\"red\" d=\"M0\"/></svg>\n",
        );
        assert_eq!(
            normalize(doc),
            r#"<svg height="24" width="24" viewBox="0 0 24 24"><path fill="red" d="M0"/></svg>"#
        );
    }

    #[test]
    fn test_plain_doctype_removed() {
        let out = normalize("<!doctype svg>\n<svg fill=\"none\"></svg>");
        assert!(out.starts_with("<svg"));
    }

    #[test]
    fn test_normalizer_reuses_options() {
        let normalizer = Normalizer::new(NormalizeOptions {
            tool_namespaces: vec!["sketch".to_string(), "figma".to_string()],
            ..NormalizeOptions::default()
        });
        let doc = r#"<svg sketch:type="a" figma:id="b" fill="none"><path sketch:x="1"/></svg>"#;
        let out = normalizer.normalize(doc);
        assert!(!out.contains("sketch"));
        assert!(!out.contains("figma"));
        assert_eq!(normalizer.normalize(&out), out);
        assert_eq!(normalizer.options().size, 24);
    }

    #[test]
    fn test_no_tool_namespaces() {
        let normalizer = Normalizer::new(NormalizeOptions {
            tool_namespaces: Vec::new(),
            ..NormalizeOptions::default()
        });
        let out = normalizer.normalize(r#"<svg figma:type="a" fill="none"></svg>"#);
        assert!(out.contains(r#"figma:type="a""#));
    }

    #[test]
    fn test_pipeline_order() {
        let names: Vec<_> = PIPELINE.iter().map(|(name, _)| *name).collect();
        assert_eq!(names.first(), Some(&"canvas-size"));
        assert_eq!(names.last(), Some(&"default-fill"));
        assert_eq!(names.len(), 11);
    }
}
