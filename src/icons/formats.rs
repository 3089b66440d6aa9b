//! Output formats for icon listings
//!
//! A pluggable registry of formatters, each turning a list of [`IconRecord`]s into
//! text. Built-ins: `list`, `verbose`, `json`, `yaml` and `summary`.

use crate::icons::metadata::IconRecord;
use crate::icons::query::summarize;
use std::collections::{BTreeMap, HashMap};

/// Error that can occur during formatting
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Trait for icon list formatters
pub trait Formatter: Send + Sync {
    /// The name of this format (e.g., "list", "json")
    fn name(&self) -> &str;

    /// Render the icons in this format
    fn format(&self, icons: &[IconRecord]) -> Result<String, FormatError>;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }
}

/// Registry of icon list formatters, looked up by name.
pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Register a formatter
    ///
    /// If a formatter with the same name already exists, it will be replaced.
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    /// Get a formatter by name
    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    /// Check if a format exists
    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    /// Render icons using the specified format
    pub fn format(&self, icons: &[IconRecord], format: &str) -> Result<String, FormatError> {
        let formatter = self
            .get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?;
        formatter.format(icons)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    /// Create a registry with default formatters
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(ListFormatter);
        registry.register(VerboseFormatter);
        registry.register(JsonFormatter);
        registry.register(YamlFormatter);
        registry.register(SummaryFormatter);

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Icons grouped by section, sorted by name within each section.
pub struct ListFormatter;

impl Formatter for ListFormatter {
    fn name(&self) -> &str {
        "list"
    }

    fn format(&self, icons: &[IconRecord]) -> Result<String, FormatError> {
        let mut by_section: BTreeMap<&str, Vec<&IconRecord>> = BTreeMap::new();
        for icon in icons {
            let section = if icon.section.is_empty() {
                "Uncategorized"
            } else {
                icon.section.as_str()
            };
            by_section.entry(section).or_default().push(icon);
        }

        let mut lines = Vec::new();
        for (section, mut section_icons) in by_section {
            section_icons.sort_by(|a, b| a.name.cmp(&b.name));
            lines.push(format!("\n## {section}"));
            for icon in section_icons {
                let variant = if icon.is_outlined { " (outlined)" } else { "" };
                lines.push(format!("  - {}{variant}", icon.name));
            }
        }
        Ok(lines.join("\n"))
    }

    fn description(&self) -> &str {
        "Icons grouped by section"
    }
}

/// One block per icon with its node id, section and variant.
pub struct VerboseFormatter;

impl Formatter for VerboseFormatter {
    fn name(&self) -> &str {
        "verbose"
    }

    fn format(&self, icons: &[IconRecord]) -> Result<String, FormatError> {
        let mut lines = Vec::new();
        for icon in icons {
            let variant = if icon.is_outlined { "outlined" } else { "filled" };
            lines.push(format!("  {}", icon.name));
            lines.push(format!("    Node ID: {}", icon.identifier));
            lines.push(format!("    Section: {}", icon.section));
            lines.push(format!("    Variant: {variant}"));
            lines.push(String::new());
        }
        Ok(lines.join("\n"))
    }

    fn description(&self) -> &str {
        "Every icon with node id, section and variant"
    }
}

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn format(&self, icons: &[IconRecord]) -> Result<String, FormatError> {
        serde_json::to_string_pretty(icons)
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Pretty-printed JSON array of icon records"
    }
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn format(&self, icons: &[IconRecord]) -> Result<String, FormatError> {
        serde_yaml::to_string(icons).map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "YAML sequence of icon records"
    }
}

/// Totals by variant and the number of sections.
pub struct SummaryFormatter;

impl Formatter for SummaryFormatter {
    fn name(&self) -> &str {
        "summary"
    }

    fn format(&self, icons: &[IconRecord]) -> Result<String, FormatError> {
        let summary = summarize(icons);
        Ok(format!(
            "Summary:\n  Total icons: {}\n  Filled: {}\n  Outlined: {}\n  Sections: {}",
            summary.total, summary.filled, summary.outlined, summary.sections
        ))
    }

    fn description(&self) -> &str {
        "Icon counts"
    }
}

/// Render a section listing.
pub fn sections_listing(sections: &[String]) -> String {
    let mut lines = vec!["Sections:".to_string()];
    lines.extend(sections.iter().map(|section| format!("  - {section}")));
    lines.join("\n")
}
