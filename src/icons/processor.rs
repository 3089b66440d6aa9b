//! Icon file processing
//!
//! Turns one raw SVG plus its source name into the normalized document and the
//! canonical output file name. Storage is the caller's business (see
//! [`crate::icons::files`]).

use crate::icons::error::IconError;
use crate::icons::naming::{split_variant, to_canonical_word_form};
use crate::icons::normalize::{NormalizeOptions, Normalizer};
use tracing::debug;

/// Caller's choice of variant, overriding detection from the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VariantOverride {
    #[default]
    Auto,
    Outlined,
    Filled,
}

impl VariantOverride {
    /// Build from a pair of mutually exclusive command-line flags.
    pub fn from_flags(outlined: bool, filled: bool) -> Self {
        match (outlined, filled) {
            (true, _) => VariantOverride::Outlined,
            (false, true) => VariantOverride::Filled,
            (false, false) => VariantOverride::Auto,
        }
    }

    /// The effective outlined flag given what was detected from the name.
    pub fn resolve(self, detected: bool) -> bool {
        match self {
            VariantOverride::Auto => detected,
            VariantOverride::Outlined => true,
            VariantOverride::Filled => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorOptions {
    pub normalize: NormalizeOptions,
    /// Appended to the canonical name of outlined icons.
    pub outlined_suffix: String,
    /// Output file extension, without the dot.
    pub extension: String,
}

impl Default for ProcessorOptions {
    fn default() -> Self {
        Self {
            normalize: NormalizeOptions::default(),
            outlined_suffix: "Outlined".to_string(),
            extension: "svg".to_string(),
        }
    }
}

/// A processed icon, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedIcon {
    pub document: String,
    pub file_name: String,
    pub is_outlined: bool,
}

/// Process an icon with the default options.
pub fn process(
    raw_document: &str,
    source_name: &str,
    variant: VariantOverride,
) -> Result<ProcessedIcon, IconError> {
    process_with(raw_document, source_name, variant, &ProcessorOptions::default())
}

/// Process one icon with one-off options. Batches should build an
/// [`IconProcessor`] once instead.
pub fn process_with(
    raw_document: &str,
    source_name: &str,
    variant: VariantOverride,
    options: &ProcessorOptions,
) -> Result<ProcessedIcon, IconError> {
    IconProcessor::new(options).process(raw_document, source_name, variant)
}

/// Processor options with the normalization patterns already compiled.
#[derive(Debug, Clone)]
pub struct IconProcessor {
    normalizer: Normalizer,
    outlined_suffix: String,
    extension: String,
}

impl IconProcessor {
    pub fn new(options: &ProcessorOptions) -> Self {
        Self {
            normalizer: Normalizer::new(options.normalize.clone()),
            outlined_suffix: options.outlined_suffix.clone(),
            extension: options.extension.clone(),
        }
    }

    /// Normalize `raw_document` and derive its output file name from `source_name`.
    ///
    /// `source_name` is the bare icon name (a file stem); a trailing extension would
    /// hide an outlined suffix from detection. Fails before any rewriting when the
    /// document has no `<svg` tag.
    pub fn process(
        &self,
        raw_document: &str,
        source_name: &str,
        variant: VariantOverride,
    ) -> Result<ProcessedIcon, IconError> {
        if !raw_document.to_lowercase().contains("<svg") {
            return Err(IconError::InvalidDocument {
                source_name: source_name.to_string(),
            });
        }

        let document = self.normalizer.normalize(raw_document);

        let (base, detected) = split_variant(source_name);
        let is_outlined = variant.resolve(detected);
        let canonical = to_canonical_word_form(&base);

        let file_name = if is_outlined {
            format!("{canonical}{}.{}", self.outlined_suffix, self.extension)
        } else {
            format!("{canonical}.{}", self.extension)
        };

        debug!(source = source_name, %file_name, is_outlined, "processed icon");

        Ok(ProcessedIcon {
            document,
            file_name,
            is_outlined,
        })
    }
}
