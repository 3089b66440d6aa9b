//! Filesystem side of icon syncing
//!
//! Reading metadata exports, and writing processed icons one at a time or for a
//! whole directory. The pure work lives in [`crate::icons::processor`].

use crate::icons::error::ProcessingError;
use crate::icons::processor::{IconProcessor, ProcessorOptions, VariantOverride};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Read a metadata export. Whitespace-only files count as empty.
pub fn read_metadata(path: &Path) -> Result<String, ProcessingError> {
    let text = read_input(path)?;
    if text.trim().is_empty() {
        return Err(ProcessingError::EmptyInput(path.to_path_buf()));
    }
    debug!(path = %path.display(), bytes = text.len(), "read metadata");
    Ok(text)
}

/// Process one icon file and write the result into `output_dir`.
///
/// The icon name is the input's file stem. `output_dir` is created when missing.
/// Returns the path of the written file.
pub fn process_icon_file(
    input: &Path,
    output_dir: &Path,
    variant: VariantOverride,
    options: &ProcessorOptions,
) -> Result<PathBuf, ProcessingError> {
    write_icon(input, output_dir, variant, &IconProcessor::new(options))
}

fn write_icon(
    input: &Path,
    output_dir: &Path,
    variant: VariantOverride,
    processor: &IconProcessor,
) -> Result<PathBuf, ProcessingError> {
    let raw = read_input(input)?;
    let source_name = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let icon = processor.process(&raw, &source_name, variant)?;

    fs::create_dir_all(output_dir).map_err(|source| ProcessingError::Write {
        path: output_dir.to_path_buf(),
        source,
    })?;
    let output = output_dir.join(&icon.file_name);
    fs::write(&output, &icon.document).map_err(|source| ProcessingError::Write {
        path: output.clone(),
        source,
    })?;

    Ok(output)
}

/// Outcome of a batch run. One failing icon never stops the others.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// `(input, output)` for every icon written.
    pub processed: Vec<(PathBuf, PathBuf)>,
    pub failed: Vec<(PathBuf, ProcessingError)>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Process every `.svg` file directly inside `input_dir`, in file name order.
///
/// The variant of each icon is detected from its name.
pub fn process_batch(
    input_dir: &Path,
    output_dir: &Path,
    options: &ProcessorOptions,
) -> Result<BatchReport, ProcessingError> {
    if !input_dir.exists() {
        return Err(ProcessingError::NotFound(input_dir.to_path_buf()));
    }
    if !input_dir.is_dir() {
        return Err(ProcessingError::NotADirectory(input_dir.to_path_buf()));
    }

    let processor = IconProcessor::new(options);
    let mut report = BatchReport::default();
    let entries = WalkDir::new(input_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().unwrap_or(input_dir).to_path_buf();
                warn!(path = %path.display(), error = %err, "skipping unreadable entry");
                report.failed.push((
                    path.clone(),
                    ProcessingError::Read {
                        path,
                        source: io::Error::from(err),
                    },
                ));
                continue;
            }
        };

        if !entry.file_type().is_file() || !has_svg_extension(entry.path()) {
            continue;
        }

        let input = entry.into_path();
        match write_icon(&input, output_dir, VariantOverride::Auto, &processor) {
            Ok(output) => {
                info!(input = %input.display(), output = %output.display(), "processed icon");
                report.processed.push((input, output));
            }
            Err(err) => {
                warn!(input = %input.display(), error = %err, "failed to process icon");
                report.failed.push((input, err));
            }
        }
    }

    info!(
        processed = report.processed.len(),
        failed = report.failed.len(),
        "batch finished"
    );
    Ok(report)
}

fn has_svg_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case("svg"))
}

fn read_input(path: &Path) -> Result<String, ProcessingError> {
    if !path.exists() {
        return Err(ProcessingError::NotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(ProcessingError::NotAFile(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(|source| ProcessingError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DOC: &str = r#"<svg width="16" height="16"><path d="M0 0"/></svg>"#;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_read_metadata() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), "meta.json", r#"{"name":"Doc"}"#);
        assert_eq!(read_metadata(&path).unwrap(), r#"{"name":"Doc"}"#);
    }

    #[test]
    fn test_read_metadata_errors() {
        let dir = TempDir::new().unwrap();

        let blank = write(dir.path(), "blank.json", "  \n\t");
        assert!(matches!(
            read_metadata(&blank),
            Err(ProcessingError::EmptyInput(_))
        ));
        assert!(matches!(
            read_metadata(&dir.path().join("missing.json")),
            Err(ProcessingError::NotFound(_))
        ));
        assert!(matches!(
            read_metadata(dir.path()),
            Err(ProcessingError::NotAFile(_))
        ));
    }

    #[test]
    fn test_process_icon_file_creates_output_dir() {
        let dir = TempDir::new().unwrap();
        let input = write(dir.path(), "arrow-left-outline.svg", DOC);
        let out_dir = dir.path().join("out").join("icons");

        let output =
            process_icon_file(&input, &out_dir, VariantOverride::Auto, &ProcessorOptions::default())
                .unwrap();

        assert_eq!(output, out_dir.join("ArrowLeftOutlined.svg"));
        let written = fs::read_to_string(&output).unwrap();
        assert!(written.contains(r#"viewBox="0 0 24 24""#));
        assert!(written.contains(r#"width="24""#));
    }

    #[test]
    fn test_process_icon_file_rejects_non_svg() {
        let dir = TempDir::new().unwrap();
        let input = write(dir.path(), "notes.svg", "just text");
        let out_dir = dir.path().join("out");

        let err =
            process_icon_file(&input, &out_dir, VariantOverride::Auto, &ProcessorOptions::default())
                .unwrap_err();
        assert_eq!(err.to_string(), "'notes' does not appear to be a valid SVG");
        assert!(!out_dir.exists());
    }

    #[test]
    fn test_process_batch_continues_past_failures() {
        let dir = TempDir::new().unwrap();
        let input_dir = dir.path().join("in");
        fs::create_dir(&input_dir).unwrap();
        write(&input_dir, "b_star.SVG", DOC);
        write(&input_dir, "a-home.svg", DOC);
        write(&input_dir, "broken.svg", "<html/>");
        write(&input_dir, "readme.txt", DOC);
        fs::create_dir(input_dir.join("nested.svg")).unwrap();
        let out_dir = dir.path().join("out");

        let report = process_batch(&input_dir, &out_dir, &ProcessorOptions::default()).unwrap();

        let outputs: Vec<_> = report
            .processed
            .iter()
            .map(|(_, out)| out.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(outputs, vec!["AHome.svg", "BStar.svg"]);
        assert_eq!(report.failed.len(), 1);
        assert!(report.failed[0].0.ends_with("broken.svg"));
        assert!(!report.is_clean());
    }

    #[test]
    fn test_process_batch_requires_directory() {
        let dir = TempDir::new().unwrap();
        let file = write(dir.path(), "icon.svg", DOC);
        let out = dir.path().join("out");

        assert!(matches!(
            process_batch(&file, &out, &ProcessorOptions::default()),
            Err(ProcessingError::NotADirectory(_))
        ));
        assert!(matches!(
            process_batch(&dir.path().join("nope"), &out, &ProcessorOptions::default()),
            Err(ProcessingError::NotFound(_))
        ));
    }

    #[test]
    fn test_empty_batch() {
        let dir = TempDir::new().unwrap();
        let report =
            process_batch(dir.path(), &dir.path().join("out"), &ProcessorOptions::default())
                .unwrap();
        assert!(report.processed.is_empty());
        assert!(report.is_clean());
    }
}
