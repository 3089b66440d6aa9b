//! Error types
//!
//! The pure core has a single failure mode, [`IconError`]. Everything that touches
//! the filesystem or configuration reports a [`ProcessingError`].

use crate::icons::formats::FormatError;
use std::io;
use std::path::PathBuf;

/// Failures of the pure icon processing core.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IconError {
    /// The input has no `<svg` opening tag.
    #[error("'{source_name}' does not appear to be a valid SVG")]
    InvalidDocument { source_name: String },
}

/// Failures of file processing, batch runs and configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Path is not a file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("Path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("File is empty: {}", .0.display())]
    EmptyInput(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Invalid(#[from] IconError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Format(#[from] FormatError),
}
