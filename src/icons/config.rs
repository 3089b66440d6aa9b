//! Configuration loading
//!
//! `defaults/iconsync.default.toml` is embedded into the binary so that docs and
//! runtime behavior stay in sync. User files and command-line overrides are layered
//! on top via [`Loader`] before deserializing into [`IconSyncConfig`].

use crate::icons::normalize::NormalizeOptions;
use crate::icons::processor::ProcessorOptions;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/iconsync.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct IconSyncConfig {
    pub normalize: NormalizeConfig,
    pub naming: NamingConfig,
    pub browse: BrowseConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NormalizeConfig {
    pub size: u32,
    pub default_fill: String,
    pub tool_namespaces: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamingConfig {
    pub outlined_suffix: String,
    pub extension: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BrowseConfig {
    pub format: String,
}

impl From<&NormalizeConfig> for NormalizeOptions {
    fn from(config: &NormalizeConfig) -> Self {
        NormalizeOptions {
            size: config.size,
            default_fill: config.default_fill.clone(),
            tool_namespaces: config.tool_namespaces.clone(),
        }
    }
}

impl IconSyncConfig {
    pub fn processor_options(&self) -> ProcessorOptions {
        ProcessorOptions {
            normalize: NormalizeOptions::from(&self.normalize),
            outlined_suffix: self.naming.outlined_suffix.clone(),
            extension: self.naming.extension.clone(),
        }
    }
}

/// Builds an [`IconSyncConfig`] from the embedded defaults, then project and
/// user TOML files, then command-line flags. Later layers win key by key.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a config file named on the command line. It must exist.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer a project file such as `./iconsync.toml`, skipped when absent.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Override the canvas size (`normalize.size`), as `--size` does.
    pub fn with_size(mut self, size: u32) -> Result<Self, ConfigError> {
        self.builder = self.builder.set_override("normalize.size", i64::from(size))?;
        Ok(self)
    }

    pub fn build(self) -> Result<IconSyncConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The built-in configuration with nothing layered on top.
pub fn load_defaults() -> Result<IconSyncConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.normalize.size, 24);
        assert_eq!(config.normalize.default_fill, "currentColor");
        assert_eq!(config.normalize.tool_namespaces, vec!["figma"]);
        assert_eq!(config.naming.outlined_suffix, "Outlined");
        assert_eq!(config.browse.format, "summary");
    }

    #[test]
    fn defaults_match_processor_defaults() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.processor_options(), ProcessorOptions::default());
    }

    #[test]
    fn size_flag_overrides_files() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[normalize]\nsize = 48").expect("write config");

        let config = Loader::new()
            .with_file(file.path())
            .with_size(32)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.normalize.size, 32);
        assert_eq!(config.processor_options().normalize.view_box(), "0 0 32 32");
    }

    #[test]
    fn layers_user_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[naming]\noutlined_suffix = \"Line\"").expect("write config");

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        assert_eq!(config.naming.outlined_suffix, "Line");
        assert_eq!(config.naming.extension, "svg");
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let result = Loader::new().with_file("/definitely/not/here.toml").build();
        assert!(result.is_err());
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/definitely/not/here.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.normalize.size, 24);
    }
}
