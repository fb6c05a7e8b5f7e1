//! Shared configuration loader for the scriv toolchain.
//!
//! `defaults/scriv.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`ScrivConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use scriv_babel::formats::docx::DocxSettings;
use scriv_babel::formats::pdf::PdfLayoutSettings;
use scriv_babel::RenderOptions;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/scriv.default.toml");

/// Name of the optional per-directory configuration file.
pub const LOCAL_CONFIG_FILE: &str = "scriv.toml";

/// Top-level configuration consumed by scriv applications.
#[derive(Debug, Clone, Deserialize)]
pub struct ScrivConfig {
    pub pdf: PdfConfig,
    pub docx: DocxConfig,
    pub logging: LoggingConfig,
}

impl ScrivConfig {
    /// Rendering options for one call, built from both format sections.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            title: self.pdf.title.clone(),
            layout: PdfLayoutSettings::from(&self.pdf),
            docx: DocxSettings::from(&self.docx),
        }
    }
}

/// Page geometry for paginated output.
#[derive(Debug, Clone, Deserialize)]
pub struct PdfConfig {
    pub top_margin: f32,
    pub left_margin: f32,
    pub page_height: f32,
    pub bottom_margin: f32,
    pub media_width: f32,
    pub media_height: f32,
    pub list_indent: f32,
    pub bullet: String,
    #[serde(default)]
    pub title: Option<String>,
}

impl From<&PdfConfig> for PdfLayoutSettings {
    fn from(config: &PdfConfig) -> Self {
        PdfLayoutSettings {
            top_margin: config.top_margin,
            left_margin: config.left_margin,
            page_height: config.page_height,
            bottom_margin: config.bottom_margin,
            list_indent: config.list_indent,
            bullet: config.bullet.clone(),
            media_width: config.media_width,
            media_height: config.media_height,
        }
    }
}

/// Style knobs for word-processing output.
#[derive(Debug, Clone, Deserialize)]
pub struct DocxConfig {
    pub heading1_size: usize,
    pub heading2_size: usize,
    pub heading3_size: usize,
    pub bullet: String,
    pub list_indent: i32,
    pub list_hanging: i32,
}

impl From<&DocxConfig> for DocxSettings {
    fn from(config: &DocxConfig) -> Self {
        DocxSettings {
            heading_sizes: [
                config.heading1_size,
                config.heading2_size,
                config.heading3_size,
            ],
            bullet: config.bullet.clone(),
            list_indent: config.list_indent,
            list_hanging: config.list_hanging,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<ScrivConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<ScrivConfig, ConfigError> {
    Loader::new().build()
}
