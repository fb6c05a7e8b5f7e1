//! Document publishing pipeline.
//!
//! Provides a high-level API for turning markup text into a finished artifact.
//! This module bridges the gap between the format registry and the sinks,
//! owning the destination for the whole call: parsers and renderers never
//! touch the filesystem themselves.
//!
//! [`publish`] writes `<output-base>.<format>` atomically; [`export`] keeps the
//! bytes in memory and reports the MIME type alongside them.
//!
//! For more control over the conversion process, use [`FormatRegistry`] directly.

use crate::error::{ExportError, RenderError};
use crate::format::RenderOptions;
use crate::registry::{FormatRegistry, SOURCE_FORMAT};
use crate::sink::{ArtifactSink, PublishArtifact};
use std::path::{Path, PathBuf};
use tracing::info;

/// Specifies how to publish a document.
///
/// Use the builder pattern to configure the publication:
///
/// ```ignore
/// let spec = PublishSpec::new(&content, "pdf", "out/report")
///     .with_title("Quarterly report");
/// ```
#[derive(Debug)]
pub struct PublishSpec<'a> {
    /// Markup source text.
    pub content: &'a str,
    /// Target format name ("docx" or "pdf").
    pub format: &'a str,
    /// Output path without extension; the format name is appended.
    pub output_base: PathBuf,
    /// Per-call rendering options.
    pub options: RenderOptions,
}

impl<'a> PublishSpec<'a> {
    /// Creates a new publish specification with default options.
    pub fn new(content: &'a str, format: &'a str, output_base: impl AsRef<Path>) -> Self {
        Self {
            content,
            format,
            output_base: output_base.as_ref().to_path_buf(),
            options: RenderOptions::default(),
        }
    }

    /// Replaces the rendering options.
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Draws a title line above the content (paginated output only).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.options.title = Some(title.into());
        self
    }

    /// The file the artifact will be written to: `<output-base>.<format>`.
    ///
    /// The format name is appended rather than substituted, so a base that
    /// already contains a dot keeps it.
    pub fn output_path(&self) -> PathBuf {
        let mut name = self.output_base.clone().into_os_string();
        name.push(".");
        name.push(self.format);
        PathBuf::from(name)
    }
}

/// Result of a publish operation.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishResult {
    /// The published artifact (always a file for [`publish`]).
    pub artifact: PublishArtifact,
    /// Bytes the sink confirmed on the destination.
    pub bytes_written: u64,
}

/// Artifact produced by [`export`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedDocument {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

/// Publishes markup text to `<output-base>.<format>`.
///
/// The format is validated before the destination is opened, so an
/// unsupported selector never creates a file. The call returns only after
/// the sink has flushed, synced and moved the file into place.
///
/// # Errors
///
/// Returns [`ExportError::Input`] if the format is not supported, and
/// [`ExportError::Render`] if packaging or writing fails. In the latter case
/// nothing is left at the output path.
pub async fn publish(spec: PublishSpec<'_>) -> Result<PublishResult, ExportError> {
    let registry = FormatRegistry::with_defaults();
    let format = registry.renderer(spec.format)?;
    let doc = registry.parse(spec.content, SOURCE_FORMAT)?;

    let path = spec.output_path();
    info!(format = spec.format, path = %path.display(), blocks = doc.len(), "publishing");

    let receipt = format
        .render(&doc, &spec.options, ArtifactSink::to_file(&path))
        .await?;
    Ok(PublishResult {
        artifact: receipt.artifact,
        bytes_written: receipt.bytes_written,
    })
}

/// Renders markup text in memory.
///
/// Same pipeline as [`publish`], with an in-memory sink in place of the file.
pub async fn export(
    content: &str,
    format: &str,
    options: &RenderOptions,
) -> Result<ExportedDocument, ExportError> {
    let registry = FormatRegistry::with_defaults();
    let renderer = registry.renderer(format)?;
    let doc = registry.parse(content, SOURCE_FORMAT)?;

    let receipt = renderer
        .render(&doc, options, ArtifactSink::in_memory())
        .await?;
    match receipt.artifact {
        PublishArtifact::InMemory(bytes) => Ok(ExportedDocument {
            bytes,
            mime_type: renderer.mime_type().to_string(),
        }),
        PublishArtifact::File(path) => Err(RenderError::Sink(format!(
            "expected in-memory output, got file '{}'",
            path.display()
        ))
        .into()),
    }
}
