//! Format trait definition
//!
//! This module defines the core Format trait that all format implementations must implement.
//! A format may parse markup into the IR, render the IR into an artifact, or both.

use crate::error::{InputError, RenderError};
use crate::ir::nodes::Document;
use crate::sink::{ArtifactSink, SinkReceipt};
use async_trait::async_trait;

/// Per-call rendering options.
///
/// Everything here is owned by a single call; formats never keep state
/// between renders.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Title line drawn above the content (paginated output only)
    pub title: Option<String>,
    /// Page geometry for paginated output
    pub layout: crate::formats::pdf::PdfLayoutSettings,
    /// Style knobs for the word-processing output
    pub docx: crate::formats::docx::DocxSettings,
}

impl RenderOptions {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Trait for document formats
///
/// Implementors provide conversion between markup text and the IR, and/or from the IR into a
/// finished artifact written through an [`ArtifactSink`].
///
/// # Examples
///
/// ```ignore
/// struct MyFormat;
///
/// #[async_trait]
/// impl Format for MyFormat {
///     fn name(&self) -> &str {
///         "my-format"
///     }
///
///     fn supports_rendering(&self) -> bool {
///         true
///     }
///
///     async fn render(
///         &self,
///         doc: &Document,
///         options: &RenderOptions,
///         sink: ArtifactSink,
///     ) -> Result<SinkReceipt, RenderError> {
///         sink.write(b"...".to_vec()).await?;
///         sink.finish().await
///     }
/// }
/// ```
#[async_trait]
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "docx", "pdf")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format (e.g., ["pdf"])
    ///
    /// Returns a slice of file extensions without the leading dot.
    /// Used for automatic format detection from filenames.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// MIME type of rendered artifacts
    fn mime_type(&self) -> &str {
        "application/octet-stream"
    }

    /// Whether this format supports parsing (source → Document)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports rendering (Document → artifact)
    fn supports_rendering(&self) -> bool {
        false
    }

    /// Parse source text into a Document
    ///
    /// Default implementation returns NotSupported error.
    fn parse(&self, _source: &str) -> Result<Document, InputError> {
        Err(InputError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Render a Document into the sink.
    ///
    /// The returned receipt is the sink's own acknowledgment that every byte
    /// reached the destination. Implementations must hand the sink back
    /// through [`ArtifactSink::finish`] on success or [`ArtifactSink::abort`]
    /// on failure.
    async fn render(
        &self,
        _doc: &Document,
        _options: &RenderOptions,
        sink: ArtifactSink,
    ) -> Result<SinkReceipt, RenderError> {
        sink.abort().await;
        Err(RenderError::Serialization(format!(
            "Format '{}' does not support rendering",
            self.name()
        )))
    }
}
