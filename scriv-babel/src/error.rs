//! Error types for export operations
//!
//! Failures fall in two families. [`InputError`] is raised before anything is
//! rendered and guarantees that no artifact exists. [`RenderError`] is raised
//! while packaging or writing; by the time it reaches the caller the
//! destination has already been released and any partial file removed.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Problems with what the caller asked for.
#[derive(Debug, Error)]
pub enum InputError {
    /// Format selector is not one of the registered formats
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Format exists but cannot be used in the requested direction
    #[error("Operation not supported: {0}")]
    NotSupported(String),

    /// Source content could not be read
    #[error("Error reading source '{}': {source}", path.display())]
    UnreadableSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Problems while producing or writing the artifact.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Packaging the document into its binary form failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The destination sink rejected a write or could not flush
    #[error("Sink error: {0}")]
    Sink(String),

    /// The sink went away before acknowledging completion
    #[error("Sink closed before acknowledging completion")]
    SinkClosed,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Any failure surfaced by the orchestrator.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl ExportError {
    /// True when the call was rejected before rendering started.
    pub fn is_input_error(&self) -> bool {
        matches!(self, ExportError::Input(_))
    }
}
