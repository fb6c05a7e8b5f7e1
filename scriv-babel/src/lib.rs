//! Markup to document export
//!
//!     This crate turns text written in a small markup subset into finished documents: a
//!     word-processing package (DOCX) or a paginated page description (PDF).
//!
//!     TLDR: For format authors:
//!         - Parsing happens once, in the markup format, and produces the flat block IR.
//!         - Output formats consume the IR and never look at source text again.
//!         - Bold runs are derived with ir::inlines::split_bold_runs; formats must not re-implement it.
//!         - Every format matches every block kind explicitly, so adding a kind is a compile error
//!           everywhere it needs handling.
//!
//! Architecture
//!
//!     source text ──▶ markup parser ──▶ Document (Vec<Block>) ──▶ Format::render ──▶ ArtifactSink
//!
//!     Parsers and renderers are pure with respect to the outside world: the only thing that
//!     touches a destination is the sink, and the only code that opens a sink is the
//!     orchestrator in publish.rs. This is a pure lib, shell agnostic: no printing, no env
//!     vars, no process exit.
//!
//!     The file structure :
//!     .
//!     ├── error.rs                # InputError / RenderError / ExportError
//!     ├── format.rs               # Format trait definition, RenderOptions
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── publish.rs              # publish() to a file, export() to memory
//!     ├── sink.rs                 # Destination task with flush acknowledgment
//!     ├── formats
//!     │   ├── markup              # Line classifier (parse only)
//!     │   ├── docx                # docx-rs based package builder
//!     │   └── pdf                 # layout fold, fonts, incremental writer
//!     ├── lib.rs
//!     └── ir                      # Block IR and the shared bold splitter
//!
//! Testing
//!     tests
//!     ├── lib.rs                  # aggregates the modules below
//!     ├── common/mod.rs           # byte search, DOCX part reading, sample sources
//!     ├── docx/mod.rs
//!     ├── pdf/mod.rs
//!     └── publish/mod.rs
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Completion
//!
//!     A render is complete when its sink says so. Formats hand the sink back through
//!     ArtifactSink::finish, which resolves only after the sink task has flushed, synced and
//!     renamed the destination. Failing renders call ArtifactSink::abort, which removes the
//!     partial file before the error reaches the caller.
//!
//! Library Choices
//!
//!     We never write container formats by hand. DOCX packages are built with docx-rs, PDF
//!     objects with pdf-writer. The PDF side serializes one object at a time so that pages can
//!     be streamed to the sink as soon as they are laid out.
pub mod error;
pub mod format;
pub mod formats;
pub mod publish;
pub mod registry;
pub mod sink;

pub mod ir;

pub use error::{ExportError, InputError, RenderError};
pub use format::{Format, RenderOptions};
pub use publish::{export, publish, ExportedDocument, PublishResult, PublishSpec};
pub use registry::FormatRegistry;
pub use sink::{ArtifactSink, PublishArtifact, SinkReceipt};

/// Parses markup text into the block IR.
///
/// Parsing never fails: every line becomes exactly one block.
pub fn parse(source: &str) -> ir::nodes::Document {
    formats::markup::parser::parse_document(source)
}
