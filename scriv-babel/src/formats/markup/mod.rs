//! Markup format implementation
//!
//! The source dialect: a small line-oriented subset with `#`/`##`/`###` headings, `-`/`*`
//! bullets and `**bold**` spans. Parsing never fails; every line maps to exactly one block
//! (see [`parser`] for the classification rules).
//!
//! This format only parses. Rendering back to markup is not offered.

pub mod parser;

use crate::error::InputError;
use crate::format::Format;
use crate::ir::nodes::Document;
use async_trait::async_trait;

/// Format implementation for the markup source dialect
#[derive(Default)]
pub struct MarkupFormat;

#[async_trait]
impl Format for MarkupFormat {
    fn name(&self) -> &str {
        "markup"
    }

    fn description(&self) -> &str {
        "Line-oriented markup subset (headings, bullets, bold)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "txt"]
    }

    fn mime_type(&self) -> &str {
        "text/markdown"
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, InputError> {
        Ok(parser::parse_document(source))
    }
}
