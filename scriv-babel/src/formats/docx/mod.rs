//! DOCX format implementation
//!
//! Renders the IR into a WordprocessingML package.
//!
//! # Library Choice
//!
//! We use the `docx-rs` crate to build the document object graph and to pack it into the
//! OOXML zip container. We never write package XML by hand.
//!
//! # Element Mapping Table
//!
//! | IR Block                  | DOCX Paragraph                                  |
//! |---------------------------|-------------------------------------------------|
//! | Heading (1-3)             | `Heading1` / `Heading2` / `Heading3` style      |
//! | ListItem                  | Bullet numbering, level 0 (no nesting)          |
//! | Blank                     | Empty paragraph                                 |
//! | Paragraph                 | One plain run                                   |
//! | Paragraph (`has_bold`)    | Runs from [`runs_for_block`], bold where paired |
//!
//! All paragraphs go into a single section. The package is built completely in memory and
//! handed to the sink in one write, so a packaging failure never leaves a partial file.

use crate::error::RenderError;
use crate::format::{Format, RenderOptions};
use crate::ir::inlines::runs_for_block;
use crate::ir::nodes::{Block, Document, HeadingLevel, InlineRun};
use crate::sink::{ArtifactSink, SinkReceipt};
use async_trait::async_trait;
use docx_rs::{
    AbstractNumbering, Docx, IndentLevel, Level, LevelJc, LevelText, NumberFormat, Numbering,
    NumberingId, Paragraph, Run, SpecialIndentType, Start, Style, StyleType,
};
use std::io::Cursor;
use tracing::debug;

pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

// docx-rs always emits its own decimal list as abstractNum/num 1.
const BULLET_NUMBERING_ID: usize = 2;

/// Style knobs for DOCX output.
#[derive(Debug, Clone, PartialEq)]
pub struct DocxSettings {
    /// Heading font sizes in half-points, indexed by level - 1
    pub heading_sizes: [usize; 3],
    /// Glyph used by the bullet numbering definition
    pub bullet: String,
    /// Left indent of list items, in twips
    pub list_indent: i32,
    /// Hanging indent of the bullet, in twips
    pub list_hanging: i32,
}

impl Default for DocxSettings {
    fn default() -> Self {
        Self {
            heading_sizes: [32, 28, 24],
            bullet: "•".to_string(),
            list_indent: 720,
            list_hanging: 360,
        }
    }
}

/// Format-neutral description of one output paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocxParagraph {
    Heading {
        level: HeadingLevel,
        text: String,
    },
    Bullet {
        text: String,
    },
    Empty,
    Runs(Vec<InlineRun>),
}

impl DocxParagraph {
    /// Map one block to its paragraph.
    pub fn from_block(block: &Block) -> Self {
        match block {
            Block::Heading { level, text } => DocxParagraph::Heading {
                level: *level,
                text: text.clone(),
            },
            Block::ListItem { text } => DocxParagraph::Bullet { text: text.clone() },
            Block::Blank => DocxParagraph::Empty,
            Block::Paragraph { .. } => DocxParagraph::Runs(runs_for_block(block)),
        }
    }

    fn into_docx(self) -> Paragraph {
        match self {
            DocxParagraph::Heading { level, text } => Paragraph::new()
                .add_run(Run::new().add_text(text))
                .style(heading_style_id(level)),
            DocxParagraph::Bullet { text } => Paragraph::new()
                .add_run(Run::new().add_text(text))
                .numbering(NumberingId::new(BULLET_NUMBERING_ID), IndentLevel::new(0)),
            DocxParagraph::Empty => Paragraph::new(),
            DocxParagraph::Runs(runs) => runs.into_iter().fold(Paragraph::new(), |p, run| {
                let r = Run::new().add_text(run.text);
                p.add_run(if run.bold { r.bold() } else { r })
            }),
        }
    }
}

fn heading_style_id(level: HeadingLevel) -> &'static str {
    match level {
        HeadingLevel::H1 => "Heading1",
        HeadingLevel::H2 => "Heading2",
        HeadingLevel::H3 => "Heading3",
    }
}

/// Map every block, in order, to its paragraph.
pub fn document_paragraphs(doc: &Document) -> Vec<DocxParagraph> {
    doc.iter().map(DocxParagraph::from_block).collect()
}

/// Build the full docx-rs object graph for a document.
pub fn build_docx(doc: &Document, settings: &DocxSettings) -> Docx {
    let mut docx = Docx::new();

    for level in [HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3] {
        let size = settings.heading_sizes[usize::from(level.depth() - 1)];
        docx = docx.add_style(
            Style::new(heading_style_id(level), StyleType::Paragraph)
                .name(format!("Heading {}", level.depth()))
                .size(size)
                .bold(),
        );
    }

    docx = docx
        .add_abstract_numbering(
            AbstractNumbering::new(BULLET_NUMBERING_ID).add_level(
                Level::new(
                    0,
                    Start::new(1),
                    NumberFormat::new("bullet"),
                    LevelText::new(&settings.bullet),
                    LevelJc::new("left"),
                )
                .indent(
                    Some(settings.list_indent),
                    Some(SpecialIndentType::Hanging(settings.list_hanging)),
                    None,
                    None,
                ),
            ),
        )
        .add_numbering(Numbering::new(BULLET_NUMBERING_ID, BULLET_NUMBERING_ID));

    document_paragraphs(doc)
        .into_iter()
        .fold(docx, |docx, paragraph| docx.add_paragraph(paragraph.into_docx()))
}

/// Pack a document into DOCX bytes.
pub fn serialize_to_docx(doc: &Document, settings: &DocxSettings) -> Result<Vec<u8>, RenderError> {
    let mut buffer = Cursor::new(Vec::new());
    build_docx(doc, settings)
        .build()
        .pack(&mut buffer)
        .map_err(|e| RenderError::Serialization(format!("DOCX packaging failed: {e}")))?;
    Ok(buffer.into_inner())
}

/// Format implementation for DOCX
#[derive(Default)]
pub struct DocxFormat;

#[async_trait]
impl Format for DocxFormat {
    fn name(&self) -> &str {
        "docx"
    }

    fn description(&self) -> &str {
        "Office Open XML word-processing document"
    }

    fn file_extensions(&self) -> &[&str] {
        &["docx"]
    }

    fn mime_type(&self) -> &str {
        DOCX_MIME_TYPE
    }

    fn supports_rendering(&self) -> bool {
        true
    }

    async fn render(
        &self,
        doc: &Document,
        options: &RenderOptions,
        sink: ArtifactSink,
    ) -> Result<SinkReceipt, RenderError> {
        let bytes = match serialize_to_docx(doc, &options.docx) {
            Ok(bytes) => bytes,
            Err(e) => {
                sink.abort().await;
                return Err(e);
            }
        };
        debug!(paragraphs = doc.len(), bytes = bytes.len(), "packed docx");

        if let Err(e) = sink.write(bytes).await {
            sink.abort().await;
            return Err(e);
        }
        sink.finish().await
    }
}
