//! PDF format implementation
//!
//! Paginated output drawn with the standard Helvetica faces. Layout happens in a single pass
//! ([`layout`]); each page is serialized ([`writer`]) and pushed to the sink as soon as the
//! next block opens a new page, so memory use stays bounded by one page.
//!
//! # Element Mapping Table
//!
//! | IR Block                  | Drawing                                         |
//! |---------------------------|-------------------------------------------------|
//! | Heading (1-3)             | Helvetica-Bold 18 / 16 / 14                     |
//! | ListItem                  | `• text`, Helvetica 12, indented                |
//! | Blank                     | Vertical space only                             |
//! | Paragraph                 | Helvetica 12                                    |
//! | Paragraph (`has_bold`)    | Abutting runs, bold ones in Helvetica-Bold      |
//!
//! Text is never wrapped. Characters outside WinAnsi are drawn as `?`.

pub mod fonts;
pub mod layout;
pub mod writer;

pub use layout::PdfLayoutSettings;

use crate::error::RenderError;
use crate::format::{Format, RenderOptions};
use crate::ir::nodes::Document;
use crate::sink::{ArtifactSink, SinkReceipt};
use async_trait::async_trait;
use layout::Paginator;
use tracing::debug;
use writer::PdfStreamWriter;

pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Format implementation for paginated PDF output
#[derive(Default)]
pub struct PdfFormat;

impl PdfFormat {
    async fn stream_pages(
        &self,
        doc: &Document,
        options: &RenderOptions,
        sink: &ArtifactSink,
    ) -> Result<usize, RenderError> {
        let settings = &options.layout;
        let mut writer = PdfStreamWriter::new(settings);
        let mut paginator = Paginator::new(settings);

        sink.write(writer.header()).await?;
        if let Some(title) = &options.title {
            paginator.push_title(title);
        }

        for block in doc {
            if let Some(page) = paginator.push(block) {
                debug!(page = page.index, ops = page.ops.len(), "streaming page");
                sink.write(writer.page(&page)).await?;
            }
        }

        let last = paginator.finish();
        debug!(page = last.index, ops = last.ops.len(), "streaming final page");
        sink.write(writer.page(&last)).await?;

        let pages = writer.page_count();
        sink.write(writer.finish()).await?;
        Ok(pages)
    }
}

#[async_trait]
impl Format for PdfFormat {
    fn name(&self) -> &str {
        "pdf"
    }

    fn description(&self) -> &str {
        "Paginated PDF with standard Helvetica fonts"
    }

    fn file_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn mime_type(&self) -> &str {
        PDF_MIME_TYPE
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
        match self.stream_pages(doc, options, &sink).await {
            Ok(pages) => {
                debug!(pages, blocks = doc.len(), "pdf layout complete");
                sink.finish().await
            }
            Err(e) => {
                sink.abort().await;
                Err(e)
            }
        }
    }
}
