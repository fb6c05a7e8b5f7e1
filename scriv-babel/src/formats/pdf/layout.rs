//! Single-pass layout with manual pagination.
//!
//! The layout state is a [`LayoutCursor`] value threaded through
//! [`place_block`]: each call takes the cursor by value and returns the
//! advanced one together with the draw operations for that block. Positions
//! are measured from the top-left corner of the page, `y` growing downward.
//!
//! Before a block is placed, a cursor that has gone past the pagination
//! threshold is moved to the top of a fresh page. The check never happens in
//! the middle of a block, and long lines are not wrapped.

use super::fonts::FontFace;
use crate::ir::inlines::split_bold_runs;
use crate::ir::nodes::{Block, Document, HeadingLevel};
use tracing::debug;

pub const BODY_SIZE: f32 = 12.0;
pub const BODY_ADVANCE: f32 = 20.0;
pub const BLANK_ADVANCE: f32 = 10.0;
pub const TITLE_SIZE: f32 = 16.0;
pub const TITLE_ADVANCE: f32 = 30.0;

/// Page geometry for paginated output.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfLayoutSettings {
    /// Where `y` starts on every page
    pub top_margin: f32,
    /// `x` of headings and paragraphs
    pub left_margin: f32,
    /// Nominal page height used to derive the pagination threshold
    pub page_height: f32,
    /// Space kept free below the threshold
    pub bottom_margin: f32,
    /// Extra `x` offset of list items
    pub list_indent: f32,
    /// Marker drawn before list item text
    pub bullet: String,
    /// Physical page width written to the media box
    pub media_width: f32,
    /// Physical page height written to the media box
    pub media_height: f32,
}

impl Default for PdfLayoutSettings {
    fn default() -> Self {
        Self {
            top_margin: 50.0,
            left_margin: 50.0,
            page_height: 800.0,
            bottom_margin: 50.0,
            list_indent: 10.0,
            bullet: "•".to_string(),
            media_width: 612.0,
            media_height: 792.0,
        }
    }
}

impl PdfLayoutSettings {
    /// A cursor below this `y` starts a new page before the next block.
    pub fn threshold(&self) -> f32 {
        self.page_height - self.bottom_margin
    }
}

/// One text draw at a top-left based position.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawOp {
    pub x: f32,
    pub y: f32,
    pub face: FontFace,
    pub size: f32,
    pub text: String,
}

/// Layout position carried from block to block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCursor {
    pub y: f32,
    /// Zero-based index of the page being filled
    pub page: usize,
}

impl LayoutCursor {
    pub fn start(settings: &PdfLayoutSettings) -> Self {
        Self {
            y: settings.top_margin,
            page: 0,
        }
    }
}

/// Result of placing one block.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub cursor: LayoutCursor,
    /// The block opened a new page before being placed
    pub page_break: bool,
    pub ops: Vec<DrawOp>,
}

fn heading_metrics(level: HeadingLevel) -> (f32, f32) {
    match level {
        HeadingLevel::H1 => (18.0, 25.0),
        HeadingLevel::H2 => (16.0, 22.0),
        HeadingLevel::H3 => (14.0, 20.0),
    }
}

/// Place one block, starting a new page first if the cursor is past the threshold.
pub fn place_block(cursor: LayoutCursor, block: &Block, settings: &PdfLayoutSettings) -> Placement {
    let page_break = cursor.y > settings.threshold();
    let cursor = if page_break {
        LayoutCursor {
            y: settings.top_margin,
            page: cursor.page + 1,
        }
    } else {
        cursor
    };

    let y = cursor.y;
    let margin = settings.left_margin;
    let (ops, advance) = match block {
        Block::Heading { level, text } => {
            let (size, advance) = heading_metrics(*level);
            (
                vec![DrawOp {
                    x: margin,
                    y,
                    face: FontFace::Bold,
                    size,
                    text: text.clone(),
                }],
                advance,
            )
        }
        Block::ListItem { text } => (
            vec![DrawOp {
                x: margin + settings.list_indent,
                y,
                face: FontFace::Regular,
                size: BODY_SIZE,
                text: format!("{} {}", settings.bullet, text),
            }],
            BODY_ADVANCE,
        ),
        Block::Blank => (Vec::new(), BLANK_ADVANCE),
        Block::Paragraph {
            text,
            has_bold: false,
        } => (
            vec![DrawOp {
                x: margin,
                y,
                face: FontFace::Regular,
                size: BODY_SIZE,
                text: text.clone(),
            }],
            BODY_ADVANCE,
        ),
        Block::Paragraph {
            text,
            has_bold: true,
        } => (place_runs(text, margin, y), BODY_ADVANCE),
    };

    Placement {
        cursor: LayoutCursor {
            y: y + advance,
            page: cursor.page,
        },
        page_break,
        ops,
    }
}

// Runs abut left to right on one line; nothing stops them at the right edge.
fn place_runs(text: &str, margin: f32, y: f32) -> Vec<DrawOp> {
    let mut x = margin;
    split_bold_runs(text)
        .into_iter()
        .map(|run| {
            let face = if run.bold {
                FontFace::Bold
            } else {
                FontFace::Regular
            };
            let op = DrawOp {
                x,
                y,
                face,
                size: BODY_SIZE,
                text: run.text,
            };
            x += face.width_of(&op.text, BODY_SIZE);
            op
        })
        .collect()
}

/// Place the optional title line at the top of the first page.
pub fn place_title(cursor: LayoutCursor, title: &str, settings: &PdfLayoutSettings) -> Placement {
    Placement {
        cursor: LayoutCursor {
            y: cursor.y + TITLE_ADVANCE,
            page: cursor.page,
        },
        page_break: false,
        ops: vec![DrawOp {
            x: settings.left_margin,
            y: cursor.y,
            face: FontFace::Bold,
            size: TITLE_SIZE,
            text: title.to_string(),
        }],
    }
}

/// A finished page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    /// Zero-based page index
    pub index: usize,
    pub ops: Vec<DrawOp>,
}

/// Folds blocks into pages, handing back each page as soon as it is complete.
#[derive(Debug)]
pub struct Paginator<'a> {
    settings: &'a PdfLayoutSettings,
    cursor: LayoutCursor,
    current: Page,
}

impl<'a> Paginator<'a> {
    pub fn new(settings: &'a PdfLayoutSettings) -> Self {
        Self {
            settings,
            cursor: LayoutCursor::start(settings),
            current: Page::default(),
        }
    }

    pub fn cursor(&self) -> LayoutCursor {
        self.cursor
    }

    /// Draw the title line on the current page.
    pub fn push_title(&mut self, title: &str) {
        let placement = place_title(self.cursor, title, self.settings);
        self.apply(placement);
    }

    /// Place a block. Returns the previous page if the block started a new one.
    pub fn push(&mut self, block: &Block) -> Option<Page> {
        let placement = place_block(self.cursor, block, self.settings);
        let finished = if placement.page_break {
            debug!(
                page = self.current.index,
                y = self.cursor.y,
                block = block.kind(),
                "page break"
            );
            let next = Page {
                index: placement.cursor.page,
                ops: Vec::new(),
            };
            Some(std::mem::replace(&mut self.current, next))
        } else {
            None
        };
        self.apply(placement);
        finished
    }

    fn apply(&mut self, placement: Placement) {
        self.cursor = placement.cursor;
        self.current.ops.extend(placement.ops);
    }

    /// Hand back the last page.
    pub fn finish(self) -> Page {
        self.current
    }
}

/// Lay out a whole document at once.
pub fn paginate(doc: &Document, settings: &PdfLayoutSettings, title: Option<&str>) -> Vec<Page> {
    let mut paginator = Paginator::new(settings);
    if let Some(title) = title {
        paginator.push_title(title);
    }
    let mut pages: Vec<Page> = doc.iter().filter_map(|b| paginator.push(b)).collect();
    pages.push(paginator.finish());
    pages
}
