//! Incremental PDF serialization.
//!
//! pdf-writer assembles a whole file in memory, which does not fit a
//! renderer that hands pages to its sink as soon as they are laid out. This
//! writer builds every indirect object in its own [`Chunk`] and emits the
//! bytes straight away, keeping track of byte offsets itself so that the
//! cross-reference table can be written at the end.
//!
//! Object numbers are fixed up front: the catalog, the page tree and the two
//! fonts come first, then a content stream and a page object for every
//! page. Objects referenced before they are written (the page tree, fonts)
//! are emitted by [`PdfStreamWriter::finish`].

use super::fonts::{encode_win_ansi, FontFace};
use super::layout::{Page, PdfLayoutSettings};
use pdf_writer::{Chunk, Content, Name, Rect, Ref, Str};
use std::fmt::Write as _;

const HEADER: &[u8] = b"%PDF-1.7\n%\x80\x80\x80\x80\n\n";

const CATALOG_ID: i32 = 1;
const PAGE_TREE_ID: i32 = 2;
const FIRST_PAGE_OBJECT: i32 = 5;

fn catalog_ref() -> Ref {
    Ref::new(CATALOG_ID)
}

fn page_tree_ref() -> Ref {
    Ref::new(PAGE_TREE_ID)
}

fn font_ref(face: FontFace) -> Ref {
    match face {
        FontFace::Regular => Ref::new(3),
        FontFace::Bold => Ref::new(4),
    }
}

/// Streams a PDF file out as a sequence of byte chunks.
#[derive(Debug)]
pub struct PdfStreamWriter {
    media_width: f32,
    media_height: f32,
    position: usize,
    offsets: Vec<(Ref, usize)>,
    page_refs: Vec<Ref>,
    next_id: i32,
}

impl PdfStreamWriter {
    pub fn new(settings: &PdfLayoutSettings) -> Self {
        Self {
            media_width: settings.media_width,
            media_height: settings.media_height,
            position: 0,
            offsets: Vec::new(),
            page_refs: Vec::new(),
            next_id: FIRST_PAGE_OBJECT,
        }
    }

    /// Number of pages emitted so far.
    pub fn page_count(&self) -> usize {
        self.page_refs.len()
    }

    fn alloc(&mut self) -> Ref {
        let id = Ref::new(self.next_id);
        self.next_id += 1;
        id
    }

    fn emit(&mut self, id: Ref, chunk: Chunk, out: &mut Vec<u8>) {
        self.offsets.push((id, self.position));
        self.position += chunk.len();
        out.extend_from_slice(chunk.as_bytes());
    }

    /// File header. Must be the first bytes written.
    pub fn header(&mut self) -> Vec<u8> {
        self.position += HEADER.len();
        HEADER.to_vec()
    }

    /// Content stream and page object for one finished page.
    pub fn page(&mut self, page: &Page) -> Vec<u8> {
        let content_id = self.alloc();
        let page_id = self.alloc();
        let mut out = Vec::new();

        let mut stream = Chunk::new();
        stream.stream(content_id, &self.content(page));
        self.emit(content_id, stream, &mut out);

        let mut chunk = Chunk::new();
        {
            let mut obj = chunk.page(page_id);
            obj.media_box(Rect::new(0.0, 0.0, self.media_width, self.media_height));
            obj.parent(page_tree_ref());
            obj.contents(content_id);
            let mut resources = obj.resources();
            let mut fonts = resources.fonts();
            for face in FontFace::all() {
                fonts.pair(Name(face.resource_name()), font_ref(face));
            }
        }
        self.emit(page_id, chunk, &mut out);
        self.page_refs.push(page_id);
        out
    }

    // Layout positions are measured from the top edge to the top of the
    // text; PDF wants the baseline measured from the bottom edge.
    fn content(&self, page: &Page) -> Vec<u8> {
        let mut content = Content::new();
        for op in &page.ops {
            let baseline = self.media_height - op.y - op.face.ascent(op.size);
            content.begin_text();
            content.set_font(Name(op.face.resource_name()), op.size);
            content.next_line(op.x, baseline);
            content.show(Str(&encode_win_ansi(&op.text)));
            content.end_text();
        }
        content.finish()
    }

    /// Fonts, page tree, catalog, cross-reference table and trailer.
    pub fn finish(mut self) -> Vec<u8> {
        let mut out = Vec::new();

        for face in FontFace::all() {
            let mut chunk = Chunk::new();
            chunk
                .type1_font(font_ref(face))
                .base_font(Name(face.base_font()))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
            self.emit(font_ref(face), chunk, &mut out);
        }

        let mut tree = Chunk::new();
        tree.pages(page_tree_ref())
            .kids(self.page_refs.iter().copied())
            .count(self.page_refs.len() as i32);
        self.emit(page_tree_ref(), tree, &mut out);

        let mut catalog = Chunk::new();
        catalog
            .indirect(catalog_ref())
            .dict()
            .pair(Name(b"Type"), Name(b"Catalog"))
            .pair(Name(b"Pages"), page_tree_ref());
        self.emit(catalog_ref(), catalog, &mut out);

        let xref_offset = self.position;
        out.extend_from_slice(self.xref_and_trailer(xref_offset).as_bytes());
        out
    }

    fn xref_and_trailer(&mut self, xref_offset: usize) -> String {
        self.offsets.sort_by_key(|(id, _)| id.get());
        let size = self.offsets.len() + 1;

        let mut table = String::new();
        let _ = write!(table, "xref\n0 {size}\n0000000000 65535 f\r\n");
        for (_, offset) in &self.offsets {
            let _ = write!(table, "{offset:010} 00000 n\r\n");
        }
        let _ = write!(
            table,
            "trailer\n<< /Size {size} /Root {CATALOG_ID} 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n"
        );
        table
    }
}
