//! Helpers shared by the integration tests.

use std::io::{Cursor, Read};

/// Count occurrences of `needle` in `haystack`.
pub fn count(haystack: &[u8], needle: &[u8]) -> usize {
    haystack.windows(needle.len()).filter(|w| *w == needle).count()
}

/// Position of the first occurrence of `needle`.
pub fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Number of page objects in a PDF file.
pub fn pdf_page_count(bytes: &[u8]) -> usize {
    count(bytes, b"/Type /Page") - count(bytes, b"/Type /Pages")
}

/// One XML part of a DOCX package, e.g. `word/numbering.xml`.
pub fn docx_part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut xml = String::new();
    file.read_to_string(&mut xml).unwrap();
    xml
}

/// Main document part of a DOCX package.
pub fn docx_document_xml(bytes: &[u8]) -> String {
    docx_part(bytes, "word/document.xml")
}

/// Markup with `n` plain paragraph lines.
pub fn lines(n: usize) -> String {
    (1..=n)
        .map(|i| format!("Line {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}
