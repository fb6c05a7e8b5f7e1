//! Format implementations
//!
//! This module contains the markup parser and the two output formats that
//! render the block IR into finished artifacts.

pub mod docx;
pub mod markup;
pub mod pdf;

pub use docx::{DocxFormat, DocxSettings};
pub use markup::MarkupFormat;
pub use pdf::{PdfFormat, PdfLayoutSettings};
