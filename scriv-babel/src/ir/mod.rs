//! Intermediate Representation (IR) for scriv documents.
//!
//! The IR is the flat block list produced by the markup parser and consumed by
//! every output format. Inline structure is not stored: bold runs are derived
//! on demand through [`inlines::split_bold_runs`].

pub mod inlines;
pub mod nodes;
