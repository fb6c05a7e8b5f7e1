//! Line classifier (markup text → IR blocks)
//!
//! Every line becomes exactly one block. Lines are trimmed, then tested
//! against the rules below in order; the first rule that matches decides the
//! block kind:
//!
//! | Order | Test                          | Block                          |
//! |-------|-------------------------------|--------------------------------|
//! | 1     | starts with `# `              | Heading level 1                |
//! | 2     | starts with `## `             | Heading level 2                |
//! | 3     | starts with `### `            | Heading level 3                |
//! | 4     | contains `**`                 | Paragraph, `has_bold = true`   |
//! | 5     | starts with `- ` or `* `      | ListItem                       |
//! | 6     | empty                         | Blank                          |
//! | 7     | anything else                 | Paragraph, `has_bold = false`  |
//!
//! Rule 4 runs before rule 5, so `- **item**` is a bold paragraph rather than
//! a list item, and heading lines are never bold-flagged.

use crate::ir::nodes::{Block, Document, HeadingLevel};

const HEADING_MARKERS: [(&str, HeadingLevel); 3] = [
    ("# ", HeadingLevel::H1),
    ("## ", HeadingLevel::H2),
    ("### ", HeadingLevel::H3),
];

const BOLD_MARKER: &str = "**";

const LIST_MARKERS: [&str; 2] = ["- ", "* "];

/// Parse markup text into a document with one block per `\n`-separated line.
pub fn parse_document(source: &str) -> Document {
    Document::new(source.split('\n').map(classify_line).collect())
}

/// Classify a single (untrimmed) line.
pub fn classify_line(raw: &str) -> Block {
    let line = raw.trim();

    for (marker, level) in HEADING_MARKERS {
        if let Some(rest) = line.strip_prefix(marker) {
            return Block::heading(level, rest);
        }
    }

    if line.contains(BOLD_MARKER) {
        return Block::paragraph(line, true);
    }

    for marker in LIST_MARKERS {
        if let Some(rest) = line.strip_prefix(marker) {
            return Block::list_item(rest);
        }
    }

    if line.is_empty() {
        return Block::Blank;
    }

    Block::paragraph(line, false)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_block_count_matches_line_count(source in "[a-z#*\\- \n]{0,200}") {
            let doc = parse_document(&source);
            prop_assert_eq!(doc.len(), source.split('\n').count());
        }

        #[test]
        fn prop_heading_text_never_keeps_marker(text in "[a-z]{1,20}") {
            let block = classify_line(&format!("## {text}"));
            prop_assert_eq!(block, Block::heading(HeadingLevel::H2, text));
        }
    }
}
