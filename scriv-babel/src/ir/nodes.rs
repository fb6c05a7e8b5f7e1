//! Core data structures for the Intermediate Representation (IR).

/// Heading depth. Only three levels exist in the markup subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Numeric level (1, 2 or 3).
    pub fn depth(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }

    /// Build a level from its number, rejecting anything outside 1..=3.
    pub fn from_depth(depth: u8) -> Option<Self> {
        match depth {
            1 => Some(HeadingLevel::H1),
            2 => Some(HeadingLevel::H2),
            3 => Some(HeadingLevel::H3),
            _ => None,
        }
    }
}

/// One classified source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// `#`, `##` or `###` line with the marker stripped
    Heading { level: HeadingLevel, text: String },
    /// Free text. `has_bold` is set when the raw line contains `**`.
    Paragraph { text: String, has_bold: bool },
    /// `- ` or `* ` line with the marker stripped
    ListItem { text: String },
    /// Empty line
    Blank,
}

impl Block {
    pub fn heading(level: HeadingLevel, text: impl Into<String>) -> Self {
        Block::Heading {
            level,
            text: text.into(),
        }
    }

    pub fn paragraph(text: impl Into<String>, has_bold: bool) -> Self {
        Block::Paragraph {
            text: text.into(),
            has_bold,
        }
    }

    pub fn list_item(text: impl Into<String>) -> Self {
        Block::ListItem { text: text.into() }
    }

    /// Short name used in logs and debugging output.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Heading { .. } => "heading",
            Block::Paragraph { has_bold: true, .. } => "bold-paragraph",
            Block::Paragraph { .. } => "paragraph",
            Block::ListItem { .. } => "list-item",
            Block::Blank => "blank",
        }
    }
}

/// A parsed document: one [`Block`] per source line, in source order.
///
/// Renderers only ever borrow the block list; nothing mutates it after parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}

/// A span of paragraph text that is either bold or plain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineRun {
    pub text: String,
    pub bold: bool,
}

impl InlineRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}
