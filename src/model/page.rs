//! Page-level types: blocks of lines of spans.

use super::TextSpan;
use serde::{Deserialize, Serialize};

/// A line of spans sharing a baseline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextLine {
    /// Spans in content-stream order
    pub spans: Vec<TextSpan>,
}

impl TextLine {
    /// Create a line from spans.
    pub fn new(spans: Vec<TextSpan>) -> Self {
        Self { spans }
    }

    /// Concatenated span text.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Check if the line has no spans.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

/// A content block on a page.
///
/// Only text blocks carry lines; anything else the content stream paints
/// (images, form XObjects) is kept as a placeholder so block order matches
/// the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Lines of text
    Text {
        /// Lines in the block
        lines: Vec<TextLine>,
    },

    /// A painted XObject, identified by its resource name
    Image {
        /// Resource name (e.g. `Im0`)
        name: String,
    },
}

impl Block {
    /// Create a text block.
    pub fn text(lines: Vec<TextLine>) -> Self {
        Block::Text { lines }
    }

    /// Create an image block.
    pub fn image(name: impl Into<String>) -> Self {
        Block::Image { name: name.into() }
    }

    /// Lines of a text block; `None` for blocks that carry no text.
    pub fn lines(&self) -> Option<&[TextLine]> {
        match self {
            Block::Text { lines } => Some(lines),
            Block::Image { .. } => None,
        }
    }

    /// Check if this block is an image.
    pub fn is_image(&self) -> bool {
        matches!(self, Block::Image { .. })
    }
}

/// A single analyzed page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    /// Page number (1-indexed, by position in the document)
    pub number: u32,

    /// Content blocks in paint order
    pub blocks: Vec<Block>,

    /// Plain text of the page as the parser extracts it, line by line
    pub raw_text: String,
}

impl PageLayout {
    /// Create an empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            blocks: Vec::new(),
            raw_text: String::new(),
        }
    }

    /// Set the raw text.
    pub fn with_raw_text(mut self, raw_text: impl Into<String>) -> Self {
        self.raw_text = raw_text.into();
        self
    }

    /// Add a block to the page.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Iterate every span on the page in block/line order.
    pub fn spans(&self) -> impl Iterator<Item = &TextSpan> {
        self.blocks
            .iter()
            .filter_map(Block::lines)
            .flatten()
            .flat_map(|line| line.spans.iter())
    }

    /// Text rebuilt from the analyzed lines, one line per row.
    pub fn layout_text(&self) -> String {
        self.blocks
            .iter()
            .filter_map(Block::lines)
            .flatten()
            .map(TextLine::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
