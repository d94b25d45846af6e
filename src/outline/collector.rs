//! Span collection: one walk over the document that feeds both the size
//! histogram and the heading candidate list.

use crate::model::ParsedDocument;

use super::histogram::{FontHistogram, SizeKey};

/// A bold span that may become a heading.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingCandidate {
    /// Span text with surrounding whitespace removed
    pub text: String,
    /// Quantized font size
    pub size: SizeKey,
    /// Page number (1-indexed, by position in the document)
    pub page: u32,
    /// Position among all candidates, in document order
    pub index: usize,
}

/// Everything the classifier needs from one document.
#[derive(Debug, Clone, Default)]
pub struct SpanCollection {
    /// Sizes of every span, bold or not
    pub histogram: FontHistogram,
    /// Every bold span with visible text, in document order
    pub candidates: Vec<HeadingCandidate>,
}

impl SpanCollection {
    /// Check if the document contributed no spans at all.
    pub fn is_empty(&self) -> bool {
        self.histogram.is_empty()
    }
}

/// Walks pages, blocks, lines and spans.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpanCollector;

impl SpanCollector {
    /// Create a collector.
    pub fn new() -> Self {
        Self
    }

    /// Collect the histogram and candidates of a document.
    ///
    /// Every span counts towards the histogram, including whitespace-only
    /// runs. Bold spans whose text is blank are not candidates. Blocks
    /// without lines (images) and lines without spans contribute nothing.
    pub fn collect(&self, doc: &ParsedDocument) -> SpanCollection {
        let mut collection = SpanCollection::default();

        for (position, page) in doc.pages.iter().enumerate() {
            let page_number = position as u32 + 1;

            for span in page.spans() {
                let size = SizeKey::from_points(span.size);
                collection.histogram.add(size);

                let text = span.text.trim();
                if span.is_bold() && !text.is_empty() {
                    let index = collection.candidates.len();
                    collection.candidates.push(HeadingCandidate {
                        text: text.to_string(),
                        size,
                        page: page_number,
                        index,
                    });
                }
            }
        }

        collection
    }
}
