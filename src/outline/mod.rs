//! Title and heading outline extraction from font statistics.
//!
//! The pipeline runs in one direction:
//!
//! 1. [`SpanCollector`] walks every span, building a [`FontHistogram`] and
//!    recording each bold span as a [`HeadingCandidate`].
//! 2. The most frequent size is the body size ([`FontHistogram::body_size`]).
//! 3. [`HeadingClassifier`] keeps candidates larger than body text and maps
//!    the three largest distinct sizes to H1, H2 and H3.
//! 4. [`TitleResolver`] picks the first page-1 H1, falling back to the first
//!    line of page 1.
//! 5. Unless [`OutlineOptions::keep_title_in_outline`] is set, the title
//!    heading is removed and the remaining candidates are classified again,
//!    so a non-empty outline always has an H1.
//!
//! # Example
//!
//! ```
//! use pdf_outline::model::{Block, PageLayout, ParsedDocument, TextLine, TextSpan};
//! use pdf_outline::outline::{extract_outline, OutlineOptions};
//!
//! let mut page = PageLayout::new(1);
//! page.add_block(Block::text(vec![
//!     TextLine::new(vec![TextSpan::bold("Annual Report", 24.0)]),
//!     TextLine::new(vec![TextSpan::regular("Body text.", 11.0)]),
//!     TextLine::new(vec![TextSpan::regular("More body text.", 11.0)]),
//! ]));
//! let doc = ParsedDocument::from_pages(vec![page]);
//!
//! let result = extract_outline(&doc, &OutlineOptions::default());
//! assert_eq!(result.title, "Annual Report");
//! assert!(result.outline.is_empty());
//! ```

mod classifier;
mod collector;
mod histogram;
mod title;

pub use classifier::{ClassifiedHeading, HeadingClassifier, LevelAssignment};
pub use collector::{HeadingCandidate, SpanCollection, SpanCollector};
pub use histogram::{FontHistogram, SizeKey};
pub use title::{ResolvedTitle, TitleResolver, TitleSource};

use crate::model::{DocumentResult, OutlineEntry, ParsedDocument};

/// Options for outline extraction.
#[derive(Debug, Clone, Default)]
pub struct OutlineOptions {
    /// Keep the heading chosen as title in the outline as well
    pub keep_title_in_outline: bool,
}

impl OutlineOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep or drop the title heading from the outline.
    pub fn with_title_in_outline(mut self, keep: bool) -> Self {
        self.keep_title_in_outline = keep;
        self
    }
}

/// Intermediate results of a document's analysis, with the options of the
/// extractor that produced it already applied.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Most frequent font size
    pub body_size: SizeKey,
    /// Size-to-level mapping of the headings in the outline
    pub levels: LevelAssignment,
    /// Classified headings, ordered by page then document order
    pub headings: Vec<ClassifiedHeading>,
    /// Resolved title
    pub title: ResolvedTitle,
}

impl Analysis {
    /// Build the output.
    pub fn to_result(&self) -> DocumentResult {
        DocumentResult {
            title: self.title.text.clone(),
            outline: self.headings.iter().map(OutlineEntry::from).collect(),
        }
    }
}

/// Runs the collector, classifier and title resolver over documents.
#[derive(Debug, Clone, Default)]
pub struct OutlineExtractor {
    options: OutlineOptions,
}

impl OutlineExtractor {
    /// Create an extractor.
    pub fn new(options: OutlineOptions) -> Self {
        Self { options }
    }

    /// Analyze a document. Returns `None` when it has no spans.
    pub fn analyze(&self, doc: &ParsedDocument) -> Option<Analysis> {
        let SpanCollection {
            histogram,
            candidates,
        } = SpanCollector::new().collect(doc);

        let body_size = histogram.body_size()?;
        let classifier = HeadingClassifier::new(body_size);
        let (all_levels, all_headings) = classifier.classify(&candidates);

        let first_page_text = doc.pages.first().map(|page| {
            if page.raw_text.trim().is_empty() {
                page.layout_text()
            } else {
                page.raw_text.clone()
            }
        });
        let title =
            TitleResolver::new().resolve(&all_levels, &candidates, first_page_text.as_deref());

        let (levels, headings) = match title.candidate_index() {
            Some(title_index) if !self.options.keep_title_in_outline => {
                let rest: Vec<HeadingCandidate> = candidates
                    .iter()
                    .filter(|c| c.index != title_index)
                    .cloned()
                    .collect();
                classifier.classify(&rest)
            }
            _ => (all_levels, all_headings),
        };

        log::debug!(
            "body size {} over {} spans, {} candidates, {} levels, {} headings",
            body_size,
            histogram.total(),
            candidates.len(),
            levels.len(),
            headings.len()
        );

        Some(Analysis {
            body_size,
            levels,
            headings,
            title,
        })
    }

    /// Extract the title and outline of a document.
    pub fn extract(&self, doc: &ParsedDocument) -> DocumentResult {
        match self.analyze(doc) {
            Some(analysis) => analysis.to_result(),
            None => DocumentResult::empty(),
        }
    }
}

/// Extract the title and outline of a document.
pub fn extract_outline(doc: &ParsedDocument, options: &OutlineOptions) -> DocumentResult {
    OutlineExtractor::new(options.clone()).extract(doc)
}
