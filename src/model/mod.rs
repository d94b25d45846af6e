//! Document model types.
//!
//! The input side mirrors what a PDF text extractor yields (pages of blocks
//! of lines of spans, plus raw page text); the output side is the title and
//! heading outline written to JSON.

mod document;
mod outline;
mod page;
mod span;

pub use document::ParsedDocument;
pub use outline::{DocumentResult, HeadingLevel, OutlineEntry};
pub use page::{Block, PageLayout, TextLine};
pub use span::{SpanFlags, TextSpan};
