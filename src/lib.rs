//! # pdf-outline
//!
//! Extracts a document title and an H1–H3 heading outline from PDF files
//! using font-size statistics.
//!
//! The most frequent font size is taken as body text. Bold spans larger than
//! body text are headings; the three largest distinct heading sizes become
//! H1, H2 and H3. The title is the first H1 on page 1, or else the first line
//! of page 1.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdf_outline::{extract_file, render};
//!
//! fn main() -> pdf_outline::Result<()> {
//!     let result = extract_file("document.pdf")?;
//!     println!("{}", result.title);
//!
//!     let json = render::to_json(&result, render::JsonFormat::Pretty)?;
//!     std::fs::write("document.json", json)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Batch processing
//!
//! [`batch::BatchProcessor`] turns a folder of PDFs into one JSON file per
//! document, skipping (and reporting) files that cannot be read.

pub mod batch;
pub mod detect;
pub mod error;
pub mod model;
pub mod outline;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use batch::{BatchConfig, BatchProcessor, BatchReport, FileOutcome, FileReport};
pub use detect::has_pdf_extension;
pub use error::{Error, Result};
pub use model::{DocumentResult, HeadingLevel, OutlineEntry, ParsedDocument};
pub use outline::{extract_outline, OutlineExtractor, OutlineOptions};
pub use parser::{ErrorMode, ParseOptions, PdfParser};
pub use render::JsonFormat;

use std::io::Read;
use std::path::Path;

/// Parse a PDF file into pages of blocks, lines and spans.
///
/// # Example
///
/// ```no_run
/// let doc = pdf_outline::parse_file("document.pdf").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<ParsedDocument> {
    PdfParser::open(path)?.parse()
}

/// Parse a PDF from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<ParsedDocument> {
    PdfParser::from_bytes(data)?.parse()
}

/// Parse a PDF from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<ParsedDocument> {
    PdfParser::from_reader(reader)?.parse()
}

/// Extract the title and outline of a PDF file with default options.
///
/// # Example
///
/// ```no_run
/// let result = pdf_outline::extract_file("document.pdf").unwrap();
/// for entry in &result.outline {
///     println!("{} {} (p. {})", entry.level, entry.text, entry.page);
/// }
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<DocumentResult> {
    extract_outline_from_file(path, &ParseOptions::new().lenient(), &OutlineOptions::default())
}

/// Extract the title and outline of a PDF file.
pub fn extract_outline_from_file<P: AsRef<Path>>(
    path: P,
    parse: &ParseOptions,
    outline: &OutlineOptions,
) -> Result<DocumentResult> {
    let doc = PdfParser::open_with_options(path, parse.clone())?.parse()?;
    Ok(extract_outline(&doc, outline))
}

/// Extract the title and outline of a PDF held in memory.
pub fn extract_outline_from_bytes(
    data: &[u8],
    parse: &ParseOptions,
    outline: &OutlineOptions,
) -> Result<DocumentResult> {
    let doc = PdfParser::from_bytes_with_options(data, parse.clone())?.parse()?;
    Ok(extract_outline(&doc, outline))
}
