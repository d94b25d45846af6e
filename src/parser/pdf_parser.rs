//! PDF document parser.

use std::io::Read;
use std::path::Path;

use crate::error::Result;
use crate::model::{PageLayout, ParsedDocument};

use super::backend::{LopdfBackend, PdfBackend};
use super::layout::LayoutAnalyzer;
use super::options::{ErrorMode, ParseOptions};

/// PDF document parser.
///
/// Produces a [`ParsedDocument`]: per page, the blocks/lines/spans found by
/// [`LayoutAnalyzer`] plus the page's raw text where requested.
pub struct PdfParser<B: PdfBackend = LopdfBackend> {
    backend: B,
    options: ParseOptions,
}

impl PdfParser<LopdfBackend> {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let backend = LopdfBackend::load_file(path)?;
        Ok(Self::with_backend(backend, options))
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        let backend = LopdfBackend::load_bytes(data)?;
        Ok(Self::with_backend(backend, options))
    }

    /// Parse a PDF from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let backend = LopdfBackend::load_reader(reader)?;
        Ok(Self::with_backend(backend, ParseOptions::default()))
    }

    /// Get PDF version.
    pub fn version(&self) -> String {
        self.backend.version()
    }
}

impl<B: PdfBackend> PdfParser<B> {
    /// Build a parser over any backend.
    pub fn with_backend(backend: B, options: ParseOptions) -> Self {
        Self { backend, options }
    }

    /// Get the number of pages.
    pub fn page_count(&self) -> u32 {
        self.backend.pages().len() as u32
    }

    /// Parse every page.
    ///
    /// In strict mode a page whose content cannot be read fails the whole
    /// document; in lenient mode it is kept as an empty page. A failed
    /// raw-text extraction is never fatal: the title fallback then uses the
    /// analyzed lines instead.
    pub fn parse(&self) -> Result<ParsedDocument> {
        let analyzer = LayoutAnalyzer::new(&self.backend);
        let mut document = ParsedDocument::new();

        for (position, (page_num, page_id)) in self.backend.pages().into_iter().enumerate() {
            let number = position as u32 + 1;

            let mut page = match analyzer.analyze_page(number, page_id) {
                Ok(page) => page,
                Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                    log::warn!("Failed to analyze page {}: {}", page_num, e);
                    PageLayout::new(number)
                }
                Err(e) => return Err(e),
            };

            if self.options.raw_text.includes(position) {
                match self.backend.page_raw_text(page_num) {
                    Ok(text) => page.raw_text = text,
                    Err(e) => log::debug!("No raw text for page {}: {}", page_num, e),
                }
            }

            document.add_page(page);
        }

        Ok(document)
    }
}
