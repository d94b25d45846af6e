//! PDF parsing module.

mod backend;
mod layout;
mod options;
mod pdf_parser;

pub use backend::{
    decode_text_simple, BackendFontInfo, ContentOp, LopdfBackend, PageId, PdfBackend, PdfValue,
};
pub use layout::LayoutAnalyzer;
pub use options::{ErrorMode, ParseOptions, RawTextMode};
pub use pdf_parser::PdfParser;
