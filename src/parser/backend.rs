//! Access to PDF documents.
//!
//! [`PdfBackend`] is everything the layout analyzer needs from a PDF library:
//! pages, font styles, content operations, decoded strings and page text.
//! [`LopdfBackend`] implements it with lopdf; tests script it directly.

use std::collections::BTreeMap;
use std::path::Path;

use lopdf::{Dictionary, Document as LopdfDocument, Object};

use crate::detect::{sniff_version, sniff_version_from_path};
use crate::error::{Error, Result};
use crate::model::SpanFlags;

/// Page identifier: (object number, generation number).
pub type PageId = (u32, u16);

/// Font information returned by the backend.
#[derive(Debug, Clone)]
pub struct BackendFontInfo {
    /// Font resource name (key in the page's font dictionary).
    pub name: Vec<u8>,
    /// Base font name (e.g., "Helvetica-Bold").
    pub base_font: String,
    /// Style flags derived from the name and font descriptor.
    pub flags: SpanFlags,
}

/// A value from a PDF content stream operand.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfValue {
    Integer(i64),
    Real(f32),
    Name(Vec<u8>),
    Str(Vec<u8>),
    Array(Vec<PdfValue>),
    Other,
}

/// A single operation from a PDF content stream.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentOp {
    pub operator: String,
    pub operands: Vec<PdfValue>,
}

impl ContentOp {
    /// Create an operation.
    pub fn new(operator: impl Into<String>, operands: Vec<PdfValue>) -> Self {
        Self {
            operator: operator.into(),
            operands,
        }
    }
}

/// The PDF operations used by [`LayoutAnalyzer`](super::LayoutAnalyzer) and
/// [`PdfParser`](super::PdfParser).
pub trait PdfBackend {
    /// Pages keyed by 1-based page number.
    fn pages(&self) -> BTreeMap<u32, PageId>;

    /// Fonts in the page's resources, with their style flags.
    fn page_fonts(&self, page: PageId) -> Result<Vec<BackendFontInfo>>;

    /// Decompressed content stream bytes; empty for a page without content.
    fn page_content(&self, page: PageId) -> Result<Vec<u8>>;

    /// Split content bytes into operations.
    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>>;

    /// Decode a shown string with the encoding of `font_name` on `page`,
    /// or with [`decode_text_simple`] when the encoding is unknown.
    fn decode_text(&self, page: PageId, font_name: &[u8], bytes: &[u8]) -> String;

    /// Plain text of a page, one rendered line per text line.
    fn page_raw_text(&self, page_number: u32) -> Result<String>;
}

/// Decode bytes as UTF-16BE (with BOM), UTF-8, or Latin-1, in that order.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    // UTF-16BE with BOM
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16(&utf16).unwrap_or_default();
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    // Latin-1
    bytes.iter().map(|&b| b as char).collect()
}

// ---------------------------------------------------------------------------
// LopdfBackend: implementation backed by lopdf
// ---------------------------------------------------------------------------

/// FontDescriptor /Flags bits (PDF 32000-1, table 123), 0-based.
const DESCRIPTOR_FIXED_PITCH: i64 = 1 << 0;
const DESCRIPTOR_SERIF: i64 = 1 << 1;
const DESCRIPTOR_ITALIC: i64 = 1 << 6;
const DESCRIPTOR_FORCE_BOLD: i64 = 1 << 18;

/// /FontWeight at or above this is bold.
const BOLD_WEIGHT: f32 = 700.0;

/// Concrete [`PdfBackend`] backed by `lopdf::Document`.
pub struct LopdfBackend {
    doc: LopdfDocument,
}

impl LopdfBackend {
    /// Load from a file path. Files without a PDF header are rejected
    /// before lopdf sees them.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        sniff_version_from_path(path)?;
        let doc = LopdfDocument::load(path).map_err(Error::from)?;
        Self::from_document(doc)
    }

    /// Load from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        sniff_version(data)?;
        let doc = LopdfDocument::load_mem(data).map_err(Error::from)?;
        Self::from_document(doc)
    }

    /// Load from a reader.
    pub fn load_reader<R: std::io::Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::load_bytes(&data)
    }

    fn from_document(doc: LopdfDocument) -> Result<Self> {
        // lopdf opens documents protected by an empty user password; text
        // from anything else decodes to garbage but still parses.
        if doc.is_encrypted() {
            log::warn!("Document is encrypted; extracted text may be unreadable");
        }
        Ok(Self { doc })
    }

    /// Get PDF version string.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    /// Resolve an object that may be an indirect reference to a dictionary.
    fn resolve_dict<'a>(&'a self, obj: &'a Object) -> Option<&'a Dictionary> {
        match obj {
            Object::Reference(r) => self.doc.get_dictionary(*r).ok(),
            Object::Dictionary(d) => Some(d),
            _ => None,
        }
    }

    /// Find the font descriptor, looking through Type0 descendant fonts.
    fn font_descriptor<'a>(&'a self, font: &'a Dictionary) -> Option<&'a Dictionary> {
        if let Some(descriptor) = font
            .get(b"FontDescriptor")
            .ok()
            .and_then(|o| self.resolve_dict(o))
        {
            return Some(descriptor);
        }

        let descendants = match font.get(b"DescendantFonts").ok()? {
            Object::Reference(r) => self.doc.get_object(*r).ok()?.as_array().ok()?,
            Object::Array(arr) => arr,
            _ => return None,
        };
        let descendant = self.resolve_dict(descendants.first()?)?;
        descendant
            .get(b"FontDescriptor")
            .ok()
            .and_then(|o| self.resolve_dict(o))
    }

    /// Style flags from the base font name and the font descriptor.
    fn font_flags(&self, base_font: &str, font: &Dictionary) -> SpanFlags {
        let mut flags = SpanFlags::from_font_name(base_font);

        if let Some(descriptor) = self.font_descriptor(font) {
            let bits = descriptor
                .get(b"Flags")
                .ok()
                .and_then(|o| o.as_i64().ok())
                .unwrap_or(0);
            if bits & DESCRIPTOR_FORCE_BOLD != 0 {
                flags |= SpanFlags::BOLD;
            }
            if bits & DESCRIPTOR_ITALIC != 0 {
                flags |= SpanFlags::ITALIC;
            }
            if bits & DESCRIPTOR_FIXED_PITCH != 0 {
                flags |= SpanFlags::MONOSPACED;
            }
            if bits & DESCRIPTOR_SERIF != 0 {
                flags |= SpanFlags::SERIFED;
            }

            let weight = descriptor
                .get(b"FontWeight")
                .ok()
                .and_then(|o| o.as_float().ok());
            if weight.is_some_and(|w| w >= BOLD_WEIGHT) {
                flags |= SpanFlags::BOLD;
            }
        }

        flags
    }
}

impl PdfBackend for LopdfBackend {
    fn pages(&self) -> BTreeMap<u32, PageId> {
        self.doc.get_pages()
    }

    fn page_fonts(&self, page: PageId) -> Result<Vec<BackendFontInfo>> {
        let lopdf_fonts = self
            .doc
            .get_page_fonts(page)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let mut result = Vec::with_capacity(lopdf_fonts.len());
        for (name, font_dict) in &lopdf_fonts {
            let base_font = font_dict
                .get(b"BaseFont")
                .ok()
                .and_then(|o| o.as_name().ok())
                .map(|n| String::from_utf8_lossy(n).to_string())
                .unwrap_or_else(|| "Unknown".to_string());
            let flags = self.font_flags(&base_font, font_dict);
            result.push(BackendFontInfo {
                name: name.clone(),
                base_font,
                flags,
            });
        }
        Ok(result)
    }

    fn page_content(&self, page_id: PageId) -> Result<Vec<u8>> {
        let page_dict = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        // A page without /Contents is blank.
        let contents = match page_dict.get(b"Contents") {
            Ok(contents) => contents,
            Err(_) => return Ok(Vec::new()),
        };

        match contents {
            Object::Reference(r) => {
                if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                    return Ok(stream_bytes(s));
                }
                Err(Error::PdfParse("Invalid content stream".to_string()))
            }
            Object::Array(arr) => {
                let mut content = Vec::new();
                for obj in arr {
                    if let Object::Reference(r) = obj {
                        if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                            content.extend_from_slice(&stream_bytes(s));
                            content.push(b' ');
                        }
                    }
                }
                Ok(content)
            }
            _ => Err(Error::PdfParse("Invalid content stream".to_string())),
        }
    }

    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>> {
        let content =
            lopdf::content::Content::decode(data).map_err(|e| Error::PdfParse(e.to_string()))?;

        Ok(content
            .operations
            .into_iter()
            .map(|op| ContentOp {
                operator: op.operator,
                operands: op.operands.iter().map(convert_object).collect(),
            })
            .collect())
    }

    fn decode_text(&self, page: PageId, font_name: &[u8], bytes: &[u8]) -> String {
        if let Ok(lopdf_fonts) = self.doc.get_page_fonts(page) {
            if let Some(font_dict) = lopdf_fonts.get(font_name) {
                if let Ok(enc) = font_dict.get_font_encoding(&self.doc) {
                    if let Ok(text) = LopdfDocument::decode_text(&enc, bytes) {
                        return text;
                    }
                }
            }
        }
        decode_text_simple(bytes)
    }

    fn page_raw_text(&self, page_number: u32) -> Result<String> {
        self.doc
            .extract_text(&[page_number])
            .map_err(|e| Error::TextExtract(format!("Page {}: {}", page_number, e)))
    }
}

/// Decompressed stream data; streams without a filter are used as stored.
fn stream_bytes(stream: &lopdf::Stream) -> Vec<u8> {
    stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone())
}

/// Convert a `lopdf::Object` to [`PdfValue`].
fn convert_object(obj: &Object) -> PdfValue {
    match obj {
        Object::Integer(i) => PdfValue::Integer(*i),
        Object::Real(r) => PdfValue::Real(*r),
        Object::Name(n) => PdfValue::Name(n.clone()),
        Object::String(b, _) => PdfValue::Str(b.clone()),
        Object::Array(arr) => PdfValue::Array(arr.iter().map(convert_object).collect()),
        _ => PdfValue::Other,
    }
}

/// Helper: extract a number from a [`PdfValue`].
pub fn get_number_from_value(val: &PdfValue) -> Option<f32> {
    match val {
        PdfValue::Integer(i) => Some(*i as f32),
        PdfValue::Real(r) => Some(*r),
        _ => None,
    }
}
