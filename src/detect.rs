//! PDF input recognition.
//!
//! Two checks run before a file reaches the parser: the batch walker selects
//! files by extension, and the backend sniffs the `%PDF-x.y` header so that
//! stray non-PDF files fail fast with [`Error::UnknownFormat`].

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MAGIC_LEN: usize = 5;
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// Some writers emit junk before the header; readers accept it within the
/// first kilobyte.
const HEADER_SEARCH_WINDOW: usize = 1024;

/// Whether the path carries a `.pdf` extension, compared case-insensitively.
pub fn has_pdf_extension<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Read the header of a file and return its PDF version.
pub fn sniff_version_from_path<P: AsRef<Path>>(path: P) -> Result<String> {
    let mut header = Vec::with_capacity(HEADER_SEARCH_WINDOW);
    File::open(path)?
        .take(HEADER_SEARCH_WINDOW as u64)
        .read_to_end(&mut header)?;
    sniff_version(&header)
}

/// Return the PDF version declared by the header in `data`.
///
/// # Returns
/// * `Ok(version)` such as `"1.7"` when a header is found
/// * `Err(Error::UnknownFormat)` when there is no `%PDF-` marker
/// * `Err(Error::UnsupportedVersion)` when the version is malformed
pub fn sniff_version(data: &[u8]) -> Result<String> {
    let window = &data[..data.len().min(HEADER_SEARCH_WINDOW)];
    let start = window
        .windows(PDF_MAGIC_LEN)
        .position(|w| w == PDF_MAGIC)
        .ok_or(Error::UnknownFormat)?;

    let version_start = start + PDF_MAGIC_LEN;
    let version_bytes = data
        .get(version_start..version_start + VERSION_LEN)
        .ok_or(Error::UnknownFormat)?;
    let version = String::from_utf8_lossy(version_bytes).to_string();

    if !is_valid_version(&version) {
        return Err(Error::UnsupportedVersion(version));
    }

    Ok(version)
}

/// Check if a version string looks like `d.d`.
fn is_valid_version(version: &str) -> bool {
    let bytes = version.as_bytes();
    bytes.len() == 3 && bytes[0].is_ascii_digit() && bytes[1] == b'.' && bytes[2].is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_valid_pdf() {
        let data = b"%PDF-1.7\n%\xe2\xe3\xcf\xd3";
        assert_eq!(sniff_version(data).unwrap(), "1.7");
    }

    #[test]
    fn test_sniff_with_leading_garbage() {
        let data = b"\x00\x00junk%PDF-1.4\n";
        assert_eq!(sniff_version(data).unwrap(), "1.4");
    }

    #[test]
    fn test_sniff_invalid_format() {
        let result = sniff_version(b"<!DOCTYPE html>");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_sniff_truncated_header() {
        let result = sniff_version(b"%PDF-1");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_sniff_bad_version() {
        let result = sniff_version(b"%PDF-x.y\n");
        assert!(matches!(result, Err(Error::UnsupportedVersion(_))));
    }

    #[test]
    fn test_has_pdf_extension() {
        assert!(has_pdf_extension("report.pdf"));
        assert!(has_pdf_extension("REPORT.PDF"));
        assert!(has_pdf_extension("dir/Mixed.Pdf"));
        assert!(!has_pdf_extension("report.pdf.json"));
        assert!(!has_pdf_extension("pdf"));
        assert!(!has_pdf_extension("notes.txt"));
    }

    #[test]
    fn test_sniff_from_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.pdf");
        std::fs::write(&path, b"").unwrap();
        assert!(matches!(
            sniff_version_from_path(&path),
            Err(Error::UnknownFormat)
        ));
    }
}
