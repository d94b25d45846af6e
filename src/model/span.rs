//! Span-level types: one rendered run of text with its font metadata.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Style flags attached to a span.
    ///
    /// Bit positions follow the common text-extraction convention where
    /// bold is bit 4, so a span is bold when `flags & (1 << 4) != 0`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct SpanFlags: u32 {
        /// Raised glyphs
        const SUPERSCRIPT = 1 << 0;
        /// Italic or oblique face
        const ITALIC = 1 << 1;
        /// Serif face
        const SERIFED = 1 << 2;
        /// Fixed-pitch face
        const MONOSPACED = 1 << 3;
        /// Bold (or heavier) face
        const BOLD = 1 << 4;
    }
}

impl SpanFlags {
    /// Derive flags from a font's base name, e.g. `ABCDEF+Helvetica-BoldOblique`.
    pub fn from_font_name(font_name: &str) -> Self {
        let name = font_name.to_lowercase();
        let mut flags = SpanFlags::empty();

        if name.contains("bold")
            || name.contains("black")
            || name.contains("heavy")
            || name.contains("semibold")
            || name.contains("demi")
        {
            flags |= SpanFlags::BOLD;
        }
        if name.contains("italic") || name.contains("oblique") {
            flags |= SpanFlags::ITALIC;
        }
        if name.contains("courier") || name.contains("mono") {
            flags |= SpanFlags::MONOSPACED;
        }
        if name.contains("times") || (name.contains("serif") && !name.contains("sans")) {
            flags |= SpanFlags::SERIFED;
        }

        flags
    }
}

/// A text span with its font size and style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    /// The text as rendered, possibly with surrounding whitespace
    pub text: String,
    /// Effective font size in points
    pub size: f32,
    /// Style flags
    pub flags: SpanFlags,
}

impl TextSpan {
    /// Create a new span.
    pub fn new(text: impl Into<String>, size: f32, flags: SpanFlags) -> Self {
        Self {
            text: text.into(),
            size,
            flags,
        }
    }

    /// Create a regular-weight span.
    pub fn regular(text: impl Into<String>, size: f32) -> Self {
        Self::new(text, size, SpanFlags::empty())
    }

    /// Create a bold span.
    pub fn bold(text: impl Into<String>, size: f32) -> Self {
        Self::new(text, size, SpanFlags::BOLD)
    }

    /// Whether the bold bit is set.
    pub fn is_bold(&self) -> bool {
        self.flags.contains(SpanFlags::BOLD)
    }

    /// Whether the italic bit is set.
    pub fn is_italic(&self) -> bool {
        self.flags.contains(SpanFlags::ITALIC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_bit_position() {
        assert_eq!(SpanFlags::BOLD.bits(), 16);
        let span = TextSpan::new("x", 12.0, SpanFlags::from_bits_truncate(16 | 2));
        assert!(span.is_bold());
        assert!(span.is_italic());
    }

    #[test]
    fn test_flags_from_font_name() {
        let flags = SpanFlags::from_font_name("ABCDEF+Helvetica-Bold");
        assert!(flags.contains(SpanFlags::BOLD));
        assert!(!flags.contains(SpanFlags::ITALIC));

        let flags = SpanFlags::from_font_name("Helvetica-Oblique");
        assert!(!flags.contains(SpanFlags::BOLD));
        assert!(flags.contains(SpanFlags::ITALIC));

        let flags = SpanFlags::from_font_name("Courier");
        assert!(flags.contains(SpanFlags::MONOSPACED));

        let flags = SpanFlags::from_font_name("Times-Roman");
        assert!(flags.contains(SpanFlags::SERIFED));
        assert!(!flags.contains(SpanFlags::BOLD));
    }

    #[test]
    fn test_regular_and_bold_constructors() {
        assert!(!TextSpan::regular("body", 10.0).is_bold());
        assert!(TextSpan::bold("Heading", 14.0).is_bold());
    }
}
