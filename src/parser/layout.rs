//! Layout analysis for PDF pages.
//!
//! Walks a page's content stream, tracking the text state well enough to
//! know each text run's font, effective size and baseline, and groups the
//! runs into lines and blocks in paint order.

use std::collections::HashMap;

use crate::error::Result;
use crate::model::{Block, PageLayout, SpanFlags, TextLine, TextSpan};
use crate::outline::SizeKey;

use super::backend::{
    get_number_from_value, BackendFontInfo, ContentOp, PageId, PdfBackend, PdfValue,
};

/// Spans whose baselines differ by less than this fraction of the font size
/// share a line.
const LINE_TOLERANCE: f32 = 0.5;

/// A vertical jump larger than this many font sizes starts a new block.
const BLOCK_GAP_FACTOR: f32 = 2.0;

/// TJ adjustments (thousandths of an em) beyond this read as a word space.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Size used before the first `Tf`.
const DEFAULT_FONT_SIZE: f32 = 12.0;

/// Something painted on the page, in content-stream order.
#[derive(Debug, Clone, PartialEq)]
enum PageItem {
    Span { span: TextSpan, y: f32 },
    XObject(String),
}

/// Layout analyzer for extracting blocks, lines and spans from PDF pages.
pub struct LayoutAnalyzer<'a, B: PdfBackend> {
    backend: &'a B,
}

impl<'a, B: PdfBackend> LayoutAnalyzer<'a, B> {
    /// Create a new layout analyzer.
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Analyze one page. The returned layout has no raw text.
    pub fn analyze_page(&self, page_number: u32, page_id: PageId) -> Result<PageLayout> {
        let items = self.extract_items(page_id)?;
        let mut page = PageLayout::new(page_number);
        page.blocks = group_items(items);
        Ok(page)
    }

    fn extract_items(&self, page_id: PageId) -> Result<Vec<PageItem>> {
        let fonts: HashMap<Vec<u8>, BackendFontInfo> = self
            .backend
            .page_fonts(page_id)?
            .into_iter()
            .map(|font| (font.name.clone(), font))
            .collect();

        let content = self.backend.page_content(page_id)?;
        if content.is_empty() {
            return Ok(Vec::new());
        }
        let operations = self.backend.decode_content(&content)?;

        Ok(self.interpret(page_id, &operations, &fonts))
    }

    fn interpret(
        &self,
        page_id: PageId,
        operations: &[ContentOp],
        fonts: &HashMap<Vec<u8>, BackendFontInfo>,
    ) -> Vec<PageItem> {
        let mut items = Vec::new();
        let mut state = TextState::default();
        let mut ctm = Matrix::default();
        let mut saved: Vec<(TextState, Matrix)> = Vec::new();
        let mut text_matrix = Matrix::default();
        let mut in_text_block = false;

        for op in operations {
            match op.operator.as_str() {
                "q" => saved.push((state.clone(), ctm.clone())),
                "Q" => {
                    if let Some((restored_state, restored_ctm)) = saved.pop() {
                        state = restored_state;
                        ctm = restored_ctm;
                    }
                }
                "cm" => {
                    if let Some(m) = matrix_operands(&op.operands) {
                        ctm = m.multiply(&ctm);
                    }
                }
                "BT" => {
                    in_text_block = true;
                    text_matrix = Matrix::default();
                }
                "ET" => {
                    in_text_block = false;
                }
                "Tf" => {
                    if op.operands.len() >= 2 {
                        if let PdfValue::Name(font_name) = &op.operands[0] {
                            state.font_flags = fonts
                                .get(font_name)
                                .map(|f| f.flags)
                                .unwrap_or_else(SpanFlags::empty);
                            state.font_name = font_name.clone();
                        }
                        state.font_size =
                            get_number_from_value(&op.operands[1]).unwrap_or(DEFAULT_FONT_SIZE);
                    }
                }
                "TL" => {
                    if let Some(leading) = op.operands.first().and_then(get_number_from_value) {
                        state.leading = leading;
                    }
                }
                "Td" | "TD" => {
                    if op.operands.len() >= 2 {
                        let tx = get_number_from_value(&op.operands[0]).unwrap_or(0.0);
                        let ty = get_number_from_value(&op.operands[1]).unwrap_or(0.0);
                        if op.operator == "TD" {
                            state.leading = -ty;
                        }
                        text_matrix.translate(tx, ty);
                    }
                }
                "Tm" => {
                    if let Some(m) = matrix_operands(&op.operands) {
                        text_matrix = m;
                    }
                }
                "T*" => {
                    text_matrix.next_line(state.leading);
                }
                "Tj" | "TJ" | "'" | "\"" => {
                    if matches!(op.operator.as_str(), "'" | "\"") {
                        text_matrix.next_line(state.leading);
                    }
                    if !in_text_block {
                        continue;
                    }

                    let text = match op.operator.as_str() {
                        "TJ" => match op.operands.first() {
                            Some(PdfValue::Array(parts)) => self.decode_tj(page_id, &state, parts),
                            _ => String::new(),
                        },
                        "\"" => self.decode_string(page_id, &state, op.operands.get(2)),
                        _ => self.decode_string(page_id, &state, op.operands.first()),
                    };

                    if !text.is_empty() {
                        let rendering = text_matrix.multiply(&ctm);
                        let size = state.font_size * rendering.vertical_scale();
                        items.push(PageItem::Span {
                            span: TextSpan::new(text, size, state.font_flags),
                            y: rendering.f,
                        });
                    }
                }
                "Do" => {
                    if let Some(PdfValue::Name(name)) = op.operands.first() {
                        items.push(PageItem::XObject(String::from_utf8_lossy(name).to_string()));
                    }
                }
                _ => {}
            }
        }

        items
    }

    fn decode_string(
        &self,
        page_id: PageId,
        state: &TextState,
        value: Option<&PdfValue>,
    ) -> String {
        match value {
            Some(PdfValue::Str(bytes)) => {
                self.backend.decode_text(page_id, &state.font_name, bytes)
            }
            _ => String::new(),
        }
    }

    /// Decode a TJ array. Large negative adjustments move the pen right far
    /// enough to be a word space.
    fn decode_tj(&self, page_id: PageId, state: &TextState, parts: &[PdfValue]) -> String {
        let mut combined = String::new();

        for part in parts {
            match part {
                PdfValue::Str(bytes) => {
                    combined.push_str(&self.backend.decode_text(page_id, &state.font_name, bytes));
                }
                PdfValue::Integer(_) | PdfValue::Real(_) => {
                    let adjustment = -get_number_from_value(part).unwrap_or(0.0);
                    if adjustment > TJ_SPACE_THRESHOLD
                        && !combined.ends_with(' ')
                        && !combined.ends_with('\u{00A0}')
                    {
                        if let Some(c) = combined.chars().last() {
                            if !is_spaceless_script_char(c) {
                                combined.push(' ');
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        combined
    }
}

/// Six numeric operands of `cm` or `Tm`.
fn matrix_operands(operands: &[PdfValue]) -> Option<Matrix> {
    if operands.len() < 6 {
        return None;
    }
    let n = |i: usize, default: f32| get_number_from_value(&operands[i]).unwrap_or(default);
    Some(Matrix {
        a: n(0, 1.0),
        b: n(1, 0.0),
        c: n(2, 0.0),
        d: n(3, 1.0),
        e: n(4, 0.0),
        f: n(5, 0.0),
    })
}

/// Append `span` to `line`, extending the last span when both share style
/// and size.
fn push_span(line: &mut Vec<TextSpan>, span: TextSpan) {
    if let Some(last) = line.last_mut() {
        if last.flags == span.flags
            && SizeKey::from_points(last.size) == SizeKey::from_points(span.size)
        {
            last.text.push_str(&span.text);
            return;
        }
    }
    line.push(span);
}

/// Group painted items into blocks of lines. Consecutive runs on a line
/// with the same style and size become one span.
fn group_items(items: Vec<PageItem>) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut lines: Vec<TextLine> = Vec::new();
    let mut current: Vec<TextSpan> = Vec::new();
    let mut line_y = 0.0_f32;
    let mut line_size = 0.0_f32;

    fn flush_line(current: &mut Vec<TextSpan>, lines: &mut Vec<TextLine>) {
        if !current.is_empty() {
            lines.push(TextLine::new(std::mem::take(current)));
        }
    }

    fn flush_block(lines: &mut Vec<TextLine>, blocks: &mut Vec<Block>) {
        if !lines.is_empty() {
            blocks.push(Block::text(std::mem::take(lines)));
        }
    }

    for item in items {
        match item {
            PageItem::XObject(name) => {
                flush_line(&mut current, &mut lines);
                flush_block(&mut lines, &mut blocks);
                blocks.push(Block::image(name));
            }
            PageItem::Span { span, y } => {
                if !current.is_empty() {
                    let reference = span.size.max(line_size);
                    let dy = (y - line_y).abs();
                    if dy > reference * LINE_TOLERANCE {
                        flush_line(&mut current, &mut lines);
                        if dy > reference * BLOCK_GAP_FACTOR {
                            flush_block(&mut lines, &mut blocks);
                        }
                        line_size = 0.0;
                    }
                }
                if current.is_empty() {
                    line_y = y;
                }
                line_size = line_size.max(span.size);
                push_span(&mut current, span);
            }
        }
    }

    flush_line(&mut current, &mut lines);
    flush_block(&mut lines, &mut blocks);
    blocks
}

/// Font state set by `Tf` and `TL`, saved and restored by `q`/`Q`.
#[derive(Debug, Clone)]
struct TextState {
    font_name: Vec<u8>,
    font_size: f32,
    font_flags: SpanFlags,
    leading: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            font_name: Vec::new(),
            font_size: DEFAULT_FONT_SIZE,
            font_flags: SpanFlags::empty(),
            leading: 0.0,
        }
    }
}

/// Affine matrix `[a b c d e f]`, used for both Tm and the CTM.
#[derive(Debug, Clone)]
struct Matrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Default for Matrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl Matrix {
    /// `self × other`, i.e. `self` applied first.
    fn multiply(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self, leading: f32) {
        self.translate(0.0, -leading);
    }

    /// Length of the text-space y axis in user space.
    fn vertical_scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }
}

/// Check if character is from a script that doesn't use word spaces.
/// Chinese and Japanese don't use spaces between words, but Korean does.
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    // CJK Unified Ideographs and extensions
    (0x4E00..=0x9FFF).contains(&code)
    || (0x3400..=0x4DBF).contains(&code)
    || (0x20000..=0x2EBEF).contains(&code)
    // Hiragana, Katakana
    || (0x3040..=0x30FF).contains(&code)
    // CJK Symbols and Punctuation
    || (0x3000..=0x303F).contains(&code)
}
