//! Small PDFs built with lopdf for integration tests.

#![allow(dead_code)]

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// One line of text drawn in its own text object, one `Tj` per run.
pub struct Line {
    pub runs: Vec<&'static str>,
    pub size: i64,
    pub bold: bool,
}

pub fn bold(text: &'static str, size: i64) -> Line {
    Line {
        runs: vec![text],
        size,
        bold: true,
    }
}

pub fn body(text: &'static str, size: i64) -> Line {
    Line {
        runs: vec![text],
        size,
        bold: false,
    }
}

/// A bold line shown as several separate runs.
pub fn bold_runs(runs: Vec<&'static str>, size: i64) -> Line {
    Line {
        runs,
        size,
        bold: true,
    }
}

/// Builds a document with Helvetica (`/F1`) and Helvetica-Bold (`/F2`).
#[derive(Default)]
pub struct PdfBuilder {
    pages: Vec<Vec<Line>>,
}

impl PdfBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, lines: Vec<Line>) -> Self {
        self.pages.push(lines);
        self
    }

    pub fn build(&self) -> Document {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let regular_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let bold_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => regular_id,
                "F2" => bold_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for lines in &self.pages {
            let mut operations = Vec::new();
            let mut y = 780;
            for line in lines {
                let font = if line.bold { "F2" } else { "F1" };
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new("Tf", vec![font.into(), line.size.into()]));
                operations.push(Operation::new("Td", vec![72.into(), y.into()]));
                for run in &line.runs {
                    operations.push(Operation::new("Tj", vec![Object::string_literal(*run)]));
                }
                operations.push(Operation::new("ET", vec![]));
                y -= line.size * 2;
            }

            let content = Content { operations };
            let content_id = doc.add_object(Stream::new(
                dictionary! {},
                content.encode().expect("encode content"),
            ));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        self.build().save_to(&mut bytes).expect("save pdf");
        bytes
    }

    pub fn save(&self, path: &Path) {
        self.build().save(path).expect("save pdf");
    }
}

/// One page: a 24pt bold title over five 12pt body lines.
pub fn report_title() -> PdfBuilder {
    PdfBuilder::new().page(vec![
        bold("Report Title", 24),
        body("First paragraph of the report.", 12),
        body("Second paragraph of the report.", 12),
        body("Third paragraph of the report.", 12),
        body("Fourth paragraph of the report.", 12),
        body("Fifth paragraph of the report.", 12),
    ])
}

/// Three pages with two bold headings each at 18, 16 and 14pt.
pub fn three_levels() -> PdfBuilder {
    PdfBuilder::new()
        .page(vec![
            bold("Introduction", 18),
            body("Body text one.", 12),
            bold("Background", 16),
            body("Body text two.", 12),
            body("Body text three.", 12),
            body("Body text four.", 12),
        ])
        .page(vec![
            bold("Details", 14),
            body("Body text five.", 12),
            bold("Methods", 18),
            body("Body text six.", 12),
            body("Body text seven.", 12),
            body("Body text eight.", 12),
        ])
        .page(vec![
            bold("Results", 16),
            body("Body text nine.", 12),
            bold("Summary", 14),
            body("Body text ten.", 12),
            body("Body text eleven.", 12),
            body("Body text twelve.", 12),
        ])
}
