//! End-to-end outline extraction over generated PDFs.

mod common;

use common::{body, bold, bold_runs, report_title, three_levels, PdfBuilder};
use pdf_outline::render::{to_json, JsonFormat};
use pdf_outline::{
    extract_file, extract_outline_from_bytes, parse_bytes, DocumentResult, HeadingLevel,
    OutlineEntry, OutlineExtractor, OutlineOptions, ParseOptions,
};

fn extract(builder: &PdfBuilder, options: &OutlineOptions) -> DocumentResult {
    extract_outline_from_bytes(&builder.to_bytes(), &ParseOptions::new(), options).unwrap()
}

#[test]
fn test_parse_reads_sizes_and_bold() {
    let doc = parse_bytes(&report_title().to_bytes()).unwrap();

    assert_eq!(doc.page_count(), 1);
    let spans: Vec<_> = doc.pages[0].spans().collect();
    assert_eq!(spans.len(), 6);
    assert_eq!(spans[0].text, "Report Title");
    assert_eq!(spans[0].size, 24.0);
    assert!(spans[0].is_bold());
    assert!(spans[1..].iter().all(|s| !s.is_bold() && s.size == 12.0));
}

#[test]
fn test_single_title_heading() {
    let result = extract(&report_title(), &OutlineOptions::default());
    assert_eq!(result.title, "Report Title");
    assert!(result.outline.is_empty());

    let kept = extract(&report_title(), &OutlineOptions::new().with_title_in_outline(true));
    assert_eq!(kept.title, "Report Title");
    assert_eq!(
        kept.outline,
        vec![OutlineEntry::new(HeadingLevel::H1, "Report Title", 1)]
    );
}

#[test]
fn test_title_shown_in_several_runs() {
    let builder = PdfBuilder::new().page(vec![
        bold_runs(vec!["Annual ", "Report"], 24),
        body("First paragraph.", 12),
        body("Second paragraph.", 12),
        body("Third paragraph.", 12),
        body("Fourth paragraph.", 12),
        body("Fifth paragraph.", 12),
    ]);

    let result = extract(&builder, &OutlineOptions::default());
    assert_eq!(result.title, "Annual Report");
    assert!(result.outline.is_empty());
}

#[test]
fn test_outline_starts_at_h1_after_title_removal() {
    let builder = PdfBuilder::new()
        .page(vec![bold("Title", 24), body("Body one.", 12), body("Body two.", 12)])
        .page(vec![bold("Section", 18), body("Body three.", 12), body("Body four.", 12)]);

    let result = extract(&builder, &OutlineOptions::default());
    assert_eq!(result.title, "Title");
    assert_eq!(
        result.outline,
        vec![OutlineEntry::new(HeadingLevel::H1, "Section", 2)]
    );
}

#[test]
fn test_three_levels_sorted_by_page() {
    let kept = extract(&three_levels(), &OutlineOptions::new().with_title_in_outline(true));

    assert_eq!(kept.title, "Introduction");
    assert_eq!(
        kept.outline,
        vec![
            OutlineEntry::new(HeadingLevel::H1, "Introduction", 1),
            OutlineEntry::new(HeadingLevel::H2, "Background", 1),
            OutlineEntry::new(HeadingLevel::H3, "Details", 2),
            OutlineEntry::new(HeadingLevel::H1, "Methods", 2),
            OutlineEntry::new(HeadingLevel::H2, "Results", 3),
            OutlineEntry::new(HeadingLevel::H3, "Summary", 3),
        ]
    );

    let result = extract(&three_levels(), &OutlineOptions::default());
    assert_eq!(result.title, "Introduction");
    assert_eq!(result.outline.len(), 5);
    assert_eq!(result.outline[0].text, "Background");
    assert_eq!(result.count_level(HeadingLevel::H1), 1);
    assert!(result
        .outline
        .windows(2)
        .all(|pair| pair[0].page <= pair[1].page));
}

#[test]
fn test_bold_at_body_size_is_not_a_heading() {
    let builder = PdfBuilder::new().page(vec![
        bold("Overview", 20),
        body("Plain body text.", 12),
        bold("Note:", 12),
        body("More plain body text.", 12),
        body("Even more body text.", 12),
    ]);

    let result = extract(&builder, &OutlineOptions::new().with_title_in_outline(true));
    assert_eq!(result.title, "Overview");
    assert!(result.outline.iter().all(|e| e.text != "Note:"));
    assert_eq!(result.outline.len(), 1);
}

#[test]
fn test_fourth_size_is_dropped() {
    let builder = PdfBuilder::new().page(vec![
        bold("Part One", 28),
        bold("Chapter", 22),
        bold("Section", 18),
        bold("Subsection", 15),
        body("Body.", 10),
        body("Body.", 10),
        body("Body.", 10),
        body("Body.", 10),
        body("Body.", 10),
    ]);

    let result = extract(&builder, &OutlineOptions::new().with_title_in_outline(true));
    let levels: Vec<_> = result.outline.iter().map(|e| e.level).collect();
    assert_eq!(
        levels,
        vec![HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3]
    );
    assert!(result.outline.iter().all(|e| e.text != "Subsection"));
}

#[test]
fn test_fallback_title_from_first_line() {
    let builder = PdfBuilder::new()
        .page(vec![
            body("Meeting Notes", 14),
            body("Attendees were present.", 11),
            body("Minutes follow below.", 11),
            body("Nothing else to add.", 11),
        ])
        .page(vec![bold("Agenda", 16), body("Items to discuss.", 11)]);

    let result = extract(&builder, &OutlineOptions::default());
    assert_eq!(result.title, "Meeting Notes");
    assert_eq!(
        result.outline,
        vec![OutlineEntry::new(HeadingLevel::H1, "Agenda", 2)]
    );
}

#[test]
fn test_blank_page_gives_empty_result() {
    let builder = PdfBuilder::new().page(vec![]);
    let result = extract(&builder, &OutlineOptions::default());

    assert_eq!(result, DocumentResult::empty());
    assert_eq!(
        to_json(&result, JsonFormat::Compact).unwrap(),
        r#"{"title":"","outline":[]}"#
    );
}

#[test]
fn test_no_headings_above_body() {
    let builder = PdfBuilder::new().page(vec![
        body("Just a letter", 12),
        body("Dear reader,", 12),
        body("Nothing stands out here.", 12),
    ]);

    let result = extract(&builder, &OutlineOptions::default());
    assert_eq!(result.title, "Just a letter");
    assert!(result.outline.is_empty());
}

#[test]
fn test_extraction_is_deterministic() {
    let bytes = three_levels().to_bytes();
    let render = || {
        let result =
            extract_outline_from_bytes(&bytes, &ParseOptions::new(), &OutlineOptions::default())
                .unwrap();
        to_json(&result, JsonFormat::Pretty).unwrap()
    };
    assert_eq!(render(), render());
}

#[test]
fn test_analysis_exposes_levels() {
    let doc = parse_bytes(&three_levels().to_bytes()).unwrap();
    let analysis = OutlineExtractor::default().analyze(&doc).unwrap();

    assert_eq!(analysis.body_size.points(), 12.0);
    assert_eq!(analysis.levels.len(), 3);
    assert_eq!(analysis.levels.h1_size().map(|s| s.points()), Some(18.0));
    assert_eq!(analysis.title.candidate_index(), Some(0));
}

#[test]
fn test_extract_file_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.pdf");
    report_title().save(&path);

    let result = extract_file(&path).unwrap();
    assert_eq!(result.title, "Report Title");
}
