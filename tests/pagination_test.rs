//! Integration tests for page estimation.

use coursekit::{
    paginate, render, structure_text_with_options, BlockHeights, ContentBlock, Coursekit,
    JsonFormat, PageNumber, PaginationEstimator, PaginationOptions, StructureOptions,
    StructuredDocument, TocEntry,
};

fn structure(text: &str) -> StructuredDocument {
    structure_text_with_options(text, StructureOptions::new().with_auto_images(false))
}

fn lesson(chapters: usize, paragraphs_per_chapter: usize) -> String {
    let mut lines = vec!["Skin Care Basics".to_string()];
    for c in 1..=chapters {
        lines.push(format!("Chapter {} Topic", c));
        lines.push(format!("{}.1 Overview", c));
        for p in 0..paragraphs_per_chapter {
            lines.push(format!(
                "Paragraph {} of chapter {} describes a step in the routine.",
                p, c
            ));
        }
    }
    lines.join("\n")
}

#[test]
fn test_pages_are_monotonic() {
    let doc = paginate(structure(&lesson(4, 30)), &PaginationOptions::default());

    assert_eq!(doc.pages.len(), doc.content.len());
    for pair in doc.pages.windows(2) {
        assert!(pair[0] <= pair[1]);
    }
}

#[test]
fn test_chapters_start_new_pages() {
    let doc = paginate(structure(&lesson(3, 2)), &PaginationOptions::default());

    for (index, (block, page)) in doc.blocks_with_pages().enumerate() {
        if block.is_chapter() && index > 0 {
            assert!(page > doc.page_of(index - 1), "chapter at {} did not break", index);
        }
    }
    assert_eq!(doc.page_count(), 4);
}

#[test]
fn test_forced_break_after_short_chapter() {
    let mut doc = StructuredDocument::new("T");
    doc.push_block(ContentBlock::chapter("Chapter 1"));
    doc.push_block(ContentBlock::paragraph("One short paragraph."));
    doc.push_block(ContentBlock::chapter("Chapter 2"));

    let doc = paginate(doc, &PaginationOptions::default());
    assert_eq!(doc.pages, vec![1, 1, 2]);
}

#[test]
fn test_toc_pages_follow_blocks() {
    let doc = paginate(structure(&lesson(2, 20)), &PaginationOptions::default());

    for entry in &doc.toc {
        let index = doc
            .content
            .iter()
            .position(|b| b.text() == Some(entry.text.as_str()))
            .unwrap();
        assert_eq!(entry.page(), doc.page_of(index));
    }
}

#[test]
fn test_unmatched_toc_entry_is_unknown() {
    let mut doc = structure("Course\nChapter 1 Basics\nBody text.");
    doc.add_toc_entry(TocEntry::section("Appendix", Some(3)));

    let doc = paginate(doc, &PaginationOptions::default());
    assert_eq!(doc.toc[0].page_number, Some(PageNumber::Page(2)));
    assert_eq!(doc.toc[1].page_number, Some(PageNumber::Unknown));
}

#[test]
fn test_start_page_offsets_everything() {
    let options = PaginationOptions::letter().with_start_page(10);
    let doc = paginate(structure("Course\nChapter 1 Basics\nBody text."), &options);

    assert_eq!(doc.pages, vec![10, 11, 11]);
    assert_eq!(doc.toc[0].page(), Some(11));
}

#[test]
fn test_custom_heights_change_breaks() {
    let heights = BlockHeights {
        paragraph: 500.0,
        ..Default::default()
    };
    let options = PaginationOptions::new().with_heights(heights);
    let doc = structure("Course intro paragraph.\nSecond paragraph here.\nThird paragraph here.");

    let pages = PaginationEstimator::with_options(options).estimate(&doc.content);
    assert_eq!(pages, vec![1, 2, 3]);
}

#[test]
fn test_json_includes_pages() {
    let result = Coursekit::new()
        .with_auto_images(false)
        .process("Course\nChapter 1 Basics\nBody text.")
        .unwrap();
    let json = result.to_json(JsonFormat::Compact).unwrap();

    assert!(json.contains(r#""pages":[1,2,2]"#));
    assert!(json.contains(r#""pageNumber":2"#));

    let back = render::from_json(&json).unwrap();
    assert_eq!(&back, result.document());
}

#[test]
fn test_unknown_page_in_json() {
    let mut doc = StructuredDocument::new("T");
    doc.push_block(ContentBlock::paragraph("text"));
    doc.add_toc_entry(TocEntry::chapter("Missing", None));

    let doc = paginate(doc, &PaginationOptions::default());
    let json = render::to_json(&doc, JsonFormat::Compact).unwrap();
    assert!(json.contains(r#""pageNumber":"unknown""#));
    assert_eq!(render::to_outline(&doc), "Missing ... ?");
}
