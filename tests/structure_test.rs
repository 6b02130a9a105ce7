//! Integration tests for the structuring engine.

use std::io::Write;

use chrono::{TimeZone, Utc};
use coursekit::{
    structure_file, structure_text_with_options, ContentBlock, Coursekit, Error, HeaderKeywords,
    ImageKeywordCategory, StructureOptions, StructuredDocument, TableBlock, TocEntry,
};

fn options() -> StructureOptions {
    StructureOptions::new()
        .with_auto_images(false)
        .with_image_timestamp(Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap())
}

fn structure(text: &str) -> StructuredDocument {
    structure_text_with_options(text, options())
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_tab_table_with_header() {
    let doc = structure("Name\tPrice\nA\t10\nB\t20");
    assert_eq!(
        doc.content,
        vec![ContentBlock::Table(TableBlock {
            headers: strings(&["Name", "Price"]),
            rows: vec![strings(&["A", "10"]), strings(&["B", "20"])],
            has_real_header: true,
        })]
    );
}

#[test]
fn test_tab_table_without_header() {
    let doc = structure(
        "Course\nApply the cream slowly, then wait.\tTwice daily, after washing.\nRinse well.\tOnce a day.",
    );
    let table = match &doc.content[1] {
        ContentBlock::Table(table) => table,
        other => panic!("expected table, got {:?}", other),
    };
    assert!(!table.has_real_header);
    assert_eq!(table.headers, strings(&["Column 1", "Column 2"]));
    assert_eq!(table.row_count(), 2);
}

#[test]
fn test_toc_region_skipped() {
    let doc = structure("目錄\nIntroduction......1\nChapter 1 Basics");
    assert_eq!(doc.content, vec![ContentBlock::chapter("Chapter 1 Basics")]);
    assert_eq!(doc.toc.len(), 1);
    assert_eq!(doc.toc[0].text, "Chapter 1 Basics");
}

#[test]
fn test_rendered_toc_entries_are_not_chapters() {
    let text = "教材\n目錄\n第一章：基礎理論.........3\n第二章：實務操作.........9\n\n第一章：基礎理論\n皮膚是人體最大的器官。";
    let doc = structure(text);
    assert_eq!(doc.stats().chapter_count, 1);
    assert_eq!(doc.toc, vec![TocEntry::chapter("第一章：基礎理論", Some(2))]);
}

#[test]
fn test_annotated_courseware() {
    let text = "\
美容護膚基礎
第一章：皮膚的基本認識
一、皮膚的構造
皮膚由表皮、真皮與皮下組織構成。
1.1 表皮
1.1.1 角質層
(1) 保護身體
[建議：重點提示] 表皮沒有血管。
[建議：警示] 避免過度去角質。
[建議：定義：角質層] 表皮最外層的死細胞。
| 工具 | 用途 |
|---|---|
| 洗臉刷 | 清潔 |
[建議：插入圖片：皮膚三層結構]
- 每日清潔兩次";
    let doc = structure(text);
    let kinds: Vec<&str> = doc.content.iter().map(ContentBlock::kind).collect();
    assert_eq!(
        kinds,
        vec![
            "paragraph",
            "chapter",
            "section",
            "paragraph",
            "subsection",
            "subsubsection",
            "paragraph",
            "keypoint",
            "warning",
            "definition",
            "table",
            "image",
            "paragraph",
        ]
    );
    assert_eq!(
        doc.toc,
        vec![
            TocEntry::chapter("第一章：皮膚的基本認識", Some(2)),
            TocEntry::section("一、皮膚的構造", Some(2)),
        ]
    );
}

#[test]
fn test_short_line_section_has_no_toc_entry() {
    let doc = structure("Course\nIntro text.\n\nOverview\nMore text.");
    assert_eq!(doc.content[2], ContentBlock::section("Overview"));
    assert!(doc.toc.is_empty());
}

#[test]
fn test_short_line_after_blank_wins_over_later_rules() {
    let doc = structure("Intro.\n\n- item");
    assert_eq!(doc.content[1], ContentBlock::section("- item"));

    let doc = structure("Intro.\n\nTip: rest");
    assert_eq!(doc.content[1], ContentBlock::section("Tip: rest"));

    let doc = structure("Intro.\n\nName\tPrice\nA\t1\nB\t2");
    assert_eq!(doc.content[1], ContentBlock::section("Name Price"));
    assert!(doc.content[2].is_table());
}

#[test]
fn test_zero_data_row_tables_fall_through() {
    let doc = structure("| Tool | Use |\n|---|---|\nplain text after");
    assert!(doc.content.iter().all(|b| !b.is_table()));
    assert_eq!(doc.content[0], ContentBlock::paragraph("| Tool | Use |"));
}

#[test]
fn test_custom_vocabularies() {
    let options = options()
        .with_header_keywords(HeaderKeywords::new(["Werkzeug"]))
        .with_auto_images(true)
        .with_image_categories(vec![ImageKeywordCategory::new(
            "tools",
            "Werkzeugbild",
            ["pinsel"],
        )]);
    let text = "Kurs\nWerkzeug\tDies ist eine lange Beschreibung, mit Komma.\nPinsel\tAuftragen\nDer Pinsel wird gereinigt.";
    let doc = structure_text_with_options(text, options);

    assert!(matches!(&doc.content[1], ContentBlock::Table(t) if t.has_real_header));
    assert!(doc.content.last().is_some_and(ContentBlock::is_auto_image));
}

#[test]
fn test_pinned_timestamp_makes_ids_stable() {
    let text = "Course\n[圖片：皮膚結構]";
    assert_eq!(structure(text), structure(text));

    match &structure(text).content[1] {
        ContentBlock::Image { id, .. } => assert_eq!(id, "img_1714550400000_1"),
        other => panic!("expected image, got {:?}", other),
    }
}

#[test]
fn test_structure_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "Lesson\r\nChapter 1 Basics\r\nBody text.\r\n").unwrap();

    let doc = structure_file(file.path()).unwrap();
    assert_eq!(doc.title, "Lesson");
    assert_eq!(doc.stats().chapter_count, 1);
}

#[test]
fn test_structure_missing_file() {
    let result = structure_file("/nonexistent/lesson.txt");
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_process_file_rejects_invalid_utf8() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&[0x4C, 0xFF, 0xFE]).unwrap();

    let result = Coursekit::new().process_file(file.path());
    assert!(matches!(result, Err(Error::Encoding(_))));
}
