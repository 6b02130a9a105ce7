//! Reserved fixture marker detection.
//!
//! Input whose last non-blank line is exactly [`FIXTURE_MARKER`] is a known
//! fixture: structuring is bypassed and a pre-built document is returned.

use crate::model::{ContentBlock, StructuredDocument, TableBlock, TocEntry};

/// Reserved end-of-document marker.
pub const FIXTURE_MARKER: &str = "[DEMO_MARK]";

/// Check if the text ends with the fixture marker.
///
/// # Example
/// ```
/// use coursekit::fixture::is_fixture_input;
///
/// assert!(is_fixture_input("anything\n[DEMO_MARK]\n\n"));
/// assert!(!is_fixture_input("[DEMO_MARK] trailing"));
/// ```
pub fn is_fixture_input(text: &str) -> bool {
    last_non_blank_line(text).is_some_and(|line| line == FIXTURE_MARKER)
}

/// Remove the fixture marker line, leaving the rest of the text intact.
pub fn strip_fixture_marker(text: &str) -> String {
    if !is_fixture_input(text) {
        return text.to_string();
    }
    let mut lines: Vec<&str> = text.lines().collect();
    if let Some(pos) = lines.iter().rposition(|line| line.trim() == FIXTURE_MARKER) {
        lines.remove(pos);
    }
    lines.join("\n")
}

fn last_non_blank_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).rev().find(|line| !line.is_empty())
}

/// The built-in demo document.
pub fn demo_document() -> StructuredDocument {
    let mut doc = StructuredDocument::new("美容護膚基礎教材");

    let chapter = "第一章：皮膚的基本認識";
    let section = "一、皮膚的構造";
    doc.push_block(ContentBlock::chapter(chapter));
    doc.add_toc_entry(TocEntry::chapter(chapter, Some(1)));
    doc.push_block(ContentBlock::section(section));
    doc.add_toc_entry(TocEntry::section(section, Some(1)));
    doc.push_block(ContentBlock::paragraph(
        "皮膚由表皮、真皮與皮下組織三層構成，各層負責不同的保護與代謝功能。",
    ));
    doc.push_block(ContentBlock::Image {
        id: "img_demo_skin_layers".to_string(),
        description: "結構圖: 皮膚三層結構剖面".to_string(),
        auto: true,
    });
    doc.push_block(ContentBlock::Keypoint {
        text: "表皮層沒有血管，養分由真皮層供應。".to_string(),
    });
    doc.push_block(ContentBlock::Definition {
        term: "角質層".to_string(),
        definition: "表皮最外層，由死亡的角質細胞堆疊而成。".to_string(),
    });

    let mut tools = TableBlock::with_header(vec!["工具".to_string(), "用途".to_string()]);
    tools.push_aligned_row(vec!["洗臉刷".to_string(), "深層清潔".to_string()]);
    tools.push_aligned_row(vec!["化妝棉".to_string(), "塗抹化妝水".to_string()]);
    doc.push_block(ContentBlock::Table(tools));

    let chapter = "第二章：日常保養流程";
    doc.push_block(ContentBlock::chapter(chapter));
    doc.add_toc_entry(TocEntry::chapter(chapter, Some(2)));
    doc.push_block(ContentBlock::paragraph("清潔、調理、保濕三個步驟缺一不可。"));
    doc.push_block(ContentBlock::Warning {
        text: "敏感性肌膚應先做局部測試。".to_string(),
    });

    doc
}
