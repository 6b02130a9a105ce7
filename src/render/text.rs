//! Plain text rendering for structured documents.

use crate::model::{PageNumber, StructuredDocument};

/// Convert a document to plain text, one block per line.
pub fn to_text(doc: &StructuredDocument) -> String {
    let body = doc.plain_text();
    if body.is_empty() {
        doc.title.clone()
    } else {
        format!("{}\n\n{}", doc.title, body)
    }
}

/// Render the table of contents as an indented outline.
///
/// Sections are indented under their chapter; the page column shows `?`
/// for unknown pages and is omitted when no page has been assigned.
pub fn to_outline(doc: &StructuredDocument) -> String {
    doc.toc
        .iter()
        .map(|entry| {
            let indent = "  ".repeat(usize::from(entry.level.saturating_sub(1)));
            match entry.page_number {
                Some(PageNumber::Page(n)) => format!("{}{} ... {}", indent, entry.text, n),
                Some(PageNumber::Unknown) => format!("{}{} ... ?", indent, entry.text),
                None => format!("{}{}", indent, entry.text),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
