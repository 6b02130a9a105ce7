//! Document-level types.

use std::fmt;

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{ContentBlock, ContentStats};

/// A structured courseware document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredDocument {
    /// Document title
    pub title: String,

    /// Content blocks in reading order
    pub content: Vec<ContentBlock>,

    /// Table of contents (chapters and sections only)
    pub toc: Vec<TocEntry>,

    /// Estimated page of each content block, parallel to `content`.
    /// Empty until the document has been paginated.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pages: Vec<u32>,
}

impl StructuredDocument {
    /// Create a new empty document with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: Vec::new(),
            toc: Vec::new(),
            pages: Vec::new(),
        }
    }

    /// Check if the document has any content.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Number of content blocks.
    pub fn block_count(&self) -> usize {
        self.content.len()
    }

    /// Append a content block.
    pub fn push_block(&mut self, block: ContentBlock) {
        self.content.push(block);
    }

    /// Add a table-of-contents entry unless one with the same text exists.
    ///
    /// Returns whether the entry was added.
    pub fn add_toc_entry(&mut self, entry: TocEntry) -> bool {
        if self.toc.iter().any(|e| e.text == entry.text) {
            return false;
        }
        self.toc.push(entry);
        true
    }

    /// Whether page numbers have been assigned to the content.
    pub fn is_paginated(&self) -> bool {
        !self.content.is_empty() && self.pages.len() == self.content.len()
    }

    /// Estimated page of the block at `index`, if paginated.
    pub fn page_of(&self, index: usize) -> Option<u32> {
        self.pages.get(index).copied()
    }

    /// Number of the last estimated page (0 when not paginated).
    pub fn page_count(&self) -> u32 {
        self.pages.last().copied().unwrap_or(0)
    }

    /// Iterate over blocks together with their estimated page.
    pub fn blocks_with_pages(&self) -> impl Iterator<Item = (&ContentBlock, Option<u32>)> {
        self.content
            .iter()
            .enumerate()
            .map(move |(i, block)| (block, self.page_of(i)))
    }

    /// Per-kind block counts.
    pub fn stats(&self) -> ContentStats {
        ContentStats::from_blocks(&self.content)
    }

    /// Get plain text content of the document, one block per line.
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Definition { term, definition } => {
                    Some(format!("{}: {}", term, definition))
                }
                ContentBlock::Table(table) => Some(table.plain_text()),
                ContentBlock::Image { .. } => None,
                other => other.text().map(str::to_string),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A table-of-contents entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Heading level: 1 (chapter) or 2 (section)
    pub level: u8,

    /// Heading text, identical to the referenced block's text
    pub text: String,

    /// Page number; `None` until estimated
    #[serde(rename = "pageNumber")]
    pub page_number: Option<PageNumber>,
}

impl TocEntry {
    /// Level of chapter entries.
    pub const CHAPTER: u8 = 1;

    /// Level of section entries.
    pub const SECTION: u8 = 2;

    /// Create a chapter (level 1) entry.
    pub fn chapter(text: impl Into<String>, page: Option<u32>) -> Self {
        Self {
            level: Self::CHAPTER,
            text: text.into(),
            page_number: page.map(PageNumber::Page),
        }
    }

    /// Create a section (level 2) entry.
    pub fn section(text: impl Into<String>, page: Option<u32>) -> Self {
        Self {
            level: Self::SECTION,
            text: text.into(),
            page_number: page.map(PageNumber::Page),
        }
    }

    /// The numeric page, if known.
    pub fn page(&self) -> Option<u32> {
        match self.page_number {
            Some(PageNumber::Page(n)) => Some(n),
            _ => None,
        }
    }
}

/// A resolved page number, or the sentinel for "no matching block".
///
/// Serialized as a JSON number or the string `"unknown"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNumber {
    /// A 1-indexed page
    Page(u32),
    /// The heading could not be located in the content
    Unknown,
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageNumber::Page(n) => write!(f, "{}", n),
            PageNumber::Unknown => f.write_str("unknown"),
        }
    }
}

impl Serialize for PageNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageNumber::Page(n) => serializer.serialize_u32(*n),
            PageNumber::Unknown => serializer.serialize_str("unknown"),
        }
    }
}

impl<'de> Deserialize<'de> for PageNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawPageNumber {
            Page(u32),
            Label(String),
        }

        match RawPageNumber::deserialize(deserializer)? {
            RawPageNumber::Page(n) => Ok(PageNumber::Page(n)),
            RawPageNumber::Label(label) if label == "unknown" => Ok(PageNumber::Unknown),
            RawPageNumber::Label(label) => Err(de::Error::invalid_value(
                de::Unexpected::Str(&label),
                &"a page number or \"unknown\"",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_new() {
        let doc = StructuredDocument::new("Course");
        assert!(doc.is_empty());
        assert!(!doc.is_paginated());
        assert_eq!(doc.page_count(), 0);
    }

    #[test]
    fn test_toc_dedup() {
        let mut doc = StructuredDocument::new("Course");
        assert!(doc.add_toc_entry(TocEntry::chapter("Chapter 1", Some(1))));
        assert!(!doc.add_toc_entry(TocEntry::section("Chapter 1", Some(2))));
        assert_eq!(doc.toc.len(), 1);
    }

    #[test]
    fn test_page_number_json() {
        let entries = vec![
            TocEntry::chapter("A", Some(3)),
            TocEntry {
                level: 2,
                text: "B".to_string(),
                page_number: Some(PageNumber::Unknown),
            },
            TocEntry::section("C", None),
        ];
        let json = serde_json::to_string(&entries).unwrap();
        assert!(json.contains(r#""pageNumber":3"#));
        assert!(json.contains(r#""pageNumber":"unknown""#));
        assert!(json.contains(r#""pageNumber":null"#));

        let back: Vec<TocEntry> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entries);
    }

    #[test]
    fn test_page_number_rejects_other_strings() {
        let result: std::result::Result<PageNumber, _> = serde_json::from_str(r#""later""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_pages_omitted_until_paginated() {
        let mut doc = StructuredDocument::new("T");
        doc.push_block(ContentBlock::paragraph("x"));
        let json = serde_json::to_string(&doc).unwrap();
        assert!(!json.contains("\"pages\""));

        doc.pages = vec![1];
        assert!(doc.is_paginated());
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains(r#""pages":[1]"#));
    }

    #[test]
    fn test_plain_text() {
        let mut doc = StructuredDocument::new("T");
        doc.push_block(ContentBlock::chapter("One"));
        doc.push_block(ContentBlock::Definition {
            term: "Term".to_string(),
            definition: "Meaning".to_string(),
        });
        assert_eq!(doc.plain_text(), "One\nTerm: Meaning");
    }
}
