//! Page-filling simulation over a finished content sequence.

use crate::model::{ContentBlock, PageNumber, StructuredDocument, TocEntry};

use super::options::PaginationOptions;

/// Assigns estimated print pages to content blocks.
///
/// Blocks fill pages top to bottom using fixed per-kind heights. Every
/// chapter after the first block starts a new page, and a block that would
/// overflow a non-empty page moves to the next one.
#[derive(Debug, Clone, Default)]
pub struct PaginationEstimator {
    options: PaginationOptions,
}

impl PaginationEstimator {
    /// Create an estimator with default (A4) options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an estimator with custom options.
    pub fn with_options(options: PaginationOptions) -> Self {
        Self { options }
    }

    /// Get the options.
    pub fn options(&self) -> &PaginationOptions {
        &self.options
    }

    /// Estimate the page of every block.
    ///
    /// The result is parallel to `blocks` and non-decreasing.
    pub fn estimate(&self, blocks: &[ContentBlock]) -> Vec<u32> {
        let printable = self.printable_height();
        let start_page = self.options.start_page.max(1);

        let mut pages = Vec::with_capacity(blocks.len());
        let mut page = start_page;
        let mut accumulated = 0.0_f32;

        for (index, block) in blocks.iter().enumerate() {
            let height = sanitize(self.options.heights.height_of(block));

            if block.is_chapter() && index > 0 {
                log::debug!(
                    "PaginationEstimator: forced break before chapter at block {} (page {})",
                    index,
                    page + 1
                );
                page += 1;
                accumulated = 0.0;
            } else if accumulated > 0.0 && accumulated + height > printable {
                log::debug!(
                    "PaginationEstimator: overflow at block {} ({:.0} + {:.0} > {:.0}), page {}",
                    index,
                    accumulated,
                    height,
                    printable,
                    page + 1
                );
                page += 1;
                accumulated = 0.0;
            }

            pages.push(page);
            accumulated += height;
        }

        log::debug!(
            "PaginationEstimator: {} blocks on {} pages",
            blocks.len(),
            pages.last().map_or(0, |last| last - start_page + 1)
        );

        pages
    }

    /// Resolve TOC page numbers from block pages by exact text match.
    ///
    /// A block at the entry's heading level is preferred; otherwise the first
    /// block with the same text is used. Entries with no matching block get
    /// [`PageNumber::Unknown`].
    pub fn reconcile_toc(&self, toc: &mut [TocEntry], content: &[ContentBlock], pages: &[u32]) {
        for entry in toc.iter_mut() {
            let matching = |block: &ContentBlock| block.text() == Some(entry.text.as_str());
            let index = content
                .iter()
                .position(|block| matching(block) && block.heading_level() == Some(entry.level))
                .or_else(|| content.iter().position(|block| matching(block)));

            entry.page_number = match index.and_then(|i| pages.get(i)) {
                Some(page) => Some(PageNumber::Page(*page)),
                None => {
                    log::debug!(
                        "PaginationEstimator: no block found for TOC entry {:?}",
                        entry.text
                    );
                    Some(PageNumber::Unknown)
                }
            };
        }
    }

    /// Paginate a document: assign block pages and reconcile the TOC.
    pub fn paginate(&self, mut doc: StructuredDocument) -> StructuredDocument {
        doc.pages = self.estimate(&doc.content);
        self.reconcile_toc(&mut doc.toc, &doc.content, &doc.pages);
        doc
    }

    fn printable_height(&self) -> f32 {
        let printable = self.options.printable_height();
        if printable.is_finite() && printable > 0.0 {
            printable
        } else {
            log::warn!(
                "PaginationEstimator: invalid printable height {}, clamping to 1",
                printable
            );
            1.0
        }
    }
}

fn sanitize(height: f32) -> f32 {
    if height.is_finite() {
        height.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TableBlock;
    use crate::paginate::BlockHeights;

    fn paragraphs(n: usize) -> Vec<ContentBlock> {
        (0..n)
            .map(|i| ContentBlock::paragraph(format!("p{}", i)))
            .collect()
    }

    #[test]
    fn test_empty_content() {
        assert!(PaginationEstimator::new().estimate(&[]).is_empty());
    }

    #[test]
    fn test_overflow_breaks() {
        // 971 printable / 80 per paragraph = 12 paragraphs per page
        let pages = PaginationEstimator::new().estimate(&paragraphs(25));
        assert_eq!(pages[0], 1);
        assert_eq!(pages[11], 1);
        assert_eq!(pages[12], 2);
        assert_eq!(pages[24], 3);
    }

    #[test]
    fn test_forced_chapter_break() {
        let blocks = vec![
            ContentBlock::chapter("Chapter 1"),
            ContentBlock::paragraph("short"),
            ContentBlock::chapter("Chapter 2"),
        ];
        assert_eq!(PaginationEstimator::new().estimate(&blocks), vec![1, 1, 2]);
    }

    #[test]
    fn test_first_chapter_does_not_break() {
        let blocks = vec![ContentBlock::chapter("Chapter 1")];
        assert_eq!(PaginationEstimator::new().estimate(&blocks), vec![1]);
    }

    #[test]
    fn test_oversized_block_on_empty_page() {
        let mut table = TableBlock::with_header(vec!["A".to_string()]);
        for i in 0..40 {
            table.push_aligned_row(vec![i.to_string()]);
        }
        let blocks = vec![
            ContentBlock::Table(table),
            ContentBlock::paragraph("after"),
        ];
        // Table is taller than a page but starts on an empty page
        assert_eq!(PaginationEstimator::new().estimate(&blocks), vec![1, 2]);
    }

    #[test]
    fn test_start_page() {
        let options = PaginationOptions::new().with_start_page(5);
        let pages = PaginationEstimator::with_options(options).estimate(&paragraphs(13));
        assert_eq!(pages[0], 5);
        assert_eq!(pages[12], 6);
    }

    #[test]
    fn test_invalid_geometry_is_clamped() {
        let options = PaginationOptions::new().with_margins(800.0, 800.0);
        let pages = PaginationEstimator::with_options(options).estimate(&paragraphs(3));
        assert_eq!(pages, vec![1, 2, 3]);
    }

    #[test]
    fn test_zero_heights_stay_on_one_page() {
        let heights = BlockHeights {
            paragraph: 0.0,
            ..Default::default()
        };
        let options = PaginationOptions::new().with_heights(heights);
        let pages = PaginationEstimator::with_options(options).estimate(&paragraphs(100));
        assert!(pages.iter().all(|p| *p == 1));
    }

    #[test]
    fn test_reconcile_toc() {
        let mut doc = StructuredDocument::new("T");
        doc.push_block(ContentBlock::chapter("Chapter 1"));
        doc.push_block(ContentBlock::paragraph("text"));
        doc.push_block(ContentBlock::chapter("Chapter 2"));
        doc.add_toc_entry(TocEntry::chapter("Chapter 1", Some(9)));
        doc.add_toc_entry(TocEntry::chapter("Chapter 2", None));
        doc.add_toc_entry(TocEntry::section("Missing", Some(1)));

        let doc = PaginationEstimator::new().paginate(doc);
        assert_eq!(doc.pages, vec![1, 1, 2]);
        assert_eq!(doc.toc[0].page_number, Some(PageNumber::Page(1)));
        assert_eq!(doc.toc[1].page_number, Some(PageNumber::Page(2)));
        assert_eq!(doc.toc[2].page_number, Some(PageNumber::Unknown));
    }

    #[test]
    fn test_reconcile_prefers_heading_level() {
        let content = vec![
            ContentBlock::paragraph("Setup"),
            ContentBlock::chapter("Next"),
            ContentBlock::section("Setup"),
        ];
        let pages = vec![1, 2, 2];
        let mut toc = vec![TocEntry::section("Setup", None)];
        PaginationEstimator::new().reconcile_toc(&mut toc, &content, &pages);
        assert_eq!(toc[0].page(), Some(2));
    }

    #[test]
    fn test_paginate_is_idempotent() {
        let mut doc = StructuredDocument::new("T");
        doc.push_block(ContentBlock::chapter("Chapter 1"));
        doc.content.extend(paragraphs(20));
        doc.add_toc_entry(TocEntry::chapter("Chapter 1", None));

        let estimator = PaginationEstimator::new();
        let once = estimator.paginate(doc);
        let twice = estimator.paginate(once.clone());
        assert_eq!(once, twice);
    }
}
