//! Content statistics.

use serde::{Deserialize, Serialize};

use super::ContentBlock;

/// Per-kind block counts of a structured document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentStats {
    /// Number of chapter headings
    pub chapter_count: u32,

    /// Number of section headings (all levels below chapter)
    pub heading_count: u32,

    /// Number of paragraphs
    pub paragraph_count: u32,

    /// Number of keypoint and warning callouts
    pub callout_count: u32,

    /// Number of definitions
    pub definition_count: u32,

    /// Number of tables
    pub table_count: u32,

    /// Number of explicitly marked images
    pub image_count: u32,

    /// Number of heuristically suggested images
    pub auto_image_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,
}

impl ContentStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the given blocks.
    pub fn from_blocks(blocks: &[ContentBlock]) -> Self {
        let mut stats = Self::new();
        for block in blocks {
            stats.add_block(block);
        }
        stats
    }

    /// Count a single block.
    pub fn add_block(&mut self, block: &ContentBlock) {
        match block {
            ContentBlock::Chapter { .. } => self.chapter_count += 1,
            ContentBlock::Section { .. }
            | ContentBlock::SubSection { .. }
            | ContentBlock::SubSubSection { .. } => self.heading_count += 1,
            ContentBlock::Paragraph { .. } => self.paragraph_count += 1,
            ContentBlock::Keypoint { .. } | ContentBlock::Warning { .. } => {
                self.callout_count += 1
            }
            ContentBlock::Definition { definition, .. } => {
                self.definition_count += 1;
                self.count_text(definition);
            }
            ContentBlock::Table(_) => self.table_count += 1,
            ContentBlock::Image { auto: true, .. } => self.auto_image_count += 1,
            ContentBlock::Image { auto: false, .. } => self.image_count += 1,
        }
        if let Some(text) = block.text() {
            self.count_text(text);
        }
    }

    /// Add word counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
    }

    /// Total number of blocks counted.
    pub fn block_count(&self) -> u32 {
        self.chapter_count
            + self.heading_count
            + self.paragraph_count
            + self.callout_count
            + self.definition_count
            + self.table_count
            + self.image_count
            + self.auto_image_count
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ContentStats) {
        self.chapter_count += other.chapter_count;
        self.heading_count += other.heading_count;
        self.paragraph_count += other.paragraph_count;
        self.callout_count += other.callout_count;
        self.definition_count += other.definition_count;
        self.table_count += other.table_count;
        self.image_count += other.image_count;
        self.auto_image_count += other.auto_image_count;
        self.word_count += other.word_count;
    }
}
