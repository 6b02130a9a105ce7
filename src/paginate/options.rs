//! Pagination options: page geometry and per-kind block heights.
//!
//! All lengths are CSS pixels at 96 DPI.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::ContentBlock;

/// Options for the pagination estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationOptions {
    /// Full page height
    pub page_height: f32,

    /// Top margin
    pub margin_top: f32,

    /// Bottom margin
    pub margin_bottom: f32,

    /// Number of the first content page
    pub start_page: u32,

    /// Estimated rendered height of each block kind
    pub heights: BlockHeights,
}

impl PaginationOptions {
    /// Create new pagination options with defaults (A4 portrait).
    pub fn new() -> Self {
        Self::default()
    }

    /// A4 portrait (210 x 297 mm) with 20 mm vertical margins.
    pub fn a4() -> Self {
        Self {
            page_height: 1123.0,
            margin_top: 76.0,
            margin_bottom: 76.0,
            start_page: 1,
            heights: BlockHeights::default(),
        }
    }

    /// US Letter portrait (8.5 x 11 in) with 0.75 in vertical margins.
    pub fn letter() -> Self {
        Self {
            page_height: 1056.0,
            margin_top: 72.0,
            margin_bottom: 72.0,
            ..Self::a4()
        }
    }

    /// Load options from JSON; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the page height.
    pub fn with_page_height(mut self, height: f32) -> Self {
        self.page_height = height;
        self
    }

    /// Set the top and bottom margins.
    pub fn with_margins(mut self, top: f32, bottom: f32) -> Self {
        self.margin_top = top;
        self.margin_bottom = bottom;
        self
    }

    /// Set the number of the first content page.
    pub fn with_start_page(mut self, page: u32) -> Self {
        self.start_page = page;
        self
    }

    /// Replace the block height table.
    pub fn with_heights(mut self, heights: BlockHeights) -> Self {
        self.heights = heights;
        self
    }

    /// Height available for content on one page.
    pub fn printable_height(&self) -> f32 {
        self.page_height - self.margin_top - self.margin_bottom
    }

    /// Check the geometry and heights for impossible values.
    pub fn validate(&self) -> Result<()> {
        let lengths = [
            ("page_height", self.page_height),
            ("margin_top", self.margin_top),
            ("margin_bottom", self.margin_bottom),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{} must be a finite non-negative length, got {}",
                    name, value
                )));
            }
        }
        if self.printable_height() <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "margins ({} + {}) leave no printable height on a {} page",
                self.margin_top, self.margin_bottom, self.page_height
            )));
        }
        if self.start_page == 0 {
            return Err(Error::InvalidConfig("start_page must be at least 1".to_string()));
        }
        self.heights.validate()
    }
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self::a4()
    }
}

/// Estimated rendered height of each block kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockHeights {
    /// Chapter heading
    pub chapter: f32,
    /// Section heading
    pub section: f32,
    /// Sub-section heading
    pub subsection: f32,
    /// Sub-sub-section heading
    pub subsubsection: f32,
    /// Paragraph
    pub paragraph: f32,
    /// Keypoint callout
    pub keypoint: f32,
    /// Warning callout
    pub warning: f32,
    /// Definition
    pub definition: f32,
    /// Table header and frame
    pub table_base: f32,
    /// Added per data row
    pub table_row: f32,
    /// Image placeholder
    pub image: f32,
}

impl BlockHeights {
    /// Estimated height of a block.
    pub fn height_of(&self, block: &ContentBlock) -> f32 {
        match block {
            ContentBlock::Chapter { .. } => self.chapter,
            ContentBlock::Section { .. } => self.section,
            ContentBlock::SubSection { .. } => self.subsection,
            ContentBlock::SubSubSection { .. } => self.subsubsection,
            ContentBlock::Paragraph { .. } => self.paragraph,
            ContentBlock::Keypoint { .. } => self.keypoint,
            ContentBlock::Warning { .. } => self.warning,
            ContentBlock::Definition { .. } => self.definition,
            ContentBlock::Table(table) => self.table_base + self.table_row * table.row_count() as f32,
            ContentBlock::Image { .. } => self.image,
        }
    }

    fn validate(&self) -> Result<()> {
        let heights = [
            ("chapter", self.chapter),
            ("section", self.section),
            ("subsection", self.subsection),
            ("subsubsection", self.subsubsection),
            ("paragraph", self.paragraph),
            ("keypoint", self.keypoint),
            ("warning", self.warning),
            ("definition", self.definition),
            ("table_base", self.table_base),
            ("table_row", self.table_row),
            ("image", self.image),
        ];
        match heights
            .iter()
            .find(|(_, h)| !h.is_finite() || *h < 0.0)
        {
            Some((name, h)) => Err(Error::InvalidConfig(format!(
                "height of {} must be a finite non-negative length, got {}",
                name, h
            ))),
            None => Ok(()),
        }
    }
}

impl Default for BlockHeights {
    fn default() -> Self {
        Self {
            chapter: 120.0,
            section: 60.0,
            subsection: 50.0,
            subsubsection: 44.0,
            paragraph: 80.0,
            keypoint: 90.0,
            warning: 90.0,
            definition: 80.0,
            table_base: 60.0,
            table_row: 36.0,
            image: 260.0,
        }
    }
}
