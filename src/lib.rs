//! # coursekit
//!
//! Heuristic document structuring and page estimation for courseware.
//!
//! This library turns an unstructured line stream (text extracted from
//! source documents, optionally annotated by an enrichment step) into a
//! typed content model with chapters, sections, callouts, definitions,
//! tables and images, then estimates print pages and synchronizes them
//! into a table of contents.
//!
//! ## Quick Start
//!
//! ```
//! use coursekit::{paginate, structure_text, ContentBlock, PaginationOptions};
//!
//! let doc = structure_text("Skin Care\nChapter 1 Basics\nThe skin protects the body.");
//! let doc = paginate(doc, &PaginationOptions::default());
//!
//! assert_eq!(doc.title, "Skin Care");
//! assert!(doc.content.contains(&ContentBlock::chapter("Chapter 1 Basics")));
//! assert_eq!(doc.toc[0].page(), Some(2));
//! ```
//!
//! ## Features
//!
//! - **Ordered classification**: fourteen precedence-ordered rules, each
//!   independently testable
//! - **Multi-line aggregation**: tab-delimited and pipe tables
//! - **TOC suppression**: rendered tables of contents in the input are skipped
//! - **Page estimation**: deterministic page-filling simulation with forced
//!   chapter breaks
//! - **Injectable vocabularies**: header keywords and image categories load
//!   from JSON for localization
//! - **Parallel batches**: uses Rayon for independent documents

pub mod error;
pub mod fixture;
pub mod model;
pub mod paginate;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{ContentBlock, ContentStats, PageNumber, StructuredDocument, TableBlock, TocEntry};
pub use paginate::{BlockHeights, PaginationEstimator, PaginationOptions};
pub use parser::{
    HeaderKeywords, ImageKeywordCategory, LineClassifier, ParseState, Rule, StructureOptions,
    Structurer,
};
pub use render::JsonFormat;

use std::path::Path;

use rayon::prelude::*;

/// Structure text with default options.
///
/// # Example
///
/// ```
/// use coursekit::structure_text;
///
/// let doc = structure_text("Course\n1. Setup\nWash your hands.");
/// assert_eq!(doc.toc.len(), 1);
/// ```
pub fn structure_text(text: &str) -> StructuredDocument {
    Structurer::new().structure(text)
}

/// Structure text with custom options.
///
/// # Example
///
/// ```
/// use coursekit::{structure_text_with_options, StructureOptions};
///
/// let options = StructureOptions::new()
///     .with_auto_images(false)
///     .with_lines_per_page(40);
/// let doc = structure_text_with_options("Course\nBody text.", options);
/// assert_eq!(doc.block_count(), 2);
/// ```
pub fn structure_text_with_options(text: &str, options: StructureOptions) -> StructuredDocument {
    Structurer::with_options(options).structure(text)
}

/// Read a UTF-8 text file and structure it.
///
/// # Example
///
/// ```no_run
/// use coursekit::structure_file;
///
/// let doc = structure_file("lesson.txt").unwrap();
/// println!("Blocks: {}", doc.block_count());
/// ```
pub fn structure_file<P: AsRef<Path>>(path: P) -> Result<StructuredDocument> {
    let data = std::fs::read(path)?;
    structure_bytes(&data)
}

/// Structure UTF-8 encoded bytes.
pub fn structure_bytes(data: &[u8]) -> Result<StructuredDocument> {
    let text = std::str::from_utf8(data).map_err(|e| Error::Encoding(e.to_string()))?;
    Ok(structure_text(text))
}

/// Structure many independent texts in parallel.
///
/// Results are returned in input order.
pub fn structure_batch<S: AsRef<str> + Sync>(
    texts: &[S],
    options: &StructureOptions,
) -> Vec<StructuredDocument> {
    let structurer = Structurer::with_options(options.clone());
    texts
        .par_iter()
        .map(|text| structurer.structure(text.as_ref()))
        .collect()
}

/// Estimate print pages and reconcile the table of contents.
///
/// Geometry that leaves no printable height is clamped rather than
/// rejected; use [`PaginationOptions::validate`] to check options up front.
pub fn paginate(doc: StructuredDocument, options: &PaginationOptions) -> StructuredDocument {
    PaginationEstimator::with_options(options.clone()).paginate(doc)
}

/// Structure and paginate text with default options and render JSON.
///
/// # Example
///
/// ```
/// use coursekit::{to_json, JsonFormat};
///
/// let json = to_json("Course\nChapter 1 Basics", JsonFormat::Compact).unwrap();
/// assert!(json.contains(r#""type":"chapter""#));
/// ```
pub fn to_json(text: &str, format: JsonFormat) -> Result<String> {
    let doc = paginate(structure_text(text), &PaginationOptions::default());
    render::to_json(&doc, format)
}

/// Builder for structuring and paginating courseware text.
///
/// # Example
///
/// ```
/// use coursekit::{Coursekit, JsonFormat};
///
/// let json = Coursekit::new()
///     .with_auto_images(false)
///     .with_start_page(3)
///     .process("Course\nChapter 1 Basics\nBody.")?
///     .to_json(JsonFormat::Pretty)?;
/// assert!(json.contains("\"pageNumber\": 4"));
/// # Ok::<(), coursekit::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Coursekit {
    structure_options: StructureOptions,
    pagination_options: PaginationOptions,
    paginate: bool,
}

impl Coursekit {
    /// Create a new Coursekit builder.
    pub fn new() -> Self {
        Self {
            structure_options: StructureOptions::default(),
            pagination_options: PaginationOptions::default(),
            paginate: true,
        }
    }

    /// Replace the structuring options.
    pub fn with_structure_options(mut self, options: StructureOptions) -> Self {
        self.structure_options = options;
        self
    }

    /// Replace the pagination options.
    pub fn with_pagination_options(mut self, options: PaginationOptions) -> Self {
        self.pagination_options = options;
        self
    }

    /// Set the coarse lines-per-page estimate.
    pub fn with_lines_per_page(mut self, lines: u32) -> Self {
        self.structure_options = self.structure_options.with_lines_per_page(lines);
        self
    }

    /// Enable or disable auto-image suggestions.
    pub fn with_auto_images(mut self, enabled: bool) -> Self {
        self.structure_options = self.structure_options.with_auto_images(enabled);
        self
    }

    /// Replace the header keyword vocabulary.
    pub fn with_header_keywords(mut self, keywords: HeaderKeywords) -> Self {
        self.structure_options = self.structure_options.with_header_keywords(keywords);
        self
    }

    /// Replace the auto-image keyword categories.
    pub fn with_image_categories(mut self, categories: Vec<ImageKeywordCategory>) -> Self {
        self.structure_options = self.structure_options.with_image_categories(categories);
        self
    }

    /// Set the placeholder title for blank input.
    pub fn with_placeholder_title(mut self, title: impl Into<String>) -> Self {
        self.structure_options = self.structure_options.with_placeholder_title(title);
        self
    }

    /// Pin the timestamp used in synthesized image ids.
    pub fn with_image_timestamp(mut self, at: chrono::DateTime<chrono::Utc>) -> Self {
        self.structure_options = self.structure_options.with_image_timestamp(at);
        self
    }

    /// Set the number of the first content page.
    pub fn with_start_page(mut self, page: u32) -> Self {
        self.pagination_options = self.pagination_options.with_start_page(page);
        self
    }

    /// Set the block height table.
    pub fn with_block_heights(mut self, heights: BlockHeights) -> Self {
        self.pagination_options = self.pagination_options.with_heights(heights);
        self
    }

    /// Skip page estimation; TOC entries keep their coarse pages.
    pub fn without_pagination(mut self) -> Self {
        self.paginate = false;
        self
    }

    /// Structure (and paginate) text.
    pub fn process(self, text: &str) -> Result<CoursekitResult> {
        if self.paginate {
            self.pagination_options.validate()?;
        }
        let document = Structurer::with_options(self.structure_options).structure(text);
        let document = if self.paginate {
            PaginationEstimator::with_options(self.pagination_options).paginate(document)
        } else {
            document
        };
        Ok(CoursekitResult { document })
    }

    /// Structure (and paginate) UTF-8 encoded bytes.
    pub fn process_bytes(self, data: &[u8]) -> Result<CoursekitResult> {
        let text = std::str::from_utf8(data).map_err(|e| Error::Encoding(e.to_string()))?;
        self.process(text)
    }

    /// Structure (and paginate) a UTF-8 text file.
    pub fn process_file<P: AsRef<Path>>(self, path: P) -> Result<CoursekitResult> {
        let text = String::from_utf8(std::fs::read(path)?)?;
        self.process(&text)
    }
}

impl Default for Coursekit {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of processing courseware text.
#[derive(Debug, Clone)]
pub struct CoursekitResult {
    /// The structured document
    pub document: StructuredDocument,
}

impl CoursekitResult {
    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> String {
        render::to_text(&self.document)
    }

    /// Render the table of contents as an outline.
    pub fn to_outline(&self) -> String {
        render::to_outline(&self.document)
    }

    /// Per-kind block counts.
    pub fn stats(&self) -> ContentStats {
        self.document.stats()
    }

    /// Get the document.
    pub fn document(&self) -> &StructuredDocument {
        &self.document
    }

    /// Take the document.
    pub fn into_document(self) -> StructuredDocument {
        self.document
    }
}
