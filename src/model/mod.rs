//! Document model types for structured courseware.
//!
//! This module defines the output contract shared by every downstream
//! consumer (preview, print, document export). Consumers read this model;
//! they never re-derive structure from raw text.

mod block;
mod document;
mod stats;
mod table;

pub use block::ContentBlock;
pub use document::{PageNumber, StructuredDocument, TocEntry};
pub use stats::ContentStats;
pub use table::TableBlock;
