//! Line-stream structuring.
//!
//! The [`Structurer`] drives a single pass over trimmed lines, asking the
//! [`LineClassifier`] for a decision at each cursor position.

mod classifier;
mod engine;
mod normalize;
mod options;
pub mod patterns;
mod table_detector;

pub use classifier::{Classification, Emission, LineClassifier, ParseState, Rule};
pub use engine::Structurer;
pub use normalize::{normalize_text, prepare_lines};
pub use options::{HeaderKeywords, ImageKeywordCategory, StructureOptions, DEFAULT_PLACEHOLDER_TITLE};
pub use table_detector::{DetectedTable, TableDetector, TableDetectorConfig};
