//! Print page estimation.
//!
//! The estimator is a best-effort navigation hint, not a typesetter: it
//! replaces the coarse line-count pages stamped during structuring with a
//! height-based simulation and synchronizes the table of contents.

mod estimator;
mod options;

pub use estimator::PaginationEstimator;
pub use options::{BlockHeights, PaginationOptions};
