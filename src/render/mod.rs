//! Rendering module for handing structured documents to presentation
//! collaborators.

mod json;
mod text;

pub use json::{from_json, to_json, JsonFormat};
pub use text::{to_outline, to_text};
