//! Content block types.

use serde::{Deserialize, Serialize};

use super::TableBlock;

/// One classified unit of a structured document.
///
/// The variant set is closed: every consumer matches exhaustively, so adding
/// a kind is a compile-time visible change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    /// Level 1 heading
    Chapter {
        /// Heading text
        text: String,
    },

    /// Level 2 heading
    Section {
        /// Heading text
        text: String,
    },

    /// Level 3 heading
    SubSection {
        /// Heading text
        text: String,
    },

    /// Level 4 heading
    SubSubSection {
        /// Heading text
        text: String,
    },

    /// Body text (the fallback kind)
    Paragraph {
        /// Paragraph text
        text: String,
    },

    /// Highlighted tip or key idea
    Keypoint {
        /// Callout text with its marker stripped
        text: String,
    },

    /// Highlighted caution
    Warning {
        /// Callout text with its marker stripped
        text: String,
    },

    /// A term and its explanation
    Definition {
        /// The defined term
        term: String,
        /// The explanation
        definition: String,
    },

    /// A table
    Table(TableBlock),

    /// An image placeholder or reference
    Image {
        /// Image identifier
        id: String,
        /// Caption / description
        description: String,
        /// Whether the image was suggested heuristically rather than marked
        auto: bool,
    },
}

impl ContentBlock {
    /// Create a chapter block.
    pub fn chapter(text: impl Into<String>) -> Self {
        ContentBlock::Chapter { text: text.into() }
    }

    /// Create a section block.
    pub fn section(text: impl Into<String>) -> Self {
        ContentBlock::Section { text: text.into() }
    }

    /// Create a paragraph block.
    pub fn paragraph(text: impl Into<String>) -> Self {
        ContentBlock::Paragraph { text: text.into() }
    }

    /// Short lowercase name of the block kind (matches the serialized tag).
    pub fn kind(&self) -> &'static str {
        match self {
            ContentBlock::Chapter { .. } => "chapter",
            ContentBlock::Section { .. } => "section",
            ContentBlock::SubSection { .. } => "subsection",
            ContentBlock::SubSubSection { .. } => "subsubsection",
            ContentBlock::Paragraph { .. } => "paragraph",
            ContentBlock::Keypoint { .. } => "keypoint",
            ContentBlock::Warning { .. } => "warning",
            ContentBlock::Definition { .. } => "definition",
            ContentBlock::Table(_) => "table",
            ContentBlock::Image { .. } => "image",
        }
    }

    /// The primary text of the block, if it has one.
    ///
    /// Definitions expose their term; tables and images have no text.
    pub fn text(&self) -> Option<&str> {
        match self {
            ContentBlock::Chapter { text }
            | ContentBlock::Section { text }
            | ContentBlock::SubSection { text }
            | ContentBlock::SubSubSection { text }
            | ContentBlock::Paragraph { text }
            | ContentBlock::Keypoint { text }
            | ContentBlock::Warning { text } => Some(text),
            ContentBlock::Definition { term, .. } => Some(term),
            ContentBlock::Table(_) | ContentBlock::Image { .. } => None,
        }
    }

    /// Heading level (1-4) for heading blocks.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            ContentBlock::Chapter { .. } => Some(1),
            ContentBlock::Section { .. } => Some(2),
            ContentBlock::SubSection { .. } => Some(3),
            ContentBlock::SubSubSection { .. } => Some(4),
            _ => None,
        }
    }

    /// Check if this block is a chapter.
    pub fn is_chapter(&self) -> bool {
        matches!(self, ContentBlock::Chapter { .. })
    }

    /// Check if this block is a paragraph.
    pub fn is_paragraph(&self) -> bool {
        matches!(self, ContentBlock::Paragraph { .. })
    }

    /// Check if this block is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, ContentBlock::Table(_))
    }

    /// Check if this block is a heuristically suggested image.
    pub fn is_auto_image(&self) -> bool {
        matches!(self, ContentBlock::Image { auto: true, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_text_and_level() {
        let chapter = ContentBlock::chapter("Chapter 1");
        assert_eq!(chapter.text(), Some("Chapter 1"));
        assert_eq!(chapter.heading_level(), Some(1));
        assert!(chapter.is_chapter());

        let def = ContentBlock::Definition {
            term: "ODT".to_string(),
            definition: "Occlusive dressing".to_string(),
        };
        assert_eq!(def.text(), Some("ODT"));
        assert_eq!(def.heading_level(), None);
    }

    #[test]
    fn test_block_serialization_tag() {
        let json = serde_json::to_string(&ContentBlock::paragraph("Hello")).unwrap();
        assert_eq!(json, r#"{"type":"paragraph","text":"Hello"}"#);

        let json = serde_json::to_string(&ContentBlock::SubSubSection {
            text: "1.1.1 Deep".to_string(),
        })
        .unwrap();
        assert!(json.contains(r#""type":"subsubsection""#));
    }

    #[test]
    fn test_image_flags() {
        let img = ContentBlock::Image {
            id: "img_1".to_string(),
            description: String::new(),
            auto: true,
        };
        assert!(img.is_auto_image());
        assert_eq!(img.kind(), "image");
        assert_eq!(img.text(), None);
    }
}
