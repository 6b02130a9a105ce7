//! Structuring options and keyword vocabularies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::StructuredDocument;

/// Title used when the input has no non-blank line.
pub const DEFAULT_PLACEHOLDER_TITLE: &str = "未命名教材";

/// Options for structuring a line stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureOptions {
    /// Lines per page used by the coarse page counter
    pub lines_per_page: u32,

    /// A line shorter than this (in characters) that follows a blank line
    /// is treated as a section heading
    pub short_line_max_chars: usize,

    /// Vocabulary used to recognize table header rows
    pub header_keywords: HeaderKeywords,

    /// Keyword categories that trigger auto-image suggestions
    pub image_categories: Vec<ImageKeywordCategory>,

    /// Whether to insert auto-image suggestions after paragraphs
    pub auto_images: bool,

    /// Normalize input lines to Unicode NFC before classification
    pub normalize_unicode: bool,

    /// Title used for blank input
    pub placeholder_title: String,

    /// Millisecond timestamp embedded in synthesized image ids.
    /// Defaults to 0 so identical input yields identical ids; pass
    /// `Utc::now()` to [`StructureOptions::with_image_timestamp`] for
    /// wall-clock ids.
    pub image_id_timestamp: i64,

    /// Whether the reserved fixture marker is honored
    pub fixtures_enabled: bool,

    /// Document returned for fixture input (built-in demo when `None`)
    pub fixture: Option<StructuredDocument>,
}

impl StructureOptions {
    /// Create new structure options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from JSON; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the coarse lines-per-page estimate.
    pub fn with_lines_per_page(mut self, lines: u32) -> Self {
        self.lines_per_page = lines.max(1);
        self
    }

    /// Set the short-line heading threshold.
    pub fn with_short_line_max_chars(mut self, chars: usize) -> Self {
        self.short_line_max_chars = chars;
        self
    }

    /// Replace the header keyword vocabulary.
    pub fn with_header_keywords(mut self, keywords: HeaderKeywords) -> Self {
        self.header_keywords = keywords;
        self
    }

    /// Replace the auto-image keyword categories.
    pub fn with_image_categories(mut self, categories: Vec<ImageKeywordCategory>) -> Self {
        self.image_categories = categories;
        self
    }

    /// Enable or disable auto-image suggestions.
    pub fn with_auto_images(mut self, enabled: bool) -> Self {
        self.auto_images = enabled;
        self
    }

    /// Enable or disable NFC normalization of input lines.
    pub fn with_unicode_normalization(mut self, enabled: bool) -> Self {
        self.normalize_unicode = enabled;
        self
    }

    /// Set the placeholder title for blank input.
    pub fn with_placeholder_title(mut self, title: impl Into<String>) -> Self {
        self.placeholder_title = title.into();
        self
    }

    /// Pin the timestamp used in synthesized image ids.
    pub fn with_image_timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.image_id_timestamp = at.timestamp_millis();
        self
    }

    /// Enable or disable the fixture marker.
    pub fn with_fixtures(mut self, enabled: bool) -> Self {
        self.fixtures_enabled = enabled;
        self
    }

    /// Set the document returned for fixture input.
    pub fn with_fixture(mut self, fixture: StructuredDocument) -> Self {
        self.fixture = Some(fixture);
        self
    }
}

impl Default for StructureOptions {
    fn default() -> Self {
        Self {
            lines_per_page: 30,
            short_line_max_chars: 20,
            header_keywords: HeaderKeywords::default(),
            image_categories: ImageKeywordCategory::defaults(),
            auto_images: true,
            normalize_unicode: true,
            placeholder_title: DEFAULT_PLACEHOLDER_TITLE.to_string(),
            image_id_timestamp: 0,
            fixtures_enabled: true,
            fixture: None,
        }
    }
}

/// Vocabulary used to decide whether a table's first row is a header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderKeywords {
    /// Keywords compared case-insensitively against whole cells
    pub keywords: Vec<String>,

    /// Maximum length (in characters) of a "short" header cell
    pub max_cell_chars: usize,
}

impl HeaderKeywords {
    /// Create a vocabulary from keywords.
    pub fn new<S: Into<String>>(keywords: impl IntoIterator<Item = S>) -> Self {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Check if a cell is one of the header keywords.
    pub fn matches(&self, cell: &str) -> bool {
        let cell = cell.trim().trim_end_matches([':', '：']).to_lowercase();
        !cell.is_empty() && self.keywords.iter().any(|k| k.to_lowercase() == cell)
    }
}

impl Default for HeaderKeywords {
    fn default() -> Self {
        let keywords = [
            "name", "item", "type", "category", "description", "value", "price", "amount",
            "quantity", "date", "time", "step", "no", "no.", "id", "notes", "項目", "名稱",
            "類別", "種類", "說明", "內容", "數量", "價格", "金額", "日期", "時間", "步驟",
            "編號", "序號", "備註", "工具", "用途",
        ];
        Self {
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            max_cell_chars: 20,
        }
    }
}

/// A category of keywords that suggests an illustration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageKeywordCategory {
    /// Category identifier (e.g. "procedural")
    pub name: String,

    /// Caption prefix for suggested images
    pub label: String,

    /// Keywords searched for in paragraph text (case-insensitive)
    pub keywords: Vec<String>,
}

impl ImageKeywordCategory {
    /// Create a category.
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        label: impl Into<String>,
        keywords: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if the text mentions any keyword of this category.
    pub fn matches(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.keywords
            .iter()
            .any(|k| !k.is_empty() && lower.contains(&k.to_lowercase()))
    }

    /// The built-in categories: structural, procedural, diagrammatic,
    /// comparative, exemplary.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new(
                "structural",
                "結構圖",
                ["結構", "構造", "組成", "架構", "解剖", "structure", "anatomy", "layer"],
            ),
            Self::new(
                "procedural",
                "流程圖",
                ["步驟", "流程", "操作程序", "程序", "step-by-step", "procedure", "workflow"],
            ),
            Self::new(
                "diagrammatic",
                "示意圖",
                ["示意", "圖解", "圖示", "diagram", "illustration", "schematic"],
            ),
            Self::new(
                "comparative",
                "比較圖",
                ["比較", "對比", "差異", "前後", "comparison", "compared", "versus"],
            ),
            Self::new(
                "exemplary",
                "範例圖",
                ["範例", "案例", "實例", "for example", "case study"],
            ),
        ]
    }
}
