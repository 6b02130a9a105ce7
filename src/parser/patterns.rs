//! Fixed lexical patterns of the input annotation vocabulary.
//!
//! Structural conventions (numbering schemes, bracketed enrichment tokens,
//! table separators) are compiled once. Keyword vocabularies that need
//! localization live in [`super::StructureOptions`] instead.

use once_cell::sync::Lazy;
use regex::Regex;

/// "Table of Contents" header line.
pub static TOC_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[#＃]*\s*(?:目錄|目录|目次|table\s+of\s+contents|contents)\s*[:：]?$").unwrap()
});

/// A rendered TOC entry: title, dotted leader, page number.
pub static TOC_LEADER_ENTRY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\.{3,}|…+|·{3,}|-{3,}|_{3,})\s*\d+\s*$").unwrap());

/// Chapter numbering conventions.
pub static CHAPTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:第\s*[0-9０-９一二三四五六七八九十百零〇]+\s*[章篇部]|chapter\s+(?:\d+|[ivxlc]+)\b|part\s+(?:\d+|[ivxlc]+)\b)",
    )
    .unwrap()
});

/// Explicit top-level heading marker (`# `).
pub static EXPLICIT_H1: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[#＃][ \t　]+").unwrap());

/// Explicit second-level heading marker (`## `).
pub static EXPLICIT_H2: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[#＃]{2}[ \t　]+").unwrap());

/// Explicit third-level heading marker (`### `).
pub static EXPLICIT_H3: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[#＃]{3}[ \t　]+").unwrap());

/// Explicit fourth-level heading marker (`#### `).
pub static EXPLICIT_H4: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[#＃]{4}[ \t　]+").unwrap());

/// "1.1.1" style numbering.
pub static THREE_LEVEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\d+\.\d+(?:[^\d]|$)").unwrap());

/// "1.1" or "1-1" style numbering.
pub static TWO_LEVEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+[.\-]\d+(?:[^\d.\-/:]|$)").unwrap());

/// Parenthesised or enumerated list-item markers.
pub static ENUMERATED_ITEM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:[(（]\s*(?:\d{1,3}|[a-zA-Z]|[一二三四五六七八九十]+)\s*[)）]|(?:\d{1,3}|[a-zA-Z])[)）]|[①-⑳❶-❿⑴-⒇])",
    )
    .unwrap()
});

/// One-level section markers.
pub static SECTION_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:第\s*[0-9０-９一二三四五六七八九十百零〇]+\s*[節节項项條条]|\d{1,3}[.．](?:[^\d]|$)|\d{1,3}、|[A-Z][.．](?:\s|$)|[一二三四五六七八九十]+、|[■◆●▶►◇□★][ \t　]*\S)",
    )
    .unwrap()
});

/// Keypoint markers (bare keyword with colon, or bracketed enrichment token).
pub static KEYPOINT_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:\[(?:(?:建議|建议|suggestion)\s*[:：]\s*)?(?:重點提示|重点提示|重點|重点|提示|要點|要点|keypoint|key\s*point|tip|note)\]|(?:重點|重点|提示|注意|要點|要点|keypoint|key\s*point|note|tip)\s*[:：])\s*",
    )
    .unwrap()
});

/// Warning markers (bare keyword with colon, or bracketed enrichment token).
pub static WARNING_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:\[(?:(?:建議|建议|suggestion)\s*[:：]\s*)?(?:警示|警告|注意事項|注意事项|warning|caution)\]|(?:警示|警告|注意事項|注意事项|warning|caution)\s*[:：])\s*",
    )
    .unwrap()
});

/// Bracketed definition token carrying the term: `[建議：定義：TERM] DEFINITION`.
pub static DEFINITION_BRACKET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^\[(?:(?:建議|建议|suggestion)\s*[:：]\s*)?(?:定義|定义|名詞解釋|名词解释|術語|术语|definition|term)\s*[:：]\s*([^\]]+)\]\s*(.*)$",
    )
    .unwrap()
});

/// Bare definition keyword: `定義：TERM：DEFINITION`.
pub static DEFINITION_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:定義|定义|名詞解釋|名词解释|術語|术语|definition|term)\s*[:：]\s*(.*)$",
    )
    .unwrap()
});

/// Colon-like separator.
pub static COLON: Lazy<Regex> = Lazy::new(|| Regex::new(r"[:：]").unwrap());

/// Pipe table separator row (`|---|:---:|`, `=====`).
pub static PIPE_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\s|:\-=]+$").unwrap());

/// Bracketed image token; capture 1 is the payload after the keyword.
pub static IMAGE_BRACKET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\[(?:(?:建議|建议|suggestion)\s*[:：]\s*)?(?:插入圖片|插入图片|圖片|图片|image|img)\s*[:：]?\s*([^\]]*)\]",
    )
    .unwrap()
});

/// Markdown image; capture 1 is the alt text, capture 2 the source.
pub static IMAGE_MARKDOWN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]*)\)").unwrap());

/// Identifier of an image extracted from the source document.
pub static EXTRACTED_IMAGE_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^img_[A-Za-z0-9_\-]+$").unwrap());

/// Plain bullet list markers.
pub static LIST_BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[-*+•·‧▪◦][ \t　]+|\d{1,3}[)）])").unwrap());

/// Leading heading-decoration symbols.
pub static DECORATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[#＃■□◆◇●○★☆▶►▸※◎]+[ \t　]*").unwrap());

/// Paired bold emphasis (`**x**`).
pub static BOLD_STARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());

/// Paired bold emphasis (`__x__`).
pub static BOLD_UNDERSCORES: Lazy<Regex> = Lazy::new(|| Regex::new(r"__(.+?)__").unwrap());

/// Characters that end a sentence or clause.
pub const SENTENCE_PUNCTUATION: &[char] = &[
    '。', '.', '!', '?', '！', '？', ';', '；', ',', '，', '、', ':', '：', '…',
];

/// Check if the text ends in sentence punctuation.
pub fn ends_with_sentence_punctuation(text: &str) -> bool {
    text.trim_end()
        .chars()
        .last()
        .is_some_and(|c| SENTENCE_PUNCTUATION.contains(&c))
}

/// Check if the text contains sentence punctuation anywhere.
pub fn contains_sentence_punctuation(text: &str) -> bool {
    text.chars().any(|c| SENTENCE_PUNCTUATION.contains(&c))
}

/// Check if a line is a table-of-contents header.
pub fn is_toc_header(line: &str) -> bool {
    TOC_HEADER.is_match(line)
}

/// Check if a line is a rendered TOC entry with a dotted leader.
pub fn is_toc_leader_entry(line: &str) -> bool {
    TOC_LEADER_ENTRY.is_match(line)
}

/// Check if a line is a chapter heading.
pub fn is_chapter(line: &str) -> bool {
    CHAPTER.is_match(line) || EXPLICIT_H1.is_match(line)
}

/// Check if a line carries an explicit image marker.
pub fn is_image_marker(line: &str) -> bool {
    IMAGE_BRACKET.is_match(line) || IMAGE_MARKDOWN.is_match(line)
}

/// Check if a line is a pipe-table separator row.
pub fn is_pipe_separator(line: &str) -> bool {
    PIPE_SEPARATOR.is_match(line) && line.chars().filter(|c| *c == '-' || *c == '=').count() >= 3
}
