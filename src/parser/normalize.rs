//! Line preparation and block text normalization.

use unicode_normalization::UnicodeNormalization;

use super::patterns::{BOLD_STARS, BOLD_UNDERSCORES, DECORATION};

/// Split raw text into trimmed lines.
///
/// Handles `\n` and `\r\n` endings, drops a leading byte-order mark and the
/// Unicode replacement character, and applies NFC when requested. Blank lines
/// are kept as empty strings so line indices stay stable.
pub fn prepare_lines(text: &str, normalize_unicode: bool) -> Vec<String> {
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
    text.lines()
        .map(|line| {
            let line = line.trim().replace('\u{FFFD}', "");
            if normalize_unicode {
                line.nfc().collect()
            } else {
                line
            }
        })
        .collect()
}

/// Normalize the text of a classified block.
///
/// Strips leading heading decoration (`#`, `■`, `◆`, ...), collapses paired
/// bold emphasis and squeezes runs of whitespace.
pub fn normalize_text(text: &str) -> String {
    let stripped = DECORATION.replace(text.trim(), "");
    let unbolded = BOLD_STARS.replace_all(&stripped, "$1");
    let unbolded = BOLD_UNDERSCORES.replace_all(&unbolded, "$1");
    squeeze_whitespace(&unbolded)
}

/// Collapse runs of spaces into a single space, keeping tabs out of the
/// result.
fn squeeze_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
