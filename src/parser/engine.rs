//! Single-pass structuring engine.

use crate::fixture::{demo_document, is_fixture_input, strip_fixture_marker};
use crate::model::{ContentBlock, StructuredDocument, TocEntry};

use super::classifier::{Classification, LineClassifier, ParseState};
use super::normalize::prepare_lines;
use super::options::StructureOptions;

/// Turns a raw line stream into a [`StructuredDocument`].
///
/// The engine never fails: unrecognized lines become paragraphs and empty
/// input yields an empty document with the placeholder title.
#[derive(Debug, Clone, Default)]
pub struct Structurer {
    options: StructureOptions,
}

impl Structurer {
    /// Create a structurer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a structurer with custom options.
    pub fn with_options(options: StructureOptions) -> Self {
        Self { options }
    }

    /// Get the options.
    pub fn options(&self) -> &StructureOptions {
        &self.options
    }

    /// Structure the given text.
    pub fn structure(&self, text: &str) -> StructuredDocument {
        if is_fixture_input(text) {
            if self.options.fixtures_enabled {
                log::debug!("Structurer: fixture marker found, returning fixture document");
                return self.options.fixture.clone().unwrap_or_else(demo_document);
            }
            log::warn!("Structurer: fixture marker present but fixtures are disabled, dropping it");
            return self.structure_raw(&strip_fixture_marker(text));
        }
        self.structure_raw(text)
    }

    fn structure_raw(&self, text: &str) -> StructuredDocument {
        let mut doc = self.structure_lines(&prepare_lines(text, self.options.normalize_unicode));
        // Title keeps the source line as written, before NFC and U+FFFD cleanup
        if let Some(title) = raw_title(text) {
            doc.title = title.to_string();
        }
        doc
    }

    /// Structure already prepared (trimmed) lines.
    ///
    /// The title is the first non-empty prepared line.
    pub fn structure_lines<S: AsRef<str>>(&self, lines: &[S]) -> StructuredDocument {
        let title = lines
            .iter()
            .map(|line| line.as_ref())
            .find(|line| !line.is_empty())
            .unwrap_or(self.options.placeholder_title.as_str())
            .to_string();
        let mut doc = StructuredDocument::new(title);

        let classifier = LineClassifier::new(&self.options);
        let lines_per_page = self.options.lines_per_page.max(1);
        let mut state = ParseState::new();

        while state.scan_cursor < lines.len() {
            let cursor = state.scan_cursor;
            if lines[cursor].as_ref().is_empty() {
                state.scan_cursor += 1;
                continue;
            }

            let (classification, next) = classifier.classify(lines, cursor, state);
            if next.in_toc_region != state.in_toc_region {
                log::debug!(
                    "Structurer: {} TOC region at line {}",
                    if next.in_toc_region { "entering" } else { "leaving" },
                    cursor
                );
            }
            state = next;
            log::trace!("Structurer: line {} -> {}", cursor, classification.rule().name());

            let consumed = classification.consumed().max(1);
            let counted = lines[cursor..cursor + consumed]
                .iter()
                .filter(|line| !line.as_ref().is_empty())
                .count();

            match classification {
                Classification::Discard { .. } => {
                    state.count_lines(counted, lines_per_page);
                }
                Classification::Emit(emission) => {
                    if emission.block.is_chapter() && !doc.is_empty() {
                        state.start_new_page();
                    }
                    state.count_lines(counted, lines_per_page);

                    if let (Some(level), Some(text)) = (emission.toc_level, emission.block.text()) {
                        let page = Some(state.page_counter);
                        let entry = if level == TocEntry::CHAPTER {
                            TocEntry::chapter(text, page)
                        } else {
                            TocEntry::section(text, page)
                        };
                        if !doc.add_toc_entry(entry) {
                            log::debug!("Structurer: duplicate TOC entry at line {} skipped", cursor);
                        }
                    }

                    let suggestion = match &emission.block {
                        ContentBlock::Paragraph { .. } => {
                            let next_line = lines[cursor + consumed..]
                                .iter()
                                .map(|line| line.as_ref())
                                .find(|line| !line.is_empty());
                            classifier.suggest_image(lines[cursor].as_ref(), cursor, next_line)
                        }
                        _ => None,
                    };

                    doc.push_block(emission.block);
                    if let Some(image) = suggestion {
                        doc.push_block(image);
                    }
                }
            }

            state.scan_cursor = cursor + consumed;
        }

        let stats = doc.stats();
        log::debug!(
            "Structurer: {} blocks ({} chapters, {} headings, {} paragraphs, {} tables, {} images, {} suggested), {} TOC entries, ~{} coarse pages",
            stats.block_count(),
            stats.chapter_count,
            stats.heading_count,
            stats.paragraph_count,
            stats.table_count,
            stats.image_count,
            stats.auto_image_count,
            doc.toc.len(),
            state.page_counter
        );

        doc
    }
}

fn raw_title(text: &str) -> Option<&str> {
    text.trim_start_matches('\u{FEFF}')
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
}
