//! Line classification by ordered rule precedence.
//!
//! Each line is tested against [`Rule::PRECEDENCE`] in order and the first
//! rule that claims it wins. Only the two table-of-contents rules consult
//! or change [`ParseState`]; every other rule is a pure function of the
//! lines at and after the cursor.

use crate::model::ContentBlock;

use super::normalize::normalize_text;
use super::options::StructureOptions;
use super::patterns::{
    ends_with_sentence_punctuation, is_chapter, is_image_marker,
    is_toc_header, is_toc_leader_entry, COLON, DEFINITION_BRACKET, DEFINITION_MARKER,
    ENUMERATED_ITEM, EXPLICIT_H2, EXPLICIT_H3, EXPLICIT_H4, EXTRACTED_IMAGE_ID, IMAGE_BRACKET,
    IMAGE_MARKDOWN, KEYPOINT_MARKER, LIST_BULLET, SECTION_MARKER, THREE_LEVEL, TWO_LEVEL,
    WARNING_MARKER,
};
use super::table_detector::{DetectedTable, TableDetector, TableDetectorConfig};

/// Maximum characters of paragraph text quoted in a suggested image caption.
const SNIPPET_CHARS: usize = 40;

/// A classification rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// "Table of Contents" header; enters the TOC region
    TocHeader,
    /// Any line inside the TOC region before the first chapter
    TocRegion,
    /// Chapter heading
    Chapter,
    /// "1.1.1" numbering or `#### `
    SubSubSection,
    /// "1.1" / "1-1" numbering or `### `
    SubSection,
    /// Parenthesised and circled list items
    EnumeratedItem,
    /// Section markers or the short-line heuristic
    Section,
    /// Tab-delimited table run
    TabTable,
    /// Keypoint or warning callout
    Callout,
    /// Term and explanation
    Definition,
    /// Pipe table with separator row
    PipeTable,
    /// Image marker anywhere in the line
    Image,
    /// Bullet list item
    ListItem,
    /// Fallback
    Paragraph,
}

impl Rule {
    /// All rules, highest precedence first.
    pub const PRECEDENCE: [Rule; 14] = [
        Rule::TocHeader,
        Rule::TocRegion,
        Rule::Chapter,
        Rule::SubSubSection,
        Rule::SubSection,
        Rule::EnumeratedItem,
        Rule::Section,
        Rule::TabTable,
        Rule::Callout,
        Rule::Definition,
        Rule::PipeTable,
        Rule::Image,
        Rule::ListItem,
        Rule::Paragraph,
    ];

    /// Rules that only look at the line stream.
    pub fn content_rules() -> &'static [Rule] {
        &Self::PRECEDENCE[2..]
    }

    /// Position of the rule in the precedence order (0 is highest).
    pub fn rank(&self) -> usize {
        Self::PRECEDENCE
            .iter()
            .position(|r| r == self)
            .unwrap_or(Self::PRECEDENCE.len())
    }

    /// Short lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Rule::TocHeader => "toc-header",
            Rule::TocRegion => "toc-region",
            Rule::Chapter => "chapter",
            Rule::SubSubSection => "subsubsection",
            Rule::SubSection => "subsection",
            Rule::EnumeratedItem => "enumerated-item",
            Rule::Section => "section",
            Rule::TabTable => "tab-table",
            Rule::Callout => "callout",
            Rule::Definition => "definition",
            Rule::PipeTable => "pipe-table",
            Rule::Image => "image",
            Rule::ListItem => "list-item",
            Rule::Paragraph => "paragraph",
        }
    }
}

/// Scan state threaded through classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseState {
    /// Whether the scan is inside a table-of-contents region
    pub in_toc_region: bool,
    /// Coarse page counter (1-indexed)
    pub page_counter: u32,
    /// Lines counted on the current coarse page
    pub lines_on_current_page: u32,
    /// Index of the next line to classify
    pub scan_cursor: usize,
}

impl ParseState {
    /// Create the initial state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count `n` consumed lines against the coarse page estimate.
    pub fn count_lines(&mut self, n: usize, lines_per_page: u32) {
        for _ in 0..n {
            self.lines_on_current_page += 1;
            if self.lines_on_current_page > lines_per_page {
                self.page_counter += 1;
                self.lines_on_current_page = 0;
            }
        }
    }

    /// Move the coarse counter to a fresh page.
    pub fn start_new_page(&mut self) {
        self.page_counter += 1;
        self.lines_on_current_page = 0;
    }
}

impl Default for ParseState {
    fn default() -> Self {
        Self {
            in_toc_region: false,
            page_counter: 1,
            lines_on_current_page: 0,
            scan_cursor: 0,
        }
    }
}

/// A block produced by a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emission {
    /// The rule that claimed the line
    pub rule: Rule,
    /// The produced block
    pub block: ContentBlock,
    /// TOC level to record for this block, if any
    pub toc_level: Option<u8>,
    /// Number of input lines consumed (at least 1)
    pub consumed: usize,
}

impl Emission {
    fn single(rule: Rule, block: ContentBlock) -> Self {
        Self {
            rule,
            block,
            toc_level: None,
            consumed: 1,
        }
    }

    fn with_toc(mut self, level: u8) -> Self {
        self.toc_level = Some(level);
        self
    }

    fn table(rule: Rule, detected: DetectedTable) -> Self {
        Self {
            rule,
            block: ContentBlock::Table(detected.table),
            toc_level: None,
            consumed: detected.consumed,
        }
    }
}

/// Outcome of classifying the line at a cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The line is consumed without producing a block
    Discard {
        /// The rule that discarded the line
        rule: Rule,
    },
    /// One or more lines produce a block
    Emit(Emission),
}

impl Classification {
    /// The rule that decided this classification.
    pub fn rule(&self) -> Rule {
        match self {
            Classification::Discard { rule } => *rule,
            Classification::Emit(emission) => emission.rule,
        }
    }

    /// Number of lines consumed.
    pub fn consumed(&self) -> usize {
        match self {
            Classification::Discard { .. } => 1,
            Classification::Emit(emission) => emission.consumed,
        }
    }
}

/// Classifies lines according to the rule precedence.
pub struct LineClassifier<'a> {
    options: &'a StructureOptions,
    tables: TableDetector,
}

impl<'a> LineClassifier<'a> {
    /// Create a classifier for the given options.
    pub fn new(options: &'a StructureOptions) -> Self {
        let tables = TableDetector::with_config(TableDetectorConfig {
            header_keywords: options.header_keywords.clone(),
            ..Default::default()
        });
        Self { options, tables }
    }

    /// Classify the non-blank line at `cursor`.
    ///
    /// Returns the classification and the updated state. `cursor` must be a
    /// valid index into `lines`.
    pub fn classify<S: AsRef<str>>(
        &self,
        lines: &[S],
        cursor: usize,
        state: ParseState,
    ) -> (Classification, ParseState) {
        let mut state = state;
        let line = lines[cursor].as_ref();

        if is_toc_header(line) {
            state.in_toc_region = true;
            return (Classification::Discard { rule: Rule::TocHeader }, state);
        }

        if state.in_toc_region {
            if is_chapter(line) && !is_toc_leader_entry(line) {
                state.in_toc_region = false;
            } else {
                return (Classification::Discard { rule: Rule::TocRegion }, state);
            }
        }

        for rule in Rule::content_rules() {
            if let Some(emission) = self.apply(*rule, lines, cursor) {
                return (Classification::Emit(emission), state);
            }
        }

        (Classification::Emit(self.paragraph(line)), state)
    }

    /// Every content rule that would claim the line at `cursor`, in
    /// precedence order, ignoring the TOC state.
    pub fn matching_rules<S: AsRef<str>>(&self, lines: &[S], cursor: usize) -> Vec<Rule> {
        let mut matched = Vec::new();
        if is_toc_header(lines[cursor].as_ref()) {
            matched.push(Rule::TocHeader);
        }
        matched.extend(
            Rule::content_rules()
                .iter()
                .copied()
                .filter(|rule| self.apply(*rule, lines, cursor).is_some()),
        );
        matched
    }

    /// Suggest an illustration for a paragraph.
    ///
    /// Returns `None` when suggestions are disabled, when `next_line` already
    /// carries an explicit image marker, or when no keyword category matches.
    pub fn suggest_image(
        &self,
        text: &str,
        cursor: usize,
        next_line: Option<&str>,
    ) -> Option<ContentBlock> {
        if !self.options.auto_images || next_line.is_some_and(is_image_marker) {
            return None;
        }
        let category = self
            .options
            .image_categories
            .iter()
            .find(|category| category.matches(text))?;

        log::debug!(
            "LineClassifier: suggesting {} image at line {}",
            category.name,
            cursor
        );

        Some(ContentBlock::Image {
            id: format!("img_auto_{}_{}", self.options.image_id_timestamp, cursor),
            description: format!("{}: {}", category.label, snippet(text)),
            auto: true,
        })
    }

    fn apply<S: AsRef<str>>(&self, rule: Rule, lines: &[S], cursor: usize) -> Option<Emission> {
        let line = lines[cursor].as_ref();
        match rule {
            Rule::TocHeader | Rule::TocRegion => None,
            Rule::Chapter => self.try_chapter(line),
            Rule::SubSubSection => self.try_sub_sub_section(line),
            Rule::SubSection => self.try_sub_section(line),
            Rule::EnumeratedItem => ENUMERATED_ITEM
                .is_match(line)
                .then(|| Emission::single(rule, ContentBlock::paragraph(normalize_text(line)))),
            Rule::Section => self.try_section(lines, cursor),
            Rule::TabTable => self
                .tables
                .detect_tab_table(lines, cursor)
                .map(|detected| Emission::table(rule, detected)),
            Rule::Callout => self.try_callout(line),
            Rule::Definition => self.try_definition(line),
            Rule::PipeTable => self
                .tables
                .detect_pipe_table(lines, cursor)
                .map(|detected| Emission::table(rule, detected)),
            Rule::Image => self.try_image(line, cursor),
            Rule::ListItem => LIST_BULLET
                .is_match(line)
                .then(|| Emission::single(rule, ContentBlock::paragraph(normalize_text(line)))),
            Rule::Paragraph => Some(self.paragraph(line)),
        }
    }

    fn try_chapter(&self, line: &str) -> Option<Emission> {
        if !is_chapter(line) {
            return None;
        }
        let text = non_empty(normalize_text(line))?;
        Some(Emission::single(Rule::Chapter, ContentBlock::chapter(text)).with_toc(1))
    }

    fn try_sub_sub_section(&self, line: &str) -> Option<Emission> {
        if !(THREE_LEVEL.is_match(line) || EXPLICIT_H4.is_match(line)) {
            return None;
        }
        let text = non_empty(normalize_text(line))?;
        Some(Emission::single(
            Rule::SubSubSection,
            ContentBlock::SubSubSection { text },
        ))
    }

    fn try_sub_section(&self, line: &str) -> Option<Emission> {
        if !(TWO_LEVEL.is_match(line) || EXPLICIT_H3.is_match(line)) {
            return None;
        }
        let text = non_empty(normalize_text(line))?;
        Some(Emission::single(Rule::SubSection, ContentBlock::SubSection { text }))
    }

    fn try_section<S: AsRef<str>>(&self, lines: &[S], cursor: usize) -> Option<Emission> {
        let line = lines[cursor].as_ref();

        if SECTION_MARKER.is_match(line) || EXPLICIT_H2.is_match(line) {
            let text = non_empty(normalize_text(line))?;
            return Some(Emission::single(Rule::Section, ContentBlock::section(text)).with_toc(2));
        }

        let follows_blank = cursor > 0 && lines[cursor - 1].as_ref().trim().is_empty();
        let is_short_heading = follows_blank
            && line.chars().count() < self.options.short_line_max_chars
            && !ends_with_sentence_punctuation(line);
        if !is_short_heading {
            return None;
        }
        let text = non_empty(normalize_text(line))?;
        Some(Emission::single(Rule::Section, ContentBlock::section(text)))
    }

    fn try_callout(&self, line: &str) -> Option<Emission> {
        if let Some(m) = KEYPOINT_MARKER.find(line) {
            if let Some(text) = non_empty(line[m.end()..].trim().to_string()) {
                return Some(Emission::single(Rule::Callout, ContentBlock::Keypoint { text }));
            }
        }
        if line.contains('💡') {
            if let Some(text) = non_empty(line.replace('💡', "").trim().to_string()) {
                return Some(Emission::single(Rule::Callout, ContentBlock::Keypoint { text }));
            }
        }

        let rest = if let Some(m) = WARNING_MARKER.find(line) {
            &line[m.end()..]
        } else if line.starts_with('⚠') {
            line.trim_start_matches(['⚠', '\u{FE0F}'])
        } else {
            return None;
        };
        let text = non_empty(rest.trim().to_string())?;
        Some(Emission::single(Rule::Callout, ContentBlock::Warning { text }))
    }

    fn try_definition(&self, line: &str) -> Option<Emission> {
        let (term, definition) = if let Some(caps) = DEFINITION_BRACKET.captures(line) {
            (caps[1].trim().to_string(), caps[2].trim().to_string())
        } else if let Some(caps) = DEFINITION_MARKER.captures(line) {
            let rest = caps.get(1).map_or("", |m| m.as_str());
            let sep = COLON.find(rest)?;
            (
                rest[..sep.start()].trim().to_string(),
                rest[sep.end()..].trim().to_string(),
            )
        } else {
            return None;
        };

        if term.is_empty() || definition.is_empty() {
            return None;
        }
        Some(Emission::single(
            Rule::Definition,
            ContentBlock::Definition { term, definition },
        ))
    }

    fn try_image(&self, line: &str, cursor: usize) -> Option<Emission> {
        let (payload, description) = if let Some(caps) = IMAGE_MARKDOWN.captures(line) {
            let alt = caps[1].trim();
            let src = caps[2].trim();
            let description = if alt.is_empty() { src } else { alt };
            (src.to_string(), description.to_string())
        } else if let Some(caps) = IMAGE_BRACKET.captures(line) {
            let payload = caps[1].trim().to_string();
            let description = if payload.is_empty() {
                let marker = caps.get(0).map_or("", |m| m.as_str());
                normalize_text(&line.replacen(marker, "", 1))
            } else {
                payload.clone()
            };
            (payload, description)
        } else {
            return None;
        };

        let block = if EXTRACTED_IMAGE_ID.is_match(&payload) {
            ContentBlock::Image {
                id: payload,
                description: String::new(),
                auto: false,
            }
        } else {
            ContentBlock::Image {
                id: format!("img_{}_{}", self.options.image_id_timestamp, cursor),
                description,
                auto: false,
            }
        };
        Some(Emission::single(Rule::Image, block))
    }

    fn paragraph(&self, line: &str) -> Emission {
        Emission::single(Rule::Paragraph, ContentBlock::paragraph(normalize_text(line)))
    }
}

fn non_empty(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}

fn snippet(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(SNIPPET_CHARS).collect();
    if chars.next().is_some() {
        format!("{}…", head)
    } else {
        head
    }
}
