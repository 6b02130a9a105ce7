//! Table detection over delimited text lines.
//!
//! Two delimiter conventions are recognized: tab-separated runs and
//! pipe tables with a separator row. The detector never fails; when a run
//! does not form a usable table it returns `None` and the caller falls
//! through to the next classification rule.

use crate::model::TableBlock;

use super::options::HeaderKeywords;
use super::patterns::{contains_sentence_punctuation, is_pipe_separator};

/// A table recognized at a cursor position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedTable {
    /// The aggregated table
    pub table: TableBlock,
    /// Number of input lines consumed, starting at the cursor
    pub consumed: usize,
}

/// Table detector configuration.
#[derive(Debug, Clone)]
pub struct TableDetectorConfig {
    /// Minimum number of tab-delimited lines to form a table
    pub min_tab_lines: usize,
    /// Vocabulary used to recognize header rows
    pub header_keywords: HeaderKeywords,
}

impl Default for TableDetectorConfig {
    fn default() -> Self {
        Self {
            min_tab_lines: 2,
            header_keywords: HeaderKeywords::default(),
        }
    }
}

/// Detects tables in a stream of trimmed lines.
pub struct TableDetector {
    config: TableDetectorConfig,
}

impl TableDetector {
    /// Create a new table detector with default configuration.
    pub fn new() -> Self {
        Self {
            config: TableDetectorConfig::default(),
        }
    }

    /// Create a new table detector with custom configuration.
    pub fn with_config(config: TableDetectorConfig) -> Self {
        Self { config }
    }

    /// Detect a tab-delimited table starting at `cursor`.
    ///
    /// Blank lines between tab-delimited lines are tolerated; trailing blank
    /// lines are not consumed.
    pub fn detect_tab_table<S: AsRef<str>>(&self, lines: &[S], cursor: usize) -> Option<DetectedTable> {
        let first = lines.get(cursor)?.as_ref();
        if !first.contains('\t') {
            return None;
        }

        let mut cells: Vec<Vec<String>> = Vec::new();
        let mut end = cursor;
        let mut i = cursor;
        while i < lines.len() {
            let line = lines[i].as_ref();
            if line.contains('\t') {
                cells.push(split_tab_cells(line));
                end = i + 1;
            } else if !line.trim().is_empty() {
                break;
            }
            i += 1;
        }

        if cells.len() < self.config.min_tab_lines {
            log::debug!(
                "TableDetector: tab run too short ({} < {})",
                cells.len(),
                self.config.min_tab_lines
            );
            return None;
        }

        let mut rows = cells.into_iter();
        let first_row = rows.next()?;
        let rest: Vec<Vec<String>> = rows.collect();

        let mut table = if self.is_header_row(&first_row) {
            TableBlock::with_header(first_row)
        } else {
            let columns = rest
                .iter()
                .map(Vec::len)
                .chain(std::iter::once(first_row.len()))
                .max()
                .unwrap_or(0);
            let mut table = TableBlock::with_synthetic_header(columns);
            table.push_aligned_row(first_row);
            table
        };

        for row in rest {
            table.push_aligned_row(row);
        }

        if table.is_empty() {
            log::debug!("TableDetector: tab run at line {} has no data rows", cursor);
            return None;
        }

        log::debug!(
            "TableDetector: tab table at line {} ({} columns, {} rows, header={})",
            cursor,
            table.column_count(),
            table.row_count(),
            table.has_real_header
        );

        Some(DetectedTable {
            table,
            consumed: end - cursor,
        })
    }

    /// Detect a pipe table starting at `cursor`.
    ///
    /// The cursor line is the header; the next line must be a separator row.
    /// Data rows continue while lines contain a pipe.
    pub fn detect_pipe_table<S: AsRef<str>>(&self, lines: &[S], cursor: usize) -> Option<DetectedTable> {
        let header_line = lines.get(cursor)?.as_ref();
        if !header_line.contains('|') {
            return None;
        }
        let separator = lines.get(cursor + 1)?.as_ref();
        if !is_pipe_separator(separator) {
            return None;
        }

        let mut table = TableBlock::with_header(split_pipe_cells(header_line));
        let mut i = cursor + 2;
        while i < lines.len() {
            let line = lines[i].as_ref();
            if !line.contains('|') {
                break;
            }
            if !is_pipe_separator(line) {
                table.push_aligned_row(split_pipe_cells(line));
            }
            i += 1;
        }

        if table.is_empty() {
            log::debug!("TableDetector: pipe table at line {} has no data rows", cursor);
            return None;
        }

        log::debug!(
            "TableDetector: pipe table at line {} ({} columns, {} rows)",
            cursor,
            table.column_count(),
            table.row_count()
        );

        Some(DetectedTable {
            table,
            consumed: i - cursor,
        })
    }

    /// Check if the first row of a tab table reads as a header.
    ///
    /// A row is a header when every cell is short and free of sentence
    /// punctuation, or when any cell is a known header keyword.
    fn is_header_row(&self, cells: &[String]) -> bool {
        let keywords = &self.config.header_keywords;
        if cells.iter().any(|cell| keywords.matches(cell)) {
            return true;
        }
        cells.iter().all(|cell| {
            cell.chars().count() <= keywords.max_cell_chars && !contains_sentence_punctuation(cell)
        })
    }
}

impl Default for TableDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Split a tab-delimited line into trimmed cells.
fn split_tab_cells(line: &str) -> Vec<String> {
    line.split('\t').map(|cell| cell.trim().to_string()).collect()
}

/// Split a pipe-delimited line into trimmed cells, dropping the empty
/// cells produced by leading and trailing pipes.
fn split_pipe_cells(line: &str) -> Vec<String> {
    let mut cells: Vec<String> = line.split('|').map(|cell| cell.trim().to_string()).collect();
    if cells.first().is_some_and(|c| c.is_empty()) {
        cells.remove(0);
    }
    if cells.last().is_some_and(|c| c.is_empty()) {
        cells.pop();
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_tab_table_with_header() {
        let detector = TableDetector::new();
        let lines = ["Name\tPrice", "A\t10", "B\t20"];

        let detected = detector.detect_tab_table(&lines, 0).unwrap();
        assert_eq!(detected.consumed, 3);
        assert!(detected.table.has_real_header);
        assert_eq!(detected.table.headers, strings(&["Name", "Price"]));
        assert_eq!(
            detected.table.rows,
            vec![strings(&["A", "10"]), strings(&["B", "20"])]
        );
    }

    #[test]
    fn test_tab_table_without_header() {
        let detector = TableDetector::new();
        let lines = [
            "This is a long sentence, clearly not a header\tmore",
            "x\ty\tz",
        ];

        let detected = detector.detect_tab_table(&lines, 0).unwrap();
        assert!(!detected.table.has_real_header);
        assert_eq!(
            detected.table.headers,
            strings(&["Column 1", "Column 2", "Column 3"])
        );
        assert_eq!(detected.table.row_count(), 2);
        assert_eq!(detected.table.rows[0][2], "");
    }

    #[test]
    fn test_tab_table_tolerates_interior_blank_lines() {
        let detector = TableDetector::new();
        let lines = ["項目\t說明", "", "A\t甲", "", "after"];

        let detected = detector.detect_tab_table(&lines, 0).unwrap();
        assert_eq!(detected.consumed, 3);
        assert_eq!(detected.table.row_count(), 1);
    }

    #[test]
    fn test_single_tab_line_is_not_a_table() {
        let detector = TableDetector::new();
        let lines = ["Name\tPrice", "plain text"];
        assert!(detector.detect_tab_table(&lines, 0).is_none());
    }

    #[test]
    fn test_header_only_tab_table_falls_through() {
        let detector = TableDetector::new();
        let lines = ["Name\tPrice", "\t"];
        assert!(detector.detect_tab_table(&lines, 0).is_none());
    }

    #[test]
    fn test_custom_header_keywords() {
        let detector = TableDetector::with_config(TableDetectorConfig {
            header_keywords: HeaderKeywords::new(["Posten"]),
            ..Default::default()
        });
        let lines = ["Posten\tDies ist ein langer Satz, kein Kopf.", "a\tb"];
        let detected = detector.detect_tab_table(&lines, 0).unwrap();
        assert!(detected.table.has_real_header);
    }

    #[test]
    fn test_pipe_table() {
        let detector = TableDetector::new();
        let lines = ["| Tool | Use |", "|---|---|", "| Brush | Apply |", "| Sponge |", "next"];

        let detected = detector.detect_pipe_table(&lines, 0).unwrap();
        assert_eq!(detected.consumed, 4);
        assert!(detected.table.has_real_header);
        assert_eq!(detected.table.headers, strings(&["Tool", "Use"]));
        assert_eq!(detected.table.rows[1], strings(&["Sponge", ""]));
    }

    #[test]
    fn test_pipe_table_requires_separator() {
        let detector = TableDetector::new();
        let lines = ["| Tool | Use |", "| Brush | Apply |"];
        assert!(detector.detect_pipe_table(&lines, 0).is_none());
    }

    #[test]
    fn test_pipe_table_without_rows_falls_through() {
        let detector = TableDetector::new();
        let lines = ["| Tool | Use |", "|---|---|"];
        assert!(detector.detect_pipe_table(&lines, 0).is_none());
    }

    #[test]
    fn test_split_pipe_cells_keeps_interior_empties() {
        assert_eq!(split_pipe_cells("| a || c |"), strings(&["a", "", "c"]));
        assert_eq!(split_pipe_cells("a | b"), strings(&["a", "b"]));
    }
}
