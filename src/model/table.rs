//! Table types.

use serde::{Deserialize, Serialize};

/// A table detected in the line stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableBlock {
    /// Column labels (real or synthetic)
    pub headers: Vec<String>,

    /// Data rows, each aligned to `headers.len()`
    pub rows: Vec<Vec<String>>,

    /// Whether `headers` came from the source rather than being synthesized
    #[serde(rename = "hasRealHeader")]
    pub has_real_header: bool,
}

impl TableBlock {
    /// Create a table with a header row taken from the source.
    pub fn with_header(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
            has_real_header: true,
        }
    }

    /// Create a table with synthetic "Column N" labels.
    pub fn with_synthetic_header(columns: usize) -> Self {
        Self {
            headers: (1..=columns).map(|i| format!("Column {}", i)).collect(),
            rows: Vec::new(),
            has_real_header: false,
        }
    }

    /// Add a row, padding or truncating it to the column count.
    ///
    /// Rows that are entirely empty after alignment are dropped.
    /// Returns whether the row was kept.
    pub fn push_aligned_row(&mut self, mut row: Vec<String>) -> bool {
        row.resize(self.column_count(), String::new());
        if row.iter().all(|cell| cell.trim().is_empty()) {
            return false;
        }
        self.rows.push(row);
        true
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get plain text representation of the table (tab separated).
    pub fn plain_text(&self) -> String {
        std::iter::once(&self.headers)
            .chain(self.rows.iter())
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
