// ============================================================
// Layer 3 — Table Domain Type
// ============================================================
// The raw shape of the source file: a header row plus rows of
// string cells. Nothing is parsed yet — the Loader filters on it,
// drops columns from it, and reports its shape before anything is
// turned into typed Records.

use serde::{Deserialize, Serialize};

use crate::domain::errors::DataError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows:    Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact header name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Like `column_index`, but a missing column is a DataError.
    pub fn require_column(&self, name: &str) -> Result<usize, DataError> {
        self.column_index(name)
            .ok_or_else(|| DataError::MissingColumn(name.to_string()))
    }

    /// Number of cells that are empty after trimming whitespace.
    pub fn null_cells(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|r| r.iter())
            .filter(|c| c.trim().is_empty())
            .count()
    }

    /// Number of rows that exactly repeat an earlier row.
    pub fn duplicate_rows(&self) -> usize {
        let mut seen = std::collections::HashSet::new();
        self.rows.iter().filter(|r| !seen.insert(*r)).count()
    }
}
