//! Raw table input and I/O errors
//!
//! A `RawTable` is the loader-agnostic shape every source is reduced to
//! before typing: a header row and string cells.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Errors that can occur while ingesting a dataset
#[derive(Debug, Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to open file: {0}")]
    OpenFailed(String),

    #[error("Input is not tabular: {0}")]
    NotTabular(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Result type for I/O operations
pub type IoResult<T> = Result<T, IoError>;

/// Untyped rows of named fields, as produced by an external loader
///
/// Deserialising goes through [`RawTable::new`], so a decoded table is
/// always rectangular.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TableRows")]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Unchecked wire form of a table
#[derive(Deserialize)]
struct TableRows {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TryFrom<TableRows> for RawTable {
    type Error = IoError;

    fn try_from(raw: TableRows) -> IoResult<Self> {
        Self::new(raw.headers, raw.rows)
    }
}

impl RawTable {
    /// Build a table, rejecting input that is not rectangular
    ///
    /// Fails when there is no header, a header is repeated, or a row has a
    /// different number of cells than the header.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> IoResult<Self> {
        if headers.is_empty() {
            return Err(IoError::NotTabular("no header columns".to_string()));
        }

        let mut seen = HashSet::new();
        for header in &headers {
            if !seen.insert(header.as_str()) {
                return Err(IoError::NotTabular(format!(
                    "duplicate header '{}'",
                    header
                )));
            }
        }

        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != headers.len())
        {
            return Err(IoError::NotTabular(format!(
                "row {} has {} cells, expected {}",
                index,
                row.len(),
                headers.len()
            )));
        }

        Ok(Self { headers, rows })
    }

    /// Convenience constructor from string slices
    pub fn from_rows(headers: &[&str], rows: &[&[&str]]) -> IoResult<Self> {
        Self::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    /// Column names in input order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// All rows
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Position of a column
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Iterate the cells of one column
    pub fn column<'a>(&'a self, index: usize) -> impl Iterator<Item = &'a str> + 'a {
        self.rows
            .iter()
            .filter_map(move |row| row.get(index).map(|s| s.as_str()))
    }

    /// Number of data rows
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }
}
