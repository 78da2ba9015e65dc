//! Typed records and the filters applied to them

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Stable identity of a record: its row position in the loaded set
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(pub usize);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One immutable observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Identity within the owning record set
    pub id: RecordId,

    /// Observation year
    pub year: i32,

    /// Categorical attributes by field name
    pub categorical: BTreeMap<String, String>,

    /// Numeric attributes by field name
    pub numeric: BTreeMap<String, f64>,
}

impl Record {
    /// Create a record with no attributes
    pub fn new(id: RecordId, year: i32) -> Self {
        Self {
            id,
            year,
            categorical: BTreeMap::new(),
            numeric: BTreeMap::new(),
        }
    }

    /// Set a categorical attribute
    pub fn with_category(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.categorical.insert(field.into(), value.into());
        self
    }

    /// Set a numeric attribute
    pub fn with_numeric(mut self, field: impl Into<String>, value: f64) -> Self {
        self.numeric.insert(field.into(), value);
        self
    }

    /// Categorical value of a field
    pub fn category(&self, field: &str) -> Option<&str> {
        self.categorical.get(field).map(|s| s.as_str())
    }

    /// Numeric value of a field
    pub fn numeric(&self, field: &str) -> Option<f64> {
        self.numeric.get(field).copied()
    }

    /// Numeric value of a field, 0 when the field is absent
    pub fn numeric_or_zero(&self, field: &str) -> f64 {
        self.numeric(field).unwrap_or(0.0)
    }
}

/// Parse a numeric cell permissively
///
/// Returns `None` when the cell had to be coerced (empty, unparseable or
/// non-finite); callers substitute 0.
pub fn parse_numeric(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a year cell permissively
///
/// Accepts integral floats such as `"2021.0"`.
pub fn parse_year(cell: &str) -> Option<i32> {
    let trimmed = cell.trim();
    if let Ok(year) = trimmed.parse::<i32>() {
        return Some(year);
    }
    parse_numeric(trimmed)
        .filter(|v| v.fract() == 0.0 && *v >= i32::MIN as f64 && *v <= i32::MAX as f64)
        .map(|v| v as i32)
}

/// Year and category restriction over a record set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordFilter {
    /// Only records of this year
    pub year: Option<i32>,

    /// Only records whose `field` equals `value`
    pub category: Option<CategoryFilter>,
}

/// A single categorical equality constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFilter {
    pub field: String,
    pub value: String,
}

impl RecordFilter {
    /// A filter that keeps everything
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to a year
    pub fn with_year(mut self, year: Option<i32>) -> Self {
        self.year = year;
        self
    }

    /// Restrict to a categorical value
    pub fn with_category(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.category = Some(CategoryFilter {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Whether the filter keeps everything
    pub fn is_unrestricted(&self) -> bool {
        self.year.is_none() && self.category.is_none()
    }

    /// Check whether a record passes the filter
    pub fn matches(&self, record: &Record) -> bool {
        if let Some(year) = self.year {
            if record.year != year {
                return false;
            }
        }
        if let Some(cat) = &self.category {
            if record.category(&cat.field) != Some(cat.value.as_str()) {
                return false;
            }
        }
        true
    }
}
