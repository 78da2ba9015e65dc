//! Record schema: which raw columns become which typed fields

use crate::reader::RawTable;
use serde::{Deserialize, Serialize};

/// Number of rows sampled when inferring field kinds
const INFERENCE_SAMPLE_ROWS: usize = 100;

/// Kind of a typed field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// The integer year every record carries
    Year,
    /// String from a finite, dataset-derived domain
    Categorical,
    /// Non-negative real, 0 when missing
    Numeric,
}

/// Descriptor for one typed field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Column name in the raw table
    pub name: String,

    /// Field kind
    pub kind: FieldKind,

    /// Human-readable label (axis titles, legends)
    pub label: Option<String>,
}

impl FieldDescriptor {
    /// Create a new field descriptor
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            label: None,
        }
    }

    /// Set the display label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Label if set, otherwise the column name
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

/// Schema describing how raw rows are typed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSchema {
    /// Year field
    pub year: FieldDescriptor,

    /// Categorical fields in declaration order
    pub categorical: Vec<FieldDescriptor>,

    /// Numeric fields in declaration order
    pub numeric: Vec<FieldDescriptor>,
}

impl RecordSchema {
    /// Create a schema with only a year field
    pub fn new(year_field: impl Into<String>) -> Self {
        Self {
            year: FieldDescriptor::new(year_field, FieldKind::Year),
            categorical: Vec::new(),
            numeric: Vec::new(),
        }
    }

    /// Add a categorical field
    pub fn with_categorical(mut self, name: impl Into<String>) -> Self {
        self.categorical
            .push(FieldDescriptor::new(name, FieldKind::Categorical));
        self
    }

    /// Add a numeric field
    pub fn with_numeric(mut self, name: impl Into<String>) -> Self {
        self.numeric.push(FieldDescriptor::new(name, FieldKind::Numeric));
        self
    }

    /// Infer a schema from raw cells
    ///
    /// Every column except the year becomes numeric when all of its sampled
    /// non-empty cells parse as numbers, categorical otherwise. A column with
    /// no non-empty samples is categorical.
    pub fn infer(table: &RawTable, year_field: &str) -> Self {
        let mut schema = Self::new(year_field);

        for (index, name) in table.headers().iter().enumerate() {
            if name == year_field {
                continue;
            }
            let samples: Vec<&str> = table.column(index).take(INFERENCE_SAMPLE_ROWS).collect();
            schema = match infer_kind(&samples) {
                FieldKind::Numeric => schema.with_numeric(name.clone()),
                _ => schema.with_categorical(name.clone()),
            };
        }

        schema
    }

    /// Look up a field by column name
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        if self.year.name == name {
            return Some(&self.year);
        }
        self.categorical
            .iter()
            .chain(self.numeric.iter())
            .find(|f| f.name == name)
    }

    /// Kind of a field, if declared
    pub fn kind_of(&self, name: &str) -> Option<FieldKind> {
        self.field(name).map(|f| f.kind)
    }

    /// Names of all declared fields
    pub fn field_names(&self) -> Vec<&str> {
        std::iter::once(&self.year)
            .chain(self.categorical.iter())
            .chain(self.numeric.iter())
            .map(|f| f.name.as_str())
            .collect()
    }
}

/// Infer a field kind from sample cells
fn infer_kind(values: &[&str]) -> FieldKind {
    let non_empty: Vec<&str> = values
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if non_empty.is_empty() {
        return FieldKind::Categorical;
    }

    if non_empty.iter().all(|s| s.parse::<f64>().is_ok()) {
        return FieldKind::Numeric;
    }

    FieldKind::Categorical
}
