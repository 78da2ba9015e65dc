//! The immutable record set and its dimension metadata

use crate::reader::{IoError, IoResult, RawTable};
use crate::record::{parse_numeric, parse_year, Record, RecordFilter, RecordId};
use crate::schema::{FieldKind, RecordSchema};
use serde::Serialize;
use std::collections::HashSet;

/// The loaded dataset
///
/// Records are created once by [`RecordSet::load`] and never mutated.
/// `RecordId(i)` always refers to `records()[i]`.
#[derive(Debug, Clone, Serialize)]
pub struct RecordSet {
    schema: RecordSchema,
    records: Vec<Record>,
}

/// Outcome counters from a load, mostly for logging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Numeric or year cells that were coerced to 0
    pub coerced_cells: usize,
    /// Declared numeric columns missing from the input
    pub missing_numeric_columns: usize,
}

struct ColumnPlan {
    year: usize,
    categorical: Vec<(String, usize)>,
    numeric: Vec<(String, Option<usize>)>,
}

impl RecordSet {
    /// Parse raw rows into typed records
    ///
    /// Missing or unparseable numeric cells become 0. A declared year or
    /// categorical column that the table lacks is an error; a declared
    /// numeric column that the table lacks is all zeros.
    pub fn load(table: &RawTable, schema: &RecordSchema) -> IoResult<Self> {
        Self::load_with_stats(table, schema).map(|(set, _)| set)
    }

    /// Like [`RecordSet::load`], also reporting coercion counters
    pub fn load_with_stats(table: &RawTable, schema: &RecordSchema) -> IoResult<(Self, LoadStats)> {
        let plan = plan_columns(table, schema)?;
        let mut stats = LoadStats {
            missing_numeric_columns: plan.numeric.iter().filter(|(_, i)| i.is_none()).count(),
            ..Default::default()
        };

        for (name, index) in &plan.numeric {
            if index.is_none() {
                tracing::warn!("Numeric column '{}' not in input, defaulting to 0", name);
            }
        }

        let mut records = Vec::with_capacity(table.num_rows());
        for (row_index, row) in table.rows().iter().enumerate() {
            let year = match parse_year(&row[plan.year]) {
                Some(year) => year,
                None => {
                    stats.coerced_cells += 1;
                    0
                }
            };

            let mut record = Record::new(RecordId(row_index), year);
            for (name, index) in &plan.categorical {
                record
                    .categorical
                    .insert(name.clone(), row[*index].trim().to_string());
            }
            for (name, index) in &plan.numeric {
                let value = match index.and_then(|i| parse_numeric(&row[i])) {
                    Some(value) => value,
                    None => {
                        if index.is_some() {
                            stats.coerced_cells += 1;
                        }
                        0.0
                    }
                };
                record.numeric.insert(name.clone(), value);
            }
            records.push(record);
        }

        if stats.coerced_cells > 0 {
            tracing::debug!("Coerced {} malformed cells to 0", stats.coerced_cells);
        }
        tracing::info!(
            "Loaded {} records ({} categorical, {} numeric fields)",
            records.len(),
            schema.categorical.len(),
            schema.numeric.len()
        );

        Ok((
            Self {
                schema: schema.clone(),
                records,
            },
            stats,
        ))
    }

    /// Build a set from already-typed records, renumbering their ids
    pub fn from_records(schema: RecordSchema, records: Vec<Record>) -> Self {
        let records = records
            .into_iter()
            .enumerate()
            .map(|(i, mut r)| {
                r.id = RecordId(i);
                r
            })
            .collect();
        Self { schema, records }
    }

    /// Schema the set was loaded with
    pub fn schema(&self) -> &RecordSchema {
        &self.schema
    }

    /// All records in load order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Iterate all records in load order
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Look up a record by id
    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.get(id.0)
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records passing a filter, in load order
    pub fn filter(&self, filter: &RecordFilter) -> Vec<&Record> {
        self.records.iter().filter(|r| filter.matches(r)).collect()
    }

    /// Distinct values of a categorical field, in first-seen order
    pub fn distinct_values(&self, field: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut values = Vec::new();
        for value in self.records.iter().filter_map(|r| r.category(field)) {
            if seen.insert(value) {
                values.push(value.to_string());
            }
        }
        values
    }

    /// Distinct years, ascending
    pub fn distinct_years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.records.iter().map(|r| r.year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    /// `(min, max)` of a numeric field over all records
    ///
    /// `None` when the set is empty or the field is not numeric.
    pub fn extent(&self, field: &str) -> Option<(f64, f64)> {
        if self.schema.kind_of(field) != Some(FieldKind::Numeric) {
            return None;
        }
        self.records
            .iter()
            .filter_map(|r| r.numeric(field))
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// `(min, max)` year
    pub fn year_extent(&self) -> Option<(i32, i32)> {
        let min = self.records.iter().map(|r| r.year).min()?;
        let max = self.records.iter().map(|r| r.year).max()?;
        Some((min, max))
    }
}

fn plan_columns(table: &RawTable, schema: &RecordSchema) -> IoResult<ColumnPlan> {
    let year = table
        .column_index(&schema.year.name)
        .ok_or_else(|| IoError::ColumnNotFound(schema.year.name.clone()))?;

    let categorical = schema
        .categorical
        .iter()
        .map(|f| {
            table
                .column_index(&f.name)
                .map(|i| (f.name.clone(), i))
                .ok_or_else(|| IoError::ColumnNotFound(f.name.clone()))
        })
        .collect::<IoResult<Vec<_>>>()?;

    let numeric = schema
        .numeric
        .iter()
        .map(|f| (f.name.clone(), table.column_index(&f.name)))
        .collect();

    Ok(ColumnPlan {
        year,
        categorical,
        numeric,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terrorism_table() -> RawTable {
        RawTable::from_rows(
            &["iyear", "attacktype1_txt", "region_txt", "nkill", "nwound"],
            &[
                &["2001", "Bombing", "Middle East", "3", ""],
                &["2001", "Armed Assault", "South Asia", "", "2"],
                &["2002", "Bombing", "Middle East", "unknown", "7"],
            ],
        )
        .unwrap()
    }

    fn terrorism_schema() -> RecordSchema {
        RecordSchema::new("iyear")
            .with_categorical("attacktype1_txt")
            .with_categorical("region_txt")
            .with_numeric("nkill")
            .with_numeric("nwound")
    }

    #[test]
    fn test_load_coerces_numeric() {
        let (set, stats) = RecordSet::load_with_stats(&terrorism_table(), &terrorism_schema()).unwrap();

        assert_eq!(set.len(), 3);
        assert_eq!(set.records()[0].numeric("nwound"), Some(0.0));
        assert_eq!(set.records()[1].numeric("nkill"), Some(0.0));
        assert_eq!(set.records()[2].numeric("nkill"), Some(0.0));
        assert_eq!(set.records()[2].numeric("nwound"), Some(7.0));
        assert_eq!(stats.coerced_cells, 3);
    }

    #[test]
    fn test_load_missing_categorical_column() {
        let schema = terrorism_schema().with_categorical("country_txt");
        let err = RecordSet::load(&terrorism_table(), &schema).unwrap_err();
        assert!(matches!(err, IoError::ColumnNotFound(ref c) if c == "country_txt"));
    }

    #[test]
    fn test_load_missing_numeric_column_defaults_to_zero() {
        let schema = terrorism_schema().with_numeric("nhostkid");
        let (set, stats) = RecordSet::load_with_stats(&terrorism_table(), &schema).unwrap();
        assert!(set.iter().all(|r| r.numeric("nhostkid") == Some(0.0)));
        assert_eq!(stats.missing_numeric_columns, 1);
    }

    #[test]
    fn test_distinct_values_first_seen() {
        let set = RecordSet::load(&terrorism_table(), &terrorism_schema()).unwrap();
        assert_eq!(
            set.distinct_values("attacktype1_txt"),
            vec!["Bombing".to_string(), "Armed Assault".to_string()]
        );
        assert_eq!(set.distinct_values("attacktype1_txt"), set.distinct_values("attacktype1_txt"));
    }

    #[test]
    fn test_extent() {
        let set = RecordSet::load(&terrorism_table(), &terrorism_schema()).unwrap();
        assert_eq!(set.extent("nwound"), Some((0.0, 7.0)));
        assert_eq!(set.extent("region_txt"), None);
        assert_eq!(set.year_extent(), Some((2001, 2002)));
        assert_eq!(set.distinct_years(), vec![2001, 2002]);
    }

    #[test]
    fn test_filter_preserves_order() {
        let set = RecordSet::load(&terrorism_table(), &terrorism_schema()).unwrap();
        let filtered = set.filter(&RecordFilter::all().with_category("attacktype1_txt", "Bombing"));
        let ids: Vec<RecordId> = filtered.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![RecordId(0), RecordId(2)]);
    }
}
