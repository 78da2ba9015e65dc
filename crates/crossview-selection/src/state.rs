//! Selection state and its configuration

use crossview_io::{RecordFilter, RecordId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Startup settings for the selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Categorical field the category cross-filter applies to
    pub category_field: String,

    /// Year selected at startup, `None` for all years
    #[serde(default)]
    pub default_year: Option<i32>,
}

impl SelectionConfig {
    pub fn new(category_field: impl Into<String>) -> Self {
        Self {
            category_field: category_field.into(),
            default_year: None,
        }
    }

    pub fn with_default_year(mut self, year: Option<i32>) -> Self {
        self.default_year = year;
        self
    }
}

/// Record ids picked by a brush, kept sorted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrushedSet(BTreeSet<RecordId>);

impl BrushedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Ids in ascending order
    pub fn iter(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<RecordId> for BrushedSet {
    fn from_iter<I: IntoIterator<Item = RecordId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The shared selection every view reads
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    /// Year filter, `None` for all years
    pub active_year: Option<i32>,

    /// Category cross-filter value
    pub active_category: Option<String>,

    /// Records picked by the brush
    pub brushed: BrushedSet,
}

impl SelectionState {
    /// Initial state: configured default year, no category, empty brush
    pub fn new(config: &SelectionConfig) -> Self {
        Self {
            active_year: config.default_year,
            active_category: None,
            brushed: BrushedSet::new(),
        }
    }

    /// Restore the initial state
    pub fn reset(&mut self, config: &SelectionConfig) {
        *self = Self::new(config);
    }

    /// Filter honouring both the year and the category
    pub fn filter(&self, category_field: &str) -> RecordFilter {
        self.scoped_filter(category_field, true, true)
    }

    /// Filter honouring only the requested axes
    pub fn scoped_filter(&self, category_field: &str, year: bool, category: bool) -> RecordFilter {
        let mut filter = RecordFilter::all();
        if year {
            filter = filter.with_year(self.active_year);
        }
        if category {
            if let Some(value) = &self.active_category {
                filter = filter.with_category(category_field, value.as_str());
            }
        }
        filter
    }

    pub fn is_brushed(&self, id: RecordId) -> bool {
        self.brushed.contains(id)
    }

    /// Whether `value` is the active category
    pub fn is_active_category(&self, value: &str) -> bool {
        self.active_category.as_deref() == Some(value)
    }
}
