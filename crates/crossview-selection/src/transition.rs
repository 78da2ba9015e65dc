//! Pure state transitions and the owning `Selection` wrapper

use crate::brush::Brush;
use crate::event::SelectionEvent;
use crate::state::{BrushedSet, SelectionConfig, SelectionState};
use crossview_io::RecordSet;
use serde::Serialize;
use tracing::debug;

/// Compute the state that follows `event`
///
/// The input state is left untouched. Filter changes clear the brush in the
/// same step, so the result's brush is always a subset of its filtered
/// records.
pub fn transition(
    state: &SelectionState,
    event: &SelectionEvent,
    records: &RecordSet,
    config: &SelectionConfig,
) -> SelectionState {
    let mut next = state.clone();
    match event {
        SelectionEvent::SetYear(year) => {
            next.active_year = *year;
            next.brushed.clear();
        }
        SelectionEvent::SetCategory(value) => {
            next.active_category = if state.is_active_category(value) {
                None
            } else {
                Some(value.clone())
            };
            next.brushed.clear();
        }
        SelectionEvent::ApplyBrush(brush) => {
            next.brushed = brushed_records(state, brush, records, config);
        }
        SelectionEvent::ClearBrush => next.brushed.clear(),
    }
    next
}

/// Records of the filtered subset that fall inside a brush
pub fn brushed_records(
    state: &SelectionState,
    brush: &Brush,
    records: &RecordSet,
    config: &SelectionConfig,
) -> BrushedSet {
    if brush.range.is_empty() {
        return BrushedSet::new();
    }
    let filter = state.filter(&config.category_field);
    records
        .iter()
        .filter(|r| filter.matches(r) && brush.contains(r))
        .map(|r| r.id)
        .collect()
}

/// Which parts of the state an event changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Change {
    pub year: bool,
    pub category: bool,
    pub brush: bool,
}

impl Change {
    /// Compare two states
    pub fn between(before: &SelectionState, after: &SelectionState) -> Self {
        Self {
            year: before.active_year != after.active_year,
            category: before.active_category != after.active_category,
            brush: before.brushed != after.brushed,
        }
    }

    /// Whether nothing changed
    pub fn is_empty(&self) -> bool {
        !(self.year || self.category || self.brush)
    }
}

/// Selection state together with the configuration it was built from
#[derive(Debug, Clone)]
pub struct Selection {
    config: SelectionConfig,
    state: SelectionState,
}

impl Selection {
    pub fn new(config: SelectionConfig) -> Self {
        let state = SelectionState::new(&config);
        Self { config, state }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Apply an event in place
    pub fn apply(&mut self, event: &SelectionEvent, records: &RecordSet) -> Change {
        let next = transition(&self.state, event, records, &self.config);
        let change = Change::between(&self.state, &next);
        debug!(
            event = %event,
            year = ?next.active_year,
            category = ?next.active_category,
            brushed = next.brushed.len(),
            "Selection updated"
        );
        self.state = next;
        change
    }

    /// Back to the configured defaults
    pub fn reset(&mut self) {
        self.state.reset(&self.config);
    }
}
