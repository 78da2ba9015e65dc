//! Selection events

use crate::brush::Brush;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A request to change the selection
///
/// Serialized externally tagged in snake_case, e.g. `{"set_year": 2021}`,
/// `{"set_category": "Data Scientist"}` or `"clear_brush"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionEvent {
    /// Restrict to a year, or `None` for all years
    SetYear(Option<i32>),
    /// Toggle the category cross-filter
    SetCategory(String),
    /// Brush the current filtered subset
    ApplyBrush(Brush),
    /// Drop the brush
    ClearBrush,
}

impl SelectionEvent {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            SelectionEvent::SetYear(_) => "set_year",
            SelectionEvent::SetCategory(_) => "set_category",
            SelectionEvent::ApplyBrush(_) => "apply_brush",
            SelectionEvent::ClearBrush => "clear_brush",
        }
    }

    /// Whether the event changes the year or category filter
    pub fn changes_filter(&self) -> bool {
        matches!(self, SelectionEvent::SetYear(_) | SelectionEvent::SetCategory(_))
    }
}

impl fmt::Display for SelectionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionEvent::SetYear(Some(year)) => write!(f, "set_year({})", year),
            SelectionEvent::SetYear(None) => write!(f, "set_year(all)"),
            SelectionEvent::SetCategory(c) => write!(f, "set_category({})", c),
            SelectionEvent::ApplyBrush(b) => write!(
                f,
                "apply_brush([{}, {}] x [{}, {}])",
                b.range.x0, b.range.x1, b.range.y0, b.range.y1
            ),
            SelectionEvent::ClearBrush => write!(f, "clear_brush"),
        }
    }
}
