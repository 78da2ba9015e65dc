//! Raw chart interactions
//!
//! Collaborators report what the user did on a chart; the dispatcher turns
//! each interaction into one of the four selection events. Category clicks
//! from every chart funnel into the same toggle, and are only accepted from
//! views that break down the cross-filter field.

use crossview_io::RecordId;
use crossview_selection::BrushRange;
use crossview_stats::Bucket;
use serde::{Deserialize, Serialize};

/// Something the user did on a chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Interaction {
    /// Click on a bar of the named view
    ClickBar { view: String, bucket: Bucket<String> },
    /// Click on a parallel-coordinates line
    ClickLine { id: RecordId },
    /// Click on a layer of the named streamgraph
    ClickLayer { view: String, key: String },
    /// Click on a point of the yearly line chart
    ClickYearPoint { year: i32 },
    /// Click on a year button, `None` for "all years"
    YearButton { year: Option<i32> },
    /// Brush drawn on a view, in that view's data coordinates
    Brush { view: String, range: BrushRange },
    /// Brush removed
    BrushCleared,
}

impl Interaction {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Interaction::ClickBar { .. } => "click_bar",
            Interaction::ClickLine { .. } => "click_line",
            Interaction::ClickLayer { .. } => "click_layer",
            Interaction::ClickYearPoint { .. } => "click_year_point",
            Interaction::YearButton { .. } => "year_button",
            Interaction::Brush { .. } => "brush",
            Interaction::BrushCleared => "brush_cleared",
        }
    }
}
