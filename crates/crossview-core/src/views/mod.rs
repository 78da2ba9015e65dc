//! Built-in chart views
//!
//! Each view owns its field names and turns its scoped subset into
//! [`ViewData`](crate::ViewData). Aggregates are recomputed by a linear
//! scan on every render.

mod bar;
mod choropleth;
mod line_area;
mod parallel;
mod scatter;
mod stream;
mod year_selector;

pub use bar::{BarMeasure, BarView};
pub use choropleth::ChoroplethView;
pub use line_area::LineAreaView;
pub use parallel::ParallelView;
pub use scatter::ScatterView;
pub use stream::StreamView;
pub use year_selector::YearSelectorView;
