//! crossview-selection - Shared selection state for linked views
//!
//! Three coupled axes decide what every chart shows and highlights:
//!
//! - **active_year**: optional year filter (absent = all years)
//! - **active_category**: optional cross-filter on one categorical value
//! - **brushed**: record ids picked by a rectangular brush
//!
//! # Transitions
//!
//! | Event | Effect |
//! |---|---|
//! | `SetYear(y)` | `active_year := y`, brush cleared |
//! | `SetCategory(c)` | toggle `active_category`, brush cleared |
//! | `ApplyBrush(b)` | brush := filtered records inside `b` |
//! | `ClearBrush` | brush cleared |
//!
//! The brush is always a subset of the records visible under the current
//! year and category, because every filter change clears it in the same
//! transition.
//!
//! # Examples
//!
//! ```ignore
//! use crossview_selection::{transition, SelectionConfig, SelectionEvent, SelectionState};
//!
//! let config = SelectionConfig::new("job_title").with_default_year(Some(2022));
//! let state = SelectionState::new(&config);
//! let state = transition(&state, &SelectionEvent::SetCategory("ML Engineer".into()), &records, &config);
//! ```

pub mod brush;
pub mod event;
pub mod state;
pub mod transition;

pub use brush::*;
pub use event::*;
pub use state::*;
pub use transition::*;
