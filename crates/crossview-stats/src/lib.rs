//! crossview-stats - Aggregation engine for linked chart views
//!
//! Pure, deterministic transforms over a record subset:
//!
//! - **Counts**: key→count in first-seen order, top-N with an "Other" rollup
//! - **Means**: grouped means where an empty group is `Mean::NoData`, not zero
//! - **Stacking**: layered `(lower, upper)` series with zero or silhouette offset
//! - **Summary**: extents and quantiles
//! - **Domain**: scale domains that never collapse to zero span
//!
//! Every function is generic over the item type and only borrows its input.

pub mod count;
pub mod domain;
pub mod mean;
pub mod stack;
pub mod summary;

pub use count::*;
pub use domain::*;
pub use mean::*;
pub use stack::*;
pub use summary::*;
