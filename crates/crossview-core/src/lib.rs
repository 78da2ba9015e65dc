//! crossview-core - Coordinated multi-view selection for statistical dashboards
//!
//! This crate ties the record store, the aggregation engine and the
//! selection state together into linked chart views.
//!
//! # Key Components
//!
//! - **ViewSpec**: a chart that turns its scoped subset into `ViewData`
//! - **ViewRegistry**: ordered, uniquely named views
//! - **Dispatcher**: applies selection events and re-renders every view
//! - **Interaction**: raw chart input translated into selection events
//! - **DashboardConfig**: TOML/JSON description of a dashboard
//! - **JsonRenderer**: renderer that keeps the latest frame per view
//!
//! # Update protocol
//!
//! One event is processed at a time: the selection transition is applied,
//! then every registered view is prepared and rendered once, in
//! registration order. A view that fails is reported and skipped; the
//! remaining views still render and the selection is left as the event
//! set it.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod interaction;
pub mod registry;
pub mod render;
pub mod view;
pub mod views;

pub use config::*;
pub use dispatcher::*;
pub use error::*;
pub use interaction::*;
pub use registry::ViewRegistry;
pub use render::{Frame, JsonRenderer};
pub use view::*;
pub use views::*;
