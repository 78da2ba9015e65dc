//! Chart view specifications and the renderer seam
//!
//! This module defines:
//! - ViewSpec: how a chart turns the working subset into drawable data
//! - ViewScope: which selection filters a chart honours
//! - ViewData: the computed, serialisable data per chart kind
//! - Renderer: the external collaborator that draws it

use crate::error::{RenderError, RenderResult};
use crossview_io::{FieldKind, Record, RecordId, RecordSet};
use crossview_selection::{BrushAxes, SelectionConfig, SelectionState};
use crossview_stats::{Bucket, Domain, Layer, Mean, OffsetPolicy};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Kind of chart a view draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    Choropleth,
    Bar,
    Parallel,
    Stream,
    Scatter,
    LineArea,
    YearSelector,
}

impl ViewKind {
    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            ViewKind::Choropleth => "Choropleth map",
            ViewKind::Bar => "Bar chart",
            ViewKind::Parallel => "Parallel coordinates",
            ViewKind::Stream => "Streamgraph",
            ViewKind::Scatter => "Scatter plot",
            ViewKind::LineArea => "Line/area chart",
            ViewKind::YearSelector => "Year selector",
        }
    }
}

/// Which selection filters restrict a view's subset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewScope {
    pub year: bool,
    pub category: bool,
}

impl ViewScope {
    /// Honours both filters
    pub const BOTH: ViewScope = ViewScope { year: true, category: true };
    /// Honours the year only (by-category breakdowns)
    pub const YEAR: ViewScope = ViewScope { year: true, category: false };
    /// Honours the category only (time series)
    pub const CATEGORY: ViewScope = ViewScope { year: false, category: true };
    /// Always sees every record
    pub const NONE: ViewScope = ViewScope { year: false, category: false };
}

/// Everything a view may read while preparing its data
pub struct ViewContext<'a> {
    /// The full record set
    pub records: &'a RecordSet,
    /// Records passing the view's scoped filter, in load order
    pub subset: Vec<&'a Record>,
    /// Current selection
    pub state: &'a SelectionState,
    /// Selection settings (category field)
    pub selection: &'a SelectionConfig,
}

impl<'a> ViewContext<'a> {
    /// Build the context for a view with the given scope
    pub fn scoped(
        records: &'a RecordSet,
        state: &'a SelectionState,
        selection: &'a SelectionConfig,
        scope: ViewScope,
    ) -> Self {
        let filter = state.scoped_filter(&selection.category_field, scope.year, scope.category);
        Self {
            records,
            subset: records.filter(&filter),
            state,
            selection,
        }
    }

    /// Values of `field` carried by brushed records
    pub fn brushed_values(&self, field: &str) -> HashSet<&'a str> {
        self.state
            .brushed
            .iter()
            .filter_map(|id| self.records.get(id))
            .filter_map(|r| r.category(field))
            .collect()
    }

    /// Fail unless `field` exists in the schema with the expected kind
    pub fn require_field(&self, view: &str, field: &str, expected: FieldKind) -> RenderResult<()> {
        match self.records.schema().kind_of(field) {
            None => Err(RenderError::MissingField {
                view: view.to_string(),
                field: field.to_string(),
            }),
            Some(kind) if kind == expected => Ok(()),
            Some(_) => Err(RenderError::WrongFieldKind {
                view: view.to_string(),
                field: field.to_string(),
                expected: format!("{:?}", expected).to_lowercase(),
            }),
        }
    }
}

/// A chart registered with the dispatcher
///
/// `prepare` must be a pure function of the context: the same store and
/// selection always give the same data.
pub trait ViewSpec {
    /// Unique name within a registry
    fn name(&self) -> &str;

    /// Kind of chart
    fn kind(&self) -> ViewKind;

    /// Filters this view honours
    fn scope(&self) -> ViewScope;

    /// Compute the data to draw
    fn prepare(&self, ctx: &ViewContext<'_>) -> RenderResult<ViewData>;

    /// Axes a brush on this view is drawn over, if the view is brushable
    fn brush_axes(&self, _records: &RecordSet) -> Option<BrushAxes> {
        None
    }

    /// Categorical field whose values a click on this view's marks selects
    fn click_field(&self) -> Option<&str> {
        None
    }
}

/// External drawing collaborator
///
/// Implementations must redraw idempotently and must never touch the
/// selection.
pub trait Renderer {
    fn render(&mut self, view: &str, data: &ViewData, state: &SelectionState) -> RenderResult<()>;
}

/// Computed data for one chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewData {
    Choropleth(ChoroplethData),
    Bar(BarData),
    Parallel(ParallelData),
    Stream(StreamData),
    Scatter(ScatterData),
    LineArea(LineAreaData),
    YearSelector(YearSelectorData),
}

impl ViewData {
    /// Kind of chart this data feeds
    pub fn kind(&self) -> ViewKind {
        match self {
            ViewData::Choropleth(_) => ViewKind::Choropleth,
            ViewData::Bar(_) => ViewKind::Bar,
            ViewData::Parallel(_) => ViewKind::Parallel,
            ViewData::Stream(_) => ViewKind::Stream,
            ViewData::Scatter(_) => ViewKind::Scatter,
            ViewData::LineArea(_) => ViewKind::LineArea,
            ViewData::YearSelector(_) => ViewKind::YearSelector,
        }
    }
}

// === Choropleth ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoroplethData {
    pub regions: Vec<RegionDatum>,
    /// `[0, ln(1 + q99)]`
    pub color_domain: Domain,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionDatum {
    pub region: String,
    pub count: usize,
    /// `ln(1 + min(count, q99))`
    pub color_value: f64,
    pub highlighted: bool,
}

// === Bar ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarData {
    pub bars: Vec<BarDatum>,
    pub y_domain: Domain,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarDatum {
    pub bucket: Bucket<String>,
    pub value: BarValue,
    pub highlighted: bool,
}

impl BarDatum {
    /// Axis label, `"Other"` for the merged bucket
    pub fn label(&self) -> &str {
        match &self.bucket {
            Bucket::Key(k) => k,
            Bucket::Other => "Other",
        }
    }
}

/// Height of a bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarValue {
    Count(usize),
    Mean(Mean),
}

impl BarValue {
    /// Numeric height, `None` for a group with no data
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            BarValue::Count(c) => Some(*c as f64),
            BarValue::Mean(m) => m.value(),
        }
    }
}

// === Parallel coordinates ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParallelData {
    pub axes: Vec<ParallelAxis>,
    pub lines: Vec<ParallelLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParallelAxis {
    pub field: String,
    pub label: String,
    pub scale: AxisScale,
}

/// Scale of one axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisScale {
    /// Continuous scale over a numeric domain
    Linear(Domain),
    /// Evenly spaced points, one per value
    Point(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParallelLine {
    pub id: RecordId,
    /// Position on each axis: the value for linear axes, the index for point axes
    pub values: Vec<f64>,
    /// Colour group, when the view has one
    pub group: Option<String>,
    pub brushed: bool,
}

// === Streamgraph ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamData {
    pub years: Vec<i32>,
    pub layers: Vec<Layer<String>>,
    pub offset: OffsetPolicy,
    pub y_domain: Domain,
    /// Layer matching the active category
    pub highlighted: Option<String>,
}

// === Scatter ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterData {
    /// X domain, one position per category
    pub categories: Vec<String>,
    pub points: Vec<ScatterPoint>,
    pub y_domain: Domain,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub id: RecordId,
    pub category: String,
    /// Index of `category` in the x domain
    pub x: usize,
    pub y: f64,
    pub brushed: bool,
}

// === Line/area ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineAreaData {
    /// Category the series is restricted to
    pub category: Option<String>,
    pub points: Vec<LinePoint>,
    pub y_domain: Domain,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    pub year: i32,
    pub mean: Mean,
    pub selected: bool,
}

// === Year selector ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSelectorData {
    pub years: Vec<YearButton>,
    /// No year filter is active
    pub all_selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearButton {
    pub year: i32,
    pub selected: bool,
}
