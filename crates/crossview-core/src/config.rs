//! Dashboard configuration
//!
//! Names the dataset columns, the selection defaults and the charts to
//! register. Loaded from TOML or JSON.
//!
//! ```toml
//! [dataset]
//! year_field = "work_year"
//!
//! [selection]
//! category_field = "job_title"
//! default_year = 2023
//!
//! [views]
//! top_n = 8
//!
//! [[views.charts]]
//! kind = "scatter"
//! name = "scatter"
//! value_field = "salary_in_usd"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ConfigError, ConfigResult, RegistryResult};
use crate::registry::ViewRegistry;
use crate::view::ViewSpec;
use crate::views::{
    BarView, ChoroplethView, LineAreaView, ParallelView, ScatterView, StreamView, YearSelectorView,
};
use crossview_io::{RawTable, RecordSchema};
use crossview_selection::SelectionConfig;
use crossview_stats::{OffsetPolicy, TieBreak, TopN};

/// Whole-dashboard configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Dataset column layout
    #[serde(default)]
    pub dataset: DatasetSection,
    /// Selection defaults
    #[serde(default)]
    pub selection: SelectionSection,
    /// Chart settings and chart list
    #[serde(default)]
    pub views: ViewsSection,
}

/// Dataset column layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetSection {
    /// Column holding the year
    pub year_field: String,
    /// Categorical columns; with `numeric` empty too, the schema is inferred
    pub categorical: Vec<String>,
    /// Numeric columns
    pub numeric: Vec<String>,
}

impl Default for DatasetSection {
    fn default() -> Self {
        Self {
            year_field: "year".to_string(),
            categorical: Vec::new(),
            numeric: Vec::new(),
        }
    }
}

impl DatasetSection {
    /// Schema for a raw table: declared columns, or inferred when none are
    pub fn schema(&self, table: &RawTable) -> RecordSchema {
        if self.categorical.is_empty() && self.numeric.is_empty() {
            return RecordSchema::infer(table, &self.year_field);
        }
        let schema = self
            .categorical
            .iter()
            .fold(RecordSchema::new(self.year_field.as_str()), |s, f| s.with_categorical(f.as_str()));
        self.numeric.iter().fold(schema, |s, f| s.with_numeric(f.as_str()))
    }
}

/// Selection defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionSection {
    /// Field the category cross-filter applies to
    pub category_field: String,
    /// Year selected at startup
    pub default_year: Option<i32>,
}

impl Default for SelectionSection {
    fn default() -> Self {
        Self {
            category_field: "category".to_string(),
            default_year: None,
        }
    }
}

/// Chart settings shared by every chart, plus the chart list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewsSection {
    /// Bars kept before merging the rest into "Other"
    pub top_n: usize,
    /// Ordering of bars with equal counts
    pub tie_break: TieBreak,
    /// Layers kept by streamgraphs
    pub stream_series: usize,
    /// Default streamgraph baseline
    pub stream_offset: OffsetPolicy,
    /// Charts in registration order
    pub charts: Vec<ChartDefinition>,
}

impl Default for ViewsSection {
    fn default() -> Self {
        Self {
            top_n: 8,
            tie_break: TieBreak::FirstSeen,
            stream_series: 6,
            stream_offset: OffsetPolicy::Zero,
            charts: Vec::new(),
        }
    }
}

/// One chart on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartDefinition {
    Choropleth {
        name: String,
        region_field: String,
    },
    /// Counts per value, or the mean of `value_field` when set
    Bar {
        name: String,
        field: Option<String>,
        value_field: Option<String>,
        top_n: Option<usize>,
    },
    Parallel {
        name: String,
        axes: Vec<String>,
        color_field: Option<String>,
    },
    Stream {
        name: String,
        series_field: Option<String>,
        series_limit: Option<usize>,
        #[serde(default)]
        all_series: bool,
        offset: Option<OffsetPolicy>,
    },
    Scatter {
        name: String,
        category_field: Option<String>,
        value_field: String,
    },
    LineArea {
        name: String,
        value_field: String,
    },
    YearSelector {
        name: String,
    },
}

impl ChartDefinition {
    pub fn name(&self) -> &str {
        match self {
            ChartDefinition::Choropleth { name, .. }
            | ChartDefinition::Bar { name, .. }
            | ChartDefinition::Parallel { name, .. }
            | ChartDefinition::Stream { name, .. }
            | ChartDefinition::Scatter { name, .. }
            | ChartDefinition::LineArea { name, .. }
            | ChartDefinition::YearSelector { name } => name,
        }
    }
}

impl DashboardConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> ConfigResult<Self> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> ConfigResult<Self> {
        serde_json::from_str(json_str).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> ConfigResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load a `.json` or TOML file and validate it
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&text)?,
            _ => Self::from_toml(&text)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if self.dataset.year_field.trim().is_empty() {
            return Err(ConfigError::MissingValue("dataset.year_field".to_string()));
        }
        if self.selection.category_field.trim().is_empty() {
            return Err(ConfigError::MissingValue("selection.category_field".to_string()));
        }
        if self.views.top_n == 0 {
            return Err(ConfigError::OutOfRange("views.top_n must be positive".to_string()));
        }
        if self.views.stream_series == 0 {
            return Err(ConfigError::OutOfRange(
                "views.stream_series must be positive".to_string(),
            ));
        }

        for chart in &self.views.charts {
            if chart.name().trim().is_empty() {
                return Err(ConfigError::MissingValue("chart name".to_string()));
            }
            match chart {
                ChartDefinition::Bar { top_n: Some(0), name, .. } => {
                    return Err(ConfigError::OutOfRange(format!("{}: top_n must be positive", name)));
                }
                ChartDefinition::Stream { series_limit: Some(0), name, .. } => {
                    return Err(ConfigError::OutOfRange(format!(
                        "{}: series_limit must be positive",
                        name
                    )));
                }
                ChartDefinition::Parallel { axes, name, .. } if axes.is_empty() => {
                    return Err(ConfigError::MissingValue(format!("{}: axes", name)));
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Selection settings for the dispatcher
    pub fn selection_config(&self) -> SelectionConfig {
        SelectionConfig::new(self.selection.category_field.as_str())
            .with_default_year(self.selection.default_year)
    }

    /// Build the configured views, in order
    pub fn build_registry(&self) -> RegistryResult<ViewRegistry> {
        let mut registry = ViewRegistry::new();
        for chart in &self.views.charts {
            registry.register(self.build_view(chart))?;
        }
        Ok(registry)
    }

    fn build_view(&self, chart: &ChartDefinition) -> Box<dyn ViewSpec> {
        let category = self.selection.category_field.as_str();
        match chart {
            ChartDefinition::Choropleth { name, region_field } => {
                Box::new(ChoroplethView::new(name.as_str(), region_field.as_str()))
            }
            ChartDefinition::Bar {
                name,
                field,
                value_field,
                top_n,
            } => {
                let field = field.as_deref().unwrap_or(category);
                match value_field {
                    Some(value_field) => {
                        Box::new(BarView::mean(name.as_str(), field, value_field.as_str()))
                    }
                    None => {
                        let top = TopN::new(top_n.unwrap_or(self.views.top_n))
                            .with_tie_break(self.views.tie_break);
                        Box::new(BarView::counts(name.as_str(), field, top))
                    }
                }
            }
            ChartDefinition::Parallel {
                name,
                axes,
                color_field,
            } => {
                let view = ParallelView::new(name.as_str(), axes.clone());
                match color_field {
                    Some(field) => Box::new(view.with_color_field(field.as_str())),
                    None => Box::new(view),
                }
            }
            ChartDefinition::Stream {
                name,
                series_field,
                series_limit,
                all_series,
                offset,
            } => {
                let view = StreamView::new(name.as_str(), series_field.as_deref().unwrap_or(category))
                    .with_offset(offset.unwrap_or(self.views.stream_offset));
                if *all_series {
                    Box::new(view)
                } else {
                    Box::new(view.with_series_limit(series_limit.unwrap_or(self.views.stream_series)))
                }
            }
            ChartDefinition::Scatter {
                name,
                category_field,
                value_field,
            } => Box::new(ScatterView::new(
                name.as_str(),
                category_field.as_deref().unwrap_or(category),
                value_field.as_str(),
            )),
            ChartDefinition::LineArea { name, value_field } => {
                Box::new(LineAreaView::new(name.as_str(), value_field.as_str()))
            }
            ChartDefinition::YearSelector { name } => Box::new(YearSelectorView::new(name.as_str())),
        }
    }
}
