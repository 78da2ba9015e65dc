//! Streamgraph of record counts per year, one layer per series value

use crate::error::RenderResult;
use crate::view::{StreamData, ViewContext, ViewData, ViewKind, ViewScope, ViewSpec};
use crossview_io::FieldKind;
use crossview_stats::{layers_extent, stack_series, Domain, OffsetPolicy};

#[derive(Debug, Clone)]
pub struct StreamView {
    name: String,
    series_field: String,
    series_limit: Option<usize>,
    offset: OffsetPolicy,
}

impl StreamView {
    /// One layer per distinct value of `series_field`, zero baseline
    pub fn new(name: impl Into<String>, series_field: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            series_field: series_field.into(),
            series_limit: None,
            offset: OffsetPolicy::Zero,
        }
    }

    /// Keep only the first `limit` distinct values as layers
    pub fn with_series_limit(mut self, limit: usize) -> Self {
        self.series_limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: OffsetPolicy) -> Self {
        self.offset = offset;
        self
    }
}

impl ViewSpec for StreamView {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ViewKind {
        ViewKind::Stream
    }

    fn scope(&self) -> ViewScope {
        ViewScope::NONE
    }

    fn click_field(&self) -> Option<&str> {
        Some(&self.series_field)
    }

    fn prepare(&self, ctx: &ViewContext<'_>) -> RenderResult<ViewData> {
        ctx.require_field(&self.name, &self.series_field, FieldKind::Categorical)?;
        let field = self.series_field.as_str();

        let years = ctx.records.distinct_years();
        let mut keys = ctx.records.distinct_values(field);
        if let Some(limit) = self.series_limit {
            keys.truncate(limit);
        }

        let layers = stack_series(
            ctx.subset.iter().copied(),
            |r| r.year,
            |r| r.category(field).unwrap_or_default().to_string(),
            &years,
            &keys,
            self.offset,
        );
        let y_domain = Domain::from_extent(layers_extent(&layers)).ensure_span();
        let highlighted = if ctx.selection.category_field == self.series_field {
            ctx.state
                .active_category
                .clone()
                .filter(|c| keys.contains(c))
        } else {
            None
        };

        Ok(ViewData::Stream(StreamData {
            years,
            layers,
            offset: self.offset,
            y_domain,
            highlighted,
        }))
    }
}
