//! Parallel-coordinates plot, one polyline per record

use crate::error::{RenderError, RenderResult};
use crate::view::{
    AxisScale, ParallelAxis, ParallelData, ParallelLine, ViewContext, ViewData, ViewKind, ViewScope,
    ViewSpec,
};
use crossview_io::{FieldKind, Record};
use crossview_stats::{extent, Domain};

#[derive(Debug, Clone)]
pub struct ParallelView {
    name: String,
    axes: Vec<String>,
    color_field: Option<String>,
}

impl ParallelView {
    /// View over the given axis fields, left to right
    pub fn new(name: impl Into<String>, axes: Vec<String>) -> Self {
        Self {
            name: name.into(),
            axes,
            color_field: None,
        }
    }

    /// Colour lines by a categorical field
    pub fn with_color_field(mut self, field: impl Into<String>) -> Self {
        self.color_field = Some(field.into());
        self
    }

    fn axis(&self, ctx: &ViewContext<'_>, field: &str) -> RenderResult<(ParallelAxis, FieldKind)> {
        let schema = ctx.records.schema();
        let descriptor = schema.field(field).ok_or_else(|| RenderError::MissingField {
            view: self.name.clone(),
            field: field.to_string(),
        })?;

        let scale = match descriptor.kind {
            FieldKind::Year => {
                let years = extent(ctx.subset.iter().map(|r| r.year as f64));
                AxisScale::Linear(Domain::from_extent(years).ensure_span())
            }
            FieldKind::Numeric => {
                let values = extent(ctx.subset.iter().map(|r| r.numeric_or_zero(field)));
                AxisScale::Linear(Domain::from_extent(values).ensure_span())
            }
            FieldKind::Categorical => AxisScale::Point(ctx.records.distinct_values(field)),
        };

        let axis = ParallelAxis {
            field: field.to_string(),
            label: descriptor.display_name().to_string(),
            scale,
        };
        Ok((axis, descriptor.kind))
    }
}

fn position(axis: &ParallelAxis, kind: FieldKind, record: &Record) -> f64 {
    match (kind, &axis.scale) {
        (FieldKind::Year, _) => record.year as f64,
        (FieldKind::Numeric, _) => record.numeric_or_zero(&axis.field),
        (FieldKind::Categorical, AxisScale::Point(domain)) => record
            .category(&axis.field)
            .and_then(|v| domain.iter().position(|d| d == v))
            .map(|i| i as f64)
            .unwrap_or(f64::NAN),
        (FieldKind::Categorical, AxisScale::Linear(_)) => f64::NAN,
    }
}

impl ViewSpec for ParallelView {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ViewKind {
        ViewKind::Parallel
    }

    fn scope(&self) -> ViewScope {
        ViewScope::BOTH
    }

    fn prepare(&self, ctx: &ViewContext<'_>) -> RenderResult<ViewData> {
        if let Some(field) = &self.color_field {
            ctx.require_field(&self.name, field, FieldKind::Categorical)?;
        }
        let (axes, kinds): (Vec<ParallelAxis>, Vec<FieldKind>) = self
            .axes
            .iter()
            .map(|field| self.axis(ctx, field))
            .collect::<RenderResult<Vec<_>>>()?
            .into_iter()
            .unzip();

        let lines = ctx
            .subset
            .iter()
            .map(|record| ParallelLine {
                id: record.id,
                values: axes
                    .iter()
                    .zip(kinds.iter())
                    .map(|(axis, kind)| position(axis, *kind, record))
                    .collect(),
                group: self
                    .color_field
                    .as_deref()
                    .and_then(|f| record.category(f))
                    .map(str::to_string),
                brushed: ctx.state.is_brushed(record.id),
            })
            .collect();

        Ok(ViewData::Parallel(ParallelData { axes, lines }))
    }
}
