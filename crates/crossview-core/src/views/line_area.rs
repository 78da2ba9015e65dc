//! Line/area chart of a yearly mean, restricted to the active category

use crate::error::RenderResult;
use crate::view::{LineAreaData, LinePoint, ViewContext, ViewData, ViewKind, ViewScope, ViewSpec};
use crossview_io::FieldKind;
use crossview_stats::{extent, mean_over, Domain};

const Y_PADDING: (f64, f64) = (0.95, 1.05);

#[derive(Debug, Clone)]
pub struct LineAreaView {
    name: String,
    value_field: String,
}

impl LineAreaView {
    pub fn new(name: impl Into<String>, value_field: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value_field: value_field.into(),
        }
    }
}

impl ViewSpec for LineAreaView {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ViewKind {
        ViewKind::LineArea
    }

    fn scope(&self) -> ViewScope {
        ViewScope::CATEGORY
    }

    fn prepare(&self, ctx: &ViewContext<'_>) -> RenderResult<ViewData> {
        ctx.require_field(&self.name, &self.value_field, FieldKind::Numeric)?;
        let field = self.value_field.as_str();

        let years = ctx.records.distinct_years();
        let means = mean_over(&years, ctx.subset.iter().copied(), |r| r.year, |r| r.numeric_or_zero(field));

        let points: Vec<LinePoint> = means
            .entries()
            .iter()
            .map(|(year, mean)| LinePoint {
                year: *year,
                mean: *mean,
                selected: ctx.state.active_year == Some(*year),
            })
            .collect();

        // empty years stay out of the domain
        let y_domain = Domain::from_extent(extent(points.iter().filter_map(|p| p.mean.value())))
            .padded(Y_PADDING.0, Y_PADDING.1)
            .ensure_span();

        Ok(ViewData::LineArea(LineAreaData {
            category: ctx.state.active_category.clone(),
            points,
            y_domain,
        }))
    }
}
