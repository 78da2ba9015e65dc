//! Scatter plot of a numeric field against category position
//!
//! This is the brushing view: its brush axes are the category point scale
//! on x and the numeric field on y.

use crate::error::RenderResult;
use crate::view::{ScatterData, ScatterPoint, ViewContext, ViewData, ViewKind, ViewScope, ViewSpec};
use crossview_io::{FieldKind, RecordSet};
use crossview_selection::{BrushAxes, Coordinate};
use crossview_stats::{extent, Domain};

/// Y padding below and above the data extent
const Y_PADDING: (f64, f64) = (0.95, 1.05);

#[derive(Debug, Clone)]
pub struct ScatterView {
    name: String,
    category_field: String,
    value_field: String,
}

impl ScatterView {
    pub fn new(
        name: impl Into<String>,
        category_field: impl Into<String>,
        value_field: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category_field: category_field.into(),
            value_field: value_field.into(),
        }
    }
}

impl ViewSpec for ScatterView {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ViewKind {
        ViewKind::Scatter
    }

    fn scope(&self) -> ViewScope {
        ViewScope::BOTH
    }

    fn prepare(&self, ctx: &ViewContext<'_>) -> RenderResult<ViewData> {
        ctx.require_field(&self.name, &self.category_field, FieldKind::Categorical)?;
        ctx.require_field(&self.name, &self.value_field, FieldKind::Numeric)?;

        let categories = ctx.records.distinct_values(&self.category_field);
        let points: Vec<ScatterPoint> = ctx
            .subset
            .iter()
            .filter_map(|r| {
                let category = r.category(&self.category_field)?;
                let x = categories.iter().position(|c| c == category)?;
                Some(ScatterPoint {
                    id: r.id,
                    category: category.to_string(),
                    x,
                    y: r.numeric_or_zero(&self.value_field),
                    brushed: ctx.state.is_brushed(r.id),
                })
            })
            .collect();

        let y_domain = Domain::from_extent(extent(points.iter().map(|p| p.y)))
            .padded(Y_PADDING.0, Y_PADDING.1)
            .ensure_span();

        Ok(ViewData::Scatter(ScatterData {
            categories,
            points,
            y_domain,
        }))
    }

    fn brush_axes(&self, records: &RecordSet) -> Option<BrushAxes> {
        Some(BrushAxes::new(
            Coordinate::categorical(
                self.category_field.clone(),
                records.distinct_values(&self.category_field),
            ),
            Coordinate::numeric(self.value_field.clone()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::fixtures;
    use crossview_io::RecordId;
    use crossview_selection::{SelectionConfig, SelectionState};

    #[test]
    fn test_points_and_padding() {
        let records = fixtures::salaries();
        let config = SelectionConfig::new("job_title");
        let state = SelectionState {
            active_year: Some(2021),
            brushed: [RecordId(2)].into_iter().collect(),
            ..SelectionState::default()
        };
        let view = ScatterView::new("scatter", "job_title", "salary");
        let ctx = ViewContext::scoped(&records, &state, &config, view.scope());

        let data = match view.prepare(&ctx) {
            Ok(ViewData::Scatter(data)) => data,
            other => panic!("unexpected: {:?}", other),
        };

        assert_eq!(data.categories, vec!["Data Scientist", "Data Engineer", "ML Engineer"]);
        assert_eq!(data.points.len(), 3);
        assert_eq!(data.points[2].x, 1);
        assert!(data.points[2].brushed);
        assert!((data.y_domain.min - 76.0).abs() < 1e-9);
        assert!((data.y_domain.max - 126.0).abs() < 1e-9);
    }

    #[test]
    fn test_brush_axes_use_category_domain() {
        let records = fixtures::salaries();
        let view = ScatterView::new("scatter", "job_title", "salary");
        let axes = view.brush_axes(&records);

        match axes.map(|a| a.x) {
            Some(Coordinate::Categorical { domain, .. }) => assert_eq!(domain.len(), 3),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
