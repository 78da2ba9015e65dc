//! Choropleth map: record counts per region
//!
//! Colours use a log scale capped at the 99th percentile of region counts,
//! so a handful of very busy regions do not wash out the rest.

use crate::error::RenderResult;
use crate::view::{ChoroplethData, RegionDatum, ViewContext, ViewData, ViewKind, ViewScope, ViewSpec};
use crossview_io::FieldKind;
use crossview_stats::{count_by, quantile, Domain};

const COLOR_CAP_QUANTILE: f64 = 0.99;

#[derive(Debug, Clone)]
pub struct ChoroplethView {
    name: String,
    region_field: String,
}

impl ChoroplethView {
    pub fn new(name: impl Into<String>, region_field: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            region_field: region_field.into(),
        }
    }

    fn is_active(&self, ctx: &ViewContext<'_>, region: &str) -> bool {
        ctx.selection.category_field == self.region_field && ctx.state.is_active_category(region)
    }
}

impl ViewSpec for ChoroplethView {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ViewKind {
        ViewKind::Choropleth
    }

    fn scope(&self) -> ViewScope {
        ViewScope::BOTH
    }

    fn prepare(&self, ctx: &ViewContext<'_>) -> RenderResult<ViewData> {
        ctx.require_field(&self.name, &self.region_field, FieldKind::Categorical)?;
        let field = self.region_field.as_str();

        let counts = count_by(ctx.subset.iter().copied(), |r| {
            r.category(field).unwrap_or_default().to_string()
        });
        let cap = quantile(counts.entries().iter().map(|(_, c)| *c as f64), COLOR_CAP_QUANTILE)?
            .unwrap_or(0.0);
        let brushed = ctx.brushed_values(field);

        let regions = counts
            .entries()
            .iter()
            .map(|(region, count)| RegionDatum {
                region: region.clone(),
                count: *count,
                color_value: (*count as f64).min(cap).ln_1p(),
                highlighted: brushed.contains(region.as_str()) || self.is_active(ctx, region),
            })
            .collect();

        Ok(ViewData::Choropleth(ChoroplethData {
            regions,
            color_domain: Domain::new(0.0, cap.ln_1p()).ensure_span(),
        }))
    }
}
