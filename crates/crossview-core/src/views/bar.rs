//! Bar chart over one categorical field
//!
//! Two flavours: counts with a top-N + "Other" rollup, and the mean of a
//! numeric field per category. Both honour the year filter only, since the
//! bars themselves are the category breakdown.

use crate::error::RenderResult;
use crate::view::{BarData, BarDatum, BarValue, ViewContext, ViewData, ViewKind, ViewScope, ViewSpec};
use crossview_io::FieldKind;
use crossview_stats::{count_by, mean_over, top_n_with_other, Bucket, Domain, TopN};

/// Headroom above the tallest mean bar
const MEAN_HEADROOM: f64 = 1.1;

/// What a bar's height measures
#[derive(Debug, Clone, PartialEq)]
pub enum BarMeasure {
    /// Record counts, ranked, with everything beyond the top N merged
    Count(TopN),
    /// Mean of a numeric field
    Mean { value_field: String },
}

/// Bar chart view
#[derive(Debug, Clone)]
pub struct BarView {
    name: String,
    field: String,
    measure: BarMeasure,
}

impl BarView {
    /// Count records per value of `field`, keeping the `top_n` largest
    pub fn counts(name: impl Into<String>, field: impl Into<String>, top: TopN) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
            measure: BarMeasure::Count(top),
        }
    }

    /// Mean of `value_field` per value of `field`
    pub fn mean(
        name: impl Into<String>,
        field: impl Into<String>,
        value_field: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            field: field.into(),
            measure: BarMeasure::Mean {
                value_field: value_field.into(),
            },
        }
    }

    pub fn measure(&self) -> &BarMeasure {
        &self.measure
    }

    fn highlighted(&self, ctx: &ViewContext<'_>, bucket: &Bucket<String>, brushed: &[&str]) -> bool {
        match bucket {
            Bucket::Key(key) => {
                (ctx.selection.category_field == self.field && ctx.state.is_active_category(key))
                    || brushed.contains(&key.as_str())
            }
            Bucket::Other => false,
        }
    }
}

impl ViewSpec for BarView {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ViewKind {
        ViewKind::Bar
    }

    fn scope(&self) -> ViewScope {
        ViewScope::YEAR
    }

    fn click_field(&self) -> Option<&str> {
        Some(&self.field)
    }

    fn prepare(&self, ctx: &ViewContext<'_>) -> RenderResult<ViewData> {
        ctx.require_field(&self.name, &self.field, FieldKind::Categorical)?;
        let brushed: Vec<&str> = ctx.brushed_values(&self.field).into_iter().collect();
        let field = self.field.as_str();

        let data = match &self.measure {
            BarMeasure::Count(top) => {
                let counts = count_by(ctx.subset.iter().copied(), |r| {
                    r.category(field).unwrap_or_default().to_string()
                });
                let bars: Vec<BarDatum> = top_n_with_other(&counts, top)
                    .into_iter()
                    .map(|ranked| BarDatum {
                        highlighted: self.highlighted(ctx, &ranked.bucket, &brushed),
                        bucket: ranked.bucket,
                        value: BarValue::Count(ranked.count),
                    })
                    .collect();
                let max = bars.iter().filter_map(|b| b.value.as_f64()).reduce(f64::max);
                BarData {
                    bars,
                    y_domain: Domain::zero_based(max, 1.0).ensure_span(),
                }
            }
            BarMeasure::Mean { value_field } => {
                ctx.require_field(&self.name, value_field, FieldKind::Numeric)?;
                let domain = ctx.records.distinct_values(field);
                let means = mean_over(
                    &domain,
                    ctx.subset.iter().copied(),
                    |r| r.category(field).unwrap_or_default().to_string(),
                    |r| r.numeric_or_zero(value_field),
                );
                let bars = means
                    .entries()
                    .iter()
                    .map(|(key, mean)| {
                        let bucket = Bucket::Key(key.clone());
                        BarDatum {
                            highlighted: self.highlighted(ctx, &bucket, &brushed),
                            bucket,
                            value: BarValue::Mean(*mean),
                        }
                    })
                    .collect();
                BarData {
                    bars,
                    y_domain: Domain::zero_based(means.max_value(), MEAN_HEADROOM).ensure_span(),
                }
            }
        };

        Ok(ViewData::Bar(data))
    }
}
