//! Year buttons

use crate::error::RenderResult;
use crate::view::{ViewContext, ViewData, ViewKind, ViewScope, ViewSpec, YearButton, YearSelectorData};

#[derive(Debug, Clone)]
pub struct YearSelectorView {
    name: String,
}

impl YearSelectorView {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl ViewSpec for YearSelectorView {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ViewKind {
        ViewKind::YearSelector
    }

    fn scope(&self) -> ViewScope {
        ViewScope::NONE
    }

    fn prepare(&self, ctx: &ViewContext<'_>) -> RenderResult<ViewData> {
        let years = ctx
            .records
            .distinct_years()
            .into_iter()
            .map(|year| YearButton {
                year,
                selected: ctx.state.active_year == Some(year),
            })
            .collect();

        Ok(ViewData::YearSelector(YearSelectorData {
            years,
            all_selected: ctx.state.active_year.is_none(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::fixtures;
    use crossview_selection::{SelectionConfig, SelectionState};

    #[test]
    fn test_selected_year() {
        let records = fixtures::salaries();
        let config = SelectionConfig::new("job_title").with_default_year(Some(2022));
        let state = SelectionState::new(&config);
        let view = YearSelectorView::new("years");
        let ctx = ViewContext::scoped(&records, &state, &config, view.scope());

        match view.prepare(&ctx) {
            Ok(ViewData::YearSelector(data)) => {
                let selected: Vec<i32> = data.years.iter().filter(|b| b.selected).map(|b| b.year).collect();
                assert_eq!(selected, vec![2022]);
                assert!(!data.all_selected);
                assert_eq!(data.years.len(), 3);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
