//! Event dispatcher
//!
//! The dispatcher owns the record set, the selection and the registered
//! views. Each event is applied and every view re-rendered before
//! `dispatch` returns; `&mut self` keeps a second event from interleaving.

use crate::config::DashboardConfig;
use crate::error::{CrossviewResult, InteractionError, InteractionResult, RenderError};
use crate::interaction::Interaction;
use crate::registry::ViewRegistry;
use crate::view::{Renderer, ViewContext};
use crossview_io::RecordSet;
use crossview_selection::{
    Brush, Change, Selection, SelectionConfig, SelectionEvent, SelectionState,
};
use crossview_stats::Bucket;
use tracing::{debug, warn};

/// A view that failed to prepare or render
#[derive(Debug)]
pub struct ViewFailure {
    pub view: String,
    pub error: RenderError,
}

/// Outcome of one dispatch or full render
#[derive(Debug, Default)]
pub struct DispatchReport {
    /// Event that triggered the render, `None` for a plain redraw
    pub event: Option<SelectionEvent>,
    /// Parts of the selection the event changed
    pub change: Change,
    /// Views rendered successfully, in registration order
    pub rendered: Vec<String>,
    /// Views that failed
    pub failures: Vec<ViewFailure>,
}

impl DispatchReport {
    /// Whether every view rendered
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Coordinates one selection across all registered views
pub struct Dispatcher<R: Renderer> {
    records: RecordSet,
    selection: Selection,
    registry: ViewRegistry,
    renderer: R,
}

impl<R: Renderer> Dispatcher<R> {
    pub fn new(
        records: RecordSet,
        selection: SelectionConfig,
        registry: ViewRegistry,
        renderer: R,
    ) -> Self {
        Self {
            records,
            selection: Selection::new(selection),
            registry,
            renderer,
        }
    }

    /// Validate a configuration and build its views
    pub fn from_config(
        records: RecordSet,
        config: &DashboardConfig,
        renderer: R,
    ) -> CrossviewResult<Self> {
        config.validate()?;
        let registry = config.build_registry()?;
        Ok(Self::new(records, config.selection_config(), registry, renderer))
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    pub fn state(&self) -> &SelectionState {
        self.selection.state()
    }

    pub fn selection_config(&self) -> &SelectionConfig {
        self.selection.config()
    }

    pub fn registry(&self) -> &ViewRegistry {
        &self.registry
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Apply an event, then re-render every view
    pub fn dispatch(&mut self, event: SelectionEvent) -> DispatchReport {
        let change = self.selection.apply(&event, &self.records);
        debug!(event = %event, ?change, "Dispatching");

        let mut report = self.render_all();
        report.event = Some(event);
        report.change = change;
        report
    }

    /// Render every view against the current selection
    pub fn render_all(&mut self) -> DispatchReport {
        let mut report = DispatchReport::default();
        let state = self.selection.state();
        let config = self.selection.config();

        for view in self.registry.iter() {
            let ctx = ViewContext::scoped(&self.records, state, config, view.scope());
            let result = view
                .prepare(&ctx)
                .and_then(|data| self.renderer.render(view.name(), &data, state));

            match result {
                Ok(()) => report.rendered.push(view.name().to_string()),
                Err(error) => {
                    warn!(view = view.name(), error = %error, "View failed to render");
                    report.failures.push(ViewFailure {
                        view: view.name().to_string(),
                        error,
                    });
                }
            }
        }

        report
    }

    /// Turn a raw interaction into a selection event
    pub fn translate(&self, interaction: &Interaction) -> InteractionResult<SelectionEvent> {
        let event = match interaction {
            Interaction::ClickBar { view, bucket } => {
                self.require_category_view(view)?;
                match bucket {
                    Bucket::Key(key) => SelectionEvent::SetCategory(key.clone()),
                    Bucket::Other => return Err(InteractionError::OtherBucket),
                }
            }
            Interaction::ClickLine { id } => {
                let record = self
                    .records
                    .get(*id)
                    .ok_or(InteractionError::UnknownRecord(*id))?;
                let field = &self.selection.config().category_field;
                let value = record
                    .category(field)
                    .ok_or_else(|| InteractionError::MissingCategory {
                        id: *id,
                        field: field.clone(),
                    })?;
                SelectionEvent::SetCategory(value.to_string())
            }
            Interaction::ClickLayer { view, key } => {
                self.require_category_view(view)?;
                SelectionEvent::SetCategory(key.clone())
            }
            Interaction::ClickYearPoint { year } => SelectionEvent::SetYear(Some(*year)),
            Interaction::YearButton { year } => SelectionEvent::SetYear(*year),
            Interaction::Brush { view, range } => {
                let spec = self
                    .registry
                    .get(view)
                    .ok_or_else(|| InteractionError::UnknownView(view.clone()))?;
                let axes = spec
                    .brush_axes(&self.records)
                    .ok_or_else(|| InteractionError::NotBrushable(view.clone()))?;
                SelectionEvent::ApplyBrush(Brush::new(axes, *range))
            }
            Interaction::BrushCleared => SelectionEvent::ClearBrush,
        };
        Ok(event)
    }

    /// Check that clicks on `view` select values of the category field
    fn require_category_view(&self, view: &str) -> InteractionResult<()> {
        let spec = self
            .registry
            .get(view)
            .ok_or_else(|| InteractionError::UnknownView(view.to_string()))?;
        let field = spec
            .click_field()
            .ok_or_else(|| InteractionError::NotClickable(view.to_string()))?;
        let expected = &self.selection.config().category_field;
        if field != expected {
            return Err(InteractionError::FieldMismatch {
                view: view.to_string(),
                field: field.to_string(),
                expected: expected.clone(),
            });
        }
        Ok(())
    }

    /// Translate an interaction and dispatch the resulting event
    pub fn interact(&mut self, interaction: &Interaction) -> CrossviewResult<DispatchReport> {
        let event = self.translate(interaction)?;
        debug!(interaction = interaction.name(), "Interaction translated");
        Ok(self.dispatch(event))
    }
}
