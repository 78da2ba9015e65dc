//! Dispatcher integration tests
//!
//! End-to-end checks of the update protocol: every view renders once per
//! event, redraws are idempotent and one failing view never blocks the
//! rest.

use crossview_core::{
    BarView, CrossviewError, DashboardConfig, Dispatcher, Interaction, InteractionError,
    JsonRenderer, ParallelView, RenderError,
    RenderResult, Renderer, ScatterView, StreamView, ViewData, ViewRegistry, ViewScope, ViewSpec,
    YearSelectorView,
};
use crossview_io::{read_csv, Record, RecordId, RecordSchema, RecordSet};
use crossview_selection::{BrushRange, SelectionConfig, SelectionEvent, SelectionState};
use crossview_stats::{Bucket, TopN};
use proptest::prelude::*;
use rstest::rstest;
use std::io::Write;

fn dataset() -> RecordSet {
    let schema = RecordSchema::new("year")
        .with_categorical("category")
        .with_numeric("amount");
    let rows = [
        (2021, "A", 10.0),
        (2021, "A", 20.0),
        (2022, "B", 30.0),
        (2022, "B", 40.0),
        (2023, "A", 50.0),
    ];
    let records = rows
        .iter()
        .map(|(year, cat, amount)| {
            Record::new(RecordId(0), *year)
                .with_category("category", *cat)
                .with_numeric("amount", *amount)
        })
        .collect();
    RecordSet::from_records(schema, records)
}

fn registry() -> ViewRegistry {
    ViewRegistry::new()
        .with(YearSelectorView::new("years"))
        .and_then(|r| r.with(BarView::counts("counts", "category", TopN::new(8))))
        .and_then(|r| r.with(BarView::mean("means", "category", "amount")))
        .and_then(|r| r.with(ScatterView::new("scatter", "category", "amount")))
        .and_then(|r| r.with(StreamView::new("stream", "category")))
        .and_then(|r| r.with(ParallelView::new("parallel", vec!["amount".into(), "category".into()])))
        .unwrap()
}

fn dispatcher() -> Dispatcher<JsonRenderer> {
    Dispatcher::new(
        dataset(),
        SelectionConfig::new("category"),
        registry(),
        JsonRenderer::new(),
    )
}

/// Renderer that rejects one named view
struct RejectingRenderer {
    reject: &'static str,
    inner: JsonRenderer,
}

impl Renderer for RejectingRenderer {
    fn render(&mut self, view: &str, data: &ViewData, state: &SelectionState) -> RenderResult<()> {
        if view == self.reject {
            return Err(RenderError::Renderer {
                view: view.to_string(),
                message: "canvas lost".to_string(),
            });
        }
        self.inner.render(view, data, state)
    }
}

// === Scenarios ===

#[test]
fn test_year_filter_feeds_bar_counts() {
    let mut dispatcher = dispatcher();
    dispatcher.dispatch(SelectionEvent::SetYear(Some(2021)));

    let frame = dispatcher.renderer().frame("counts").unwrap();
    match &frame.data {
        ViewData::Bar(data) => {
            assert_eq!(data.bars.len(), 1);
            assert_eq!(data.bars[0].bucket, Bucket::Key("A".to_string()));
            assert_eq!(data.bars[0].value.as_f64(), Some(2.0));
        }
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn test_brush_then_category_clears_brush() {
    let mut dispatcher = dispatcher();
    let report = dispatcher
        .interact(&Interaction::Brush {
            view: "scatter".into(),
            range: BrushRange::new(0.0, 0.0, 0.0, 25.0),
        })
        .unwrap();
    assert!(report.change.brush);
    assert_eq!(dispatcher.state().brushed.len(), 2);

    let report = dispatcher.dispatch(SelectionEvent::SetCategory("A".into()));
    assert!(report.change.category);
    assert!(dispatcher.state().brushed.is_empty());

    // every scatter point reflects the cleared brush
    match &dispatcher.renderer().frame("scatter").unwrap().data {
        ViewData::Scatter(data) => assert!(data.points.iter().all(|p| !p.brushed)),
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn test_line_click_selects_record_category() {
    let mut dispatcher = dispatcher();
    dispatcher
        .interact(&Interaction::ClickLine { id: RecordId(2) })
        .unwrap();
    assert_eq!(dispatcher.state().active_category.as_deref(), Some("B"));

    // scoped views: the mean bars keep every category, the scatter only B
    match &dispatcher.renderer().frame("means").unwrap().data {
        ViewData::Bar(data) => assert_eq!(data.bars.len(), 2),
        other => panic!("unexpected: {:?}", other),
    }
    match &dispatcher.renderer().frame("scatter").unwrap().data {
        ViewData::Scatter(data) => assert_eq!(data.points.len(), 2),
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn test_bar_click_on_other_field_is_rejected() {
    let schema = RecordSchema::new("year")
        .with_categorical("region")
        .with_categorical("attack")
        .with_numeric("kills");
    let records = [
        (2001, "Middle East", "Bombing", 3.0),
        (2001, "South Asia", "Armed Assault", 1.0),
        (2002, "Middle East", "Bombing", 5.0),
    ]
    .iter()
    .map(|(year, region, attack, kills)| {
        Record::new(RecordId(0), *year)
            .with_category("region", *region)
            .with_category("attack", *attack)
            .with_numeric("kills", *kills)
    })
    .collect();
    let registry = ViewRegistry::new()
        .with(BarView::counts("attacks", "attack", TopN::new(8)))
        .and_then(|r| r.with(BarView::counts("regions", "region", TopN::new(8))))
        .and_then(|r| r.with(ScatterView::new("scatter", "region", "kills")))
        .unwrap();
    let mut dispatcher = Dispatcher::new(
        RecordSet::from_records(schema, records),
        SelectionConfig::new("region"),
        registry,
        JsonRenderer::new(),
    );
    dispatcher.render_all();

    let result = dispatcher.interact(&Interaction::ClickBar {
        view: "attacks".into(),
        bucket: Bucket::Key("Bombing".into()),
    });
    assert!(matches!(
        result,
        Err(CrossviewError::Interaction(InteractionError::FieldMismatch { .. }))
    ));
    assert_eq!(dispatcher.state().active_category, None);
    match &dispatcher.renderer().frame("scatter").unwrap().data {
        ViewData::Scatter(data) => assert_eq!(data.points.len(), 3),
        other => panic!("unexpected: {:?}", other),
    }

    // bars over the filter field still select
    dispatcher
        .interact(&Interaction::ClickBar {
            view: "regions".into(),
            bucket: Bucket::Key("Middle East".into()),
        })
        .unwrap();
    assert_eq!(dispatcher.state().active_category.as_deref(), Some("Middle East"));
    match &dispatcher.renderer().frame("scatter").unwrap().data {
        ViewData::Scatter(data) => assert_eq!(data.points.len(), 2),
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn test_render_is_idempotent() {
    let mut dispatcher = dispatcher();
    dispatcher.dispatch(SelectionEvent::SetYear(Some(2022)));
    let first = dispatcher.renderer().frames().to_vec();

    dispatcher.render_all();
    assert_eq!(dispatcher.renderer().frames(), first.as_slice());
}

#[test]
fn test_failing_renderer_does_not_block_other_views() {
    let renderer = RejectingRenderer {
        reject: "means",
        inner: JsonRenderer::new(),
    };
    let mut dispatcher = Dispatcher::new(
        dataset(),
        SelectionConfig::new("category"),
        registry(),
        renderer,
    );

    let report = dispatcher.dispatch(SelectionEvent::SetYear(Some(2021)));

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].view, "means");
    assert_eq!(report.rendered.len(), 5);
    assert_eq!(dispatcher.state().active_year, Some(2021));
    assert!(dispatcher.renderer().inner.frame("means").is_none());
    assert!(dispatcher.renderer().inner.frame("stream").is_some());
}

#[test]
fn test_misconfigured_view_is_reported() {
    let registry = registry()
        .with(ScatterView::new("broken", "category", "salary"))
        .unwrap();
    let mut dispatcher = Dispatcher::new(
        dataset(),
        SelectionConfig::new("category"),
        registry,
        JsonRenderer::new(),
    );

    let report = dispatcher.render_all();
    assert_eq!(report.failures.len(), 1);
    assert!(matches!(report.failures[0].error, RenderError::MissingField { .. }));
    assert_eq!(report.rendered.len(), 6);
}

#[test]
fn test_csv_to_frames() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "work_year,job_title,salary_in_usd").unwrap();
    writeln!(file, "2022,Data Scientist,100000").unwrap();
    writeln!(file, "2022,Data Engineer,n/a").unwrap();
    writeln!(file, "2023,Data Scientist,140000").unwrap();
    file.flush().unwrap();

    let config = DashboardConfig::from_toml(
        r#"
[dataset]
year_field = "work_year"
categorical = ["job_title"]
numeric = ["salary_in_usd"]

[selection]
category_field = "job_title"
default_year = 2022

[[views.charts]]
kind = "bar"
name = "salaries"
value_field = "salary_in_usd"

[[views.charts]]
kind = "line_area"
name = "trend"
value_field = "salary_in_usd"
"#,
    )
    .unwrap();

    let table = read_csv(file.path()).unwrap();
    let records = RecordSet::load(&table, &config.dataset.schema(&table)).unwrap();
    let mut dispatcher = Dispatcher::from_config(records, &config, JsonRenderer::new()).unwrap();

    let report = dispatcher.render_all();
    assert!(report.is_success());
    assert_eq!(dispatcher.state().active_year, Some(2022));

    match &dispatcher.renderer().frame("salaries").unwrap().data {
        ViewData::Bar(data) => {
            // the unparseable salary counts as zero
            assert_eq!(data.bars[1].value.as_f64(), Some(0.0));
            assert_eq!(data.bars[0].value.as_f64(), Some(100000.0));
        }
        other => panic!("unexpected: {:?}", other),
    }

    let json = dispatcher.renderer().to_json().unwrap();
    assert!(json.contains("\"view\": \"trend\""));
}

#[test]
fn test_event_json_shape() {
    let year: SelectionEvent = serde_json::from_str(r#"{"set_year": 2021}"#).unwrap();
    let all: SelectionEvent = serde_json::from_str(r#"{"set_year": null}"#).unwrap();
    let category: SelectionEvent = serde_json::from_str(r#"{"set_category": "A"}"#).unwrap();
    let clear: SelectionEvent = serde_json::from_str(r#""clear_brush""#).unwrap();

    assert_eq!(year, SelectionEvent::SetYear(Some(2021)));
    assert_eq!(all, SelectionEvent::SetYear(None));
    assert_eq!(category, SelectionEvent::SetCategory("A".to_string()));
    assert_eq!(clear, SelectionEvent::ClearBrush);
}

#[rstest]
#[case("counts", ViewScope::YEAR)]
#[case("means", ViewScope::YEAR)]
#[case("scatter", ViewScope::BOTH)]
#[case("parallel", ViewScope::BOTH)]
#[case("stream", ViewScope::NONE)]
#[case("years", ViewScope::NONE)]
fn test_view_scopes(#[case] name: &str, #[case] scope: ViewScope) {
    let registry = registry();
    assert_eq!(registry.get(name).map(|v| v.scope()), Some(scope));
}

// === Property-Based Tests ===

fn event_strategy() -> impl Strategy<Value = SelectionEvent> {
    prop_oneof![
        prop::option::of(2020i32..2024).prop_map(SelectionEvent::SetYear),
        prop_oneof![Just("A"), Just("B")].prop_map(|c| SelectionEvent::SetCategory(c.to_string())),
        Just(SelectionEvent::ClearBrush),
    ]
}

fn brush_strategy() -> impl Strategy<Value = Interaction> {
    (0.0f64..2.0, 0.0f64..60.0).prop_map(|(x, y)| Interaction::Brush {
        view: "scatter".into(),
        range: BrushRange::from_corners((0.0, 0.0), (x, y)),
    })
}

proptest! {
    #[test]
    fn test_every_view_renders_once_per_event(events in proptest::collection::vec(event_strategy(), 1..15)) {
        let mut dispatcher = dispatcher();
        let views = dispatcher.registry().len();

        for (i, event) in events.into_iter().enumerate() {
            let filter_event = event.changes_filter();
            let report = dispatcher.dispatch(event);
            prop_assert!(report.is_success());
            prop_assert_eq!(dispatcher.renderer().render_calls(), views * (i + 1));
            if filter_event {
                prop_assert!(dispatcher.state().brushed.is_empty());
            }
        }
    }

    #[test]
    fn test_redraw_matches_last_frame(
        events in proptest::collection::vec(event_strategy(), 0..8),
        brush in brush_strategy(),
    ) {
        let mut dispatcher = dispatcher();
        for event in events {
            dispatcher.dispatch(event);
        }
        prop_assert!(dispatcher.interact(&brush).is_ok());

        let before = dispatcher.renderer().frames().to_vec();
        dispatcher.render_all();
        prop_assert_eq!(dispatcher.renderer().frames(), before.as_slice());
    }
}
