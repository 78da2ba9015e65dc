//! crossview command line
//!
//! Loads a CSV file, draws every configured view, applies the given events
//! in order and prints the final frames as JSON.
//!
//! ```text
//! crossview --data ds_salaries.csv --config dashboard.toml \
//!     --event '{"set_year": 2022}' --event '{"set_category": "Data Scientist"}'
//! ```

use clap::Parser;
use crossview_core::{CrossviewResult, DashboardConfig, Dispatcher, JsonRenderer};
use crossview_io::{read_csv, RecordSet};
use crossview_selection::SelectionEvent;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Coordinated chart views over a tabular dataset
#[derive(Parser, Debug)]
#[command(name = "crossview")]
#[command(version, about, long_about = None)]
struct Cli {
    /// CSV file to load
    #[arg(long)]
    data: PathBuf,

    /// Dashboard configuration (TOML, or JSON with a .json extension)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Selection event as JSON, applied in order
    #[arg(long = "event")]
    events: Vec<String>,
}

fn run(cli: Cli) -> CrossviewResult<String> {
    let config = match &cli.config {
        Some(path) => DashboardConfig::from_file(path)?,
        None => DashboardConfig::default(),
    };

    let table = read_csv(&cli.data)?;
    let schema = config.dataset.schema(&table);
    let (records, stats) = RecordSet::load_with_stats(&table, &schema)?;
    tracing::info!(
        records = records.len(),
        coerced = stats.coerced_cells,
        "Loaded {}",
        cli.data.display()
    );

    let mut dispatcher = Dispatcher::from_config(records, &config, JsonRenderer::new())?;
    if dispatcher.registry().is_empty() {
        tracing::warn!("No charts configured");
    }
    dispatcher.render_all();

    for raw in &cli.events {
        let event: SelectionEvent = serde_json::from_str(raw)?;
        let report = dispatcher.dispatch(event);
        if !report.is_success() {
            tracing::warn!("{} view(s) failed to render", report.failures.len());
        }
    }

    dispatcher.renderer().to_json().map_err(Into::into)
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(Cli::parse()) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
