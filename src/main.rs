//! CLI entry point for the survey chart tool.
//!
//! Loads the grocery survey dataset from a file or URL and prints chart-ready
//! data for the grouped bar chart, box plot and scatter plot.

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::ffi::OsStr;
use std::path::Path;
use survey_charts::output::{Export, print_pretty, write_crosstab_csv, write_json};
use survey_charts::source::load_source;
use survey_charts::views::{
    BoxPlotView, BrushSelection, ChartLayout, Emphasis, GroupedBarView, ScatterView,
};
use survey_charts::{CrossTab, FamilySize, family_selection};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const DEFAULT_DATA_PATH: &str = "data/grocery_survey.csv";

#[derive(Parser)]
#[command(name = "survey_charts")]
#[command(about = "Chart-ready aggregates from the grocery survey dataset", long_about = None)]
struct Cli {
    /// Path or URL of the survey CSV [default: $SURVEY_DATA_PATH, then data/grocery_survey.csv]
    #[arg(short, long, global = true, value_name = "FILE_OR_URL")]
    source: Option<String>,

    /// Write output to this file instead of stdout
    #[arg(short, long, global = true)]
    output: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grouped bar chart: record counts per chain and payment method
    Bars,
    /// Box plot: purchase amount per family size
    Boxplot,
    /// Scatter plot: age against income, with optional brush and family highlight
    Scatter {
        /// Brush rectangle in plot-area pixels: x0,y0,x1,y1
        #[arg(long, allow_hyphen_values = true)]
        brush: Option<BrushSelection>,

        /// Family size clicked on the box plot; matching points are highlighted
        #[arg(long)]
        family: Option<FamilySize>,
    },
    /// Chain × payment method counts as CSV
    CrosstabCsv,
}

/// Scatter output: the view plus the result of any brush and highlight.
#[derive(Serialize)]
struct ScatterReport<'a> {
    #[serde(flatten)]
    view: &'a ScatterView,
    brushed: Option<Vec<usize>>,
    emphasis: Vec<Emphasis>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/survey_charts.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("survey_charts.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let source = cli
        .source
        .or_else(|| std::env::var("SURVEY_DATA_PATH").ok())
        .unwrap_or_else(|| DEFAULT_DATA_PATH.to_string());
    let output = cli.output.as_deref();

    let records = load_source(&source).await?;

    match cli.command {
        Commands::Bars => {
            let view = GroupedBarView::build(&records, ChartLayout::bar_chart());
            print_pretty(&view.crosstab);
            info!(
                chains = view.crosstab.rows().len(),
                payment_methods = view.crosstab.columns().len(),
                "Grouped bar chart ready"
            );
            write_json(output, &Export::new("grouped_bar", &view))?;
        }
        Commands::Boxplot => {
            let view = BoxPlotView::build(&records, ChartLayout::box_plot());
            let outliers: usize = view.boxes.iter().map(|b| b.summary.outliers.len()).sum();
            info!(groups = view.boxes.len(), outliers, "Box plot ready");
            write_json(output, &Export::new("box_plot", &view))?;
        }
        Commands::Scatter { brush, family } => {
            // Scales exist once the view is built; brushing and the selection
            // link both hang off the finished view.
            let view = ScatterView::build(&records, ChartLayout::scatter_plot());
            let linked = view.follow_selection(family_selection());

            if let Some(family) = family {
                let boxes = BoxPlotView::build(&records, ChartLayout::box_plot());
                if !boxes.select_family(family, family_selection()) {
                    warn!(family, "No records with this family size; nothing highlighted");
                }
            }

            let brushed = brush.map(|selection| view.brushed(&selection));
            if let Some(indices) = &brushed {
                info!(selected = indices.len(), "Brush applied");
            }

            let report = ScatterReport {
                view: &view,
                brushed,
                emphasis: linked.emphasis(),
            };
            info!(
                points = view.points.len(),
                highlighted = linked.highlighted_count(),
                "Scatter plot ready"
            );
            drop(linked);

            write_json(output, &Export::new("scatter", &report))?;
        }
        Commands::CrosstabCsv => {
            let crosstab = CrossTab::by_chain_and_payment(&records);
            write_crosstab_csv(output, "Chain", &crosstab)?;
        }
    }

    Ok(())
}
