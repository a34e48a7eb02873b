use clap::{Args, Parser, Subcommand, ValueEnum};
use pb_app::{
    AppError, AppResult, ChartRenderer, ConfigOverrides, CycleEvent, CycleOutcome, DataSource,
    FileSource, FixedSelection, TableRenderer, format_timestamp, query,
};
use pb_core::{ChartSpec, PredictionTable};
use pb_data::{BenchmarkTable, DashboardConfig, LabelConfig};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pb-cli")]
#[command(about = "Predboard CLI - benchmark and price prediction reports", long_about = None)]
struct Cli {
    #[command(flatten)]
    sources: SourceArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Dashboard config YAML (dataset paths, column names, axis labels)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Prediction dataset (overrides the config)
    #[arg(long, global = true)]
    predictions: Option<PathBuf>,
    /// Benchmark dataset (overrides the config)
    #[arg(long, global = true)]
    benchmark: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the benchmark report
    Benchmark,
    /// Print the column names of the prediction dataset
    Columns,
    /// List entity keys in the prediction dataset
    Keys,
    /// Plot actual vs predicted values for one entity as text
    Show {
        /// Entity key (e.g. a ticker)
        key: String,
    },
    /// Export the aligned series for one entity as CSV
    ExportSeries {
        /// Entity key (e.g. a ticker)
        key: String,
        /// Output file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    Csv,
    Json,
}

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", error_report(&e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> AppResult<()> {
    let config = load_config(&cli.sources)?;

    match cli.command {
        Commands::Benchmark => cmd_benchmark(&config),
        Commands::Columns => cmd_columns(&config),
        Commands::Keys => cmd_keys(&config),
        Commands::Show { key } => cmd_show(&config, &key),
        Commands::ExportSeries {
            key,
            output,
            format,
        } => cmd_export_series(&config, &key, output.as_deref(), format),
    }
}

/// Headline for the user, then the full error when it adds detail.
fn error_report(err: &AppError) -> String {
    let headline = err.user_message();
    let detail = err.to_string();
    if detail == headline {
        format!("Error: {}", headline)
    } else {
        format!("Error: {}\n  {}", headline, detail)
    }
}

fn load_config(args: &SourceArgs) -> AppResult<DashboardConfig> {
    let overrides = ConfigOverrides {
        predictions_path: args.predictions.clone(),
        benchmark_path: args.benchmark.clone(),
    };
    pb_app::resolve_config(args.config.as_deref(), &overrides)
}

fn cmd_benchmark(config: &DashboardConfig) -> AppResult<()> {
    let source = FileSource::new(config);
    let mut renderer = TextTable::new(io::stdout());
    let rows = pb_app::run_benchmark_cycle(&source, &mut renderer)?;
    println!("\n{} row(s)", rows);
    Ok(())
}

fn cmd_columns(config: &DashboardConfig) -> AppResult<()> {
    let source = FileSource::new(config);
    let columns = source.prediction_columns()?;

    println!("Columns in {}:", source.predictions_path().display());
    for column in &columns {
        let marker = if config.columns.required().contains(&column.as_str()) {
            "*"
        } else {
            " "
        };
        println!("  {} {}", marker, column);
    }
    println!("(* = used by the prediction view)");
    Ok(())
}

fn cmd_keys(config: &DashboardConfig) -> AppResult<()> {
    let source = FileSource::new(config);
    let table = source.load_predictions()?;
    let keys = query::list_entity_keys(&table);

    if keys.is_empty() {
        println!("No entities found in {}", source.predictions_path().display());
    } else {
        println!("Entities ({}):", keys.len());
        for key in keys {
            println!("  {} ({} rows)", key, table.count_key(&key));
        }
    }
    Ok(())
}

fn cmd_show(config: &DashboardConfig, key: &str) -> AppResult<()> {
    let source = FileSource::new(config);
    show_series(&source, key, &config.labels, io::stdout().lock())
}

/// One render cycle into `out`. An empty series ends normally once its empty
/// state is printed.
fn show_series<W: Write>(
    source: &dyn DataSource,
    key: &str,
    labels: &LabelConfig,
    out: W,
) -> AppResult<()> {
    let mut selection = FixedSelection::new(key);
    let mut renderer = TextChart::new(out);

    let result = pb_app::run_prediction_cycle_with_progress(
        source,
        &mut selection,
        &mut renderer,
        labels,
        Some(&mut |event: CycleEvent| {
            tracing::debug!(
                stage = event.stage.label(),
                elapsed_s = event.elapsed_wall_s,
                "render cycle"
            );
        }),
    );

    match result {
        Ok(CycleOutcome::Rendered { points, .. }) => {
            writeln!(renderer.out, "\n✓ Rendered {} point(s) for {}", points, key)?;
            Ok(())
        }
        Ok(CycleOutcome::NoSelection { .. }) | Err(AppError::EmptySeries { .. }) => Ok(()),
        Err(e) => Err(e),
    }
}

fn cmd_export_series(
    config: &DashboardConfig,
    key: &str,
    output: Option<&Path>,
    format: ExportFormat,
) -> AppResult<()> {
    let source = FileSource::new(config);
    let table = source.load_predictions()?;

    // Write to file or stdout
    if let Some(path) = output {
        let file = std::fs::File::create(path)?;
        if let Some(n) = export_series(&table, key, &config.labels, format, file)? {
            println!("✓ Exported {} data points to {}", n, path.display());
        }
    } else {
        export_series(&table, key, &config.labels, format, io::stdout().lock())?;
    }

    Ok(())
}

/// Write the aligned series for `key`. Returns `None`, and writes nothing,
/// when the series is empty.
fn export_series<W: Write>(
    table: &PredictionTable,
    key: &str,
    labels: &LabelConfig,
    format: ExportFormat,
    mut out: W,
) -> AppResult<Option<usize>> {
    let chart = match pb_app::prepare_chart(table, key, labels) {
        Ok(chart) => chart,
        Err(e @ AppError::EmptySeries { .. }) => {
            eprintln!("{}", e.user_message());
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    let n = match format {
        ExportFormat::Csv => pb_app::write_chart_csv(&chart, out)?,
        ExportFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &chart).map_err(|e| AppError::Render {
                message: e.to_string(),
            })?;
            writeln!(out)?;
            chart.len()
        }
    };
    Ok(Some(n))
}

/// Benchmark table as aligned plain-text columns.
struct TextTable<W: Write> {
    out: W,
}

impl<W: Write> TextTable<W> {
    fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> TableRenderer for TextTable<W> {
    fn render_table(&mut self, table: &BenchmarkTable) -> AppResult<()> {
        let widths: Vec<usize> = (0..table.column_count())
            .map(|col| {
                (0..table.row_count())
                    .map(|row| table.cell(row, col).chars().count())
                    .chain(std::iter::once(table.headers[col].chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let header: Vec<String> = table
            .headers
            .iter()
            .zip(&widths)
            .map(|(h, w)| format!("{:<w$}", h, w = *w))
            .collect();
        writeln!(self.out, "{}", header.join("  "))?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        writeln!(self.out, "{}", rule.join("  "))?;

        for row in 0..table.row_count() {
            let cells: Vec<String> = widths
                .iter()
                .enumerate()
                .map(|(col, w)| format!("{:<w$}", table.cell(row, col), w = *w))
                .collect();
            writeln!(self.out, "{}", cells.join("  "))?;
        }
        Ok(())
    }
}

/// Actual/predicted series as a text listing with a deviation summary.
struct TextChart<W: Write> {
    out: W,
}

impl<W: Write> TextChart<W> {
    fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> ChartRenderer for TextChart<W> {
    fn render(&mut self, chart: &ChartSpec) -> AppResult<()> {
        let labels = chart.labels();
        writeln!(self.out, "{}", labels.title)?;
        writeln!(
            self.out,
            "  {:<20} {:>14} {:>14} {:>10}",
            labels.x_label, labels.actual_name, labels.predicted_name, "Δ"
        )?;
        for (t, actual, predicted) in chart.points() {
            writeln!(
                self.out,
                "  {:<20} {:>14} {:>14} {:>10}",
                format_timestamp(t),
                cell(actual, false),
                cell(predicted, false),
                cell(predicted - actual, true)
            )?;
        }

        let summary = query::summarize_chart(chart)?;
        writeln!(self.out, "\nSummary ({}):", labels.y_label)?;
        writeln!(
            self.out,
            "  Points: {} ({} compared)",
            summary.point_count, summary.compared_count
        )?;
        writeln!(
            self.out,
            "  Range:  {} - {}",
            format_timestamp(summary.time_range.0),
            format_timestamp(summary.time_range.1)
        )?;
        writeln!(self.out, "  Mean |Δ|: {}", cell(summary.mean_abs_deviation, false))?;
        writeln!(self.out, "  RMS Δ:    {}", cell(summary.rms_deviation, false))?;
        writeln!(self.out, "  Max |Δ|:  {}", cell(summary.max_abs_deviation, false))?;
        Ok(())
    }

    fn render_empty(&mut self, message: &str) -> AppResult<()> {
        writeln!(self.out, "{}", message)?;
        Ok(())
    }
}

/// Fixed-precision value, `-` for a blank.
fn cell(value: f64, signed: bool) -> String {
    if value.is_nan() {
        "-".to_string()
    } else if signed {
        format!("{:+.4}", value)
    } else {
        format!("{:.4}", value)
    }
}
