use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tabled::{Table, Tabled};

use season_scope::{
    Compression, PipelineConfig, QuoteLoader, ScaleSettings, SchemaSelection, compute_seasonality,
    run_pipeline,
};

const ALLOWED_EXTENSION: &str = "csv";

#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Derive a repeating-calendar seasonality curve from daily quotes"
)]
struct Cli {
    /// Path to the delimited quote file
    input: PathBuf,

    /// Force the input schema instead of detecting it from the header
    #[arg(long, value_enum, default_value_t = SchemaSelection::Auto)]
    schema: SchemaSelection,

    /// Emit raw detrended seasonality values; the chart client scales them
    #[arg(long, default_value_t = false)]
    raw: bool,

    /// Visual-compression divisor for the display scale
    #[arg(long, default_value_t = Compression::DEFAULT_VALUE)]
    compression: f64,

    /// Print the per-day seasonality table instead of chart rows
    #[arg(long, default_value_t = false)]
    summary: bool,
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Day")]
    day: u32,
    #[tabled(rename = "Avg Delta")]
    average_delta: String,
    #[tabled(rename = "Cumulative")]
    cumulative_delta: String,
    #[tabled(rename = "Detrended")]
    detrended_value: String,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Cli::parse();

    if !has_allowed_extension(&args.input) {
        bail!(
            "file extension must be .{}: {}",
            ALLOWED_EXTENSION,
            args.input.display()
        );
    }

    if args.summary {
        return print_summary(&args);
    }

    let config = PipelineConfig {
        schema: args.schema,
        apply_display_scaling: !args.raw,
        scale: ScaleSettings {
            compression: Compression::new(args.compression),
        },
    };

    let rows = run_pipeline(&args.input, &config)
        .with_context(|| format!("failed to process {}", args.input.display()))?;

    log::info!("{} chart rows from {}", rows.len(), args.input.display());
    println!("{}", serde_json::to_string(&rows)?);
    Ok(())
}

fn has_allowed_extension(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ALLOWED_EXTENSION))
}

fn print_summary(args: &Cli) -> Result<()> {
    let quotes = QuoteLoader::new(args.schema)
        .load_path(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    let curve = compute_seasonality(&quotes)?;

    let rows: Vec<SummaryRow> = curve
        .iter()
        .map(|p| SummaryRow {
            day: p.day_of_year.value(),
            average_delta: format!("{:+.4}", p.average_delta),
            cumulative_delta: format!("{:+.4}", p.cumulative_delta),
            detrended_value: format!("{:+.4}", p.detrended_value),
        })
        .collect();

    log::info!(
        "{} quotes -> {} seasonality points",
        quotes.len(),
        rows.len()
    );
    println!("{}", Table::new(rows));
    Ok(())
}
