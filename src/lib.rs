// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;

// Re-export commonly used types
pub use analysis::{
    DisplayScale, compose, compute_deltas, compute_seasonality, detrend, emit_chart_rows,
    scale_for_display,
};
pub use config::{Compression, PipelineConfig, ScaleSettings, SchemaSelection};
pub use data::QuoteLoader;
pub use domain::{ChartRow, CombinedRow, DeltaRow, QuoteRow, SeasonalityPoint};
pub use error::{LoadError, Result, SeasonError};

use std::io::Read;
use std::path::Path;

/// Runs the whole pipeline for one input file:
/// load -> seasonality -> rejoin by day-of-year -> (optional) display
/// scaling -> chart rows.
///
/// Each call is a pure function of its input. Nothing is shared across
/// invocations, so callers may run pipelines for different files in parallel
/// without coordination.
pub fn run_pipeline<P: AsRef<Path>>(path: P, config: &PipelineConfig) -> Result<Vec<ChartRow>> {
    let rows = QuoteLoader::new(config.schema).load_path(path)?;
    finish_pipeline(&rows, config)
}

/// Same as [`run_pipeline`], reading from an arbitrary byte stream.
pub fn run_pipeline_from_reader<R: Read>(
    reader: R,
    config: &PipelineConfig,
) -> Result<Vec<ChartRow>> {
    let rows = QuoteLoader::new(config.schema).load_reader(reader)?;
    finish_pipeline(&rows, config)
}

fn finish_pipeline(rows: &[QuoteRow], config: &PipelineConfig) -> Result<Vec<ChartRow>> {
    let curve = compute_seasonality(rows)?;
    let combined = compose(rows, &curve);

    let scale = if config.apply_display_scaling {
        Some(scale_for_display(&combined, config.scale.compression)?)
    } else {
        None
    };

    log::debug!(
        "pipeline: {} rows, {} curve points, scaling {}",
        rows.len(),
        curve.len(),
        if scale.is_some() { "applied" } else { "skipped" }
    );

    Ok(emit_chart_rows(&combined, scale.as_ref()))
}
