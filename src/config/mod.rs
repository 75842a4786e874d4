//! Configuration module for the seasonality pipeline.

mod pipeline;
mod types;

// Re-export commonly used items
pub use pipeline::{
    DATE_FORMAT, DELIMITER_CANDIDATES, FALLBACK_DELIMITER, PipelineConfig, SIX_COLUMN_FIELD_COUNT,
    ScaleSettings, SchemaSelection,
};
pub use types::{Compression, DayOfYear};
