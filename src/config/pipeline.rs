//! Pipeline configuration.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::config::Compression;

/// Date format of the input files (day.month.year).
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Delimiter used when sniffing finds no candidate on the first line.
pub const FALLBACK_DELIMITER: u8 = b';';

/// Delimiters the sniffer recognizes, in tie-break priority order.
pub const DELIMITER_CANDIDATES: [u8; 2] = [b';', b','];

/// Field count of the headerless `market;date;open;high;low;close` shape.
pub const SIX_COLUMN_FIELD_COUNT: usize = 6;

/// Input column layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum SchemaSelection {
    /// Decide from the header row: named Date/Close columns select
    /// `TwoColumn`, anything else is read as the six-column shape.
    #[default]
    Auto,
    /// Headerless `market;date;open;high;low;close`.
    SixColumn,
    /// Headered, with named `Date` and `Close` columns (others ignored).
    TwoColumn,
}

/// Display-scaling settings.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScaleSettings {
    /// Divisor controlling how much of the price axis the overlay occupies.
    pub compression: Compression,
}

/// The master pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub schema: SchemaSelection,

    /// When false the emitted rows carry the raw detrended seasonality and
    /// the chart client is expected to scale it.
    pub apply_display_scaling: bool,

    pub scale: ScaleSettings,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            schema: SchemaSelection::Auto,
            apply_display_scaling: true,
            scale: ScaleSettings::default(),
        }
    }
}
