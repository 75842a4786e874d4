use crate::config::Compression;
use crate::domain::{ChartRow, CombinedRow};
use crate::error::{Result, SeasonError};

/// Linear transform that overlays the seasonality curve on the price axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayScale {
    pub scale: f64,
    pub offset: f64,
}

impl DisplayScale {
    #[inline]
    pub fn apply(&self, seasonality: f64) -> f64 {
        seasonality * self.scale + self.offset
    }
}

/// Derives the display transform from the observed ranges.
///
/// `offset` centers the overlay on the midpoint of the close-price range;
/// `scale` maps the seasonality range into `1/compression` of the price
/// range. Both round half away from zero, matching the emitted whole-number
/// format. A curve with no variation has no usable scale and is reported as
/// [`SeasonError::DegenerateScale`] instead of dividing by zero.
pub fn scale_for_display(
    rows: &[CombinedRow],
    compression: Compression,
) -> Result<DisplayScale> {
    let mut min_close = f64::INFINITY;
    let mut max_close = f64::NEG_INFINITY;
    let mut min_seasonality = f64::INFINITY;
    let mut max_seasonality = f64::NEG_INFINITY;

    for row in rows {
        min_close = min_close.min(row.close);
        max_close = max_close.max(row.close);
        if let Some(s) = row.seasonality {
            min_seasonality = min_seasonality.min(s);
            max_seasonality = max_seasonality.max(s);
        }
    }

    // No rows, or no row carried a seasonality value
    if !min_close.is_finite() || !min_seasonality.is_finite() {
        return Err(SeasonError::DegenerateScale);
    }

    let seasonality_range = max_seasonality - min_seasonality;
    if seasonality_range <= f64::EPSILON {
        return Err(SeasonError::DegenerateScale);
    }

    let price_range = max_close - min_close;
    Ok(DisplayScale {
        scale: (price_range / (seasonality_range * compression.value())).round(),
        offset: ((max_close + min_close) / 2.0).round(),
    })
}

/// Emits the externally consumed rows, in chronological order.
///
/// Pass a scale to overlay the curve on the price axis, or `None` to emit
/// the raw detrended values and leave scaling to the chart client. A row
/// flagged by the composer keeps its missing marker (JSON `null`).
pub fn emit_chart_rows(rows: &[CombinedRow], scale: Option<&DisplayScale>) -> Vec<ChartRow> {
    rows.iter()
        .map(|row| {
            let seasonality = match (row.seasonality, scale) {
                (Some(s), Some(display)) => Some(display.apply(s)),
                (Some(s), None) => Some(s),
                (None, _) => None,
            };
            ChartRow(
                row.close,
                seasonality,
                row.date.format("%Y-%m-%d").to_string(),
            )
        })
        .collect()
}
