use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::DayOfYear;

/// One normalized input row: a dated closing price.
/// The loader guarantees `close` is finite and rows are sorted by date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRow {
    pub date: NaiveDate,
    pub close: f64,

    // Present in the six-column shape, unused downstream
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub market: Option<String>,
}

impl QuoteRow {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self {
            date,
            close,
            open: None,
            high: None,
            low: None,
            market: None,
        }
    }

    pub fn day_of_year(&self) -> DayOfYear {
        DayOfYear::from_date(self.date)
    }
}

/// Row with the first difference of the closing-price series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeltaRow {
    pub date: NaiveDate,
    pub close: f64,
    pub delta: f64,
}

/// One point of the annual seasonality curve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalityPoint {
    pub day_of_year: DayOfYear,
    pub average_delta: f64,
    pub cumulative_delta: f64,
    pub detrended_value: f64,
}

/// Original row joined to the seasonality value of its calendar day.
/// `seasonality` is None when the day had no curve entry; callers must treat
/// that as missing, never as zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedRow {
    pub date: NaiveDate,
    pub close: f64,
    pub seasonality: Option<f64>,
}

/// Externally emitted row, serialized as `[close, seasonality, "YYYY-MM-DD"]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRow(pub f64, pub Option<f64>, pub String);
