//! Domain value types for the seasonality pipeline.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Calendar day-of-year, 1..=366, proleptic Gregorian.
///
/// Year identity is deliberately discarded: the seasonality curve is a single
/// repeating annual signal, so the same calendar day maps to the same key in
/// every year. Day 366 only exists in leap years and carries fewer samples
/// than other days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayOfYear(u32);

impl DayOfYear {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 366;

    pub const fn new(val: u32) -> Self {
        let v = if val < Self::MIN {
            Self::MIN
        } else if val > Self::MAX {
            Self::MAX
        } else {
            val
        };
        Self(v)
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self::new(date.ordinal())
    }

    #[inline]
    pub fn value(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for DayOfYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "day {}", self.0)
    }
}

/// Visual-compression divisor for the display scale.
///
/// 4.0 makes the seasonality overlay occupy roughly a quarter of the price
/// axis height. A presentation constant, kept overridable.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Compression(f64);

impl Compression {
    pub const DEFAULT_VALUE: f64 = 4.0;
    pub const DEFAULT: Self = Self(Self::DEFAULT_VALUE);
    pub const MIN_EPSILON: f64 = 1e-9;

    pub const fn new(val: f64) -> Self {
        // The factor is a divisor; never let it reach zero
        let v = if val < Self::MIN_EPSILON {
            Self::MIN_EPSILON
        } else {
            val
        };
        Self(v)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for Compression {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for Compression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}x", self.0)
    }
}
