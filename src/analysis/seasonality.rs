use std::collections::BTreeMap;

use crate::config::DayOfYear;
use crate::domain::{DeltaRow, QuoteRow, SeasonalityPoint};
use crate::error::{Result, SeasonError};

/// First difference of the closing-price series.
/// `delta[0]` is 0 by convention: there is no prior observation.
pub fn compute_deltas(rows: &[QuoteRow]) -> Vec<DeltaRow> {
    let mut deltas = Vec::with_capacity(rows.len());
    let mut prev_close: Option<f64> = None;

    for row in rows {
        let delta = match prev_close {
            Some(prev) => row.close - prev,
            None => 0.0,
        };
        prev_close = Some(row.close);
        deltas.push(DeltaRow {
            date: row.date,
            close: row.close,
            delta,
        });
    }
    deltas
}

/// Derives the annual seasonality curve from a date-sorted quote table:
/// per-day-of-year mean delta, accumulated in ascending day order, with the
/// best-fit linear trend removed.
///
/// Days absent from the input are absent from the curve, never synthesized.
/// Grouping uses a BTreeMap so the mean and the cumulative sum see a fixed
/// ascending iteration order; output is bit-reproducible for a fixed input.
pub fn compute_seasonality(rows: &[QuoteRow]) -> Result<Vec<SeasonalityPoint>> {
    if rows.len() < 2 {
        return Err(SeasonError::InsufficientData { rows: rows.len() });
    }

    let deltas = compute_deltas(rows);

    let mut groups: BTreeMap<DayOfYear, (f64, usize)> = BTreeMap::new();
    for row in &deltas {
        let entry = groups
            .entry(DayOfYear::from_date(row.date))
            .or_insert((0.0, 0));
        entry.0 += row.delta;
        entry.1 += 1;
    }

    let mut points = Vec::with_capacity(groups.len());
    let mut running = 0.0;
    for (day, (sum, count)) in groups {
        let average = sum / count as f64;
        running += average;
        points.push(SeasonalityPoint {
            day_of_year: day,
            average_delta: average,
            cumulative_delta: running,
            detrended_value: 0.0,
        });
    }

    let mut values: Vec<f64> = points.iter().map(|p| p.cumulative_delta).collect();
    detrend(&mut values);
    for (point, value) in points.iter_mut().zip(values) {
        point.detrended_value = value;
    }

    Ok(points)
}

/// Subtracts the ordinary-least-squares line fitted against the sequence
/// index 0..N-1, isolating the cyclical pattern from long-run drift.
/// Linear detrending is kept for output compatibility; callers wanting a
/// different trend model can skip this and fit their own.
pub fn detrend(values: &mut [f64]) {
    let n = values.len();
    if n < 2 {
        // A single point carries no trend to remove
        for v in values.iter_mut() {
            *v = 0.0;
        }
        return;
    }

    let n_f = n as f64;
    let mean_x = (n_f - 1.0) / 2.0;
    let mean_y = values.iter().sum::<f64>() / n_f;

    let mut ss_xy = 0.0;
    let mut ss_xx = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let dx = i as f64 - mean_x;
        ss_xy += dx * (y - mean_y);
        ss_xx += dx * dx;
    }

    let slope = ss_xy / ss_xx;
    let intercept = mean_y - slope * mean_x;

    for (i, v) in values.iter_mut().enumerate() {
        *v -= intercept + slope * i as f64;
    }
}
