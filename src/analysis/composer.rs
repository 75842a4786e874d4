use std::collections::HashMap;

use crate::config::DayOfYear;
use crate::domain::{CombinedRow, QuoteRow, SeasonalityPoint};

/// Left-joins every quote row to the detrended seasonality value of its
/// calendar day.
///
/// The join is many-to-one and keyed on day-of-year only, so the same
/// calendar day gets the same value in every year. Row order and row count
/// are preserved exactly. A day with no curve entry (impossible when the
/// curve was derived from the same table) is flagged as `None`, never
/// zero-filled.
pub fn compose(rows: &[QuoteRow], curve: &[SeasonalityPoint]) -> Vec<CombinedRow> {
    let by_day: HashMap<DayOfYear, f64> = curve
        .iter()
        .map(|p| (p.day_of_year, p.detrended_value))
        .collect();

    rows.iter()
        .map(|row| {
            let seasonality = by_day.get(&row.day_of_year()).copied();
            if seasonality.is_none() {
                log::warn!(
                    "no seasonality entry for {} ({})",
                    row.date,
                    row.day_of_year()
                );
            }
            CombinedRow {
                date: row.date,
                close: row.close,
                seasonality,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::compute_seasonality;
    use chrono::NaiveDate;

    fn quotes(series: &[(i32, u32, u32, f64)]) -> Vec<QuoteRow> {
        series
            .iter()
            .map(|&(y, m, d, close)| {
                QuoteRow::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), close)
            })
            .collect()
    }

    #[test]
    fn row_count_and_order_are_preserved() {
        let rows = quotes(&[
            (2020, 1, 1, 10.0),
            (2020, 1, 2, 11.0),
            (2021, 1, 1, 12.0),
            (2021, 1, 2, 13.0),
            (2022, 1, 1, 14.0),
        ]);
        let curve = compute_seasonality(&rows).unwrap();
        let combined = compose(&rows, &curve);

        assert_eq!(combined.len(), rows.len());
        for (combined_row, row) in combined.iter().zip(&rows) {
            assert_eq!(combined_row.date, row.date);
            assert_eq!(combined_row.close, row.close);
        }
    }

    #[test]
    fn same_calendar_day_gets_the_same_value_in_every_year() {
        let rows = quotes(&[
            (2020, 3, 5, 10.0),
            (2020, 3, 6, 12.0),
            (2021, 3, 5, 20.0),
            (2021, 3, 6, 23.0),
            (2022, 3, 5, 30.0),
        ]);
        let curve = compute_seasonality(&rows).unwrap();
        let combined = compose(&rows, &curve);

        // 2020-03-05 is day 65 (leap), 2021/2022-03-05 are day 64; the two
        // non-leap years must share a value
        assert_eq!(combined[2].seasonality, combined[4].seasonality);
        assert!(combined.iter().all(|r| r.seasonality.is_some()));
    }

    #[test]
    fn missing_day_is_flagged_not_zero_filled() {
        let rows = quotes(&[(2020, 1, 1, 10.0), (2020, 1, 2, 11.0)]);
        let mut curve = compute_seasonality(&rows).unwrap();
        curve.retain(|p| p.day_of_year.value() != 2);

        let combined = compose(&rows, &curve);
        assert!(combined[0].seasonality.is_some());
        assert_eq!(combined[1].seasonality, None);
    }
}
