use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};

use crate::config::{
    DATE_FORMAT, DELIMITER_CANDIDATES, FALLBACK_DELIMITER, SIX_COLUMN_FIELD_COUNT, SchemaSelection,
};
use crate::domain::QuoteRow;
use crate::error::LoadError;

/// Loads a delimited quote file into a normalized, date-sorted table.
///
/// Any IO, CSV, date or price failure fails the whole load and is returned
/// as a [`LoadError`] value; there are no partial tables and nothing panics
/// past this boundary.
pub struct QuoteLoader {
    schema: SchemaSelection,
}

impl QuoteLoader {
    pub fn new(schema: SchemaSelection) -> Self {
        Self { schema }
    }

    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<QuoteRow>, LoadError> {
        let file = File::open(path.as_ref())?;
        self.load_reader(file)
    }

    /// Loads from any byte stream. The input is buffered up front so the
    /// delimiter and schema can be sniffed before the CSV reader consumes it.
    pub fn load_reader<R: Read>(&self, mut reader: R) -> Result<Vec<QuoteRow>, LoadError> {
        let mut raw = String::new();
        reader.read_to_string(&mut raw)?;
        self.load_str(&raw)
    }

    fn load_str(&self, raw: &str) -> Result<Vec<QuoteRow>, LoadError> {
        let first_line = raw.lines().next().ok_or(LoadError::EmptyInput)?;
        let delimiter = sniff_delimiter(first_line);

        let schema = match self.schema {
            SchemaSelection::Auto => detect_schema(first_line, delimiter),
            forced => forced,
        };

        let mut rows = match schema {
            SchemaSelection::TwoColumn => parse_two_column(raw, delimiter)?,
            _ => parse_six_column(raw, delimiter)?,
        };

        // Delta computation downstream assumes chronological order
        rows.sort_by_key(|row| row.date);
        Ok(rows)
    }
}

/// Picks the most frequent candidate delimiter on the first data line.
/// No candidate means fall back to `;` rather than fail; the fallback is the
/// one defined retry-less recovery in the loader.
pub(crate) fn sniff_delimiter(first_line: &str) -> u8 {
    let mut best = FALLBACK_DELIMITER;
    let mut best_count = 0usize;

    for &candidate in &DELIMITER_CANDIDATES {
        let count = first_line.bytes().filter(|&b| b == candidate).count();
        if count > best_count {
            best = candidate;
            best_count = count;
        }
    }

    if best_count == 0 {
        log::warn!(
            "no recognized delimiter on first line, falling back to {:?}",
            FALLBACK_DELIMITER as char
        );
    }
    best
}

/// Schema selection is by column presence, never by filename: a header row
/// naming both Date and Close selects the two-column shape.
pub(crate) fn detect_schema(first_line: &str, delimiter: u8) -> SchemaSelection {
    let mut has_date = false;
    let mut has_close = false;

    for field in first_line.split(delimiter as char) {
        let field = field.trim();
        if field.eq_ignore_ascii_case("date") {
            has_date = true;
        } else if field.eq_ignore_ascii_case("close") {
            has_close = true;
        }
    }

    if has_date && has_close {
        SchemaSelection::TwoColumn
    } else {
        SchemaSelection::SixColumn
    }
}

fn parse_two_column(raw: &str, delimiter: u8) -> Result<Vec<QuoteRow>, LoadError> {
    // Strict record lengths: a ragged row (e.g. a comma-delimited file whose
    // prices also use comma decimals) must fail the load, not silently
    // truncate the close column
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .trim(csv::Trim::All)
        .delimiter(delimiter)
        .from_reader(raw.as_bytes());

    let headers = rdr.headers()?.clone();
    let date_idx = find_column(&headers, "date")?;
    let close_idx = find_column(&headers, "close")?;

    let mut rows = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let line = i + 2; // 1-based, after the header row
        let date = parse_date(record.get(date_idx).unwrap_or(""), line)?;
        let close = parse_price(record.get(close_idx).unwrap_or(""), line)?;
        rows.push(QuoteRow::new(date, close));
    }
    Ok(rows)
}

fn parse_six_column(raw: &str, delimiter: u8) -> Result<Vec<QuoteRow>, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(false)
        .trim(csv::Trim::All)
        .delimiter(delimiter)
        .from_reader(raw.as_bytes());

    let mut rows = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let line = i + 1;

        // market; date; open; high; low; close — missing fields parse as
        // empty strings and fail with a line-numbered error
        let market = record.get(0).unwrap_or("").to_string();
        let date = parse_date(record.get(1).unwrap_or(""), line)?;
        let open = parse_price(record.get(2).unwrap_or(""), line)?;
        let high = parse_price(record.get(3).unwrap_or(""), line)?;
        let low = parse_price(record.get(4).unwrap_or(""), line)?;
        let close = parse_price(
            record.get(SIX_COLUMN_FIELD_COUNT - 1).unwrap_or(""),
            line,
        )?;

        rows.push(QuoteRow {
            date,
            close,
            open: Some(open),
            high: Some(high),
            low: Some(low),
            market: Some(market),
        });
    }
    Ok(rows)
}

fn find_column(headers: &StringRecord, name: &str) -> Result<usize, LoadError> {
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name))
        .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
}

fn parse_date(value: &str, line: usize) -> Result<NaiveDate, LoadError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| LoadError::BadDate {
        value: value.to_string(),
        line,
    })
}

/// Parses a price field, repairing a comma decimal separator before giving
/// up. NaN/inf never pass: `close` must be a finite real number.
fn parse_price(value: &str, line: usize) -> Result<f64, LoadError> {
    if let Ok(v) = value.parse::<f64>() {
        return finite_or_err(v, value, line);
    }

    // Locale repair: "100,50" -> "100.50"
    let repaired = value.replace(',', ".");
    match repaired.parse::<f64>() {
        Ok(v) => finite_or_err(v, value, line),
        Err(_) => Err(LoadError::BadPrice {
            value: value.to_string(),
            line,
        }),
    }
}

fn finite_or_err(v: f64, value: &str, line: usize) -> Result<f64, LoadError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(LoadError::BadPrice {
            value: value.to_string(),
            line,
        })
    }
}
