//! End-to-end pipeline tests: load -> seasonality -> compose -> scale.

use season_scope::{
    LoadError, PipelineConfig, SchemaSelection, SeasonError, run_pipeline,
    run_pipeline_from_reader,
};

fn two_column_fixture() -> String {
    // Two years of the first week of January, comma decimals, unsorted on
    // purpose: the loader must sort before computing deltas.
    let mut raw = String::from("Date;Close\n");
    let quotes = [
        ("02.01.2020", "101,50"),
        ("01.01.2020", "100,00"),
        ("03.01.2020", "103,25"),
        ("04.01.2020", "102,75"),
        ("01.01.2021", "110,00"),
        ("02.01.2021", "112,50"),
        ("03.01.2021", "111,25"),
        ("04.01.2021", "114,00"),
    ];
    for (date, close) in quotes {
        raw.push_str(&format!("{date};{close}\n"));
    }
    raw
}

#[test]
fn two_column_pipeline_emits_one_chart_row_per_quote() {
    let raw = two_column_fixture();
    let rows = run_pipeline_from_reader(raw.as_bytes(), &PipelineConfig::default()).unwrap();

    assert_eq!(rows.len(), 8);

    // Chronological ISO dates
    assert_eq!(rows[0].2, "2020-01-01");
    assert_eq!(rows[1].2, "2020-01-02");
    assert_eq!(rows[7].2, "2021-01-04");

    // Comma decimals became numeric closes
    assert_eq!(rows[0].0, 100.0);
    assert_eq!(rows[1].0, 101.5);

    // Every row carries a finite seasonality value
    for row in &rows {
        let s = row.1.expect("seasonality present");
        assert!(s.is_finite());
    }
}

#[test]
fn same_calendar_day_repeats_across_years_in_raw_mode() {
    let raw = two_column_fixture();
    let config = PipelineConfig {
        apply_display_scaling: false,
        ..PipelineConfig::default()
    };
    let rows = run_pipeline_from_reader(raw.as_bytes(), &config).unwrap();

    // Rows 0..4 are 2020, rows 4..8 are 2021, same four calendar days
    for i in 0..4 {
        assert_eq!(rows[i].1, rows[i + 4].1, "day {} differs across years", i + 1);
    }
}

#[test]
fn six_column_pipeline_loads_headerless_input() {
    let raw = "\
GOLD;01.01.2020;1800,0;1810,0;1790,0;1805,0
GOLD;02.01.2020;1805,0;1820,0;1800,0;1815,5
GOLD;03.01.2020;1815,5;1830,0;1810,0;1812,0
";
    let rows = run_pipeline_from_reader(raw.as_bytes(), &PipelineConfig::default()).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].0, 1805.0);
    assert_eq!(rows[1].0, 1815.5);
}

#[test]
fn output_is_reproducible_for_a_fixed_input() {
    let raw = two_column_fixture();
    let config = PipelineConfig::default();
    let first = run_pipeline_from_reader(raw.as_bytes(), &config).unwrap();
    let second = run_pipeline_from_reader(raw.as_bytes(), &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn malformed_date_fails_the_whole_pipeline() {
    let raw = "Date;Close\n01.01.2020;100\n13.13.2020;101\n02.01.2020;102\n";
    let err = run_pipeline_from_reader(raw.as_bytes(), &PipelineConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        SeasonError::Load(LoadError::BadDate { .. })
    ));
}

#[test]
fn comma_delimited_comma_decimals_fail_the_whole_pipeline() {
    // The comma wins the delimiter sniff, so the comma-decimal prices make
    // every data row ragged; the load must fail rather than emit truncated
    // closes of 100.0 / 101.0
    let raw = "Date,Close\n01.01.2020,100,50\n02.01.2020,101,75\n";
    let err = run_pipeline_from_reader(raw.as_bytes(), &PipelineConfig::default()).unwrap_err();
    assert!(matches!(err, SeasonError::Load(LoadError::Csv(_))));
}

#[test]
fn single_row_is_insufficient_data() {
    let raw = "Date;Close\n01.01.2020;100\n";
    let err = run_pipeline_from_reader(raw.as_bytes(), &PipelineConfig::default()).unwrap_err();
    assert!(matches!(err, SeasonError::InsufficientData { rows: 1 }));
}

#[test]
fn flat_prices_are_degenerate_only_when_scaling_is_applied() {
    // Constant closes: every delta is zero, the detrended curve is flat
    let raw = "Date;Close\n01.01.2020;100\n02.01.2020;100\n03.01.2020;100\n";

    let scaled = run_pipeline_from_reader(raw.as_bytes(), &PipelineConfig::default());
    assert!(matches!(scaled, Err(SeasonError::DegenerateScale)));

    let config = PipelineConfig {
        apply_display_scaling: false,
        ..PipelineConfig::default()
    };
    let rows = run_pipeline_from_reader(raw.as_bytes(), &config).unwrap();
    assert_eq!(rows.len(), 3);
    for row in &rows {
        assert!(row.1.unwrap().abs() < 1e-12);
    }
}

#[test]
fn forced_schema_overrides_detection() {
    // Header names Date/Close, but the caller forces the six-column shape;
    // the header row then fails date parsing, failing the load
    let raw = "Date;Close\n01.01.2020;100\n";
    let config = PipelineConfig {
        schema: SchemaSelection::SixColumn,
        ..PipelineConfig::default()
    };
    let err = run_pipeline_from_reader(raw.as_bytes(), &config).unwrap_err();
    assert!(matches!(err, SeasonError::Load(_)));
}

#[test]
fn pipeline_runs_from_a_file_path() {
    let path = std::env::temp_dir().join("season_scope_pipeline_test.csv");
    std::fs::write(&path, two_column_fixture()).unwrap();

    let rows = run_pipeline(&path, &PipelineConfig::default()).unwrap();
    assert_eq!(rows.len(), 8);

    std::fs::remove_file(&path).ok();
}

#[test]
fn missing_file_is_a_load_error() {
    let err = run_pipeline(
        "does/not/exist.csv",
        &PipelineConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, SeasonError::Load(LoadError::Io(_))));
}

#[test]
fn chart_rows_serialize_as_arrays() {
    let raw = two_column_fixture();
    let rows = run_pipeline_from_reader(raw.as_bytes(), &PipelineConfig::default()).unwrap();
    let json = serde_json::to_value(&rows).unwrap();

    let first = json.as_array().unwrap().first().unwrap().as_array().unwrap();
    assert_eq!(first.len(), 3);
    assert!(first[0].is_f64());
    assert!(first[1].is_f64());
    assert_eq!(first[2].as_str(), Some("2020-01-01"));
}
