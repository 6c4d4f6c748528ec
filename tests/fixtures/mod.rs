#![allow(dead_code)]

use chrono::NaiveDate;
use quantedge_engine::{IndicatorConfig, IndicatorFrame, PriceSeries, compute};
use serde::{Deserialize, de::DeserializeOwned};

const OHLCV_PATH: &str = "tests/fixtures/data/daily-ohlcv.csv";

/// Reference value with date. Empty cells are undefined positions.
#[derive(Debug, Deserialize)]
pub struct RefValue {
    pub date: NaiveDate,
    pub expected: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct RefBands {
    pub date: NaiveDate,
    pub upper: Option<f64>,
    pub middle: Option<f64>,
    pub lower: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct RefMacd {
    pub date: NaiveDate,
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

#[derive(Debug, Deserialize)]
pub struct RefStochastic {
    pub date: NaiveDate,
    pub k: Option<f64>,
    pub d: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct RefMomentum {
    pub date: NaiveDate,
    pub momentum: Option<f64>,
    pub roc: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct RefVolume {
    pub date: NaiveDate,
    pub sma: Option<f64>,
    pub ratio: Option<f64>,
}

/// Daily bars of a synthetic large-cap stock (300 trading days).
pub fn load_series() -> PriceSeries {
    let bars = load_records(OHLCV_PATH, "invalid OHLCV record");
    PriceSeries::new(bars).expect("fixture series is valid")
}

/// Fixture series run through the engine with the default config.
pub fn default_frame() -> IndicatorFrame {
    compute(&load_series(), &IndicatorConfig::default()).expect("default config computes")
}

/// Load reference records from a CSV file.
pub fn load_records<D>(path: &str, expect_msg: &str) -> Vec<D>
where
    D: DeserializeOwned,
{
    let mut rdr =
        csv::Reader::from_path(path).unwrap_or_else(|e| panic!("failed to open {path}: {e}"));

    rdr.deserialize().map(|r| r.expect(expect_msg)).collect()
}

/// Assert two f64 values are within `tolerance`, relative to the expected
/// magnitude once it exceeds 1.
pub fn assert_near(actual: f64, expected: f64, tolerance: f64, context: &str) {
    let diff = (actual - expected).abs();
    let allowed = tolerance * expected.abs().max(1.0);
    assert!(
        diff <= allowed,
        "{context}: expected {expected:.10}, got {actual:.10}, diff {diff:.2e} > tolerance {allowed:.2e}"
    );
}

/// Compares a computed column against reference `(date, value)` rows,
/// position by position. Both sides must agree on which positions are
/// undefined.
pub fn assert_column_matches(
    name: &str,
    frame: &IndicatorFrame,
    reference: impl IntoIterator<Item = (NaiveDate, Option<f64>)>,
    tolerance: f64,
) {
    let column = frame
        .column(name)
        .unwrap_or_else(|| panic!("missing column {name}"));

    let mut checked = 0;
    for (i, (date, expected)) in reference.into_iter().enumerate() {
        assert_eq!(frame.bars()[i].date(), date, "{name}: reference misaligned at {i}");

        match (column[i], expected) {
            (None, None) => {}
            (Some(actual), Some(expected)) => {
                assert_near(actual, expected, tolerance, &format!("{name} at {date}"));
            }
            (actual, expected) => {
                panic!("{name} definedness mismatch at {date}: got {actual:?}, expected {expected:?}");
            }
        }
        checked += 1;
    }

    assert_eq!(
        checked,
        column.len(),
        "not all {name} values checked: {checked}/{}",
        column.len()
    );
}
