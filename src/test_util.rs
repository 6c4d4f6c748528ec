// src/test_util.rs

use chrono::{Days, NaiveDate};

use crate::{PriceBar, PriceSeries};

/// Asserts that two `f64` values are approximately equal using a
/// relative epsilon of `16 * f64::EPSILON` (absolute near zero).
macro_rules! assert_approx {
    ($actual:expr, $expected:expr) => {{
        let (a, e): (f64, f64) = ($actual, $expected);
        let tolerance = e.abs().max(1.0) * 16.0 * f64::EPSILON;
        assert!(
            (a - e).abs() <= tolerance,
            "assert_approx failed: actual={a}, expected={e}, diff={}",
            (a - e).abs(),
        );
    }};
}

pub(crate) use assert_approx;

/// Trading date `n` days after 2024-01-01.
pub fn day(n: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.checked_add_days(Days::new(n)))
        .expect("valid test date")
}

pub fn ohlc(n: u64, open: f64, high: f64, low: f64, close: f64) -> PriceBar {
    ohlc_v(n, open, high, low, close, 1_000)
}

pub fn ohlc_v(n: u64, open: f64, high: f64, low: f64, close: f64, volume: u64) -> PriceBar {
    PriceBar::new(day(n), open, high, low, close, volume)
}

/// Convenience: bar with just a close price (OHLC all equal to close).
pub fn bar(close: f64, n: u64) -> PriceBar {
    ohlc(n, close, close, close, close)
}

/// Series of flat bars, one per close.
pub fn closes(values: &[f64]) -> PriceSeries {
    PriceSeries::new(
        values
            .iter()
            .zip(0..)
            .map(|(&close, n)| bar(close, n))
            .collect(),
    )
    .expect("valid test series")
}

/// Series of bars built from `(high, low, close)` triples.
pub fn hlc(values: &[(f64, f64, f64)]) -> PriceSeries {
    PriceSeries::new(
        values
            .iter()
            .zip(0..)
            .map(|(&(high, low, close), n)| ohlc(n, close, high, low, close))
            .collect(),
    )
    .expect("valid test series")
}

/// Series of flat bars with explicit volumes.
pub fn volumes(values: &[u64]) -> PriceSeries {
    PriceSeries::new(
        values
            .iter()
            .zip(0..)
            .map(|(&volume, n)| ohlc_v(n, 10.0, 10.0, 10.0, 10.0, volume))
            .collect(),
    )
    .expect("valid test series")
}

/// Unwraps every defined value, asserting the leading `undefined` positions
/// are `None`.
pub fn defined_after(column: &[Option<f64>], undefined: usize) -> Vec<f64> {
    assert!(
        column[..undefined].iter().all(Option::is_none),
        "expected first {undefined} values undefined: {column:?}"
    );
    column[undefined..]
        .iter()
        .map(|v| v.expect("expected defined value"))
        .collect()
}
