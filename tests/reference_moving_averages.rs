mod fixtures;

use fixtures::{RefMacd, RefValue, assert_column_matches, default_frame, load_records};
use quantedge_engine::columns;

/// SMA is plain arithmetic over a fixed window; only running-sum rounding
/// separates it from a recomputed mean.
const SMA_TOLERANCE: f64 = 1e-10;

/// The EMA recursion and the reference's explicit weighted sums round
/// differently over hundreds of bars.
const EMA_TOLERANCE: f64 = 1e-9;

#[test]
fn sma_20_close_matches_reference() {
    let reference: Vec<RefValue> =
        load_records("tests/fixtures/data/sma-20-close.csv", "invalid SMA record");

    assert_column_matches(
        columns::SMA,
        &default_frame(),
        reference.iter().map(|r| (r.date, r.expected)),
        SMA_TOLERANCE,
    );
}

#[test]
fn ema_12_close_matches_reference() {
    let reference: Vec<RefValue> =
        load_records("tests/fixtures/data/ema-12-close.csv", "invalid EMA record");

    assert_column_matches(
        columns::EMA,
        &default_frame(),
        reference.iter().map(|r| (r.date, r.expected)),
        EMA_TOLERANCE,
    );
}

#[test]
fn macd_12_26_9_matches_reference() {
    let reference: Vec<RefMacd> =
        load_records("tests/fixtures/data/macd-12-26-9.csv", "invalid MACD record");
    let frame = default_frame();

    assert_column_matches(
        columns::MACD,
        &frame,
        reference.iter().map(|r| (r.date, Some(r.macd))),
        EMA_TOLERANCE,
    );
    assert_column_matches(
        columns::MACD_SIGNAL,
        &frame,
        reference.iter().map(|r| (r.date, Some(r.signal))),
        EMA_TOLERANCE,
    );
    assert_column_matches(
        columns::MACD_HISTOGRAM,
        &frame,
        reference.iter().map(|r| (r.date, Some(r.histogram))),
        EMA_TOLERANCE,
    );
}
