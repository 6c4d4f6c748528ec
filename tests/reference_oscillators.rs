mod fixtures;

use fixtures::{
    RefStochastic, RefValue, assert_column_matches, default_frame, load_records,
};
use quantedge_engine::columns;

/// Ratios of windowed sums: the reference recomputes every window, the
/// engine slides running sums.
const TOLERANCE: f64 = 1e-9;

#[test]
fn rsi_14_close_matches_reference() {
    let reference: Vec<RefValue> =
        load_records("tests/fixtures/data/rsi-14-close.csv", "invalid RSI record");

    assert_column_matches(
        columns::RSI,
        &default_frame(),
        reference.iter().map(|r| (r.date, r.expected)),
        TOLERANCE,
    );
}

#[test]
fn stochastic_14_3_matches_reference() {
    let reference: Vec<RefStochastic> =
        load_records("tests/fixtures/data/stoch-14-3.csv", "invalid stochastic record");
    let frame = default_frame();

    assert_column_matches(
        columns::STOCH_K,
        &frame,
        reference.iter().map(|r| (r.date, r.k)),
        TOLERANCE,
    );
    assert_column_matches(
        columns::STOCH_D,
        &frame,
        reference.iter().map(|r| (r.date, r.d)),
        TOLERANCE,
    );
}

#[test]
fn williams_r_14_matches_reference() {
    let reference: Vec<RefValue> =
        load_records("tests/fixtures/data/williams-14.csv", "invalid Williams %R record");

    assert_column_matches(
        columns::WILLIAMS_R,
        &default_frame(),
        reference.iter().map(|r| (r.date, r.expected)),
        TOLERANCE,
    );
}

#[test]
fn cci_20_matches_reference() {
    let reference: Vec<RefValue> =
        load_records("tests/fixtures/data/cci-20.csv", "invalid CCI record");

    assert_column_matches(
        columns::CCI,
        &default_frame(),
        reference.iter().map(|r| (r.date, r.expected)),
        TOLERANCE,
    );
}
