mod fixtures;

use fixtures::{RefMomentum, RefVolume, assert_column_matches, default_frame, load_records};
use quantedge_engine::columns;

const TOLERANCE: f64 = 1e-10;

#[test]
fn momentum_10_and_roc_12_match_reference() {
    let reference: Vec<RefMomentum> = load_records(
        "tests/fixtures/data/momentum-10-roc-12.csv",
        "invalid momentum record",
    );
    let frame = default_frame();

    assert_column_matches(
        columns::MOMENTUM,
        &frame,
        reference.iter().map(|r| (r.date, r.momentum)),
        TOLERANCE,
    );
    assert_column_matches(
        columns::ROC,
        &frame,
        reference.iter().map(|r| (r.date, r.roc)),
        TOLERANCE,
    );
}

#[test]
fn volume_20_matches_reference() {
    let reference: Vec<RefVolume> =
        load_records("tests/fixtures/data/volume-20.csv", "invalid volume record");
    let frame = default_frame();

    assert_column_matches(
        columns::VOLUME_SMA,
        &frame,
        reference.iter().map(|r| (r.date, r.sma)),
        TOLERANCE,
    );
    assert_column_matches(
        columns::VOLUME_RATIO,
        &frame,
        reference.iter().map(|r| (r.date, r.ratio)),
        TOLERANCE,
    );
}
