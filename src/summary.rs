use chrono::NaiveDate;
use serde::Serialize;

use crate::{Ohlcv, Price, PriceSeries};

/// Absolute and percent change from `previous` to `current`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceChange {
    pub change: Price,
    pub percent: f64,
}

/// Change from `previous` to `current`, `None` when `previous` is zero.
///
/// ```
/// use quantedge_engine::price_change;
///
/// let change = price_change(110.0, 100.0).unwrap();
/// assert_eq!(change.change, 10.0);
/// assert_eq!(change.percent, 10.0);
///
/// assert_eq!(price_change(5.0, 0.0), None);
/// ```
#[must_use]
pub fn price_change(current: Price, previous: Price) -> Option<PriceChange> {
    if previous == 0.0 {
        return None;
    }
    let change = current - previous;
    Some(PriceChange {
        change,
        percent: change / previous * 100.0,
    })
}

/// Headline figures of a price series: the latest bar, its change against
/// the previous close, and the extremes over the whole series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub date: NaiveDate,
    pub last_close: Price,
    pub last_volume: u64,
    /// `None` for a single-bar series.
    pub change: Option<PriceChange>,
    pub highest_high: Price,
    pub lowest_low: Price,
}

impl SeriesSummary {
    /// Summarizes `series`, `None` if it is empty.
    #[must_use]
    pub fn of(series: &PriceSeries) -> Option<Self> {
        let last = series.last()?;
        let previous = series
            .len()
            .checked_sub(2)
            .map(|index| series[index].close());

        let (lowest_low, highest_high) = series.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(low, high), bar| (low.min(bar.low()), high.max(bar.high())),
        );

        Some(Self {
            date: last.date(),
            last_close: last.close(),
            last_volume: last.shares(),
            change: previous.and_then(|previous| price_change(last.close(), previous)),
            highest_high,
            lowest_low,
        })
    }
}
