use std::{fmt::Display, num::NonZero};

use crate::{
    Column, Ohlcv, Price, PriceSeries,
    indicator::{Indicator, fold},
    range_window::RangeWindow,
};

/// Williams %R over `length` bars.
///
/// ```text
/// %R = −100 × (highest_high − close) / (highest_high − lowest_low)
/// ```
///
/// Ranges from `−100` (close at the low) to `0` (close at the high). `None`
/// for the first `length − 1` bars and wherever the range is flat.
#[must_use]
pub fn williams_r(series: &PriceSeries, length: NonZero<usize>) -> Column {
    fold(WilliamsR::new(length), series)
}

#[derive(Clone, Debug)]
pub(crate) struct WilliamsR {
    length: usize,
    range: RangeWindow,
}

impl WilliamsR {
    pub(crate) fn new(length: NonZero<usize>) -> Self {
        Self {
            length: length.get(),
            range: RangeWindow::new(length.get()),
        }
    }
}

impl Indicator for WilliamsR {
    type Output = Price;

    #[inline]
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<Price> {
        let range = self.range.add(ohlcv)?;
        let span = range.span()?;
        Some(-100.0 * (range.highest - ohlcv.close()) / span)
    }
}

impl Display for WilliamsR {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WILLR({})", self.length)
    }
}
