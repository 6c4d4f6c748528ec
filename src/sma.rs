use std::{fmt::Display, num::NonZero};

use crate::{
    Column, Ohlcv, Price, PriceSeries, PriceSource,
    indicator::{Indicator, fold},
    price_source::SourceReader,
    price_window::PriceWindow,
};

/// Simple Moving Average (SMA) of `source` over `length` bars.
///
/// Computes the unweighted mean of the last *n* values, inclusive of the
/// current bar. The first `length - 1` positions are `None`.
///
/// # Example
///
/// ```
/// use quantedge_engine::{PriceSource, sma};
/// # use chrono::NaiveDate;
/// # use quantedge_engine::{PriceBar, PriceSeries};
/// # use std::num::NonZero;
/// # let series = PriceSeries::new(
/// #     [10.0, 20.0, 30.0].iter().zip(1..).map(|(&c, d)| {
/// #         PriceBar::new(NaiveDate::from_ymd_opt(2024, 1, d).unwrap(), c, c, c, c, 0)
/// #     }).collect(),
/// # ).unwrap();
///
/// let column = sma(&series, PriceSource::Close, NonZero::new(3).unwrap());
/// assert_eq!(column, vec![None, None, Some(20.0)]);
/// ```
#[must_use]
pub fn sma(series: &PriceSeries, source: PriceSource, length: NonZero<usize>) -> Column {
    fold(Sma::new(length, source), series)
}

/// Running-sum SMA fold, O(1) per bar.
#[derive(Clone, Debug)]
pub(crate) struct Sma {
    length: usize,
    reader: SourceReader,
    window: PriceWindow,
}

impl Sma {
    pub(crate) fn new(length: NonZero<usize>, source: PriceSource) -> Self {
        Self {
            length: length.get(),
            reader: SourceReader::new(source),
            window: PriceWindow::new(length.get()),
        }
    }
}

impl Indicator for Sma {
    type Output = Price;

    #[inline]
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<Price> {
        let price = self.reader.read(ohlcv);
        self.window.push(Some(price));
        self.window.mean()
    }
}

impl Display for Sma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SMA({}, {})", self.length, self.reader.source())
    }
}
