use std::{fmt::Display, num::NonZero};

use crate::{
    Column, Ohlcv, Price, PriceSeries, PriceSource,
    indicator::{Indicator, fold},
    price_source::SourceReader,
    price_window::PriceWindow,
};

/// Lambert's constant: scales CCI so roughly 70–80% of values fall within ±100.
const LAMBERT: f64 = 0.015;

/// Commodity Channel Index (CCI) over `length` bars.
///
/// ```text
/// tp  = (high + low + close) / 3
/// CCI = (tp − mean(tp)) / (0.015 × mean_abs_deviation(tp))
/// ```
///
/// The mean absolute deviation is recomputed per window around the window's
/// own mean. `None` for the first `length − 1` bars and wherever the
/// deviation is zero (flat typical price).
#[must_use]
pub fn cci(series: &PriceSeries, length: NonZero<usize>) -> Column {
    fold(Cci::new(length), series)
}

#[derive(Clone, Debug)]
pub(crate) struct Cci {
    length: usize,
    reader: SourceReader,
    window: PriceWindow,
}

impl Cci {
    pub(crate) fn new(length: NonZero<usize>) -> Self {
        Self {
            length: length.get(),
            reader: SourceReader::new(PriceSource::HLC3),
            window: PriceWindow::new(length.get()),
        }
    }
}

impl Indicator for Cci {
    type Output = Price;

    #[inline]
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<Price> {
        let typical = self.reader.read(ohlcv);
        self.window.push(Some(typical));

        let (mean, deviation) = self.window.mean_abs_deviation()?;
        (deviation > 0.0).then(|| (typical - mean) / (LAMBERT * deviation))
    }
}

impl Display for Cci {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CCI({})", self.length)
    }
}
