use std::{fmt::Display, num::NonZero};

use crate::{
    Column, Ohlcv, Price, PriceSeries, PriceSource,
    indicator::{Indicator, fold},
    price_source::SourceReader,
    price_window::PriceWindow,
};

/// Average True Range (ATR) over `length` bars.
///
/// ```text
/// TR  = max(high − low, |high − prev_close|, |low − prev_close|)
/// ATR = SMA(TR, length)
/// ```
///
/// The first bar has no previous close and uses `high − low`. The average is
/// a trailing simple mean, not Wilder's smoothing. `None` for the first
/// `length − 1` bars.
#[must_use]
pub fn atr(series: &PriceSeries, length: NonZero<usize>) -> Column {
    fold(Atr::new(length), series)
}

#[derive(Clone, Debug)]
pub(crate) struct Atr {
    length: usize,
    reader: SourceReader,
    window: PriceWindow,
}

impl Atr {
    pub(crate) fn new(length: NonZero<usize>) -> Self {
        Self {
            length: length.get(),
            reader: SourceReader::new(PriceSource::TrueRange),
            window: PriceWindow::new(length.get()),
        }
    }
}

impl Indicator for Atr {
    type Output = Price;

    #[inline]
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<Price> {
        let true_range = self.reader.read(ohlcv);
        self.window.push(Some(true_range));
        // running-sum drift can leave a tiny negative residue
        self.window.mean().map(|mean| mean.max(0.0))
    }
}

impl Display for Atr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ATR({})", self.length)
    }
}
