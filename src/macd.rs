use std::{fmt::Display, num::NonZero};

use crate::{
    Column, Ohlcv, Price, PriceSeries, PriceSource,
    ema::ExpSmoothing,
    indicator::{Indicator, fold, project},
    price_source::SourceReader,
};

/// MACD line, signal line and histogram columns of [`macd`].
#[derive(Debug, Clone, PartialEq)]
pub struct MacdColumns {
    pub macd: Column,
    pub signal: Column,
    pub histogram: Column,
}

/// Moving Average Convergence Divergence (MACD) of the close.
///
/// ```text
/// macd      = EMA(close, fast) − EMA(close, slow)
/// signal    = EMA(macd, signal)
/// histogram = macd − signal
/// ```
///
/// All three EMAs are seeded from the first observation, so every position
/// is defined.
#[must_use]
pub fn macd(
    series: &PriceSeries,
    fast: NonZero<usize>,
    slow: NonZero<usize>,
    signal: NonZero<usize>,
) -> MacdColumns {
    let values = fold(Macd::new(fast, slow, signal), series);

    MacdColumns {
        macd: project(&values, |v| Some(v.macd)),
        signal: project(&values, |v| Some(v.signal)),
        histogram: project(&values, |v| Some(v.histogram)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct MacdValue {
    macd: Price,
    signal: Price,
    histogram: Price,
}

#[derive(Clone, Debug)]
pub(crate) struct Macd {
    reader: SourceReader,
    fast: ExpSmoothing,
    slow: ExpSmoothing,
    signal: ExpSmoothing,
}

impl Macd {
    pub(crate) fn new(fast: NonZero<usize>, slow: NonZero<usize>, signal: NonZero<usize>) -> Self {
        Self {
            reader: SourceReader::new(PriceSource::Close),
            fast: ExpSmoothing::new(fast),
            slow: ExpSmoothing::new(slow),
            signal: ExpSmoothing::new(signal),
        }
    }
}

impl Indicator for Macd {
    type Output = MacdValue;

    #[inline]
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<MacdValue> {
        let price = self.reader.read(ohlcv);

        let macd = self.fast.update(price) - self.slow.update(price);
        let signal = self.signal.update(macd);

        Some(MacdValue {
            macd,
            signal,
            histogram: macd - signal,
        })
    }
}

impl Display for Macd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MACD({}, {}, {})",
            self.fast.length(),
            self.slow.length(),
            self.signal.length()
        )
    }
}
