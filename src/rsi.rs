use std::{fmt::Display, num::NonZero};

use crate::{
    Column, Ohlcv, Price, PriceSeries, PriceSource,
    indicator::{Indicator, fold},
    price_source::SourceReader,
    price_window::PriceWindow,
};

/// Relative Strength Index (RSI) of the close over `length` price changes.
///
/// Gains and losses are averaged with a trailing simple mean (not Wilder's
/// smoothing):
///
/// ```text
/// delta    = close_t − close_{t−1}
/// avg_gain = mean(max(delta, 0))  over the last `length` deltas
/// avg_loss = mean(max(−delta, 0)) over the last `length` deltas
/// RSI      = 100 − 100 / (1 + avg_gain / avg_loss)
///          = 100 × avg_gain / (avg_gain + avg_loss)
/// ```
///
/// The first `length` positions are `None` (the delta series is one shorter
/// than the input). A window without losses saturates at `100`; a window
/// without any price change is `None`.
///
/// # Example
///
/// ```
/// use quantedge_engine::rsi;
/// # use chrono::NaiveDate;
/// # use quantedge_engine::{PriceBar, PriceSeries};
/// # use std::num::NonZero;
/// # let series = PriceSeries::new(
/// #     [44.0, 44.25, 44.5, 43.75].iter().zip(1..).map(|(&c, d)| {
/// #         PriceBar::new(NaiveDate::from_ymd_opt(2024, 1, d).unwrap(), c, c, c, c, 0)
/// #     }).collect(),
/// # ).unwrap();
///
/// let column = rsi(&series, NonZero::new(2).unwrap());
///
/// // gains (0.25, 0), losses (0, 0.75) → 100 × 0.125 / 0.5
/// assert_eq!(column, vec![None, None, Some(100.0), Some(25.0)]);
/// ```
#[must_use]
pub fn rsi(series: &PriceSeries, length: NonZero<usize>) -> Column {
    fold(Rsi::new(length, PriceSource::Close), series)
}

/// Conventional RSI reading bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RsiZone {
    /// Above [`RsiZone::OVERBOUGHT`]: potential sell signal.
    Overbought,
    /// Between the two thresholds.
    Neutral,
    /// Below [`RsiZone::OVERSOLD`]: potential buy signal.
    Oversold,
}

impl RsiZone {
    pub const OVERBOUGHT: f64 = 70.0;
    pub const OVERSOLD: f64 = 30.0;

    #[must_use]
    pub fn classify(rsi: Price) -> Self {
        if rsi > Self::OVERBOUGHT {
            Self::Overbought
        } else if rsi < Self::OVERSOLD {
            Self::Oversold
        } else {
            Self::Neutral
        }
    }
}

impl Display for RsiZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Overbought => "overbought",
            Self::Neutral => "neutral",
            Self::Oversold => "oversold",
        };
        f.write_str(label)
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Rsi {
    length: usize,
    reader: SourceReader,
    prev_price: Option<Price>,
    gains: PriceWindow,
    losses: PriceWindow,
}

impl Rsi {
    pub(crate) fn new(length: NonZero<usize>, source: PriceSource) -> Self {
        Self {
            length: length.get(),
            reader: SourceReader::new(source),
            prev_price: None,
            gains: PriceWindow::new(length.get()),
            losses: PriceWindow::new(length.get()),
        }
    }

    #[inline]
    fn gain_and_loss(prev_price: Price, price: Price) -> (f64, f64) {
        let change = price - prev_price;
        (change.max(0.0), (-change).max(0.0))
    }

    #[inline]
    fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> Option<Price> {
        let total = avg_gain + avg_loss;
        (total > 0.0).then(|| 100.0 * avg_gain / total)
    }
}

impl Indicator for Rsi {
    type Output = Price;

    #[inline]
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<Price> {
        let price = self.reader.read(ohlcv);

        if let Some(prev_price) = self.prev_price.replace(price) {
            let (gain, loss) = Self::gain_and_loss(prev_price, price);
            self.gains.push(Some(gain));
            self.losses.push(Some(loss));
        }

        // Running sums of non-negative values; clamp away rounding drift.
        let avg_gain = self.gains.mean()?.max(0.0);
        let avg_loss = self.losses.mean()?.max(0.0);

        Self::rsi_from_averages(avg_gain, avg_loss)
    }
}

impl Display for Rsi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RSI({}, {})", self.length, self.reader.source())
    }
}
