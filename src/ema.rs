use std::{fmt::Display, num::NonZero};

use crate::{
    Column, Ohlcv, Price, PriceSeries, PriceSource,
    indicator::{Indicator, fold},
    price_source::SourceReader,
};

/// Exponential Moving Average (EMA) of `source` over `length` bars.
///
/// Uses the smoothing factor `α = 2 / (length + 1)` and is defined from the
/// very first bar: each value is the exponentially weighted mean of every
/// observation so far, so the first value equals the first observation and
/// the weight of the newest observation converges to `α`.
///
/// # Example
///
/// ```
/// use quantedge_engine::{PriceSource, ema};
/// # use chrono::NaiveDate;
/// # use quantedge_engine::{PriceBar, PriceSeries};
/// # use std::num::NonZero;
/// # let series = PriceSeries::new(
/// #     [2.0, 4.0].iter().zip(1..).map(|(&c, d)| {
/// #         PriceBar::new(NaiveDate::from_ymd_opt(2024, 1, d).unwrap(), c, c, c, c, 0)
/// #     }).collect(),
/// # ).unwrap();
///
/// let column = ema(&series, PriceSource::Close, NonZero::new(3).unwrap());
///
/// // First value is the first close, no warm-up.
/// assert_eq!(column[0], Some(2.0));
/// // (4 + 0.5 × 2) / (1 + 0.5)
/// assert!((column[1].unwrap() - 10.0 / 3.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn ema(series: &PriceSeries, source: PriceSource, length: NonZero<usize>) -> Column {
    fold(Ema::new(length, source), series)
}

/// Exponentially weighted mean with the standard smoothing factor
/// `α = 2 / (length + 1)`, seeded from the first observation.
///
/// Each value is the weighted average of every observation so far, with
/// weights `(1 − α)^k` for the value `k` bars back:
///
/// ```text
/// EMA_t = Σ (1 − α)^k × x_{t−k} / Σ (1 − α)^k
/// ```
///
/// Computed recursively as a blend of the previous EMA and the new price:
///
/// ```text
/// w_t   = 1 + (1 − α) × w_{t−1}            (w_0 = 1)
/// EMA_t = EMA_{t−1} + (x_t − EMA_{t−1}) / w_t
/// ```
///
/// The blend weight `1 / w_t` starts at 1 (so `EMA_0 = x_0`) and converges
/// to `α`, after which this is the textbook `α × x + (1 − α) × EMA`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ExpSmoothing {
    length: usize,
    decay: f64,
    weight: f64,
    current: Option<Price>,
}

impl ExpSmoothing {
    pub(crate) fn new(length: NonZero<usize>) -> Self {
        let length = length.get();

        Self {
            length,
            #[allow(clippy::cast_precision_loss)]
            decay: 1.0 - 2.0 / (length as f64 + 1.0),
            weight: 0.0,
            current: None,
        }
    }

    #[inline]
    pub(crate) fn update(&mut self, price: Price) -> Price {
        self.weight = self.weight.mul_add(self.decay, 1.0);

        let next = match self.current {
            Some(previous) => previous + (price - previous) / self.weight,
            None => price,
        };

        self.current = Some(next);
        next
    }

    #[inline]
    pub(crate) fn length(&self) -> usize {
        self.length
    }
}

/// EMA fold over a price source.
#[derive(Clone, Debug)]
pub(crate) struct Ema {
    reader: SourceReader,
    smoothing: ExpSmoothing,
}

impl Ema {
    pub(crate) fn new(length: NonZero<usize>, source: PriceSource) -> Self {
        Self {
            reader: SourceReader::new(source),
            smoothing: ExpSmoothing::new(length),
        }
    }
}

impl Indicator for Ema {
    type Output = Price;

    #[inline]
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<Price> {
        let price = self.reader.read(ohlcv);
        Some(self.smoothing.update(price))
    }
}

impl Display for Ema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "EMA({}, {})",
            self.smoothing.length(),
            self.reader.source()
        )
    }
}
