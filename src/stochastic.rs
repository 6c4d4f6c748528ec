use std::{fmt::Display, num::NonZero};

use crate::{
    Column, Ohlcv, Price, PriceSeries,
    indicator::{Indicator, fold, project},
    price_window::PriceWindow,
    range_window::RangeWindow,
};

/// %K and %D columns of the [`stochastic`] oscillator.
#[derive(Debug, Clone, PartialEq)]
pub struct StochasticColumns {
    pub k: Column,
    pub d: Column,
}

/// Stochastic Oscillator.
///
/// ```text
/// %K = 100 × (close − lowest_low_k) / (highest_high_k − lowest_low_k)
/// %D = SMA(%K, d_length)
/// ```
///
/// %K is `None` for the first `k_length − 1` bars and wherever the window's
/// range is flat. %D is `None` whenever any %K in its window is `None`.
#[must_use]
pub fn stochastic(
    series: &PriceSeries,
    k_length: NonZero<usize>,
    d_length: NonZero<usize>,
) -> StochasticColumns {
    let values = fold(Stochastic::new(k_length, d_length), series);

    StochasticColumns {
        k: project(&values, |v| v.k),
        d: project(&values, |v| v.d),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct StochasticValue {
    k: Option<Price>,
    d: Option<Price>,
}

#[derive(Clone, Debug)]
pub(crate) struct Stochastic {
    k_length: usize,
    d_length: usize,
    range: RangeWindow,
    k_window: PriceWindow,
}

impl Stochastic {
    pub(crate) fn new(k_length: NonZero<usize>, d_length: NonZero<usize>) -> Self {
        Self {
            k_length: k_length.get(),
            d_length: d_length.get(),
            range: RangeWindow::new(k_length.get()),
            k_window: PriceWindow::new(d_length.get()),
        }
    }
}

impl Indicator for Stochastic {
    type Output = StochasticValue;

    #[inline]
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<StochasticValue> {
        let k = self.range.add(ohlcv).and_then(|range| {
            let span = range.span()?;
            Some(100.0 * (ohlcv.close() - range.lowest) / span)
        });

        self.k_window.push(k);

        Some(StochasticValue {
            k,
            d: self.k_window.mean(),
        })
    }
}

impl Display for Stochastic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "STOCH({}, {})", self.k_length, self.d_length)
    }
}
