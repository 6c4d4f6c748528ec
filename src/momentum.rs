use std::{fmt::Display, num::NonZero};

use crate::{
    Column, Ohlcv, Price, PriceSeries,
    indicator::{Indicator, fold, project},
    ring_buffer::RingBuffer,
};

/// Momentum of the close over `length` bars: `close[i] − close[i − length]`.
///
/// `None` for the first `length` bars.
#[must_use]
pub fn momentum(series: &PriceSeries, length: NonZero<usize>) -> Column {
    let values = fold(Lookback::new(length, Change::Difference), series);
    project(&values, |v| v)
}

/// Rate of change of the close over `length` bars, in percent:
/// `(close[i] / close[i − length] − 1) × 100`.
///
/// `None` for the first `length` bars and wherever the base close is zero.
#[must_use]
pub fn rate_of_change(series: &PriceSeries, length: NonZero<usize>) -> Column {
    let values = fold(Lookback::new(length, Change::Percent), series);
    project(&values, |v| v)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Change {
    Difference,
    Percent,
}

impl Change {
    fn between(self, base: Price, current: Price) -> Option<Price> {
        match self {
            Self::Difference => Some(current - base),
            Self::Percent => (base != 0.0).then(|| (current / base - 1.0) * 100.0),
        }
    }
}

/// Compares each close with the one `length` bars back.
///
/// The buffer holds `length` closes, so the value it evicts on a push is the
/// close exactly `length` bars before the incoming one.
#[derive(Clone, Debug)]
pub(crate) struct Lookback {
    length: usize,
    change: Change,
    closes: RingBuffer,
}

impl Lookback {
    fn new(length: NonZero<usize>, change: Change) -> Self {
        Self {
            length: length.get(),
            change,
            closes: RingBuffer::new(length.get()),
        }
    }
}

impl Indicator for Lookback {
    // the base close may make the value undefined after warm-up, so the
    // output carries its own `Option`
    type Output = Option<Price>;

    #[inline]
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<Option<Price>> {
        let close = ohlcv.close();
        let base = self.closes.push(close)?;
        Some(self.change.between(base, close))
    }
}

impl Display for Lookback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.change {
            Change::Difference => write!(f, "MOM({})", self.length),
            Change::Percent => write!(f, "ROC({})", self.length),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{assert_approx, closes, defined_after};

    fn nz(n: usize) -> NonZero<usize> {
        NonZero::new(n).unwrap()
    }

    mod difference {
        use super::*;

        #[test]
        fn undefined_for_first_length_bars() {
            let column = momentum(&closes(&[1.0, 2.0, 4.0]), nz(2));
            assert_eq!(column, vec![None, None, Some(3.0)]);
        }

        #[test]
        fn compares_with_close_length_bars_back() {
            let values = [10.0, 11.0, 12.0, 11.0, 10.0, 9.0, 10.0];
            let column = momentum(&closes(&values), nz(3));
            assert_eq!(
                defined_after(&column, 3),
                vec![1.0, -1.0, -3.0, -1.0]
            );
        }

        #[test]
        fn series_too_short_is_all_undefined() {
            let column = momentum(&closes(&[1.0, 2.0]), nz(10));
            assert_eq!(column, vec![None, None]);
        }
    }

    mod percent {
        use super::*;

        #[test]
        fn percent_change_from_base() {
            let column = rate_of_change(&closes(&[50.0, 60.0, 45.0]), nz(1));
            assert_eq!(column[0], None);
            assert_approx!(column[1].unwrap(), 20.0);
            assert_approx!(column[2].unwrap(), -25.0);
        }

        #[test]
        fn flat_is_zero() {
            let column = rate_of_change(&closes(&[7.0; 5]), nz(2));
            assert_eq!(defined_after(&column, 2), vec![0.0; 3]);
        }

        #[test]
        fn zero_base_is_undefined() {
            assert_eq!(Change::Percent.between(0.0, 5.0), None);
            assert_eq!(Change::Difference.between(0.0, 5.0), Some(5.0));
        }
    }

    #[test]
    fn display() {
        assert_eq!(Lookback::new(nz(10), Change::Difference).to_string(), "MOM(10)");
        assert_eq!(Lookback::new(nz(12), Change::Percent).to_string(), "ROC(12)");
    }
}
