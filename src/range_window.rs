use crate::{Ohlcv, Price};
use std::collections::VecDeque;

/// Lowest low and highest high over a trailing window of bars.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Range {
    pub lowest: Price,
    pub highest: Price,
}

impl Range {
    /// `highest - lowest`, or `None` for a flat range.
    #[inline]
    pub fn span(self) -> Option<f64> {
        let span = self.highest - self.lowest;
        (span > 0.0).then_some(span)
    }
}

/// Rolling extrema via monotonic deques, amortized O(1) per bar.
///
/// `highs` holds strictly decreasing values, `lows` strictly increasing
/// ones; the front of each is the extreme of the current window.
#[derive(Clone, Debug)]
pub(crate) struct RangeWindow {
    size: usize,
    seen: usize,
    highs: VecDeque<(usize, Price)>,
    lows: VecDeque<(usize, Price)>,
}

impl RangeWindow {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            seen: 0,
            highs: VecDeque::new(),
            lows: VecDeque::new(),
        }
    }

    #[inline]
    pub fn add(&mut self, ohlcv: &impl Ohlcv) -> Option<Range> {
        let index = self.seen;
        self.seen += 1;

        let (high, low) = (ohlcv.high(), ohlcv.low());

        while self.highs.back().is_some_and(|&(_, h)| h <= high) {
            self.highs.pop_back();
        }
        self.highs.push_back((index, high));

        while self.lows.back().is_some_and(|&(_, l)| l >= low) {
            self.lows.pop_back();
        }
        self.lows.push_back((index, low));

        let oldest = self.seen.saturating_sub(self.size);
        while self.highs.front().is_some_and(|&(i, _)| i < oldest) {
            self.highs.pop_front();
        }
        while self.lows.front().is_some_and(|&(i, _)| i < oldest) {
            self.lows.pop_front();
        }

        self.range()
    }

    #[inline]
    pub fn range(&self) -> Option<Range> {
        if self.seen < self.size {
            return None;
        }
        let &(_, highest) = self.highs.front()?;
        let &(_, lowest) = self.lows.front()?;
        Some(Range { lowest, highest })
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::test_util::ohlc;

    fn hl(n: u64, high: f64, low: f64) -> crate::PriceBar {
        ohlc(n, low, high, low, low)
    }

    #[test]
    fn none_until_window_full() {
        let mut w = RangeWindow::new(3);
        assert_eq!(w.add(&hl(0, 12.0, 8.0)), None);
        assert_eq!(w.add(&hl(1, 13.0, 9.0)), None);
        assert!(w.add(&hl(2, 11.0, 7.0)).is_some());
    }

    #[test]
    fn tracks_extrema_of_full_window() {
        let mut w = RangeWindow::new(3);
        w.add(&hl(0, 12.0, 8.0));
        w.add(&hl(1, 13.0, 9.0));
        let range = w.add(&hl(2, 11.0, 7.0)).unwrap();
        assert_eq!(range.highest, 13.0);
        assert_eq!(range.lowest, 7.0);
    }

    #[test]
    fn expired_extremes_leave_the_window() {
        let mut w = RangeWindow::new(2);
        w.add(&hl(0, 20.0, 1.0));
        w.add(&hl(1, 13.0, 9.0));
        // bar 0 (20 / 1) leaves the window
        let range = w.add(&hl(2, 11.0, 7.0)).unwrap();
        assert_eq!(range.highest, 13.0);
        assert_eq!(range.lowest, 7.0);
    }

    #[test]
    fn repeated_extremes_are_kept_until_last_copy_expires() {
        let mut w = RangeWindow::new(2);
        w.add(&hl(0, 15.0, 5.0));
        w.add(&hl(1, 15.0, 5.0));
        let range = w.add(&hl(2, 10.0, 8.0)).unwrap();
        assert_eq!(range.highest, 15.0);
        assert_eq!(range.lowest, 5.0);
        let range = w.add(&hl(3, 10.0, 8.0)).unwrap();
        assert_eq!(range.highest, 10.0);
        assert_eq!(range.lowest, 8.0);
    }

    #[test]
    fn matches_brute_force_over_long_run() {
        let highs: Vec<f64> = (0..60).map(|i| 50.0 + ((i * 37) % 17) as f64).collect();
        let size = 5;
        let mut w = RangeWindow::new(size);

        for (i, &high) in highs.iter().enumerate() {
            let low = high - 3.0 - (i % 4) as f64;
            let range = w.add(&hl(i as u64, high, low));

            if i + 1 < size {
                assert_eq!(range, None);
                continue;
            }
            let start = i + 1 - size;
            let expected_high = highs[start..=i].iter().copied().fold(f64::MIN, f64::max);
            let expected_low = (start..=i)
                .map(|j| highs[j] - 3.0 - (j % 4) as f64)
                .fold(f64::MAX, f64::min);
            let range = range.unwrap();
            assert_eq!(range.highest, expected_high, "high at {i}");
            assert_eq!(range.lowest, expected_low, "low at {i}");
        }
    }

    #[test]
    fn span_is_none_when_flat() {
        let flat = Range {
            lowest: 10.0,
            highest: 10.0,
        };
        assert_eq!(flat.span(), None);
        let wide = Range {
            lowest: 8.0,
            highest: 10.0,
        };
        assert_eq!(wide.span(), Some(2.0));
    }
}
