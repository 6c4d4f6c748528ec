use crate::Price;
use std::collections::VecDeque;

/// Trailing window of the last `size` values.
///
/// Values may be undefined (`None`); the window only reports statistics once
/// it holds `size` values and none of them is undefined. Storage grows with
/// the values pushed, not with `size`.
#[derive(Clone, Debug)]
pub(crate) struct PriceWindow {
    size: usize,
    window: VecDeque<Option<Price>>,
    /// Running sum of the defined values in the window. Maintained
    /// incrementally via add/subtract, may accumulate FP rounding drift over
    /// very long runs, but negligible for typical window sizes on daily data.
    sum: Price,
    missing: usize,
    /// Defined non-zero values in the window. At zero the sum is reset, so an
    /// all-zero window sums to exactly `0.0`.
    nonzero: usize,
    length_reciprocal: f64,
}

impl PriceWindow {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            window: VecDeque::new(),
            sum: 0.0,
            missing: 0,
            nonzero: 0,
            #[allow(clippy::cast_precision_loss)]
            length_reciprocal: 1.0 / size as f64,
        }
    }

    #[inline]
    pub fn push(&mut self, value: Option<Price>) {
        if self.window.len() == self.size
            && let Some(old) = self.window.pop_front()
        {
            match old {
                Some(price) => {
                    self.sum -= price;
                    if price != 0.0 {
                        self.nonzero -= 1;
                    }
                }
                None => self.missing -= 1,
            }
        }

        match value {
            Some(price) => {
                self.sum += price;
                if price != 0.0 {
                    self.nonzero += 1;
                }
            }
            None => self.missing += 1,
        }
        if self.nonzero == 0 {
            self.sum = 0.0;
        }
        self.window.push_back(value);
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.window.len() == self.size && self.missing == 0
    }

    #[inline]
    pub fn sum(&self) -> Option<Price> {
        self.is_ready().then_some(self.sum)
    }

    /// Running-sum mean, O(1).
    #[inline]
    pub fn mean(&self) -> Option<Price> {
        self.sum().map(|sum| sum * self.length_reciprocal)
    }

    /// Mean recomputed from deviations against the oldest value, O(n).
    ///
    /// Exact for a constant window, where the running-sum mean may be off by
    /// an ulp.
    pub fn shifted_mean(&self) -> Option<Price> {
        let (pivot, deviations) = self.deviations()?;
        Some(pivot + deviations.sum::<f64>() * self.length_reciprocal)
    }

    /// Sample variance (`n - 1` denominator), O(n).
    ///
    /// Uses the shifted-data formula with the oldest value as pivot, so a
    /// constant window yields exactly `0.0`. `None` for a window of one.
    pub fn sample_variance(&self) -> Option<f64> {
        if self.size < 2 {
            return None;
        }
        let (_, deviations) = self.deviations()?;

        let (sum, sum_of_squares) = deviations.fold((0.0, 0.0), |(s, sq), d: f64| {
            (s + d, d.mul_add(d, sq))
        });

        #[allow(clippy::cast_precision_loss)]
        let n = self.size as f64;
        let variance = (sum * sum).mul_add(-self.length_reciprocal, sum_of_squares) / (n - 1.0);

        Some(variance.max(0.0))
    }

    /// Mean and mean absolute deviation around it, O(n).
    pub fn mean_abs_deviation(&self) -> Option<(Price, f64)> {
        let mean = self.shifted_mean()?;
        let total: f64 = self.values().map(|x| (x - mean).abs()).sum();
        Some((mean, total * self.length_reciprocal))
    }

    fn values(&self) -> impl Iterator<Item = Price> + '_ {
        self.window.iter().flatten().copied()
    }

    fn deviations(&self) -> Option<(Price, impl Iterator<Item = f64> + '_)> {
        if !self.is_ready() {
            return None;
        }
        let pivot = self.values().next()?;
        Some((pivot, self.values().map(move |x| x - pivot)))
    }
}
