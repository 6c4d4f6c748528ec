use crate::{Ohlcv, PriceSeries};

use std::fmt::{Debug, Display};

use tracing::trace;

/// A technical indicator expressed as a single-pass fold over price bars.
///
/// Each call to [`compute`](Indicator::compute) consumes the next bar of the
/// series and returns the value at that position, or `None` while the
/// lookback window is not yet satisfied or the value is numerically
/// undefined. Fold state lives only for the duration of one batch run.
pub(crate) trait Indicator: Sized + Clone + Display + Debug {
    /// Per-bar output. `f64` for simple indicators, a struct for composite
    /// ones (e.g. Bollinger Bands).
    type Output: Copy + Debug;

    /// Feeds the next bar and returns the value at its position.
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<Self::Output>;
}

/// Runs `indicator` over every bar of `series`, one output per bar.
pub(crate) fn fold<I: Indicator>(mut indicator: I, series: &PriceSeries) -> Vec<Option<I::Output>> {
    let values: Vec<_> = series.iter().map(|bar| indicator.compute(bar)).collect();

    trace!(
        indicator = %indicator,
        bars = values.len(),
        defined = values.iter().filter(|v| v.is_some()).count(),
        "indicator folded"
    );

    values
}

/// Projects one field out of a composite output column.
pub(crate) fn project<T: Copy>(
    values: &[Option<T>],
    field: impl Fn(T) -> Option<f64>,
) -> Vec<Option<f64>> {
    values.iter().map(|v| v.and_then(&field)).collect()
}
