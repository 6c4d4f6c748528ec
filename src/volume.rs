use std::{fmt::Display, num::NonZero};

use crate::{
    Column, Ohlcv, Price, PriceSeries, PriceSource,
    indicator::{Indicator, fold, project},
    sma::Sma,
};

/// Average volume and volume ratio columns of [`volume`].
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeColumns {
    pub sma: Column,
    pub ratio: Column,
}

/// Trailing average volume over `length` bars and each bar's volume relative
/// to it.
///
/// ```text
/// sma   = SMA(volume, length)
/// ratio = volume / sma
/// ```
///
/// Both are `None` for the first `length − 1` bars; the ratio is also `None`
/// wherever the average is zero.
#[must_use]
pub fn volume(series: &PriceSeries, length: NonZero<usize>) -> VolumeColumns {
    let values = fold(RelativeVolume::new(length), series);

    VolumeColumns {
        sma: project(&values, |v| Some(v.sma)),
        ratio: project(&values, |v| v.ratio),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct VolumeValue {
    sma: Price,
    ratio: Option<Price>,
}

#[derive(Clone, Debug)]
pub(crate) struct RelativeVolume {
    sma: Sma,
}

impl RelativeVolume {
    pub(crate) fn new(length: NonZero<usize>) -> Self {
        Self {
            sma: Sma::new(length, PriceSource::Volume),
        }
    }
}

impl Indicator for RelativeVolume {
    type Output = VolumeValue;

    #[inline]
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<VolumeValue> {
        let sma = self.sma.compute(ohlcv)?.max(0.0);
        let ratio = (sma > 0.0).then(|| ohlcv.volume() / sma);
        Some(VolumeValue { sma, ratio })
    }
}

impl Display for RelativeVolume {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RVOL({})", self.sma)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{assert_approx, volumes};

    fn nz(n: usize) -> NonZero<usize> {
        NonZero::new(n).unwrap()
    }

    #[test]
    fn average_volume() {
        let columns = volume(&volumes(&[100, 200, 600]), nz(3));
        assert_eq!(columns.sma, vec![None, None, Some(300.0)]);
    }

    #[test]
    fn ratio_against_average() {
        let columns = volume(&volumes(&[100, 200, 600]), nz(3));
        assert_eq!(columns.ratio[..2], [None, None]);
        assert_approx!(columns.ratio[2].unwrap(), 2.0);
    }

    #[test]
    fn zero_average_leaves_ratio_undefined() {
        let columns = volume(&volumes(&[0, 0, 0, 30]), nz(2));
        assert_eq!(columns.sma[1], Some(0.0));
        assert_eq!(columns.ratio[1], None);
        assert_eq!(columns.ratio[2], None);
        assert_approx!(columns.ratio[3].unwrap(), 2.0);
    }

    #[test]
    fn display() {
        assert_eq!(
            RelativeVolume::new(nz(20)).to_string(),
            "RVOL(SMA(20, Volume))"
        );
    }
}
