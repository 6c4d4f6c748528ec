use std::{
    fmt::Display,
    hash::{Hash, Hasher},
    num::NonZero,
};

use crate::{
    Column, Error, Ohlcv, Price, PriceSeries, PriceSource, Result,
    indicator::{Indicator, fold, project},
    price_source::SourceReader,
    price_window::PriceWindow,
};

/// Standard deviation multiplier for Bollinger Bands.
///
/// Wraps a finite, non-negative `f64`. A multiplier of zero collapses both
/// bands onto the middle band.
///
/// Defaults to `2.0` (the standard Bollinger Bands setting).
///
/// Implements `Eq` and `Hash` via bit-level comparison, which is safe because
/// NaN is rejected at construction.
#[derive(Clone, Copy, Debug)]
pub struct StdDev(f64);

impl StdDev {
    /// Creates a new standard deviation multiplier.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidStdMult`] if `value` is negative, NaN or infinite.
    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() && value >= 0.0 {
            // normalizes -0.0
            Ok(Self(value.abs()))
        } else {
            Err(Error::InvalidStdMult(value))
        }
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for StdDev {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for StdDev {}

impl Hash for StdDev {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl Default for StdDev {
    fn default() -> Self {
        Self(2.0)
    }
}

impl Display for StdDev {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Upper, middle and lower columns of [`bollinger`].
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerColumns {
    pub upper: Column,
    pub middle: Column,
    pub lower: Column,
}

/// Bollinger Bands of the close over `length` bars.
///
/// ```text
/// middle = SMA(close, length)
/// upper  = middle + k × σ
/// lower  = middle − k × σ
/// ```
///
/// `σ` is the sample (`n − 1`) standard deviation of the same window as the
/// middle band, so all three bands are `None` for the first `length − 1`
/// bars. With `length = 1` the sample deviation does not exist: the middle
/// band is defined, the outer bands are not.
#[must_use]
pub fn bollinger(series: &PriceSeries, length: NonZero<usize>, std_dev: StdDev) -> BollingerColumns {
    let values = fold(Bb::new(length, std_dev), series);

    BollingerColumns {
        upper: project(&values, BbValue::upper),
        middle: project(&values, |v| Some(v.middle())),
        lower: project(&values, BbValue::lower),
    }
}

/// Bollinger Bands output at one position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct BbValue {
    middle: Price,
    offset: Option<Price>,
}

impl BbValue {
    /// Upper band: `SMA + k × σ`.
    #[inline]
    pub(crate) fn upper(self) -> Option<Price> {
        self.offset.map(|offset| self.middle + offset)
    }

    /// Middle band: SMA of the window.
    #[inline]
    pub(crate) fn middle(self) -> Price {
        self.middle
    }

    /// Lower band: `SMA − k × σ`.
    #[inline]
    pub(crate) fn lower(self) -> Option<Price> {
        self.offset.map(|offset| self.middle - offset)
    }
}

/// Bollinger Bands fold.
///
/// The middle band uses the window's running sum (O(1), identical to
/// [`sma`](crate::sma)); the deviation is recomputed over the window in O(n)
/// from offsets against the oldest value, which keeps a constant window at
/// exactly zero width.
#[derive(Clone, Debug)]
pub(crate) struct Bb {
    length: usize,
    std_dev: StdDev,
    reader: SourceReader,
    window: PriceWindow,
}

impl Bb {
    pub(crate) fn new(length: NonZero<usize>, std_dev: StdDev) -> Self {
        Self {
            length: length.get(),
            std_dev,
            reader: SourceReader::new(PriceSource::Close),
            window: PriceWindow::new(length.get()),
        }
    }
}

impl Indicator for Bb {
    type Output = BbValue;

    #[inline]
    fn compute(&mut self, ohlcv: &impl Ohlcv) -> Option<BbValue> {
        let price = self.reader.read(ohlcv);
        self.window.push(Some(price));

        let middle = self.window.mean()?;
        let offset = self
            .window
            .sample_variance()
            .map(|variance| variance.sqrt() * self.std_dev.value());

        Some(BbValue { middle, offset })
    }
}

impl Display for Bb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BB({}, {})", self.length, self.std_dev)
    }
}
