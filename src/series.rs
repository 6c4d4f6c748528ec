use std::ops::Index;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Error, Ohlcv, Price, Result};

/// One trading day of price history.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use quantedge_engine::{Ohlcv, PriceBar};
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let bar = PriceBar::new(date, 100.0, 105.0, 99.0, 104.0, 1_200_000);
///
/// assert_eq!(bar.close(), 104.0);
/// assert_eq!(bar.date(), date);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    date: NaiveDate,
    open: Price,
    high: Price,
    low: Price,
    close: Price,
    volume: u64,
}

impl PriceBar {
    #[must_use]
    pub fn new(
        date: NaiveDate,
        open: Price,
        high: Price,
        low: Price,
        close: Price,
        volume: u64,
    ) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Trading date of the bar.
    #[inline]
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Raw share volume.
    #[inline]
    #[must_use]
    pub fn shares(&self) -> u64 {
        self.volume
    }

    fn defect(&self) -> Option<&'static str> {
        let prices = [self.open, self.high, self.low, self.close];

        if prices.iter().any(|p| !p.is_finite()) {
            Some("prices must be finite")
        } else if prices.iter().any(|&p| p <= 0.0) {
            Some("prices must be positive")
        } else if self.low > self.high {
            Some("low is above high")
        } else if !(self.low..=self.high).contains(&self.open) {
            Some("open is outside the low..=high range")
        } else if !(self.low..=self.high).contains(&self.close) {
            Some("close is outside the low..=high range")
        } else {
            None
        }
    }
}

impl Ohlcv for PriceBar {
    #[inline]
    fn open(&self) -> Price {
        self.open
    }

    #[inline]
    fn high(&self) -> Price {
        self.high
    }

    #[inline]
    fn low(&self) -> Price {
        self.low
    }

    #[inline]
    fn close(&self) -> Price {
        self.close
    }

    #[inline]
    #[allow(clippy::cast_precision_loss)]
    fn volume(&self) -> f64 {
        self.volume as f64
    }
}

/// Daily price history, sorted ascending by date with no duplicates.
///
/// The only input of [`compute`](crate::compute). Construction validates
/// every bar, so indicators can rely on positive prices and
/// `low <= {open, close} <= high`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Validates and wraps the bars.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidBar`] for a malformed bar, [`Error::OutOfOrder`] when
    /// dates are not strictly increasing.
    pub fn new(bars: Vec<PriceBar>) -> Result<Self> {
        for (index, bar) in bars.iter().enumerate() {
            if let Some(reason) = bar.defect() {
                return Err(Error::InvalidBar {
                    index,
                    date: bar.date,
                    reason,
                });
            }

            if let Some(previous) = index.checked_sub(1).map(|i| bars[i].date)
                && bar.date <= previous
            {
                return Err(Error::OutOfOrder {
                    index,
                    date: bar.date,
                    previous,
                });
            }
        }

        Ok(Self { bars })
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, PriceBar> {
        self.bars.iter()
    }

    #[must_use]
    pub fn first(&self) -> Option<&PriceBar> {
        self.bars.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    /// Closing prices, in order.
    pub fn closes(&self) -> impl Iterator<Item = Price> + '_ {
        self.bars.iter().map(Ohlcv::close)
    }

    #[must_use]
    pub fn into_bars(self) -> Vec<PriceBar> {
        self.bars
    }
}

impl TryFrom<Vec<PriceBar>> for PriceSeries {
    type Error = Error;

    fn try_from(bars: Vec<PriceBar>) -> Result<Self> {
        Self::new(bars)
    }
}

impl<'de> Deserialize<'de> for PriceSeries {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bars = Vec::<PriceBar>::deserialize(deserializer)?;
        Self::new(bars).map_err(serde::de::Error::custom)
    }
}

impl Index<usize> for PriceSeries {
    type Output = PriceBar;

    fn index(&self, index: usize) -> &PriceBar {
        &self.bars[index]
    }
}

impl<'a> IntoIterator for &'a PriceSeries {
    type Item = &'a PriceBar;
    type IntoIter = std::slice::Iter<'a, PriceBar>;

    fn into_iter(self) -> Self::IntoIter {
        self.bars.iter()
    }
}
