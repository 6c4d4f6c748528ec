use crate::{Ohlcv, Price};

use std::fmt::{Debug, Display};

/// Value extracted from an [`Ohlcv`] bar before feeding into an indicator.
///
/// Moving averages are configured with a `PriceSource` that determines which
/// value (or derived value) they average. The engine uses [`Close`] for the
/// price averages, [`HLC3`] for CCI, [`TrueRange`] for ATR and [`Volume`] for
/// the volume average.
///
/// [`Close`]: PriceSource::Close
/// [`HLC3`]: PriceSource::HLC3
/// [`TrueRange`]: PriceSource::TrueRange
/// [`Volume`]: PriceSource::Volume
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug)]
pub enum PriceSource {
    /// Opening price.
    Open,
    /// Highest price.
    High,
    /// Closing price.
    #[default]
    Close,
    /// Lowest price.
    Low,
    /// Median price: `(high + low) / 2`.
    HL2,
    /// Typical price: `(high + low + close) / 3`.
    HLC3,
    /// True range: `max(high - low, |high - prev_close|, |low - prev_close|)`.
    ///
    /// On the first bar (no previous close), falls back to `high - low`.
    TrueRange,
    /// Traded volume.
    Volume,
}

impl Display for PriceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl PriceSource {
    /// Whether extraction depends on the previous bar's close.
    #[inline]
    pub(crate) fn needs_prev_close(self) -> bool {
        matches!(self, Self::TrueRange)
    }

    #[inline]
    pub(crate) fn extract(self, ohlcv: &impl Ohlcv, prev_close: Option<Price>) -> Price {
        match self {
            Self::Open => ohlcv.open(),
            Self::High => ohlcv.high(),
            Self::Close => ohlcv.close(),
            Self::Low => ohlcv.low(),
            Self::HL2 => f64::midpoint(ohlcv.high(), ohlcv.low()),
            Self::HLC3 => ohlcv.typical_price(),
            Self::TrueRange => {
                let hl = ohlcv.high() - ohlcv.low();

                match prev_close {
                    Some(prev_close) => {
                        let hc = (ohlcv.high() - prev_close).abs();
                        let lc = (ohlcv.low() - prev_close).abs();
                        hl.max(hc).max(lc)
                    }
                    None => hl,
                }
            }
            Self::Volume => ohlcv.volume(),
        }
    }
}

/// Feeds bars through a [`PriceSource`], remembering the previous close for
/// [`PriceSource::TrueRange`].
#[derive(Clone, Copy, Debug)]
pub(crate) struct SourceReader {
    source: PriceSource,
    prev_close: Option<Price>,
}

impl SourceReader {
    pub(crate) fn new(source: PriceSource) -> Self {
        Self {
            source,
            prev_close: None,
        }
    }

    #[inline]
    pub(crate) fn source(&self) -> PriceSource {
        self.source
    }

    #[inline]
    pub(crate) fn read(&mut self, ohlcv: &impl Ohlcv) -> Price {
        let price = self.source.extract(ohlcv, self.prev_close);
        if self.source.needs_prev_close() {
            self.prev_close = Some(ohlcv.close());
        }
        price
    }
}
