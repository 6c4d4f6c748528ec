/// A price value.
///
/// Semantic alias for [`f64`]. Documents intent in function signatures
/// without introducing newtype construction overhead.
pub type Price = f64;

/// OHLCV bar data read by every indicator.
///
/// Implemented by [`PriceBar`](crate::PriceBar). Indicators accept
/// `&impl Ohlcv` and extract the configured [`PriceSource`](crate::PriceSource)
/// internally.
///
/// # Example
///
/// ```
/// use quantedge_engine::{Ohlcv, Price};
///
/// struct Candle {
///     o: f64, h: f64, l: f64, c: f64,
///     v: u64,
/// }
///
/// impl Ohlcv for Candle {
///     fn open(&self) -> Price { self.o }
///     fn high(&self) -> Price { self.h }
///     fn low(&self) -> Price { self.l }
///     fn close(&self) -> Price { self.c }
///     fn volume(&self) -> f64 { self.v as f64 }
/// }
/// ```
pub trait Ohlcv {
    /// Opening price of the bar.
    fn open(&self) -> Price;

    /// Highest price during the bar.
    fn high(&self) -> Price;

    /// Lowest price during the bar.
    fn low(&self) -> Price;

    /// Closing price of the bar.
    fn close(&self) -> Price;

    /// Traded volume during the bar.
    fn volume(&self) -> f64;

    /// Typical price: `(high + low + close) / 3`.
    #[inline]
    fn typical_price(&self) -> Price {
        (self.high() + self.low() + self.close()) / 3.0
    }
}
