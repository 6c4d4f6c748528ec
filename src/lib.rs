//! Batch technical analysis over daily OHLCV price history.
//!
//! [`compute`] turns a validated [`PriceSeries`] and an
//! [`IndicatorConfig`] into an [`IndicatorFrame`]: the input bars plus one
//! named [`Column`] per indicator output, aligned bar-for-bar. Positions
//! where a value is not yet available (or numerically undefined) hold
//! `None`.
//!
//! Every indicator is also available as a standalone function
//! ([`sma`], [`ema`], [`rsi`], [`macd`], [`bollinger`], [`stochastic`],
//! [`williams_r`], [`cci`], [`atr`], [`momentum`], [`rate_of_change`],
//! [`volume`]). All of them are pure: the same input gives bit-identical
//! output.
//!
//! ```
//! use quantedge_engine::{IndicatorConfig, PriceBar, PriceSeries, columns, compute};
//! use chrono::NaiveDate;
//!
//! let bars = (1..=40_u32)
//!     .map(|d| {
//!         let close = 50.0 + f64::from(d % 7);
//!         let date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap() + chrono::Days::new(d.into());
//!         PriceBar::new(date, close, close + 0.5, close - 0.5, close, 10_000)
//!     })
//!     .collect();
//! let series = PriceSeries::new(bars).unwrap();
//!
//! let frame = compute(&series, &IndicatorConfig::default()).unwrap();
//! let rsi = frame.latest(columns::RSI).unwrap();
//! assert!((0.0..=100.0).contains(&rsi));
//! ```

mod alert;
mod atr;
mod bb;
mod cci;
mod config;
mod ema;
mod engine;
mod error;
mod frame;
mod indicator;
mod macd;
mod momentum;
mod ohlcv;
mod price_source;
mod price_window;
mod range_window;
mod ring_buffer;
mod rsi;
mod series;
mod sma;
mod stochastic;
mod summary;
mod volume;
mod williams_r;

pub use crate::config::{IndicatorConfig, IndicatorConfigBuilder};
pub use crate::engine::compute;
pub use crate::error::{Error, Result};
pub use crate::frame::{Column, IndicatorFrame, columns};
pub use crate::ohlcv::{Ohlcv, Price};
pub use crate::price_source::PriceSource;
pub use crate::series::{PriceBar, PriceSeries};

pub use crate::atr::atr;
pub use crate::bb::{BollingerColumns, StdDev, bollinger};
pub use crate::cci::cci;
pub use crate::ema::ema;
pub use crate::macd::{MacdColumns, macd};
pub use crate::momentum::{momentum, rate_of_change};
pub use crate::rsi::{RsiZone, rsi};
pub use crate::sma::sma;
pub use crate::stochastic::{StochasticColumns, stochastic};
pub use crate::volume::{VolumeColumns, volume};
pub use crate::williams_r::williams_r;

pub use crate::alert::{AlertBook, Direction, PriceAlert};
pub use crate::summary::{PriceChange, SeriesSummary, price_change};

#[cfg(test)]
mod test_util;
