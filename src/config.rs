use std::{collections::HashSet, fmt::Display, num::NonZero};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, StdDev};

/// Parameters of every indicator [`compute`](crate::compute) produces.
///
/// Built with [`IndicatorConfig::builder`], which only accepts non-zero
/// periods, or deserialized (for example with
/// [`from_toml_str`](Self::from_toml_str)). Missing fields take their
/// defaults; unknown fields are rejected.
///
/// Deserialized values are not trusted: [`validate`](Self::validate) runs
/// before any computation and rejects zero periods, a negative or
/// non-finite Bollinger multiplier, and repeated overlay periods.
///
/// # Example
///
/// ```
/// use quantedge_engine::IndicatorConfig;
/// use std::num::NonZero;
///
/// let config = IndicatorConfig::builder()
///     .rsi_period(NonZero::new(7).unwrap())
///     .sma_overlay(NonZero::new(50).unwrap())
///     .build();
///
/// assert_eq!(config.rsi_period(), 7);
/// assert_eq!(config.sma_period(), 20);
/// assert_eq!(config.sma_overlays(), &[50]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndicatorConfig {
    sma_period: usize,
    ema_period: usize,
    rsi_period: usize,
    macd_fast: usize,
    macd_slow: usize,
    macd_signal: usize,
    bollinger_period: usize,
    bollinger_std_mult: f64,
    stochastic_k: usize,
    stochastic_d: usize,
    williams_period: usize,
    cci_period: usize,
    atr_period: usize,
    momentum_period: usize,
    roc_period: usize,
    volume_sma_period: usize,
    sma_overlays: Vec<usize>,
    ema_overlays: Vec<usize>,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            sma_period: 20,
            ema_period: 12,
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bollinger_period: 20,
            bollinger_std_mult: 2.0,
            stochastic_k: 14,
            stochastic_d: 3,
            williams_period: 14,
            cci_period: 20,
            atr_period: 14,
            momentum_period: 10,
            roc_period: 12,
            volume_sma_period: 20,
            sma_overlays: Vec::new(),
            ema_overlays: Vec::new(),
        }
    }
}

impl IndicatorConfig {
    /// Returns a builder seeded with the default parameters.
    #[must_use]
    pub fn builder() -> IndicatorConfigBuilder {
        IndicatorConfigBuilder::new()
    }

    /// Parses and validates a TOML document.
    ///
    /// ```
    /// use quantedge_engine::IndicatorConfig;
    ///
    /// let config = IndicatorConfig::from_toml_str(
    ///     "rsi_period = 9\nbollinger_std_mult = 2.5\nema_overlays = [26, 50]",
    /// ).unwrap();
    ///
    /// assert_eq!(config.rsi_period(), 9);
    /// assert_eq!(config.ema_overlays(), &[26, 50]);
    /// ```
    ///
    /// # Errors
    ///
    /// [`Error::ConfigParse`] for malformed TOML, unknown keys or mistyped
    /// values; any error of [`validate`](Self::validate) otherwise.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every parameter.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidPeriod`] naming the first zero period.
    /// - [`Error::InvalidStdMult`] if the Bollinger multiplier is negative or
    ///   not finite.
    /// - [`Error::DuplicateOverlay`] if an overlay period is listed twice.
    pub fn validate(&self) -> Result<()> {
        self.resolve().map(|_| ())
    }

    /// Validated parameters with their non-zero types restored.
    pub(crate) fn resolve(&self) -> Result<Params> {
        Ok(Params {
            sma: period("sma_period", self.sma_period)?,
            ema: period("ema_period", self.ema_period)?,
            rsi: period("rsi_period", self.rsi_period)?,
            macd_fast: period("macd_fast", self.macd_fast)?,
            macd_slow: period("macd_slow", self.macd_slow)?,
            macd_signal: period("macd_signal", self.macd_signal)?,
            bollinger: period("bollinger_period", self.bollinger_period)?,
            bollinger_std_mult: StdDev::new(self.bollinger_std_mult)?,
            stochastic_k: period("stochastic_k", self.stochastic_k)?,
            stochastic_d: period("stochastic_d", self.stochastic_d)?,
            williams: period("williams_period", self.williams_period)?,
            cci: period("cci_period", self.cci_period)?,
            atr: period("atr_period", self.atr_period)?,
            momentum: period("momentum_period", self.momentum_period)?,
            roc: period("roc_period", self.roc_period)?,
            volume_sma: period("volume_sma_period", self.volume_sma_period)?,
            sma_overlays: overlays("sma", "sma_overlays", &self.sma_overlays)?,
            ema_overlays: overlays("ema", "ema_overlays", &self.ema_overlays)?,
        })
    }

    #[must_use]
    pub fn sma_period(&self) -> usize {
        self.sma_period
    }

    #[must_use]
    pub fn ema_period(&self) -> usize {
        self.ema_period
    }

    #[must_use]
    pub fn rsi_period(&self) -> usize {
        self.rsi_period
    }

    #[must_use]
    pub fn macd_fast(&self) -> usize {
        self.macd_fast
    }

    #[must_use]
    pub fn macd_slow(&self) -> usize {
        self.macd_slow
    }

    #[must_use]
    pub fn macd_signal(&self) -> usize {
        self.macd_signal
    }

    #[must_use]
    pub fn bollinger_period(&self) -> usize {
        self.bollinger_period
    }

    #[must_use]
    pub fn bollinger_std_mult(&self) -> f64 {
        self.bollinger_std_mult
    }

    #[must_use]
    pub fn stochastic_k(&self) -> usize {
        self.stochastic_k
    }

    #[must_use]
    pub fn stochastic_d(&self) -> usize {
        self.stochastic_d
    }

    #[must_use]
    pub fn williams_period(&self) -> usize {
        self.williams_period
    }

    #[must_use]
    pub fn cci_period(&self) -> usize {
        self.cci_period
    }

    #[must_use]
    pub fn atr_period(&self) -> usize {
        self.atr_period
    }

    #[must_use]
    pub fn momentum_period(&self) -> usize {
        self.momentum_period
    }

    #[must_use]
    pub fn roc_period(&self) -> usize {
        self.roc_period
    }

    #[must_use]
    pub fn volume_sma_period(&self) -> usize {
        self.volume_sma_period
    }

    /// Extra SMA periods, each producing an `SMA_{period}` column.
    #[must_use]
    pub fn sma_overlays(&self) -> &[usize] {
        &self.sma_overlays
    }

    /// Extra EMA periods, each producing an `EMA_{period}` column.
    #[must_use]
    pub fn ema_overlays(&self) -> &[usize] {
        &self.ema_overlays
    }
}

impl Display for IndicatorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "IndicatorConfig(SMA {}, EMA {}, RSI {}, MACD {}/{}/{}, BB {}x{}, STOCH {}/{}, \
             WILLR {}, CCI {}, ATR {}, MOM {}, ROC {}, VOL {})",
            self.sma_period,
            self.ema_period,
            self.rsi_period,
            self.macd_fast,
            self.macd_slow,
            self.macd_signal,
            self.bollinger_period,
            self.bollinger_std_mult,
            self.stochastic_k,
            self.stochastic_d,
            self.williams_period,
            self.cci_period,
            self.atr_period,
            self.momentum_period,
            self.roc_period,
            self.volume_sma_period,
        )
    }
}

fn period(name: &'static str, value: usize) -> Result<NonZero<usize>> {
    NonZero::new(value).ok_or(Error::InvalidPeriod { name, value })
}

fn overlays(
    kind: &'static str,
    name: &'static str,
    values: &[usize],
) -> Result<Vec<NonZero<usize>>> {
    let mut seen = HashSet::with_capacity(values.len());
    values
        .iter()
        .map(|&value| {
            let checked = period(name, value)?;
            if !seen.insert(value) {
                return Err(Error::DuplicateOverlay {
                    kind,
                    period: value,
                });
            }
            Ok(checked)
        })
        .collect()
}

/// [`IndicatorConfig`] after validation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Params {
    pub sma: NonZero<usize>,
    pub ema: NonZero<usize>,
    pub rsi: NonZero<usize>,
    pub macd_fast: NonZero<usize>,
    pub macd_slow: NonZero<usize>,
    pub macd_signal: NonZero<usize>,
    pub bollinger: NonZero<usize>,
    pub bollinger_std_mult: StdDev,
    pub stochastic_k: NonZero<usize>,
    pub stochastic_d: NonZero<usize>,
    pub williams: NonZero<usize>,
    pub cci: NonZero<usize>,
    pub atr: NonZero<usize>,
    pub momentum: NonZero<usize>,
    pub roc: NonZero<usize>,
    pub volume_sma: NonZero<usize>,
    pub sma_overlays: Vec<NonZero<usize>>,
    pub ema_overlays: Vec<NonZero<usize>>,
}

/// Builder for [`IndicatorConfig`].
///
/// Starts from the defaults; every setter overrides one parameter.
#[derive(Debug, Clone)]
pub struct IndicatorConfigBuilder {
    config: IndicatorConfig,
}

macro_rules! period_setters {
    ($($field:ident),* $(,)?) => {
        $(
            #[inline]
            #[must_use]
            pub fn $field(mut self, period: NonZero<usize>) -> Self {
                self.config.$field = period.get();
                self
            }
        )*
    };
}

impl IndicatorConfigBuilder {
    fn new() -> Self {
        Self {
            config: IndicatorConfig::default(),
        }
    }

    period_setters!(
        sma_period,
        ema_period,
        rsi_period,
        macd_fast,
        macd_slow,
        macd_signal,
        bollinger_period,
        stochastic_k,
        stochastic_d,
        williams_period,
        cci_period,
        atr_period,
        momentum_period,
        roc_period,
        volume_sma_period,
    );

    #[inline]
    #[must_use]
    pub fn bollinger_std_mult(mut self, mult: StdDev) -> Self {
        self.config.bollinger_std_mult = mult.value();
        self
    }

    /// Adds an extra SMA column over `period` bars.
    #[inline]
    #[must_use]
    pub fn sma_overlay(mut self, period: NonZero<usize>) -> Self {
        self.config.sma_overlays.push(period.get());
        self
    }

    /// Adds an extra EMA column over `period` bars.
    #[inline]
    #[must_use]
    pub fn ema_overlay(mut self, period: NonZero<usize>) -> Self {
        self.config.ema_overlays.push(period.get());
        self
    }

    #[inline]
    #[must_use]
    pub fn build(self) -> IndicatorConfig {
        self.config
    }
}
