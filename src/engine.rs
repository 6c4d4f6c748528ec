use tracing::{debug, trace};

use crate::{
    Column, Error, IndicatorConfig, IndicatorFrame, PriceSeries, PriceSource, Result, atr,
    bollinger, cci, columns, ema, macd, momentum, rate_of_change, rsi, sma, stochastic, volume,
    williams_r,
};

/// Computes every configured indicator over `series`.
///
/// The configuration is validated first; nothing is computed if it is
/// invalid. A series shorter than an indicator's window is not an error:
/// that indicator's columns are entirely `None` and the others are
/// unaffected.
///
/// The result is a pure function of its inputs. Calling `compute` twice
/// with the same series and config yields bit-identical columns.
///
/// # Errors
///
/// - Any configuration error from [`IndicatorConfig::validate`].
/// - [`Error::EmptySeries`] if `series` has no bars.
pub fn compute(series: &PriceSeries, config: &IndicatorConfig) -> Result<IndicatorFrame> {
    let params = config.resolve()?;
    if series.is_empty() {
        return Err(Error::EmptySeries);
    }

    debug!(bars = series.len(), %config, "computing indicators");

    let mut frame = Frame {
        inner: IndicatorFrame::new(series.bars().to_vec()),
    };

    frame.add(columns::SMA, params.sma.get(), sma(series, PriceSource::Close, params.sma));
    for &period in &params.sma_overlays {
        frame.add(
            columns::sma_overlay(period.get()),
            period.get(),
            sma(series, PriceSource::Close, period),
        );
    }

    frame.add(columns::EMA, 1, ema(series, PriceSource::Close, params.ema));
    for &period in &params.ema_overlays {
        frame.add(
            columns::ema_overlay(period.get()),
            1,
            ema(series, PriceSource::Close, period),
        );
    }

    // first delta needs two bars
    frame.add(
        columns::RSI,
        params.rsi.get().saturating_add(1),
        rsi(series, params.rsi),
    );

    let lines = macd(series, params.macd_fast, params.macd_slow, params.macd_signal);
    frame.add(columns::MACD, 1, lines.macd);
    frame.add(columns::MACD_SIGNAL, 1, lines.signal);
    frame.add(columns::MACD_HISTOGRAM, 1, lines.histogram);

    let bands = bollinger(series, params.bollinger, params.bollinger_std_mult);
    let bollinger_period = params.bollinger.get();
    frame.add(columns::BB_UPPER, bollinger_period, bands.upper);
    frame.add(columns::BB_MIDDLE, bollinger_period, bands.middle);
    frame.add(columns::BB_LOWER, bollinger_period, bands.lower);

    let oscillator = stochastic(series, params.stochastic_k, params.stochastic_d);
    let k_period = params.stochastic_k.get();
    frame.add(columns::STOCH_K, k_period, oscillator.k);
    frame.add(
        columns::STOCH_D,
        k_period.saturating_add(params.stochastic_d.get() - 1),
        oscillator.d,
    );

    frame.add(
        columns::WILLIAMS_R,
        params.williams.get(),
        williams_r(series, params.williams),
    );
    frame.add(columns::CCI, params.cci.get(), cci(series, params.cci));
    frame.add(columns::ATR, params.atr.get(), atr(series, params.atr));
    frame.add(
        columns::MOMENTUM,
        params.momentum.get().saturating_add(1),
        momentum(series, params.momentum),
    );
    frame.add(
        columns::ROC,
        params.roc.get().saturating_add(1),
        rate_of_change(series, params.roc),
    );

    let traded = volume(series, params.volume_sma);
    let volume_period = params.volume_sma.get();
    frame.add(columns::VOLUME_SMA, volume_period, traded.sma);
    frame.add(columns::VOLUME_RATIO, volume_period, traded.ratio);

    let frame = frame.inner;
    debug!(
        bars = frame.len(),
        columns = frame.column_count(),
        "indicators computed"
    );

    Ok(frame)
}

/// Wraps the frame under construction so every column is logged the same
/// way as it is added.
struct Frame {
    inner: IndicatorFrame,
}

impl Frame {
    /// Adds `column`, which needs at least `required` bars before its first
    /// value can exist.
    fn add(&mut self, name: impl Into<String>, required: usize, column: Column) {
        let name = name.into();
        let defined = column.iter().filter(|v| v.is_some()).count();
        let bars = self.inner.len();

        trace!(column = %name, defined, bars, "column computed");
        if defined == 0 && bars < required {
            debug!(
                column = %name,
                bars,
                required,
                "series shorter than window, column undefined"
            );
        }

        self.inner.insert(name, column);
    }
}
