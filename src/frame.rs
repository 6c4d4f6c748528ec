use indexmap::IndexMap;
use serde::Serialize;

use crate::{Price, PriceBar};

/// One indicator column, aligned index-for-index with the bars it was
/// computed from. `None` marks positions where the value is not yet
/// available or numerically undefined.
pub type Column = Vec<Option<f64>>;

/// Column names produced by [`compute`](crate::compute).
///
/// Consumers look columns up by these names, so they are part of the public
/// contract.
pub mod columns {
    pub const SMA: &str = "SMA";
    pub const EMA: &str = "EMA";
    pub const RSI: &str = "RSI";
    pub const MACD: &str = "MACD";
    pub const MACD_SIGNAL: &str = "MACD_Signal";
    pub const MACD_HISTOGRAM: &str = "MACD_Histogram";
    pub const BB_UPPER: &str = "BB_Upper";
    pub const BB_MIDDLE: &str = "BB_Middle";
    pub const BB_LOWER: &str = "BB_Lower";
    pub const STOCH_K: &str = "Stoch_K";
    pub const STOCH_D: &str = "Stoch_D";
    pub const WILLIAMS_R: &str = "Williams_R";
    pub const CCI: &str = "CCI";
    pub const ATR: &str = "ATR";
    pub const MOMENTUM: &str = "Momentum";
    pub const ROC: &str = "ROC";
    pub const VOLUME_SMA: &str = "Volume_SMA";
    pub const VOLUME_RATIO: &str = "Volume_Ratio";

    /// Input field names. No indicator column may use them.
    pub const RESERVED: [&str; 5] = ["Open", "High", "Low", "Close", "Volume"];

    /// Name of an extra SMA overlay, e.g. `SMA_50`.
    #[must_use]
    pub fn sma_overlay(period: usize) -> String {
        format!("{SMA}_{period}")
    }

    /// Name of an extra EMA overlay, e.g. `EMA_26`.
    #[must_use]
    pub fn ema_overlay(period: usize) -> String {
        format!("{EMA}_{period}")
    }
}

/// Price bars together with the indicator columns computed over them.
///
/// Columns keep the order in which they were computed. Every column has
/// exactly [`len`](Self::len) entries.
///
/// # Example
///
/// ```
/// use quantedge_engine::{IndicatorConfig, PriceBar, PriceSeries, columns, compute};
/// # use chrono::NaiveDate;
/// # let series = PriceSeries::new(
/// #     (1..=30).map(|d| {
/// #         let c = 100.0 + f64::from(d);
/// #         PriceBar::new(NaiveDate::from_ymd_opt(2024, 1, d).unwrap(), c, c + 1.0, c - 1.0, c, 1_000)
/// #     }).collect(),
/// # ).unwrap();
///
/// let frame = compute(&series, &IndicatorConfig::default()).unwrap();
///
/// assert_eq!(frame.len(), 30);
/// assert_eq!(frame.value(columns::SMA, 18), None);
/// assert!(frame.latest(columns::SMA).is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorFrame {
    bars: Vec<PriceBar>,
    columns: IndexMap<String, Column>,
}

impl IndicatorFrame {
    pub(crate) fn new(bars: Vec<PriceBar>) -> Self {
        Self {
            bars,
            columns: IndexMap::new(),
        }
    }

    /// Appends a column. Names are fixed by the engine and validated config,
    /// so a collision or length mismatch is a bug in the caller.
    pub(crate) fn insert(&mut self, name: impl Into<String>, column: Column) {
        let name = name.into();
        debug_assert_eq!(column.len(), self.bars.len(), "column {name} misaligned");
        debug_assert!(
            !columns::RESERVED.contains(&name.as_str()),
            "column {name} shadows an input field"
        );
        let previous = self.columns.insert(name, column);
        debug_assert!(previous.is_none(), "duplicate column");
    }

    /// Number of bars, and so the length of every column.
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

    /// The input bars, in date order.
    #[must_use]
    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    /// Column by name, `None` if no such column was computed.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[Option<Price>]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Value of column `name` at bar `index`.
    ///
    /// `None` when the column does not exist, the index is out of range, or
    /// the value is undefined at that position.
    #[must_use]
    pub fn value(&self, name: &str, index: usize) -> Option<Price> {
        self.column(name)?.get(index).copied().flatten()
    }

    /// Value of column `name` at the most recent bar.
    #[must_use]
    pub fn latest(&self, name: &str) -> Option<Price> {
        self.value(name, self.len().checked_sub(1)?)
    }

    /// Column names in computation order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// `(name, column)` pairs in computation order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Option<Price>])> {
        self.columns
            .iter()
            .map(|(name, column)| (name.as_str(), column.as_slice()))
    }

    /// Number of indicator columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}
