use chrono::NaiveDate;
use thiserror::Error;

/// Errors surfaced by the engine.
///
/// Only configuration and input-shape problems are errors. Short series and
/// numerically degenerate windows are not: they show up as `None` values in
/// the affected column.
#[derive(Debug, Error)]
pub enum Error {
    /// A period parameter is zero.
    #[error("invalid period `{name}`: {value} (must be a positive integer)")]
    InvalidPeriod { name: &'static str, value: usize },

    /// The Bollinger standard deviation multiplier is negative or not finite.
    #[error("invalid bollinger_std_mult: {0} (must be finite and non-negative)")]
    InvalidStdMult(f64),

    /// The same overlay period was requested twice.
    #[error("duplicate {kind} overlay period {period}")]
    DuplicateOverlay { kind: &'static str, period: usize },

    /// The engine was given a series with no bars.
    #[error("price series is empty")]
    EmptySeries,

    /// A bar violates the OHLC invariants.
    #[error("invalid bar at index {index} ({date}): {reason}")]
    InvalidBar {
        index: usize,
        date: NaiveDate,
        reason: &'static str,
    },

    /// A bar is not strictly after its predecessor.
    #[error("bar at index {index} ({date}) is not after the previous bar ({previous})")]
    OutOfOrder {
        index: usize,
        date: NaiveDate,
        previous: NaiveDate,
    },

    /// A price alert target is NaN or infinite.
    #[error("invalid alert target: {0} (must be finite)")]
    InvalidAlertTarget(f64),

    /// The TOML configuration could not be parsed.
    #[error("failed to parse indicator config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether the error stems from the indicator configuration rather than
    /// the price data.
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::InvalidPeriod { .. }
                | Self::InvalidStdMult(_)
                | Self::DuplicateOverlay { .. }
                | Self::ConfigParse(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_period_message_names_parameter() {
        let err = Error::InvalidPeriod {
            name: "rsi_period",
            value: 0,
        };
        assert_eq!(
            err.to_string(),
            "invalid period `rsi_period`: 0 (must be a positive integer)"
        );
        assert!(err.is_config());
    }

    #[test]
    fn out_of_order_message_includes_dates() {
        let err = Error::OutOfOrder {
            index: 3,
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            previous: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "bar at index 3 (2024-01-02) is not after the previous bar (2024-01-03)"
        );
        assert!(!err.is_config());
    }

    #[test]
    fn empty_series_is_not_config() {
        assert!(!Error::EmptySeries.is_config());
    }
}
