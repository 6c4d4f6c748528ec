use std::fmt::Display;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Price, Result};

/// Which side of the target price triggers an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Triggers once the price reaches or exceeds the target.
    Above,
    /// Triggers once the price reaches or falls below the target.
    Below,
}

impl Direction {
    #[inline]
    fn crossed(self, price: Price, target: Price) -> bool {
        match self {
            Self::Above => price >= target,
            Self::Below => price <= target,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Above => write!(f, "above"),
            Self::Below => write!(f, "below"),
        }
    }
}

/// A one-shot price threshold on a symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceAlert {
    symbol: String,
    target: Price,
    direction: Direction,
    triggered: bool,
}

impl PriceAlert {
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[must_use]
    pub fn target(&self) -> Price {
        self.target
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn is_triggered(&self) -> bool {
        self.triggered
    }
}

impl Display for PriceAlert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.symbol, self.direction, self.target)
    }
}

/// Caller-owned set of price alerts.
///
/// Each alert fires at most once: [`check`](Self::check) marks the alerts it
/// returns as triggered, and later checks skip them.
///
/// # Example
///
/// ```
/// use quantedge_engine::{AlertBook, Direction};
///
/// let mut alerts = AlertBook::default();
/// alerts.add("aapl", 200.0, Direction::Above)?;
///
/// assert!(alerts.check("AAPL", 195.0).is_empty());
/// assert_eq!(alerts.check("AAPL", 201.5).len(), 1);
/// assert!(alerts.check("AAPL", 205.0).is_empty());
/// # Ok::<(), quantedge_engine::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertBook {
    alerts: Vec<PriceAlert>,
}

impl AlertBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an alert. The symbol is trimmed and upper-cased.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidAlertTarget`] if `target` is NaN or infinite.
    pub fn add(&mut self, symbol: &str, target: Price, direction: Direction) -> Result<()> {
        if !target.is_finite() {
            return Err(Error::InvalidAlertTarget(target));
        }
        let alert = PriceAlert {
            symbol: normalize(symbol),
            target,
            direction,
            triggered: false,
        };
        debug!(alert = %alert, "price alert added");
        self.alerts.push(alert);
        Ok(())
    }

    /// Returns the alerts on `symbol` that `price` newly triggers.
    pub fn check(&mut self, symbol: &str, price: Price) -> Vec<PriceAlert> {
        let symbol = normalize(symbol);
        let mut fired = Vec::new();

        for alert in &mut self.alerts {
            if alert.triggered
                || alert.symbol != symbol
                || !alert.direction.crossed(price, alert.target)
            {
                continue;
            }
            alert.triggered = true;
            debug!(alert = %alert, price, "price alert triggered");
            fired.push(alert.clone());
        }

        fired
    }

    /// Alerts that have not fired yet.
    pub fn pending(&self) -> impl Iterator<Item = &PriceAlert> {
        self.alerts.iter().filter(|alert| !alert.triggered)
    }

    /// Drops every alert that has already fired.
    pub fn clear_triggered(&mut self) {
        self.alerts.retain(|alert| !alert.triggered);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}

fn normalize(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}
