//! Quote snapshot type.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Normalize a ticker to its canonical uppercase form.
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_ascii_uppercase()
}

/// A point-in-time quote for a single symbol.
///
/// A quote is an immutable snapshot: a refresh replaces the whole value,
/// nothing mutates one in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Uppercase ticker symbol
    pub symbol: String,
    /// Last traded price
    pub price: Decimal,
    /// Percent change since previous close
    pub percent_change: Decimal,
    /// Traded volume
    pub volume: u64,
    /// Market capitalization, if known
    pub market_cap: Option<Decimal>,
    /// When the snapshot was taken
    pub as_of: DateTime<Utc>,
}

impl Quote {
    /// Create a quote snapshot with the required fields.
    pub fn new(symbol: &str, price: Decimal, as_of: DateTime<Utc>) -> Self {
        Self {
            symbol: normalize_symbol(symbol),
            price,
            percent_change: Decimal::ZERO,
            volume: 0,
            market_cap: None,
            as_of,
        }
    }

    /// Set the percent change.
    pub fn with_percent_change(mut self, percent_change: Decimal) -> Self {
        self.percent_change = percent_change;
        self
    }

    /// Set the traded volume.
    pub fn with_volume(mut self, volume: u64) -> Self {
        self.volume = volume;
        self
    }

    /// Set the market capitalization.
    pub fn with_market_cap(mut self, market_cap: Decimal) -> Self {
        self.market_cap = Some(market_cap);
        self
    }

    /// Age of the snapshot relative to `now`.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.as_of
    }

    /// Check the snapshot is no older than `bound`.
    pub fn is_fresh(&self, now: DateTime<Utc>, bound: Duration) -> bool {
        self.age(now) <= bound
    }
}
