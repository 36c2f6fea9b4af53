//! Trade types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::normalize_symbol;

/// Trade action (buy or sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeAction {
    Buy,
    Sell,
}

impl std::fmt::Display for TradeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeAction::Buy => write!(f, "BUY"),
            TradeAction::Sell => write!(f, "SELL"),
        }
    }
}

impl std::str::FromStr for TradeAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" => Ok(TradeAction::Buy),
            "sell" => Ok(TradeAction::Sell),
            other => Err(format!("Unknown trade action: {}", other)),
        }
    }
}

/// An immutable record of an applied trade.
///
/// Trades are the sole mutator of holding state. A committed trade is
/// final; it is reversed only by an offsetting trade, never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Unique trade ID
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Uppercase ticker symbol
    pub symbol: String,
    /// Buy or sell
    pub action: TradeAction,
    /// Number of shares, always positive
    pub quantity: u64,
    /// Quote price snapshotted at validation time
    pub execution_price: Decimal,
    /// When the trade was committed
    pub executed_at: DateTime<Utc>,
}

impl Trade {
    /// Create a trade record.
    pub fn new(
        user_id: Uuid,
        symbol: &str,
        action: TradeAction,
        quantity: u64,
        execution_price: Decimal,
        executed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            symbol: normalize_symbol(symbol),
            action,
            quantity,
            execution_price,
            executed_at,
        }
    }

    /// Total cash value of the trade.
    pub fn notional(&self) -> Decimal {
        Decimal::from(self.quantity) * self.execution_price
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_action_display() {
        assert_eq!(TradeAction::Buy.to_string(), "BUY");
        assert_eq!(TradeAction::Sell.to_string(), "SELL");
    }

    #[test]
    fn test_action_parse() {
        assert_eq!("buy".parse::<TradeAction>().unwrap(), TradeAction::Buy);
        assert_eq!("SELL".parse::<TradeAction>().unwrap(), TradeAction::Sell);
        assert!("hold".parse::<TradeAction>().is_err());
    }

    #[test]
    fn test_notional() {
        let trade = Trade::new(
            Uuid::new_v4(),
            "aapl",
            TradeAction::Buy,
            10,
            dec!(150.50),
            Utc::now(),
        );
        assert_eq!(trade.symbol, "AAPL");
        assert_eq!(trade.notional(), dec!(1505.00));
    }
}
