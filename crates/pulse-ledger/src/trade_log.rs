//! Immutable record of committed trades.

use pulse_core::types::{apply_trade, Holding, Trade};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

/// Append-only log of every committed trade.
///
/// Realized P/L is derived from this log on demand rather than stored
/// alongside positions, so there is no second copy to drift.
#[derive(Debug, Default)]
pub struct TradeLog {
    trades: Mutex<Vec<Trade>>,
}

impl TradeLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a committed trade.
    pub fn record(&self, trade: Trade) {
        self.trades.lock().unwrap().push(trade);
    }

    /// All trades for a user, in commit order.
    pub fn for_user(&self, user_id: Uuid) -> Vec<Trade> {
        self.trades
            .lock()
            .unwrap()
            .iter()
            .filter(|trade| trade.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Trades for one (user, symbol) position, in commit order.
    pub fn for_position(&self, user_id: Uuid, symbol: &str) -> Vec<Trade> {
        self.trades
            .lock()
            .unwrap()
            .iter()
            .filter(|trade| trade.user_id == user_id && trade.symbol == symbol)
            .cloned()
            .collect()
    }

    /// Total realized P/L for a user, derived by replaying the log
    /// through the position transition.
    pub fn realized_pnl_for(&self, user_id: Uuid) -> Decimal {
        let trades = self.for_user(user_id);
        let mut positions: HashMap<String, Option<Holding>> = HashMap::new();
        let mut realized = Decimal::ZERO;

        for trade in &trades {
            let state = positions.entry(trade.symbol.clone()).or_default();
            // The log only holds committed trades; a replay failure would
            // mean the log itself is inconsistent.
            if let Ok((next, pnl)) = apply_trade(state.as_ref(), trade) {
                *state = next;
                realized += pnl;
            }
        }
        realized
    }
}
