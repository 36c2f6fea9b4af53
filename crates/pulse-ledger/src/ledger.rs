//! Holdings ledger with per-position serialization.

use pulse_core::error::LedgerError;
use pulse_core::types::{apply_trade, Holding, Trade};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;
use uuid::Uuid;

type PositionKey = (Uuid, String);
type Slot = Arc<Mutex<Option<Holding>>>;

/// Result of committing a trade against the ledger.
#[derive(Debug, Clone)]
pub struct TradeOutcome {
    /// Holding state after the trade; `None` when the position closed
    pub holding: Option<Holding>,
    /// Realized P/L on the sold quantity; zero for buys
    pub realized_pnl: Decimal,
}

/// Authoritative per-(user, symbol) position store.
///
/// Trades against the same position are serialized on that position's
/// slot mutex: the transition is computed from the state read under the
/// lock and written back before it is released, so two concurrent trades
/// cannot both commit from the same prior state. The outer map lock is
/// held only long enough to fetch or create a slot.
///
/// A closed position leaves its slot in place holding `None`; removing
/// the map entry while another thread still holds the slot Arc would
/// hand a later trade a detached copy.
#[derive(Debug, Default)]
pub struct HoldingsLedger {
    slots: Mutex<HashMap<PositionKey, Slot>>,
}

impl HoldingsLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, user_id: Uuid, symbol: &str) -> Slot {
        let mut slots = self.slots.lock().unwrap();
        slots
            .entry((user_id, symbol.to_string()))
            .or_default()
            .clone()
    }

    fn existing_slot(&self, user_id: Uuid, symbol: &str) -> Option<Slot> {
        let slots = self.slots.lock().unwrap();
        slots.get(&(user_id, symbol.to_string())).cloned()
    }

    /// Apply a trade, replacing the position state atomically.
    ///
    /// # Errors
    /// `LedgerError::InsufficientPosition` when a sell exceeds the held
    /// quantity (including sells against an empty position).
    pub fn apply(&self, trade: &Trade) -> Result<TradeOutcome, LedgerError> {
        let slot = self.slot(trade.user_id, &trade.symbol);
        let mut position = slot.lock().unwrap();

        let (next, realized_pnl) = apply_trade(position.as_ref(), trade)?;
        *position = next.clone();

        debug!(
            "Applied {} {} {} for {}: quantity now {}",
            trade.action,
            trade.quantity,
            trade.symbol,
            trade.user_id,
            next.as_ref().map_or(0, |h| h.quantity)
        );

        Ok(TradeOutcome {
            holding: next,
            realized_pnl,
        })
    }

    /// Current position for a (user, symbol), if open.
    pub fn position(&self, user_id: Uuid, symbol: &str) -> Option<Holding> {
        let slot = self.existing_slot(user_id, symbol)?;
        let position = slot.lock().unwrap();
        position.clone()
    }

    /// All open positions for a user, ordered by symbol.
    pub fn holdings_for(&self, user_id: Uuid) -> Vec<Holding> {
        let slots: Vec<Slot> = {
            let map = self.slots.lock().unwrap();
            map.iter()
                .filter(|((owner, _), _)| *owner == user_id)
                .map(|(_, slot)| slot.clone())
                .collect()
        };

        let mut holdings: Vec<Holding> = slots
            .iter()
            .filter_map(|slot| slot.lock().unwrap().clone())
            .collect();
        holdings.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        holdings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pulse_core::types::TradeAction;
    use rust_decimal_macros::dec;
    use std::thread;

    fn trade(user_id: Uuid, symbol: &str, action: TradeAction, quantity: u64, price: Decimal) -> Trade {
        Trade::new(user_id, symbol, action, quantity, price, Utc::now())
    }

    #[test]
    fn test_buy_then_sell_scenario() {
        let ledger = HoldingsLedger::new();
        let user = Uuid::new_v4();

        ledger
            .apply(&trade(user, "AAPL", TradeAction::Buy, 10, dec!(100)))
            .unwrap();
        ledger
            .apply(&trade(user, "AAPL", TradeAction::Buy, 10, dec!(120)))
            .unwrap();

        let holding = ledger.position(user, "AAPL").unwrap();
        assert_eq!(holding.quantity, 20);
        assert_eq!(holding.average_cost, dec!(110));

        let outcome = ledger
            .apply(&trade(user, "AAPL", TradeAction::Sell, 5, dec!(130)))
            .unwrap();
        assert_eq!(outcome.realized_pnl, dec!(100));

        let holding = outcome.holding.unwrap();
        assert_eq!(holding.quantity, 15);
        assert_eq!(holding.average_cost, dec!(110));
    }

    #[test]
    fn test_full_sell_removes_position() {
        let ledger = HoldingsLedger::new();
        let user = Uuid::new_v4();

        ledger
            .apply(&trade(user, "AAPL", TradeAction::Buy, 10, dec!(100)))
            .unwrap();
        let outcome = ledger
            .apply(&trade(user, "AAPL", TradeAction::Sell, 10, dec!(105)))
            .unwrap();

        assert!(outcome.holding.is_none());
        assert!(ledger.position(user, "AAPL").is_none());
        assert!(ledger.holdings_for(user).is_empty());

        let err = ledger.apply(&trade(user, "AAPL", TradeAction::Sell, 1, dec!(105)));
        assert!(matches!(
            err,
            Err(LedgerError::InsufficientPosition { .. })
        ));
    }

    #[test]
    fn test_position_reopens_after_close() {
        let ledger = HoldingsLedger::new();
        let user = Uuid::new_v4();

        ledger
            .apply(&trade(user, "AAPL", TradeAction::Buy, 10, dec!(100)))
            .unwrap();
        ledger
            .apply(&trade(user, "AAPL", TradeAction::Sell, 10, dec!(120)))
            .unwrap();
        ledger
            .apply(&trade(user, "AAPL", TradeAction::Buy, 5, dec!(130)))
            .unwrap();

        let holding = ledger.position(user, "AAPL").unwrap();
        assert_eq!(holding.quantity, 5);
        // A reopened position starts fresh; the old basis is gone.
        assert_eq!(holding.average_cost, dec!(130));
    }

    #[test]
    fn test_holdings_ordered_by_symbol() {
        let ledger = HoldingsLedger::new();
        let user = Uuid::new_v4();

        for symbol in ["MSFT", "AAPL", "GOOG"] {
            ledger
                .apply(&trade(user, symbol, TradeAction::Buy, 1, dec!(10)))
                .unwrap();
        }

        let symbols: Vec<String> = ledger
            .holdings_for(user)
            .into_iter()
            .map(|h| h.symbol)
            .collect();
        assert_eq!(symbols, vec!["AAPL", "GOOG", "MSFT"]);
    }

    #[test]
    fn test_users_are_isolated() {
        let ledger = HoldingsLedger::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        ledger
            .apply(&trade(alice, "AAPL", TradeAction::Buy, 10, dec!(100)))
            .unwrap();

        assert!(ledger.position(bob, "AAPL").is_none());
        let err = ledger.apply(&trade(bob, "AAPL", TradeAction::Sell, 1, dec!(100)));
        assert!(matches!(
            err,
            Err(LedgerError::InsufficientPosition { .. })
        ));
    }

    #[test]
    fn test_concurrent_buys_lose_no_updates() {
        let ledger = Arc::new(HoldingsLedger::new());
        let user = Uuid::new_v4();
        let threads: u64 = 16;

        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let ledger = ledger.clone();
                thread::spawn(move || {
                    ledger
                        .apply(&trade(user, "AAPL", TradeAction::Buy, 1, dec!(50)))
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let holding = ledger.position(user, "AAPL").unwrap();
        assert_eq!(holding.quantity, threads);
        assert_eq!(holding.average_cost, dec!(50));
    }

    #[test]
    fn test_concurrent_sells_never_oversell() {
        let ledger = Arc::new(HoldingsLedger::new());
        let user = Uuid::new_v4();

        ledger
            .apply(&trade(user, "AAPL", TradeAction::Buy, 10, dec!(100)))
            .unwrap();

        // 16 threads race to sell 1 share each; exactly 10 can succeed.
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let ledger = ledger.clone();
                thread::spawn(move || {
                    ledger
                        .apply(&trade(user, "AAPL", TradeAction::Sell, 1, dec!(100)))
                        .is_ok()
                })
            })
            .collect();
        let successes = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|&ok| ok)
            .count();

        assert_eq!(successes, 10);
        assert!(ledger.position(user, "AAPL").is_none());
    }
}
