//! Order validation and execution.

use chrono::{DateTime, Duration, Utc};
use pulse_core::error::{OrderError, PulseError};
use pulse_core::types::{normalize_symbol, Holding, Quote, Trade, TradeAction};
use pulse_ledger::{AccountStore, HoldingsLedger, TradeLog};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Executor configuration.
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Maximum quote age accepted at validation time
    pub quote_freshness: Duration,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            quote_freshness: Duration::seconds(60),
        }
    }
}

/// A committed trade together with the state it produced.
#[derive(Debug, Clone, Serialize)]
pub struct Executed {
    pub trade: Trade,
    /// Holding after the trade; `None` when the position closed
    pub holding: Option<Holding>,
    /// Realized P/L on the sold quantity; zero for buys
    pub realized_pnl: Decimal,
    /// Cash balance after the trade
    pub cash: Decimal,
}

/// Validates requested trades and commits them through the ledger.
pub struct OrderExecutor {
    config: ExecutorConfig,
    ledger: Arc<HoldingsLedger>,
    accounts: Arc<AccountStore>,
    log: Arc<TradeLog>,
}

impl OrderExecutor {
    /// Create an executor over shared ledger state.
    pub fn new(
        config: ExecutorConfig,
        ledger: Arc<HoldingsLedger>,
        accounts: Arc<AccountStore>,
        log: Arc<TradeLog>,
    ) -> Self {
        Self {
            config,
            ledger,
            accounts,
            log,
        }
    }

    fn validate(
        &self,
        symbol: &str,
        quantity: u64,
        quote: &Quote,
        now: DateTime<Utc>,
    ) -> Result<(), OrderError> {
        if quantity == 0 {
            return Err(OrderError::InvalidQuantity);
        }
        if quote.symbol != symbol {
            return Err(OrderError::SymbolMismatch {
                requested: symbol.to_string(),
                quote: quote.symbol.clone(),
            });
        }
        if !quote.is_fresh(now, self.config.quote_freshness) {
            return Err(OrderError::StaleQuote {
                symbol: symbol.to_string(),
                age_secs: quote.age(now).num_seconds(),
                bound_secs: self.config.quote_freshness.num_seconds(),
            });
        }
        Ok(())
    }

    /// Validate and commit a trade at the quote's price.
    ///
    /// Transactional from the caller's perspective: either the full
    /// effect (cash, holding, log entry) is applied and the committed
    /// trade returned, or nothing changed. The sell-side quantity bound
    /// is enforced by the ledger itself, under the same lock that applies
    /// the trade, so it cannot race a concurrent sell.
    pub fn execute(
        &self,
        user_id: Uuid,
        symbol: &str,
        action: TradeAction,
        quantity: u64,
        quote: &Quote,
        now: DateTime<Utc>,
    ) -> Result<Executed, PulseError> {
        let symbol = normalize_symbol(symbol);
        self.validate(&symbol, quantity, quote, now)?;
        // Fail on a missing account before touching any state.
        self.accounts.balance(user_id)?;

        let trade = Trade::new(user_id, &symbol, action, quantity, quote.price, now);

        let (outcome, cash) = match action {
            // Debit first: a buy transition cannot fail afterwards, so
            // the debit never needs unwinding.
            TradeAction::Buy => {
                let cash = self.accounts.debit(user_id, trade.notional())?;
                let outcome = self.ledger.apply(&trade)?;
                (outcome, cash)
            }
            // Proceeds are credited only once the position change is
            // committed.
            TradeAction::Sell => {
                let outcome = self.ledger.apply(&trade)?;
                let cash = self.accounts.credit(user_id, trade.notional())?;
                (outcome, cash)
            }
        };

        info!(
            "Committed {} {} {} @ {} for {}",
            trade.action, trade.quantity, trade.symbol, trade.execution_price, user_id
        );
        self.log.record(trade.clone());

        Ok(Executed {
            trade,
            holding: outcome.holding,
            realized_pnl: outcome.realized_pnl,
            cash,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::error::LedgerError;
    use rust_decimal_macros::dec;

    fn executor(starting_cash: Decimal) -> (OrderExecutor, Uuid) {
        let ledger = Arc::new(HoldingsLedger::new());
        let accounts = Arc::new(AccountStore::new());
        let log = Arc::new(TradeLog::new());
        let user = Uuid::new_v4();
        accounts.open(user, starting_cash);
        (
            OrderExecutor::new(ExecutorConfig::default(), ledger, accounts, log),
            user,
        )
    }

    fn quote(symbol: &str, price: Decimal, as_of: DateTime<Utc>) -> Quote {
        Quote::new(symbol, price, as_of)
    }

    #[test]
    fn test_buy_then_sell_flow() {
        let (executor, user) = executor(dec!(10000));
        let now = Utc::now();

        let executed = executor
            .execute(user, "AAPL", TradeAction::Buy, 10, &quote("AAPL", dec!(100), now), now)
            .unwrap();
        assert_eq!(executed.cash, dec!(9000));
        assert_eq!(executed.holding.as_ref().unwrap().quantity, 10);

        executor
            .execute(user, "AAPL", TradeAction::Buy, 10, &quote("AAPL", dec!(120), now), now)
            .unwrap();
        let executed = executor
            .execute(user, "AAPL", TradeAction::Sell, 5, &quote("AAPL", dec!(130), now), now)
            .unwrap();

        assert_eq!(executed.realized_pnl, dec!(100));
        let holding = executed.holding.unwrap();
        assert_eq!(holding.quantity, 15);
        assert_eq!(holding.average_cost, dec!(110));
        // 10000 - 1000 - 1200 + 650
        assert_eq!(executed.cash, dec!(8450));
    }

    #[test]
    fn test_stale_quote_rejected_without_effect() {
        let (executor, user) = executor(dec!(10000));
        let now = Utc::now();
        let stale = quote("AAPL", dec!(100), now - Duration::seconds(61));

        let err = executor.execute(user, "AAPL", TradeAction::Buy, 1, &stale, now);
        assert!(matches!(
            err,
            Err(PulseError::Order(OrderError::StaleQuote { .. }))
        ));
        // Nothing was applied.
        assert_eq!(executor.accounts.balance(user).unwrap(), dec!(10000));
        assert!(executor.ledger.position(user, "AAPL").is_none());
        assert!(executor.log.for_user(user).is_empty());
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let (executor, user) = executor(dec!(10000));
        let now = Utc::now();

        let err = executor.execute(user, "AAPL", TradeAction::Buy, 0, &quote("AAPL", dec!(100), now), now);
        assert!(matches!(
            err,
            Err(PulseError::Order(OrderError::InvalidQuantity))
        ));
    }

    #[test]
    fn test_quote_symbol_mismatch_rejected() {
        let (executor, user) = executor(dec!(10000));
        let now = Utc::now();

        let err = executor.execute(user, "AAPL", TradeAction::Buy, 1, &quote("MSFT", dec!(100), now), now);
        assert!(matches!(
            err,
            Err(PulseError::Order(OrderError::SymbolMismatch { .. }))
        ));
    }

    #[test]
    fn test_insufficient_funds_leaves_state() {
        let (executor, user) = executor(dec!(500));
        let now = Utc::now();

        let err = executor.execute(user, "AAPL", TradeAction::Buy, 10, &quote("AAPL", dec!(100), now), now);
        assert!(matches!(
            err,
            Err(PulseError::Ledger(LedgerError::InsufficientFunds { .. }))
        ));
        assert_eq!(executor.accounts.balance(user).unwrap(), dec!(500));
        assert!(executor.ledger.position(user, "AAPL").is_none());
    }

    #[test]
    fn test_oversell_leaves_balance() {
        let (executor, user) = executor(dec!(10000));
        let now = Utc::now();

        executor
            .execute(user, "AAPL", TradeAction::Buy, 5, &quote("AAPL", dec!(100), now), now)
            .unwrap();
        let err = executor.execute(user, "AAPL", TradeAction::Sell, 6, &quote("AAPL", dec!(100), now), now);

        assert!(matches!(
            err,
            Err(PulseError::Ledger(LedgerError::InsufficientPosition { .. }))
        ));
        // The failed sell neither credited cash nor touched the position.
        assert_eq!(executor.accounts.balance(user).unwrap(), dec!(9500));
        assert_eq!(executor.ledger.position(user, "AAPL").unwrap().quantity, 5);
        assert_eq!(executor.log.for_user(user).len(), 1);
    }

    #[test]
    fn test_unknown_account_rejected() {
        let (executor, _) = executor(dec!(10000));
        let now = Utc::now();
        let stranger = Uuid::new_v4();

        let err = executor.execute(
            stranger,
            "AAPL",
            TradeAction::Buy,
            1,
            &quote("AAPL", dec!(100), now),
            now,
        );
        assert!(matches!(
            err,
            Err(PulseError::Ledger(LedgerError::UnknownAccount(_)))
        ));
    }
}
