//! Service facade over adapters, ledger state, and aggregation.

use chrono::Utc;
use pulse_core::error::{PulseError, SentimentError};
use pulse_core::traits::{QuoteSource, SentimentSource};
use pulse_core::types::{normalize_symbol, CompositeSentiment, Trade, TradeAction};
use pulse_ledger::{Account, AccountStore, HoldingsLedger, TradeLog, WatchlistStore};
use pulse_sentiment::{Aggregator, AggregatorConfig, CompositeCache};
use pulse_valuation::{value, PositionView};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::executor::{Executed, ExecutorConfig, OrderExecutor};

/// Service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub executor: ExecutorConfig,
    pub aggregator: AggregatorConfig,
    /// Cash granted when an account is opened
    pub starting_cash: Decimal,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            executor: ExecutorConfig::default(),
            aggregator: AggregatorConfig::default(),
            starting_cash: dec!(100000),
        }
    }
}

/// The engine's surface to the API/presentation layer.
///
/// Holds the authoritative stores and the read-only sentiment cache;
/// adapters are the only I/O it performs.
pub struct PulseService {
    quotes: Arc<dyn QuoteSource>,
    sentiment: Arc<dyn SentimentSource>,
    aggregator: Aggregator,
    composites: CompositeCache,
    ledger: Arc<HoldingsLedger>,
    accounts: Arc<AccountStore>,
    log: Arc<TradeLog>,
    watchlists: WatchlistStore,
    executor: OrderExecutor,
    starting_cash: Decimal,
}

impl PulseService {
    /// Create a service over the given adapters.
    pub fn new(
        config: ServiceConfig,
        quotes: Arc<dyn QuoteSource>,
        sentiment: Arc<dyn SentimentSource>,
    ) -> Self {
        let ledger = Arc::new(HoldingsLedger::new());
        let accounts = Arc::new(AccountStore::new());
        let log = Arc::new(TradeLog::new());
        let executor = OrderExecutor::new(
            config.executor,
            ledger.clone(),
            accounts.clone(),
            log.clone(),
        );

        Self {
            quotes,
            sentiment,
            aggregator: Aggregator::new(config.aggregator),
            composites: CompositeCache::new(),
            ledger,
            accounts,
            log,
            watchlists: WatchlistStore::new(),
            executor,
            starting_cash: config.starting_cash,
        }
    }

    /// Open (or fetch) a user's cash account.
    pub fn open_account(&self, user_id: Uuid) -> Account {
        self.accounts.open(user_id, self.starting_cash)
    }

    /// Current cash balance.
    pub fn balance(&self, user_id: Uuid) -> Result<Decimal, PulseError> {
        Ok(self.accounts.balance(user_id)?)
    }

    /// Composite sentiment for a symbol, refreshed from the sources.
    ///
    /// When the fresh samples carry no signal, falls back to the last
    /// cached composite and errs only when there is no prior either.
    pub async fn composite(&self, symbol: &str) -> Result<CompositeSentiment, PulseError> {
        let symbol = normalize_symbol(symbol);
        let samples = self.sentiment.latest_samples(&symbol).await?;

        match self.aggregator.aggregate(&symbol, &samples, Utc::now()) {
            Ok(composite) => {
                self.composites.put(composite.clone());
                Ok(composite)
            }
            Err(SentimentError::InsufficientSignal { .. }) => {
                debug!("No fresh signal for {}, trying cached composite", symbol);
                self.composites
                    .get(&symbol)
                    .ok_or_else(|| SentimentError::InsufficientSignal { symbol }.into())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Current portfolio with valuations, ordered by symbol.
    pub async fn portfolio(&self, user_id: Uuid) -> Result<Vec<PositionView>, PulseError> {
        let mut views = Vec::new();
        for holding in self.ledger.holdings_for(user_id) {
            let quote = self.quotes.latest_quote(&holding.symbol).await?;
            let valuation = value(&holding, &quote)?;
            views.push(PositionView {
                holding,
                quote,
                valuation,
            });
        }
        Ok(views)
    }

    /// Submit a trade at the latest quote.
    pub async fn submit_trade(
        &self,
        user_id: Uuid,
        symbol: &str,
        action: TradeAction,
        quantity: u64,
    ) -> Result<Executed, PulseError> {
        let symbol = normalize_symbol(symbol);
        let quote = self.quotes.latest_quote(&symbol).await?;
        self.executor
            .execute(user_id, &symbol, action, quantity, &quote, Utc::now())
    }

    /// Add a symbol to the user's watch set.
    pub fn add_watch(&self, user_id: Uuid, symbol: &str) -> bool {
        self.watchlists.add(user_id, symbol)
    }

    /// Remove a symbol from the user's watch set.
    pub fn remove_watch(&self, user_id: Uuid, symbol: &str) -> bool {
        self.watchlists.remove(user_id, symbol)
    }

    /// The user's watched symbols, alphabetical.
    pub fn watchlist(&self, user_id: Uuid) -> Vec<String> {
        self.watchlists.symbols(user_id)
    }

    /// The user's committed trades, in commit order.
    pub fn trades(&self, user_id: Uuid) -> Vec<Trade> {
        self.log.for_user(user_id)
    }

    /// Total realized P/L, derived from the trade log.
    pub fn realized_pnl(&self, user_id: Uuid) -> Decimal {
        self.log.realized_pnl_for(user_id)
    }
}
