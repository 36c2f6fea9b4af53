//! In-memory market data.

use async_trait::async_trait;
use pulse_core::error::DataError;
use pulse_core::traits::{QuoteSource, SentimentSource};
use pulse_core::types::{normalize_symbol, Quote, SentimentSample};
use std::collections::HashMap;
use std::sync::Mutex;

/// Static quote and sentiment store behind the source traits.
///
/// Each `set_quote` replaces the symbol's snapshot wholesale, matching
/// the refresh semantics of a real feed.
#[derive(Debug, Default)]
pub struct StaticMarketData {
    quotes: Mutex<HashMap<String, Quote>>,
    samples: Mutex<HashMap<String, Vec<SentimentSample>>>,
}

impl StaticMarketData {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored quote for its symbol.
    pub fn set_quote(&self, quote: Quote) {
        self.quotes
            .lock()
            .unwrap()
            .insert(quote.symbol.clone(), quote);
    }

    /// Append a sentiment sample for its symbol.
    pub fn push_sample(&self, sample: SentimentSample) {
        self.samples
            .lock()
            .unwrap()
            .entry(sample.symbol.clone())
            .or_default()
            .push(sample);
    }

    /// Drop all samples for a symbol.
    pub fn clear_samples(&self, symbol: &str) {
        self.samples
            .lock()
            .unwrap()
            .remove(&normalize_symbol(symbol));
    }
}

#[async_trait]
impl QuoteSource for StaticMarketData {
    async fn latest_quote(&self, symbol: &str) -> Result<Quote, DataError> {
        self.quotes
            .lock()
            .unwrap()
            .get(&normalize_symbol(symbol))
            .cloned()
            .ok_or_else(|| DataError::SymbolNotFound(symbol.to_string()))
    }

    fn name(&self) -> &str {
        "static"
    }
}

#[async_trait]
impl SentimentSource for StaticMarketData {
    async fn latest_samples(&self, symbol: &str) -> Result<Vec<SentimentSample>, DataError> {
        Ok(self
            .samples
            .lock()
            .unwrap()
            .get(&normalize_symbol(symbol))
            .cloned()
            .unwrap_or_default())
    }

    fn name(&self) -> &str {
        "static"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pulse_core::types::SourceKind;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_quote_round_trip() {
        let market = StaticMarketData::new();
        market.set_quote(Quote::new("AAPL", dec!(150), Utc::now()));

        let quote = market.latest_quote("aapl").await.unwrap();
        assert_eq!(quote.symbol, "AAPL");
        assert_eq!(quote.price, dec!(150));

        assert!(matches!(
            market.latest_quote("MSFT").await,
            Err(DataError::SymbolNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_set_quote_replaces() {
        let market = StaticMarketData::new();
        market.set_quote(Quote::new("AAPL", dec!(150), Utc::now()));
        market.set_quote(Quote::new("AAPL", dec!(155), Utc::now()));

        let quote = market.latest_quote("AAPL").await.unwrap();
        assert_eq!(quote.price, dec!(155));
    }

    #[tokio::test]
    async fn test_samples_accumulate() {
        let market = StaticMarketData::new();
        market.push_sample(SentimentSample::new(
            "AAPL",
            SourceKind::News,
            dec!(0.5),
            Utc::now(),
        ));
        market.push_sample(SentimentSample::new(
            "AAPL",
            SourceKind::Social,
            dec!(-0.1),
            Utc::now(),
        ));

        assert_eq!(market.latest_samples("AAPL").await.unwrap().len(), 2);
        // Empty, not an error, for unknown symbols.
        assert!(market.latest_samples("MSFT").await.unwrap().is_empty());

        market.clear_samples("AAPL");
        assert!(market.latest_samples("AAPL").await.unwrap().is_empty());
    }
}
