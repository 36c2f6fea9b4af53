//! Adapter trait definitions.
//!
//! Quote and sentiment fetch are the only I/O-bound steps in the system;
//! implementations own their own timeouts and caching. The core only ever
//! sees validated snapshot values.

use crate::error::DataError;
use crate::types::{Quote, SentimentSample};
use async_trait::async_trait;

/// Trait for quote providers.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Get the latest known quote for a symbol.
    ///
    /// # Errors
    /// `DataError::SymbolNotFound` when the provider does not know the
    /// symbol.
    async fn latest_quote(&self, symbol: &str) -> Result<Quote, DataError>;

    /// Get the provider name.
    fn name(&self) -> &str;
}

/// Trait for sentiment providers.
#[async_trait]
pub trait SentimentSource: Send + Sync {
    /// Get the latest sentiment samples for a symbol. May be empty; the
    /// aggregator decides what counts as enough signal.
    async fn latest_samples(&self, symbol: &str) -> Result<Vec<SentimentSample>, DataError>;

    /// Get the provider name.
    fn name(&self) -> &str;
}
