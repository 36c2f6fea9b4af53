//! Trait definitions for external adapters.

mod market_data;

pub use market_data::{QuoteSource, SentimentSource};
