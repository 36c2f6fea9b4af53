//! Core data types for the engine.

mod holding;
mod quote;
mod sentiment;
mod trade;

pub use holding::{apply_trade, Holding};
pub use quote::{normalize_symbol, Quote};
pub use sentiment::{CompositeSentiment, SentimentSample, SourceKind};
pub use trade::{Trade, TradeAction};
