//! Sentiment aggregation.
//!
//! Combines per-source sentiment samples into a composite score per
//! symbol. Aggregation is purely functional over its inputs; the cache is
//! the only state and it is never authoritative.

mod aggregator;
mod cache;

pub use aggregator::{Aggregator, AggregatorConfig, SourceWeights};
pub use cache::CompositeCache;
