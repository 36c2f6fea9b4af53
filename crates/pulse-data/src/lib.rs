//! Market data adapters for demos and tests.
//!
//! Live feeds sit outside the core; these adapters satisfy the same
//! traits from memory or from CSV seed files.

mod csv_source;
mod static_source;

pub use csv_source::{load_quotes, load_samples, load_trades, TradeInstruction};
pub use static_source::StaticMarketData;
