//! Valuation engine.
//!
//! Pure functions that combine a holding's cost basis with a fresh quote.
//! The engine never fetches data; callers supply the quote and are
//! responsible for its freshness.

mod valuation;

pub use valuation::{summarize, value, PortfolioSummary, PositionView, Valuation};
