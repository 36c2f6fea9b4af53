//! Authoritative per-user state: holdings, cash accounts, the trade log,
//! and watch sets.
//!
//! All state here is keyed and mutated under an explicit per-key
//! serialization discipline; no component outside this crate mutates a
//! holding or balance directly.

mod accounts;
mod ledger;
mod trade_log;
mod watchlist;

pub use accounts::{Account, AccountStore};
pub use ledger::{HoldingsLedger, TradeOutcome};
pub use trade_log::TradeLog;
pub use watchlist::WatchlistStore;
