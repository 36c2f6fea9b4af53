//! Error types for the engine.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Top-level engine error.
#[derive(Error, Debug)]
pub enum PulseError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Sentiment error: {0}")]
    Sentiment(#[from] SentimentError),

    #[error("Valuation error: {0}")]
    Valuation(#[from] ValuationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Adapter and seed-data errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Data source error: {0}")]
    Internal(String),
}

/// Order validation errors.
#[derive(Error, Debug)]
pub enum OrderError {
    #[error("Quote for {symbol} is {age_secs}s old, freshness bound is {bound_secs}s")]
    StaleQuote {
        symbol: String,
        age_secs: i64,
        bound_secs: i64,
    },

    #[error("Order quantity must be a positive integer")]
    InvalidQuantity,

    #[error("Quote symbol {quote} does not match order symbol {requested}")]
    SymbolMismatch { requested: String, quote: String },
}

/// Holdings ledger and account errors.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Insufficient position in {symbol}: requested {requested}, held {held}")]
    InsufficientPosition {
        symbol: String,
        requested: u64,
        held: u64,
    },

    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        required: Decimal,
        available: Decimal,
    },

    #[error("Unknown account: {0}")]
    UnknownAccount(Uuid),
}

/// Sentiment aggregation errors.
#[derive(Error, Debug)]
pub enum SentimentError {
    #[error("No fresh sentiment samples for {symbol}")]
    InsufficientSignal { symbol: String },

    #[error("Sample symbol {sample} does not match requested symbol {requested}")]
    SymbolMismatch { requested: String, sample: String },
}

/// Valuation errors.
#[derive(Error, Debug)]
pub enum ValuationError {
    #[error("Holding symbol {holding} does not match quote symbol {quote}")]
    SymbolMismatch { holding: String, quote: String },
}

/// Result type alias for engine operations.
pub type PulseResult<T> = Result<T, PulseError>;
