//! Sentiment sample and composite types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use super::normalize_symbol;

/// Origin of a sentiment sample.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    News,
    Analyst,
    Social,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::News => write!(f, "NEWS"),
            SourceKind::Analyst => write!(f, "ANALYST"),
            SourceKind::Social => write!(f, "SOCIAL"),
        }
    }
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "news" => Ok(SourceKind::News),
            "analyst" => Ok(SourceKind::Analyst),
            "social" => Ok(SourceKind::Social),
            other => Err(format!("Unknown sentiment source: {}", other)),
        }
    }
}

/// Clamp a sentiment score into the valid [-1, 1] range.
pub(crate) fn clamp_score(score: Decimal) -> Decimal {
    score.clamp(dec!(-1), dec!(1))
}

/// A single sentiment reading for a symbol from one source.
///
/// Produced by adapters; the aggregator only combines samples, it never
/// mutates one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSample {
    /// Uppercase ticker symbol
    pub symbol: String,
    /// Which source produced the reading
    pub source: SourceKind,
    /// Scalar score in [-1, 1]
    pub score: Decimal,
    /// When the reading was taken
    pub as_of: DateTime<Utc>,
}

impl SentimentSample {
    /// Create a sample. The score is clamped into [-1, 1] so adapters
    /// cannot hand the core an out-of-range value.
    pub fn new(symbol: &str, source: SourceKind, score: Decimal, as_of: DateTime<Utc>) -> Self {
        Self {
            symbol: normalize_symbol(symbol),
            source,
            score: clamp_score(score),
            as_of,
        }
    }
}

/// Composite sentiment for a symbol, derived from the freshest sample of
/// each source.
///
/// Sources with no fresh sample are absent from `per_source`, not zero;
/// substituting zero would bias the composite toward neutral.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeSentiment {
    /// Uppercase ticker symbol
    pub symbol: String,
    /// Score of each source that contributed
    pub per_source: BTreeMap<SourceKind, Decimal>,
    /// Weighted composite score in [-1, 1]
    pub composite: Decimal,
    /// When the aggregation ran
    pub computed_at: DateTime<Utc>,
}
