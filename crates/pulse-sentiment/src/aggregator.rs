//! Composite sentiment aggregation.

use chrono::{DateTime, Duration, Utc};
use pulse_core::error::SentimentError;
use pulse_core::types::{normalize_symbol, CompositeSentiment, SentimentSample, SourceKind};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Per-source weights for the composite score.
///
/// Weights are renormalized over the sources actually present in a given
/// aggregation, so a missing source does not drag the composite toward
/// zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SourceWeights {
    pub news: Decimal,
    pub analyst: Decimal,
    pub social: Decimal,
}

impl SourceWeights {
    /// Weight assigned to a source kind.
    pub fn weight(&self, kind: SourceKind) -> Decimal {
        match kind {
            SourceKind::News => self.news,
            SourceKind::Analyst => self.analyst,
            SourceKind::Social => self.social,
        }
    }
}

impl Default for SourceWeights {
    fn default() -> Self {
        Self {
            news: dec!(0.5),
            analyst: dec!(0.4),
            social: dec!(0.1),
        }
    }
}

/// Aggregator configuration.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Samples older than this window are excluded before combination
    pub staleness_window: Duration,
    /// Per-source weights
    pub weights: SourceWeights,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            staleness_window: Duration::hours(24),
            weights: SourceWeights::default(),
        }
    }
}

/// Combines per-source samples into a composite score.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    config: AggregatorConfig,
}

impl Aggregator {
    /// Create an aggregator with the given configuration.
    pub fn new(config: AggregatorConfig) -> Self {
        Self { config }
    }

    /// Aggregate samples for a symbol into a composite sentiment.
    ///
    /// Takes the most recent fresh sample per source and combines them
    /// with the configured weights, renormalized over the sources present.
    /// The returned `per_source` map holds exactly the samples used.
    ///
    /// # Errors
    /// - `SymbolMismatch` when a sample belongs to a different symbol
    /// - `InsufficientSignal` when no fresh samples remain after the
    ///   staleness filter
    pub fn aggregate(
        &self,
        symbol: &str,
        samples: &[SentimentSample],
        now: DateTime<Utc>,
    ) -> Result<CompositeSentiment, SentimentError> {
        let symbol = normalize_symbol(symbol);

        for sample in samples {
            if sample.symbol != symbol {
                return Err(SentimentError::SymbolMismatch {
                    requested: symbol,
                    sample: sample.symbol.clone(),
                });
            }
        }

        let cutoff = now - self.config.staleness_window;
        let mut latest: BTreeMap<SourceKind, &SentimentSample> = BTreeMap::new();
        for sample in samples {
            if sample.as_of < cutoff {
                continue;
            }
            match latest.get(&sample.source) {
                Some(current) if current.as_of >= sample.as_of => {}
                _ => {
                    latest.insert(sample.source, sample);
                }
            }
        }

        let total_weight: Decimal = latest
            .keys()
            .map(|kind| self.config.weights.weight(*kind))
            .sum();

        // Sources weighted at zero carry no signal either.
        if latest.is_empty() || total_weight <= Decimal::ZERO {
            return Err(SentimentError::InsufficientSignal { symbol });
        }

        let mut per_source = BTreeMap::new();
        let mut composite = Decimal::ZERO;
        for (kind, sample) in &latest {
            let weight = self.config.weights.weight(*kind) / total_weight;
            composite += weight * sample.score;
            per_source.insert(*kind, sample.score);
        }

        let composite = composite.clamp(dec!(-1), dec!(1));
        debug!(
            "Aggregated {} from {} source(s): {}",
            symbol,
            per_source.len(),
            composite
        );

        Ok(CompositeSentiment {
            symbol,
            per_source,
            composite,
            computed_at: now,
        })
    }
}
