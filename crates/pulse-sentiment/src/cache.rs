//! Composite sentiment cache.

use pulse_core::types::CompositeSentiment;
use std::collections::HashMap;
use std::sync::Mutex;

/// Last known composite per symbol.
///
/// Read-only to consumers; refreshed after each successful aggregation.
/// Never authoritative: holdings and trades are, sentiment is a view.
#[derive(Debug, Default)]
pub struct CompositeCache {
    cache: Mutex<HashMap<String, CompositeSentiment>>,
}

impl CompositeCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cached composite for a symbol.
    pub fn get(&self, symbol: &str) -> Option<CompositeSentiment> {
        self.cache.lock().unwrap().get(symbol).cloned()
    }

    /// Store a composite, replacing any prior entry for its symbol.
    pub fn put(&self, composite: CompositeSentiment) {
        self.cache
            .lock()
            .unwrap()
            .insert(composite.symbol.clone(), composite);
    }

    /// Drop the entry for a symbol.
    pub fn clear(&self, symbol: &str) {
        self.cache.lock().unwrap().remove(symbol);
    }
}
