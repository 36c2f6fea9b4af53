//! Per-user watch sets.

use pulse_core::types::normalize_symbol;
use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;
use uuid::Uuid;

/// Symbols each user is watching.
#[derive(Debug, Default)]
pub struct WatchlistStore {
    lists: Mutex<HashMap<Uuid, BTreeSet<String>>>,
}

impl WatchlistStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol to a user's watch set. Returns false if it was
    /// already watched.
    pub fn add(&self, user_id: Uuid, symbol: &str) -> bool {
        let mut lists = self.lists.lock().unwrap();
        lists
            .entry(user_id)
            .or_default()
            .insert(normalize_symbol(symbol))
    }

    /// Remove a symbol from a user's watch set. Returns false if it was
    /// not watched.
    pub fn remove(&self, user_id: Uuid, symbol: &str) -> bool {
        let mut lists = self.lists.lock().unwrap();
        lists
            .get_mut(&user_id)
            .map(|list| list.remove(&normalize_symbol(symbol)))
            .unwrap_or(false)
    }

    /// Watched symbols in alphabetical order.
    pub fn symbols(&self, user_id: Uuid) -> Vec<String> {
        let lists = self.lists.lock().unwrap();
        lists
            .get(&user_id)
            .map(|list| list.iter().cloned().collect())
            .unwrap_or_default()
    }
}
