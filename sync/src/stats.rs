//! Refresh statistics.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

pub const REFRESHES: &str = "refreshes";
pub const PROPOSALS_FETCHED: &str = "proposals_fetched";
pub const FETCH_FAILURES: &str = "fetch_failures";
pub const RETRIES: &str = "retries";

const NAMES: [&str; 4] = [REFRESHES, PROPOSALS_FETCHED, FETCH_FAILURES, RETRIES];

/// Thread-safe counters for read-model activity.
pub struct SyncStats {
    counters: HashMap<&'static str, AtomicU64>,
}

impl SyncStats {
    pub fn new() -> Self {
        Self {
            counters: NAMES.iter().map(|&n| (n, AtomicU64::new(0))).collect(),
        }
    }

    pub fn increment(&self, name: &str) {
        self.add(name, 1);
    }

    pub fn add(&self, name: &str, value: u64) {
        if let Some(counter) = self.counters.get(name) {
            counter.fetch_add(value, Ordering::Relaxed);
        }
    }

    pub fn get(&self, name: &str) -> u64 {
        self.counters
            .get(name)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    pub fn snapshot(&self) -> HashMap<&'static str, u64> {
        self.counters
            .iter()
            .map(|(&k, v)| (k, v.load(Ordering::Relaxed)))
            .collect()
    }
}

impl Default for SyncStats {
    fn default() -> Self {
        Self::new()
    }
}
