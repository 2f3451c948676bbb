//! Cache Statistics Module
//!
//! Counters describing cache health, surfaced by the protocol layer.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache usage counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Byte budget fixed at construction
    pub total_capacity: i64,
    /// Entries removed by pressure eviction
    pub evictions: u64,
    /// Entries that expired before ever being read
    pub expired_unfetched: u64,
    /// Entries evicted before ever being read
    pub evicted_unfetched: u64,
    /// Current number of entries in the cache
    pub current_items: usize,
    /// Entries ever inserted under a new key
    pub total_items: u64,
    /// Entries removed by the background crawler
    pub crawler_reclaimed: u64,
    /// Stores that found too little headroom
    pub out_of_memory: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats for the given capacity, counters at zero.
    pub fn new(total_capacity: i64) -> Self {
        Self {
            total_capacity,
            ..Self::default()
        }
    }

    pub(crate) fn record_insert(&mut self) {
        self.current_items += 1;
        self.total_items += 1;
    }

    pub(crate) fn record_removal(&mut self) {
        self.current_items = self.current_items.saturating_sub(1);
    }

    // == Record Eviction ==
    /// Counts a pressure eviction of an entry that was or wasn't read.
    pub(crate) fn record_eviction(&mut self, touched: bool) {
        self.evictions += 1;
        if !touched {
            self.evicted_unfetched += 1;
        }
    }

    pub(crate) fn record_expired_unfetched(&mut self) {
        self.expired_unfetched += 1;
    }

    pub(crate) fn record_crawler_reclaim(&mut self) {
        self.crawler_reclaimed += 1;
    }

    pub(crate) fn record_out_of_memory(&mut self) {
        self.out_of_memory += 1;
    }
}
