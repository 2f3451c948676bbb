//! Cache Engine Module
//!
//! Main cache engine combining HashMap storage with LRU ordering, a byte
//! budget and passive expiration.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::{
    CacheEntry, CacheStats, Cacheable, Clock, LruList, SystemClock, EVICTION_BATCH,
};
use crate::config::Config;
use crate::error::{CacheError, Result};

// == Cache Engine ==
/// Byte-budgeted cache with LRU eviction and lazy expiration.
///
/// The engine has no internal locking: every mutator takes `&mut self`.
/// Share it through [`crate::SharedEngine`] or a lock of your own.
#[derive(Debug)]
pub struct CacheEngine<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Recency ordering over the same keyset
    order: LruList,
    stats: CacheStats,
    /// Headroom in bytes, not total capacity
    remaining: i64,
    /// Entries evicted per pressure pass
    eviction_batch: usize,
    clock: Arc<dyn Clock>,
}

impl<V: Cacheable> CacheEngine<V> {
    // == Constructors ==
    /// Creates an engine with `capacity` bytes of budget on the system clock.
    pub fn new(capacity: i64) -> Result<Self> {
        Self::with_clock(capacity, Arc::new(SystemClock))
    }

    /// Creates an engine reading time from `clock`.
    pub fn with_clock(capacity: i64, clock: Arc<dyn Clock>) -> Result<Self> {
        if capacity <= 0 {
            return Err(CacheError::InvalidConfiguration(format!(
                "capacity must be positive, got {}",
                capacity
            )));
        }

        Ok(Self {
            entries: HashMap::new(),
            order: LruList::new(),
            stats: CacheStats::new(capacity),
            remaining: capacity,
            eviction_batch: EVICTION_BATCH,
            clock,
        })
    }

    /// Creates an engine from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        if config.eviction_batch == 0 {
            return Err(CacheError::InvalidConfiguration(
                "eviction batch must be at least 1".to_string(),
            ));
        }

        let mut engine = Self::new(config.capacity_bytes)?;
        engine.eviction_batch = config.eviction_batch;
        Ok(engine)
    }

    // == Get ==
    /// Retrieves an entry by key.
    ///
    /// An expired entry is removed and reported as a miss. A hit moves the
    /// entry to the front of the recency order and marks it touched.
    pub fn get(&mut self, key: &str) -> Option<&CacheEntry<V>> {
        let now = self.clock.now();
        if self.entries.get(key)?.is_expired(now) {
            if let Some(entry) = self.detach(key) {
                if !entry.touched {
                    self.stats.record_expired_unfetched();
                }
                debug!(key, expiration = entry.expiration, "lazily expired entry");
            }
            return None;
        }

        let entry = self.entries.get_mut(key)?;
        entry.touched = true;
        self.order.move_to_front(entry.handle);
        Some(&*entry)
    }

    // == Set ==
    /// Stores a value under its key.
    ///
    /// Without enough headroom, up to one eviction batch is dropped from the
    /// LRU tail first. If the value still does not fit the call fails with
    /// `OutOfMemory`; the evictions it performed are kept.
    ///
    /// Replacing an existing key keeps its touched flag and creation time.
    pub fn set(&mut self, value: V, flags: u32, expiration: i64, version_token: i64) -> Result<()> {
        let size = cost(&value);

        if self.remaining < size {
            self.stats.record_out_of_memory();
            let evicted = self.prune(Some(self.eviction_batch));
            debug!(
                evicted,
                requested = size,
                remaining = self.remaining,
                "eviction pass"
            );
        }

        if self.remaining < size {
            warn!(
                key = value.key(),
                requested = size,
                remaining = self.remaining,
                "not enough memory to store value"
            );
            return Err(CacheError::OutOfMemory {
                requested: value.size(),
                remaining: self.remaining,
            });
        }

        if let Some(entry) = self.entries.get_mut(value.key()) {
            let old_size = cost(&entry.value);
            entry.value = value;
            entry.flags = flags;
            entry.expiration = expiration;
            entry.version_token = version_token;
            self.remaining += old_size - size;
            self.order.move_to_front(entry.handle);
        } else {
            let key = value.key().to_string();
            let handle = self.order.push_front(key.clone());
            let entry = CacheEntry::new(
                value,
                flags,
                expiration,
                version_token,
                self.clock.now(),
                handle,
            );
            self.entries.insert(key, entry);
            self.remaining -= size;
            self.stats.record_insert();
        }

        Ok(())
    }

    // == Delete ==
    /// Removes an entry by key. Not counted as an eviction.
    pub fn delete(&mut self, key: &str) -> bool {
        self.detach(key).is_some()
    }

    // == Flush All ==
    /// Removes every entry and restores the full budget.
    pub fn flush_all(&mut self) {
        let removed = self.prune(None);
        self.order.clear();
        debug!(removed, "flushed all entries");
    }

    // == Set Version Token ==
    /// Replaces the CAS unique of an entry without touching its recency.
    pub fn set_version_token(&mut self, key: &str, token: i64) -> bool {
        match self.entries.get_mut(key) {
            Some(entry) => {
                entry.version_token = token;
                true
            }
            None => false,
        }
    }

    // == Crawler Boundary ==
    /// Removes an entry on behalf of the background crawler.
    ///
    /// Counted as crawler-reclaimed, never as an eviction.
    pub fn reclaim(&mut self, key: &str) -> bool {
        if self.detach(key).is_some() {
            self.stats.record_crawler_reclaim();
            true
        } else {
            false
        }
    }

    /// Iterates entries from least to most recently used without promoting them.
    pub fn iter_lru(&self) -> impl Iterator<Item = (&str, &CacheEntry<V>)> + '_ {
        self.order
            .iter_from_back()
            .filter_map(move |key| self.entries.get(key).map(|entry| (key, entry)))
    }

    /// Creation time of the least recently used entry, or now when empty.
    pub fn oldest_timestamp(&self) -> i64 {
        self.order
            .back()
            .and_then(|key| self.entries.get(key))
            .map(|entry| entry.created_at)
            .unwrap_or_else(|| self.clock.now())
    }

    /// Current time according to the engine clock.
    pub fn now(&self) -> i64 {
        self.clock.now()
    }

    // == Accessors ==
    /// Headroom in bytes before eviction is needed.
    pub fn remaining_budget(&self) -> i64 {
        self.remaining
    }

    /// Total byte budget.
    pub fn capacity(&self) -> i64 {
        self.stats.total_capacity
    }

    /// Returns a snapshot of the statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Internals ==
    /// Unlinks an entry from the map and the order and frees its bytes.
    fn detach(&mut self, key: &str) -> Option<CacheEntry<V>> {
        let entry = self.entries.remove(key)?;
        self.order.remove(entry.handle);
        self.remaining += cost(&entry.value);
        self.stats.record_removal();
        Some(entry)
    }

    /// Drops entries from the LRU tail, `limit` at most or all of them.
    ///
    /// Only bounded passes count as evictions.
    fn prune(&mut self, limit: Option<usize>) -> usize {
        let mut removed = 0;
        while limit.map_or(true, |n| removed < n) {
            let Some(key) = self.order.pop_back() else {
                break;
            };
            if let Some(entry) = self.entries.remove(&key) {
                self.remaining += cost(&entry.value);
                self.stats.record_removal();
                if limit.is_some() {
                    self.stats.record_eviction(entry.touched);
                }
            }
            removed += 1;
        }
        removed
    }

    #[cfg(test)]
    pub(crate) fn assert_invariants(&self) {
        let used: i64 = self.entries.values().map(|entry| cost(&entry.value)).sum();
        assert_eq!(
            self.remaining + used,
            self.stats.total_capacity,
            "budget accounting drifted"
        );
        assert_eq!(self.stats.current_items, self.entries.len());
        assert_eq!(self.order.len(), self.entries.len());
        for key in self.order.iter_from_back() {
            assert!(self.entries.contains_key(key), "order holds unknown key {}", key);
        }
    }
}

/// Declared size as budget units.
fn cost<V: Cacheable>(value: &V) -> i64 {
    i64::try_from(value.size()).unwrap_or(i64::MAX)
}
