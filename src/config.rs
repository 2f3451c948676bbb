//! Configuration Module
//!
//! Handles loading engine configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::cache::EVICTION_BATCH;

/// Default byte budget (64 MiB).
pub const DEFAULT_CAPACITY_BYTES: i64 = 64 * 1024 * 1024;

/// Engine configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Total byte budget of the cache
    pub capacity_bytes: i64,
    /// Maximum entries evicted by one store under memory pressure
    pub eviction_batch: usize,
    /// Interval in seconds between crawler runs
    pub crawl_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY_BYTES` - Byte budget (default: 64 MiB)
    /// - `EVICTION_BATCH` - Entries evicted per pressure pass (default: 50)
    /// - `CRAWL_INTERVAL` - Crawler frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capacity_bytes: parse_var("CACHE_CAPACITY_BYTES").unwrap_or(defaults.capacity_bytes),
            eviction_batch: parse_var("EVICTION_BATCH").unwrap_or(defaults.eviction_batch),
            crawl_interval: parse_var("CRAWL_INTERVAL").unwrap_or(defaults.crawl_interval),
        }
    }

    /// Crawler interval as a `Duration`.
    pub fn crawl_interval(&self) -> Duration {
        Duration::from_secs(self.crawl_interval)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity_bytes: DEFAULT_CAPACITY_BYTES,
            eviction_batch: EVICTION_BATCH,
            crawl_interval: 1,
        }
    }
}
