//! memcache_lru - A byte-budgeted in-memory cache engine
//!
//! Provides memcached-style storage with LRU eviction, passive expiration,
//! usage statistics and CAS version tokens.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{CacheEngine, CacheEntry, CacheStats, Cacheable, RawBytes};
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::{shared, spawn_crawler_task, Crawler, SharedEngine};
