//! Cache Module
//!
//! Provides the byte-budgeted LRU engine with passive expiration.

mod clock;
mod engine;
mod entry;
mod lru;
mod stats;
mod value;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::CacheEngine;
pub use entry::CacheEntry;
pub use lru::{Handle, LruList};
pub use stats::CacheStats;
pub use value::{Cacheable, RawBytes};

// == Public Constants ==
/// Maximum number of entries evicted by a single store under memory pressure
pub const EVICTION_BATCH: usize = 50;

/// Expiration sentinel meaning "never expires"
pub const NO_EXPIRATION: i64 = 0;
