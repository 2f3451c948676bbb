//! Cache Entry Module
//!
//! Defines the record stored per key: the value plus its metadata.

use crate::cache::lru::Handle;
use crate::cache::NO_EXPIRATION;

// == Cache Entry ==
/// A stored value with flags, expiration, version token and recency handle.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Opaque client flags
    pub flags: u32,
    /// Expiration timestamp (unix seconds), 0 = never expires
    pub expiration: i64,
    /// CAS unique assigned by the caller
    pub version_token: i64,
    /// Set once the entry is read after creation
    pub(crate) touched: bool,
    /// Creation timestamp (unix seconds)
    pub(crate) created_at: i64,
    pub(crate) handle: Handle,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    pub(crate) fn new(
        value: V,
        flags: u32,
        expiration: i64,
        version_token: i64,
        created_at: i64,
        handle: Handle,
    ) -> Self {
        Self {
            value,
            flags,
            expiration,
            version_token,
            touched: false,
            created_at,
            handle,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// An entry expires once `now` is strictly past its expiration; entries
    /// with no expiration never do.
    pub fn is_expired(&self, now: i64) -> bool {
        self.expiration != NO_EXPIRATION && self.expiration < now
    }

    /// Whether the entry has been read since it was created.
    pub fn touched(&self) -> bool {
        self.touched
    }

    /// Creation timestamp in unix seconds.
    pub fn created_at(&self) -> i64 {
        self.created_at
    }
}
