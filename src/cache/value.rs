//! Stored Value Module
//!
//! Defines the contract a value must satisfy to be stored in the engine.

// == Cacheable ==
/// Anything the engine can store.
///
/// `key` must stay stable for the lifetime of the logical entry. `size` is
/// the declared accounting cost; the engine trusts it verbatim for budget
/// arithmetic and never measures real memory.
pub trait Cacheable {
    /// Unique key of the value
    fn key(&self) -> &str;

    /// Declared cost in bytes
    fn size(&self) -> usize;
}

// == Raw Bytes ==
/// A raw byte string stored under a key, as received from a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBytes {
    key: String,
    data: Vec<u8>,
}

impl RawBytes {
    /// Creates a new value from a key and its payload.
    pub fn new(key: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            data: data.into(),
        }
    }

    /// Returns the payload.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl Cacheable for RawBytes {
    fn key(&self) -> &str {
        &self.key
    }

    fn size(&self) -> usize {
        self.data.len()
    }
}
