//! Error types for the cache engine
//!
//! Provides unified error handling using thiserror.
//!
//! Misses are not errors: lookups return `Option` and removals return `bool`.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// The engine cannot be built from the given parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A value did not fit even after an eviction pass
    #[error("Out of memory: requested {requested} bytes, {remaining} bytes available")]
    OutOfMemory {
        /// Declared size of the rejected value
        requested: usize,
        /// Headroom left after the eviction pass
        remaining: i64,
    },
}

// == Result Type Alias ==
/// Convenience Result type for the cache engine.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_configuration_message() {
        let err = CacheError::InvalidConfiguration("capacity must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: capacity must be positive"
        );
    }

    #[test]
    fn test_out_of_memory_message() {
        let err = CacheError::OutOfMemory {
            requested: 120,
            remaining: 100,
        };
        assert_eq!(
            err.to_string(),
            "Out of memory: requested 120 bytes, 100 bytes available"
        );
    }
}
