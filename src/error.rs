//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
///
/// None of these are transient: they signal configuration or programming
/// errors and are never retried internally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Rejected at construction time (zero capacity, missing policy, bad config value)
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Rejected argument to an operation; cache state is unchanged
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Entry table and eviction policy disagree on the set of live keys
    #[error("Internal invariant violated: {0}")]
    InvariantViolation(String),
}

impl CacheError {
    /// Returns true for errors that indicate a bug in the cache itself.
    pub fn is_internal(&self) -> bool {
        matches!(self, CacheError::InvariantViolation(_))
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
