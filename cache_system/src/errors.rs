//! Error types for cache operations
//!
//! This module defines all error types that can occur
//! during hash cache operations and Redis interactions.

use thiserror::Error;

/// Cache system errors
#[derive(Error, Debug)]
pub enum CacheError {
    /// A required key, field or field list was blank. Raised before any store call.
    #[error("Invalid argument `{name}`: {reason}")]
    InvalidArgument {
        name: &'static str,
        reason: &'static str,
    },

    /// Error returned by the Redis client, passed through untouched
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Connection to Redis timed out after {0}ms")]
    ConnectTimeout(u64),

    /// Error reported by a non-Redis store
    #[error("Store error: {0}")]
    Store(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Runtime error: {0}")]
    Runtime(#[from] std::io::Error),
}

impl CacheError {
    /// Whether this error was raised by local argument validation
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, CacheError::InvalidArgument { .. })
    }
}
