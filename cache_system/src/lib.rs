//! Redis hash field cache
//!
//! This crate exposes hash-shaped cache operations (HSET, HGET, HMGET, HDEL,
//! HINCRBY, ...) over a Redis client, as an async API ([`HashCache`]) and a
//! blocking one ([`BlockingHashCache`]).

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod blocking;
pub mod errors;
pub mod hash_cache;
pub mod prelude;
pub mod store;
pub mod value;

mod validation;

// Re-export centralized config
pub use config::CacheConfig;

pub use blocking::BlockingHashCache;
pub use errors::CacheError;
pub use hash_cache::HashCache;
pub use store::{HashStore, MemoryHashStore, RedisHashStore};
pub use value::CacheValue;
