//! Convenience re-exports for common cache-system usage

// Core cache system components
pub use crate::blocking::BlockingHashCache;
pub use crate::errors::CacheError;
pub use crate::hash_cache::HashCache;
pub use crate::store::{HashStore, MemoryHashStore, RedisHashStore};
pub use crate::value::CacheValue;

// Re-export centralized config
pub use config::CacheConfig;

// Common external dependencies
pub use async_trait::async_trait;
pub use redis;
pub use tokio;
