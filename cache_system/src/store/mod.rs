//! Hash store backends
//!
//! [`HashStore`] is the seam between the facade and whatever actually keeps
//! the hashes. Every method maps onto one Redis command and carries its
//! semantics; implementations do no validation of their own.

mod memory_store;
mod redis_store;

pub use memory_store::MemoryHashStore;
pub use redis_store::RedisHashStore;

use crate::errors::CacheError;
use crate::value::CacheValue;
use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
pub trait HashStore: Send + Sync {
    /// HSET with a single field
    async fn hset(&self, key: &str, field: &str, value: &CacheValue) -> Result<(), CacheError>;

    /// HSET with several fields in one call
    async fn hset_multiple(
        &self,
        key: &str,
        entries: &[(String, CacheValue)],
    ) -> Result<(), CacheError>;

    /// PEXPIRE on the whole key; false when the key does not exist
    async fn pexpire(&self, key: &str, ttl: Duration) -> Result<bool, CacheError>;

    /// DEL; number of keys removed
    async fn del(&self, key: &str) -> Result<u64, CacheError>;

    async fn hexists(&self, key: &str, field: &str) -> Result<bool, CacheError>;

    /// HDEL; number of fields removed
    async fn hdel(&self, key: &str, fields: &[&str]) -> Result<u64, CacheError>;

    async fn hget(&self, key: &str, field: &str) -> Result<Option<CacheValue>, CacheError>;

    /// HMGET; one slot per requested field, in request order
    async fn hmget(
        &self,
        key: &str,
        fields: &[&str],
    ) -> Result<Vec<Option<CacheValue>>, CacheError>;

    async fn hgetall(&self, key: &str) -> Result<Vec<(String, CacheValue)>, CacheError>;

    async fn hincrby(&self, key: &str, field: &str, delta: i64) -> Result<i64, CacheError>;

    async fn hkeys(&self, key: &str) -> Result<Vec<String>, CacheError>;

    async fn hlen(&self, key: &str) -> Result<u64, CacheError>;

    async fn hvals(&self, key: &str) -> Result<Vec<CacheValue>, CacheError>;

    /// Connectivity check
    async fn ping(&self) -> Result<String, CacheError>;
}
