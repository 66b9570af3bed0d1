//! Hash field cache facade
//!
//! [`HashCache`] validates arguments, converts values and forwards each call
//! to its [`HashStore`]. Store errors are returned unchanged; nothing is
//! retried or cached here.

use crate::errors::CacheError;
use crate::store::{HashStore, MemoryHashStore, RedisHashStore};
use crate::validation::{expiration_millis, not_blank, not_empty_fields};
use crate::value::CacheValue;
use config::CacheConfig;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

/// Hash-shaped cache over a remote store
#[derive(Clone)]
pub struct HashCache {
    name: String,
    store: Arc<dyn HashStore>,
}

impl Debug for HashCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashCache")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl HashCache {
    pub fn new(name: impl Into<String>, store: Arc<dyn HashStore>) -> Self {
        Self {
            name: name.into(),
            store,
        }
    }

    /// Redis-backed cache named after `config.name`. Connects on first use.
    pub fn from_config(config: &CacheConfig) -> Result<Self, CacheError> {
        let store = RedisHashStore::new(config)?;
        debug_log!(provider = %config.name, "Created Redis hash cache");
        Ok(Self::new(config.name.clone(), Arc::new(store)))
    }

    /// Cache over a fresh [`MemoryHashStore`]
    pub fn in_memory(name: impl Into<String>) -> Self {
        Self::new(name, Arc::new(MemoryHashStore::new()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn store(&self) -> &Arc<dyn HashStore> {
        &self.store
    }

    /// HSET one field. Always `true` once the store accepted the write.
    pub async fn set_field(
        &self,
        cache_key: &str,
        field: &str,
        value: impl Into<CacheValue>,
    ) -> Result<bool, CacheError> {
        not_blank("cache_key", cache_key)?;
        not_blank("field", field)?;
        trace_log!(provider = %self.name, key = cache_key, field, "HSET");

        self.store.hset(cache_key, field, &value.into()).await?;
        Ok(true)
    }

    /// HSET several fields in one call, then optionally expire the whole key.
    ///
    /// Without `expiration` the result is always `true`; with one it is
    /// whether the expiry was applied. An expiration longer than `i64::MAX`
    /// milliseconds is rejected before anything is written.
    pub async fn set_fields<I, K, V>(
        &self,
        cache_key: &str,
        values: I,
        expiration: Option<Duration>,
    ) -> Result<bool, CacheError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<CacheValue>,
    {
        not_blank("cache_key", cache_key)?;
        if let Some(ttl) = expiration {
            expiration_millis("expiration", ttl)?;
        }
        let entries: Vec<(String, CacheValue)> = values
            .into_iter()
            .map(|(field, value)| (field.into(), value.into()))
            .collect();
        for (field, _) in &entries {
            not_blank("field", field)?;
        }
        trace_log!(provider = %self.name, key = cache_key, fields = entries.len(), ?expiration, "HMSET");

        // HSET needs at least one pair
        if !entries.is_empty() {
            self.store.hset_multiple(cache_key, &entries).await?;
        }

        match expiration {
            Some(ttl) => self.store.pexpire(cache_key, ttl).await,
            None => Ok(true),
        }
    }

    /// HEXISTS
    pub async fn field_exists(&self, cache_key: &str, field: &str) -> Result<bool, CacheError> {
        not_blank("cache_key", cache_key)?;
        not_blank("field", field)?;
        trace_log!(provider = %self.name, key = cache_key, field, "HEXISTS");

        self.store.hexists(cache_key, field).await
    }

    /// HDEL the given fields and return how many were removed.
    ///
    /// An empty `fields` slice deletes the whole key instead and returns 1 if
    /// it existed, 0 otherwise.
    pub async fn delete_fields(&self, cache_key: &str, fields: &[&str]) -> Result<u64, CacheError> {
        not_blank("cache_key", cache_key)?;

        if fields.is_empty() {
            trace_log!(provider = %self.name, key = cache_key, "DEL");
            let deleted = self.store.del(cache_key).await?;
            return Ok(u64::from(deleted > 0));
        }

        not_empty_fields("fields", fields)?;
        trace_log!(provider = %self.name, key = cache_key, fields = fields.len(), "HDEL");
        self.store.hdel(cache_key, fields).await
    }

    /// HGET; `None` when the key or field is absent
    pub async fn get_field(
        &self,
        cache_key: &str,
        field: &str,
    ) -> Result<Option<CacheValue>, CacheError> {
        not_blank("cache_key", cache_key)?;
        not_blank("field", field)?;
        trace_log!(provider = %self.name, key = cache_key, field, "HGET");

        self.store.hget(cache_key, field).await
    }

    /// HGETALL as a map. Empty when the key does not exist.
    pub async fn get_all_fields(
        &self,
        cache_key: &str,
    ) -> Result<HashMap<String, CacheValue>, CacheError> {
        not_blank("cache_key", cache_key)?;
        trace_log!(provider = %self.name, key = cache_key, "HGETALL");

        let entries = self.store.hgetall(cache_key).await?;
        let mut fields = HashMap::with_capacity(entries.len());
        for (field, value) in entries {
            // first occurrence wins
            fields.entry(field).or_insert(value);
        }
        Ok(fields)
    }

    /// HINCRBY 1
    pub async fn increment_field(&self, cache_key: &str, field: &str) -> Result<i64, CacheError> {
        self.increment_field_by(cache_key, field, 1).await
    }

    /// HINCRBY; an absent field starts from 0
    pub async fn increment_field_by(
        &self,
        cache_key: &str,
        field: &str,
        delta: i64,
    ) -> Result<i64, CacheError> {
        not_blank("cache_key", cache_key)?;
        not_blank("field", field)?;
        trace_log!(provider = %self.name, key = cache_key, field, delta, "HINCRBY");

        self.store.hincrby(cache_key, field, delta).await
    }

    /// HKEYS, in store order
    pub async fn field_names(&self, cache_key: &str) -> Result<Vec<String>, CacheError> {
        not_blank("cache_key", cache_key)?;
        trace_log!(provider = %self.name, key = cache_key, "HKEYS");

        self.store.hkeys(cache_key).await
    }

    /// HLEN
    pub async fn field_count(&self, cache_key: &str) -> Result<u64, CacheError> {
        not_blank("cache_key", cache_key)?;
        trace_log!(provider = %self.name, key = cache_key, "HLEN");

        self.store.hlen(cache_key).await
    }

    /// HVALS, in store order
    pub async fn field_values(&self, cache_key: &str) -> Result<Vec<CacheValue>, CacheError> {
        not_blank("cache_key", cache_key)?;
        trace_log!(provider = %self.name, key = cache_key, "HVALS");

        self.store.hvals(cache_key).await
    }

    /// HMGET as a map holding every requested field; missing ones map to `None`
    pub async fn get_fields(
        &self,
        cache_key: &str,
        fields: &[&str],
    ) -> Result<HashMap<String, Option<CacheValue>>, CacheError> {
        not_blank("cache_key", cache_key)?;
        not_empty_fields("fields", fields)?;
        trace_log!(provider = %self.name, key = cache_key, fields = fields.len(), "HMGET");

        let values = self.store.hmget(cache_key, fields).await?;
        if values.len() != fields.len() {
            return Err(CacheError::Store(format!(
                "HMGET returned {} values for {} fields",
                values.len(),
                fields.len()
            )));
        }

        let mut result = HashMap::with_capacity(fields.len());
        for (field, value) in fields.iter().zip(values) {
            result.entry((*field).to_string()).or_insert(value);
        }
        Ok(result)
    }

    /// Ping the underlying store
    pub async fn ping(&self) -> Result<String, CacheError> {
        self.store.ping().await
    }
}
