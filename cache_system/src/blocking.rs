//! Blocking calling convention for [`HashCache`]
//!
//! Every method runs the async operation to completion on a private
//! current-thread runtime. Calling these from inside an async runtime panics;
//! async code should use [`HashCache`] directly.

use crate::errors::CacheError;
use crate::hash_cache::HashCache;
use crate::value::CacheValue;
use config::CacheConfig;
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};

#[derive(Debug)]
pub struct BlockingHashCache {
    inner: HashCache,
    runtime: Runtime,
}

impl BlockingHashCache {
    pub fn new(inner: HashCache) -> Result<Self, CacheError> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        debug_log!(provider = %inner.name(), "Started blocking cache runtime");
        Ok(Self { inner, runtime })
    }

    /// Redis-backed blocking cache.
    ///
    /// Opens its own store so the connection is driven by this adapter's
    /// runtime rather than one it never polls.
    pub fn connect(config: &CacheConfig) -> Result<Self, CacheError> {
        Self::new(HashCache::from_config(config)?)
    }

    /// The async cache this adapter drives
    pub fn inner(&self) -> &HashCache {
        &self.inner
    }

    fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    pub fn set_field(
        &self,
        cache_key: &str,
        field: &str,
        value: impl Into<CacheValue>,
    ) -> Result<bool, CacheError> {
        self.block_on(self.inner.set_field(cache_key, field, value))
    }

    pub fn set_fields<I, K, V>(
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
        self.block_on(self.inner.set_fields(cache_key, values, expiration))
    }

    pub fn field_exists(&self, cache_key: &str, field: &str) -> Result<bool, CacheError> {
        self.block_on(self.inner.field_exists(cache_key, field))
    }

    pub fn delete_fields(&self, cache_key: &str, fields: &[&str]) -> Result<u64, CacheError> {
        self.block_on(self.inner.delete_fields(cache_key, fields))
    }

    pub fn get_field(&self, cache_key: &str, field: &str) -> Result<Option<CacheValue>, CacheError> {
        self.block_on(self.inner.get_field(cache_key, field))
    }

    pub fn get_all_fields(&self, cache_key: &str) -> Result<HashMap<String, CacheValue>, CacheError> {
        self.block_on(self.inner.get_all_fields(cache_key))
    }

    pub fn increment_field(&self, cache_key: &str, field: &str) -> Result<i64, CacheError> {
        self.block_on(self.inner.increment_field(cache_key, field))
    }

    pub fn increment_field_by(
        &self,
        cache_key: &str,
        field: &str,
        delta: i64,
    ) -> Result<i64, CacheError> {
        self.block_on(self.inner.increment_field_by(cache_key, field, delta))
    }

    pub fn field_names(&self, cache_key: &str) -> Result<Vec<String>, CacheError> {
        self.block_on(self.inner.field_names(cache_key))
    }

    pub fn field_count(&self, cache_key: &str) -> Result<u64, CacheError> {
        self.block_on(self.inner.field_count(cache_key))
    }

    pub fn field_values(&self, cache_key: &str) -> Result<Vec<CacheValue>, CacheError> {
        self.block_on(self.inner.field_values(cache_key))
    }

    pub fn get_fields(
        &self,
        cache_key: &str,
        fields: &[&str],
    ) -> Result<HashMap<String, Option<CacheValue>>, CacheError> {
        self.block_on(self.inner.get_fields(cache_key, fields))
    }

    pub fn ping(&self) -> Result<String, CacheError> {
        self.block_on(self.inner.ping())
    }
}
