//! In-process hash store
//!
//! Follows Redis hash semantics for the commands the facade uses: fields keep
//! insertion order, a hash disappears with its last field, and expiry is
//! checked lazily on access.

use super::HashStore;
use crate::errors::CacheError;
use crate::value::CacheValue;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct HashEntry {
    fields: Vec<(String, CacheValue)>,
    expires_at: Option<Instant>,
}

impl HashEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }

    fn get(&self, field: &str) -> Option<&CacheValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    fn set(&mut self, field: &str, value: CacheValue) {
        match self.fields.iter_mut().find(|(name, _)| name == field) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((field.to_string(), value)),
        }
    }
}

/// Hash store kept in memory, for tests and offline use
#[derive(Debug, Default)]
pub struct MemoryHashStore {
    hashes: RwLock<HashMap<String, HashEntry>>,
}

impl MemoryHashStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` against the live entry for `key`, if any
    async fn read<T>(&self, key: &str, f: impl FnOnce(&HashEntry) -> T) -> Option<T> {
        let hashes = self.hashes.read().await;
        hashes
            .get(key)
            .filter(|entry| !entry.is_expired(Instant::now()))
            .map(f)
    }

    /// Run `f` against the entry for `key`, creating it when absent or expired.
    /// Empty hashes are dropped afterwards.
    async fn write<T>(&self, key: &str, f: impl FnOnce(&mut HashEntry) -> T) -> T {
        let mut hashes = self.hashes.write().await;
        let now = Instant::now();
        if hashes.get(key).is_some_and(|entry| entry.is_expired(now)) {
            hashes.remove(key);
        }

        let entry = hashes.entry(key.to_string()).or_default();
        let result = f(entry);
        if entry.fields.is_empty() {
            hashes.remove(key);
        }
        result
    }
}

#[async_trait]
impl HashStore for MemoryHashStore {
    async fn hset(&self, key: &str, field: &str, value: &CacheValue) -> Result<(), CacheError> {
        self.write(key, |entry| entry.set(field, value.clone())).await;
        Ok(())
    }

    async fn hset_multiple(
        &self,
        key: &str,
        entries: &[(String, CacheValue)],
    ) -> Result<(), CacheError> {
        self.write(key, |entry| {
            for (field, value) in entries {
                entry.set(field, value.clone());
            }
        })
        .await;
        Ok(())
    }

    async fn pexpire(&self, key: &str, ttl: Duration) -> Result<bool, CacheError> {
        let mut hashes = self.hashes.write().await;
        let now = Instant::now();
        if let Some(entry) = hashes.get_mut(key) {
            if !entry.is_expired(now) {
                // past the clock's range: never expires
                entry.expires_at = now.checked_add(ttl);
                return Ok(true);
            }
        }
        hashes.remove(key);
        Ok(false)
    }

    async fn del(&self, key: &str) -> Result<u64, CacheError> {
        let mut hashes = self.hashes.write().await;
        let removed = hashes
            .remove(key)
            .is_some_and(|entry| !entry.is_expired(Instant::now()));
        Ok(u64::from(removed))
    }

    async fn hexists(&self, key: &str, field: &str) -> Result<bool, CacheError> {
        Ok(self
            .read(key, |entry| entry.get(field).is_some())
            .await
            .unwrap_or(false))
    }

    async fn hdel(&self, key: &str, fields: &[&str]) -> Result<u64, CacheError> {
        let removed = self
            .write(key, |entry| {
                let before = entry.fields.len();
                entry.fields.retain(|(name, _)| !fields.contains(&name.as_str()));
                (before - entry.fields.len()) as u64
            })
            .await;
        Ok(removed)
    }

    async fn hget(&self, key: &str, field: &str) -> Result<Option<CacheValue>, CacheError> {
        Ok(self
            .read(key, |entry| entry.get(field).cloned())
            .await
            .flatten())
    }

    async fn hmget(
        &self,
        key: &str,
        fields: &[&str],
    ) -> Result<Vec<Option<CacheValue>>, CacheError> {
        let values = self
            .read(key, |entry| {
                fields
                    .iter()
                    .map(|field| entry.get(field).cloned())
                    .collect()
            })
            .await;
        Ok(values.unwrap_or_else(|| vec![None; fields.len()]))
    }

    async fn hgetall(&self, key: &str) -> Result<Vec<(String, CacheValue)>, CacheError> {
        Ok(self
            .read(key, |entry| entry.fields.clone())
            .await
            .unwrap_or_default())
    }

    async fn hincrby(&self, key: &str, field: &str, delta: i64) -> Result<i64, CacheError> {
        self.write(key, |entry| {
            let current = match entry.get(field) {
                Some(value) => std::str::from_utf8(value.as_bytes())
                    .ok()
                    // Redis refuses an explicit plus sign
                    .filter(|text| !text.starts_with('+'))
                    .and_then(|text| text.parse::<i64>().ok())
                    .ok_or_else(|| CacheError::Store("hash value is not an integer".into()))?,
                None => 0,
            };
            let next = current.checked_add(delta).ok_or_else(|| {
                CacheError::Store("increment or decrement would overflow".into())
            })?;
            entry.set(field, CacheValue::text(next));
            Ok(next)
        })
        .await
    }

    async fn hkeys(&self, key: &str) -> Result<Vec<String>, CacheError> {
        Ok(self
            .read(key, |entry| {
                entry.fields.iter().map(|(name, _)| name.clone()).collect()
            })
            .await
            .unwrap_or_default())
    }

    async fn hlen(&self, key: &str) -> Result<u64, CacheError> {
        Ok(self
            .read(key, |entry| entry.fields.len() as u64)
            .await
            .unwrap_or(0))
    }

    async fn hvals(&self, key: &str) -> Result<Vec<CacheValue>, CacheError> {
        Ok(self
            .read(key, |entry| {
                entry.fields.iter().map(|(_, value)| value.clone()).collect()
            })
            .await
            .unwrap_or_default())
    }

    async fn ping(&self) -> Result<String, CacheError> {
        Ok("PONG".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fields_keep_insertion_order() {
        let store = MemoryHashStore::new();
        store.hset("h", "b", &"2".into()).await.unwrap();
        store.hset("h", "a", &"1".into()).await.unwrap();
        store.hset("h", "b", &"3".into()).await.unwrap();

        assert_eq!(store.hkeys("h").await.unwrap(), vec!["b", "a"]);
        assert_eq!(
            store.hvals("h").await.unwrap(),
            vec![CacheValue::from("3"), CacheValue::from("1")]
        );
    }

    #[tokio::test]
    async fn test_last_field_removal_drops_key() {
        let store = MemoryHashStore::new();
        store.hset("h", "only", &"x".into()).await.unwrap();

        assert_eq!(store.hdel("h", &["only", "absent"]).await.unwrap(), 1);
        assert_eq!(store.del("h").await.unwrap(), 0);
        assert!(!store.pexpire("h", Duration::from_secs(1)).await.unwrap());
    }

    #[tokio::test]
    async fn test_expired_hash_is_gone() {
        let store = MemoryHashStore::new();
        store
            .hset_multiple("h", &[("a".to_string(), "1".into())])
            .await
            .unwrap();
        assert!(store.pexpire("h", Duration::from_millis(20)).await.unwrap());

        tokio::time::sleep(Duration::from_millis(40)).await;

        assert_eq!(store.hlen("h").await.unwrap(), 0);
        assert_eq!(store.hget("h", "a").await.unwrap(), None);
        assert_eq!(store.del("h").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_write_after_expiry_starts_fresh() {
        let store = MemoryHashStore::new();
        store.hset("h", "old", &"1".into()).await.unwrap();
        store.pexpire("h", Duration::from_millis(10)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;

        store.hset("h", "new", &"2".into()).await.unwrap();
        assert_eq!(store.hkeys("h").await.unwrap(), vec!["new"]);
    }

    #[tokio::test]
    async fn test_unbounded_ttl_never_expires() {
        let store = MemoryHashStore::new();
        store.hset("h", "a", &"1".into()).await.unwrap();

        assert!(store.pexpire("h", Duration::MAX).await.unwrap());
        assert_eq!(store.hget("h", "a").await.unwrap(), Some(CacheValue::from("1")));

        // a later bounded TTL still applies
        assert!(store.pexpire("h", Duration::from_millis(10)).await.unwrap());
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(store.hlen("h").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_hincrby_rules() {
        let store = MemoryHashStore::new();
        assert_eq!(store.hincrby("h", "n", 5).await.unwrap(), 5);
        assert_eq!(store.hincrby("h", "n", -7).await.unwrap(), -2);

        store.hset("h", "name", &"Alice".into()).await.unwrap();
        assert!(matches!(
            store.hincrby("h", "name", 1).await,
            Err(CacheError::Store(_))
        ));

        store.hset("h", "signed", &"+5".into()).await.unwrap();
        assert!(matches!(
            store.hincrby("h", "signed", 1).await,
            Err(CacheError::Store(_))
        ));
        assert_eq!(store.hget("h", "signed").await.unwrap(), Some(CacheValue::from("+5")));

        store.hset("h", "big", &CacheValue::from(i64::MAX)).await.unwrap();
        assert!(matches!(
            store.hincrby("h", "big", 1).await,
            Err(CacheError::Store(_))
        ));
    }

    #[tokio::test]
    async fn test_overflow_keeps_previous_value() {
        let store = MemoryHashStore::new();
        assert_eq!(store.hincrby("h", "n", i64::MIN).await.unwrap(), i64::MIN);
        assert!(store.hincrby("h", "n", -1).await.is_err());
        assert_eq!(
            store.hget("h", "n").await.unwrap(),
            Some(CacheValue::from(i64::MIN))
        );
    }

    #[tokio::test]
    async fn test_increment_by_zero_creates_field() {
        let store = MemoryHashStore::new();
        assert_eq!(store.hlen("fresh").await.unwrap(), 0);
        assert_eq!(store.hincrby("fresh", "n", 0).await.unwrap(), 0);
        assert_eq!(store.hlen("fresh").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_hmget_on_missing_key() {
        let store = MemoryHashStore::new();
        assert_eq!(
            store.hmget("nope", &["a", "b"]).await.unwrap(),
            vec![None, None]
        );
    }
}
