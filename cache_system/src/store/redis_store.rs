//! Redis-backed hash store
//!
//! Holds one multiplexed connection, opened on first use and shared by every
//! call afterwards.

use super::HashStore;
use crate::errors::CacheError;
use crate::validation::expiration_millis;
use crate::value::CacheValue;
use async_trait::async_trait;
use config::CacheConfig;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client};
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct RedisHashStore {
    client: Arc<Client>,
    connect_timeout: Duration,
    connection: Arc<RwLock<Option<MultiplexedConnection>>>,
}

impl Debug for RedisHashStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let connection_status = match self.connection.try_read() {
            Ok(conn) if conn.is_some() => "connected",
            Ok(_) => "no_connection",
            Err(_) => "lock_error",
        };

        f.debug_struct("RedisHashStore")
            .field("connect_timeout", &self.connect_timeout)
            .field("connected", &connection_status)
            .finish()
    }
}

impl RedisHashStore {
    /// Create a store for the configured Redis URL. No connection is opened yet.
    pub fn new(config: &CacheConfig) -> Result<Self, CacheError> {
        let client = Client::open(config.redis_url.as_str())?;

        Ok(Self {
            client: Arc::new(client),
            connect_timeout: config.connection_timeout(),
            connection: Arc::new(RwLock::new(None)),
        })
    }

    /// Get or create the shared connection
    async fn get_connection(&self) -> Result<MultiplexedConnection, CacheError> {
        if let Some(conn) = self.connection.read().await.as_ref() {
            return Ok(conn.clone());
        }

        let mut slot = self.connection.write().await;
        // Another caller may have connected while we waited for the write lock
        if let Some(conn) = slot.as_ref() {
            return Ok(conn.clone());
        }

        tracing::debug!(timeout = ?self.connect_timeout, "Opening Redis connection");
        let conn = tokio::time::timeout(
            self.connect_timeout,
            self.client.get_multiplexed_async_connection(),
        )
        .await
        .map_err(|_| CacheError::ConnectTimeout(self.connect_timeout.as_millis() as u64))??;

        *slot = Some(conn.clone());
        Ok(conn)
    }
}

#[async_trait]
impl HashStore for RedisHashStore {
    async fn hset(&self, key: &str, field: &str, value: &CacheValue) -> Result<(), CacheError> {
        let mut conn = self.get_connection().await?;
        let _: () = conn.hset(key, field, value).await?;
        Ok(())
    }

    async fn hset_multiple(
        &self,
        key: &str,
        entries: &[(String, CacheValue)],
    ) -> Result<(), CacheError> {
        let mut conn = self.get_connection().await?;
        let _: () = redis::cmd("HSET")
            .arg(key)
            .arg(entries)
            .query_async(&mut conn)
            .await?;
        Ok(())
    }

    async fn pexpire(&self, key: &str, ttl: Duration) -> Result<bool, CacheError> {
        let millis = expiration_millis("expiration", ttl)?;
        let mut conn = self.get_connection().await?;
        let applied: bool = conn.pexpire(key, millis).await?;
        Ok(applied)
    }

    async fn del(&self, key: &str) -> Result<u64, CacheError> {
        let mut conn = self.get_connection().await?;
        let deleted: u64 = conn.del(key).await?;
        Ok(deleted)
    }

    async fn hexists(&self, key: &str, field: &str) -> Result<bool, CacheError> {
        let mut conn = self.get_connection().await?;
        let exists: bool = conn.hexists(key, field).await?;
        Ok(exists)
    }

    async fn hdel(&self, key: &str, fields: &[&str]) -> Result<u64, CacheError> {
        let mut conn = self.get_connection().await?;
        let removed: u64 = conn.hdel(key, fields).await?;
        Ok(removed)
    }

    async fn hget(&self, key: &str, field: &str) -> Result<Option<CacheValue>, CacheError> {
        let mut conn = self.get_connection().await?;
        let value: Option<CacheValue> = conn.hget(key, field).await?;
        Ok(value)
    }

    async fn hmget(
        &self,
        key: &str,
        fields: &[&str],
    ) -> Result<Vec<Option<CacheValue>>, CacheError> {
        let mut conn = self.get_connection().await?;
        // Explicit HMGET: a single-field request must still come back as an array
        let values: Vec<Option<CacheValue>> = redis::cmd("HMGET")
            .arg(key)
            .arg(fields)
            .query_async(&mut conn)
            .await?;
        Ok(values)
    }

    async fn hgetall(&self, key: &str) -> Result<Vec<(String, CacheValue)>, CacheError> {
        let mut conn = self.get_connection().await?;
        let entries: Vec<(String, CacheValue)> = conn.hgetall(key).await?;
        Ok(entries)
    }

    async fn hincrby(&self, key: &str, field: &str, delta: i64) -> Result<i64, CacheError> {
        let mut conn = self.get_connection().await?;
        let value: i64 = conn.hincr(key, field, delta).await?;
        Ok(value)
    }

    async fn hkeys(&self, key: &str) -> Result<Vec<String>, CacheError> {
        let mut conn = self.get_connection().await?;
        let fields: Vec<String> = conn.hkeys(key).await?;
        Ok(fields)
    }

    async fn hlen(&self, key: &str) -> Result<u64, CacheError> {
        let mut conn = self.get_connection().await?;
        let len: u64 = conn.hlen(key).await?;
        Ok(len)
    }

    async fn hvals(&self, key: &str) -> Result<Vec<CacheValue>, CacheError> {
        let mut conn = self.get_connection().await?;
        let values: Vec<CacheValue> = conn.hvals(key).await?;
        Ok(values)
    }

    async fn ping(&self) -> Result<String, CacheError> {
        let mut conn = self.get_connection().await?;
        let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(pong)
    }
}
