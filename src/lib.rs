//! # CacheHaus
//!
//! Hash field caching over Redis: HSET, HGET, HMGET, HDEL, HINCRBY and friends
//! behind argument validation and a small value model, with async and
//! blocking calling conventions and a registry of named providers.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cachehaus::prelude::*;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig {
//!         cache: CacheConfig::new(
//!             "DefaultRedis".to_string(),
//!             "redis://localhost:6379".to_string(),
//!             3000,
//!         ),
//!     };
//!
//!     let cachehaus = CacheHaus::connect(&config)?;
//!     let users = cachehaus.get_provider("DefaultRedis")?;
//!
//!     users.set_field("user:1", "name", "Alice").await?;
//!     users
//!         .set_fields("user:1", [("age", 30), ("visits", 0)], Some(Duration::from_secs(60)))
//!         .await?;
//!
//!     let visits = users.increment_field("user:1", "visits").await?;
//!     println!("visits: {}", visits);
//!
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod errors;
pub mod prelude;

// Re-export the main public types for convenience
pub use crate::core::CacheHaus;
pub use crate::errors::CacheHausError;

// Re-export centralized config
pub use config::{AppConfig, CacheConfig, ConfigError};

// Re-export internal crates used by the public API
pub use cache_system;
pub use cache_system::{
    BlockingHashCache, CacheError, CacheValue, HashCache, HashStore, MemoryHashStore,
    RedisHashStore,
};

// Re-export external dependencies used in public API
pub use async_trait;
