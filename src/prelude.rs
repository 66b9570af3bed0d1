//! Convenience re-exports for common CacheHaus usage
//!
//! This prelude module re-exports the most commonly used items from the CacheHaus crates,
//! making it easier to import everything you need with a single use statement.
//!
//! # Example
//!
//! ```rust
//! use cachehaus::prelude::*;
//!
//! let cache = HashCache::in_memory("example");
//! assert_eq!(cache.name(), "example");
//! ```

// Core CacheHaus components
pub use crate::core::CacheHaus;
pub use crate::errors::CacheHausError;

// Re-export centralized config
pub use config::{AppConfig, CacheConfig, ConfigError};

// Re-export cache system
pub use cache_system::prelude::*;

// Common external dependencies
pub use anyhow;
pub use async_trait;
pub use tokio;
