//! Core CacheHaus functionality
//!
//! This module contains the main CacheHaus struct, a registry of named hash
//! cache providers.

use cache_system::HashCache;
use std::collections::HashMap;

use crate::errors::CacheHausError;
use config::AppConfig;

/// Registry of named hash cache providers
#[derive(Debug, Default)]
pub struct CacheHaus {
    providers: HashMap<String, HashCache>,
}

impl CacheHaus {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the Redis provider described by `config.cache`
    pub fn connect(config: &AppConfig) -> Result<Self, CacheHausError> {
        let mut cachehaus = Self::new();
        let provider = HashCache::from_config(&config.cache)?;
        tracing::debug!(provider = %config.cache.name, "Registering Redis hash cache provider");
        cachehaus.register_provider(config.cache.name.clone(), provider)?;
        Ok(cachehaus)
    }

    /// Load configuration from the environment or default file, then connect
    pub fn load() -> Result<Self, CacheHausError> {
        let config = AppConfig::load()?;
        Self::connect(&config)
    }

    /// Register a provider with a given name
    pub fn register_provider(
        &mut self,
        name: String,
        provider: HashCache,
    ) -> Result<(), CacheHausError> {
        if self.providers.contains_key(&name) {
            return Err(CacheHausError::ProviderAlreadyRegistered(name));
        }

        self.providers.insert(name, provider);
        Ok(())
    }

    /// Get a registered provider by name
    pub fn get_provider(&self, name: &str) -> Result<&HashCache, CacheHausError> {
        self.providers
            .get(name)
            .ok_or_else(|| CacheHausError::ProviderNotFound(name.to_string()))
    }

    /// List all registered provider names
    pub fn list_providers(&self) -> Vec<&String> {
        self.providers.keys().collect()
    }

    /// Remove a provider by name and hand it back
    pub fn unregister_provider(&mut self, name: &str) -> Result<HashCache, CacheHausError> {
        self.providers
            .remove(name)
            .ok_or_else(|| CacheHausError::ProviderNotFound(name.to_string()))
    }

    /// Ping every registered provider's store
    pub async fn health_check(&self) -> Result<(), CacheHausError> {
        for (name, provider) in &self.providers {
            provider.ping().await.map_err(|source| {
                tracing::warn!(provider = %name, error = %source, "Health check failed");
                source
            })?;
        }
        Ok(())
    }
}
