//! Error types for the CacheHaus crate
//!
//! This module contains all error types that can be returned by CacheHaus operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheHausError {
    #[error("Cache provider not found: {0}")]
    ProviderNotFound(String),

    #[error("Cache provider already registered: {0}")]
    ProviderAlreadyRegistered(String),

    #[error(transparent)]
    Cache(#[from] cache_system::CacheError),

    #[error(transparent)]
    Config(#[from] config::ConfigError),
}
