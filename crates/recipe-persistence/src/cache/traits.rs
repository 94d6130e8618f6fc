//! # Cache Traits
//!
//! Abstract key-value interface backing the recipe list snapshot.
//! Implementations can be swapped for different backends (Redis, in-memory).

use async_trait::async_trait;

use crate::error::Result;

/// Key-value store holding serialized snapshots.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Fetch the value stored under `key`.
    ///
    /// A clean miss is `Ok(None)`; any backend failure is an error.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key` with no expiration, overwriting any
    /// previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Deleting an absent key is not an error; the returned
    /// flag reports whether anything was removed.
    async fn delete(&self, key: &str) -> Result<bool>;
}
