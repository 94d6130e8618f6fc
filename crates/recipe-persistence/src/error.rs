//! Persistence layer error types

use thiserror::Error;

/// Persistence layer errors
///
/// A cache miss is not an error: [`crate::cache::CacheStore::get`] reports it
/// as `Ok(None)`.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Record store error: {0}")]
    Store(String),

    #[error("Cache unavailable: {0}")]
    CacheUnavailable(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Entity not found: {entity_type} with key {key}")]
    NotFound { entity_type: String, key: String },
}

impl PersistenceError {
    pub(crate) fn recipe_not_found(id: uuid::Uuid) -> Self {
        Self::NotFound {
            entity_type: "recipe".to_string(),
            key: id.to_string(),
        }
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(feature = "scylla")]
impl From<scylla::transport::errors::NewSessionError> for PersistenceError {
    fn from(err: scylla::transport::errors::NewSessionError) -> Self {
        Self::Store(err.to_string())
    }
}

#[cfg(feature = "scylla")]
impl From<scylla::transport::errors::QueryError> for PersistenceError {
    fn from(err: scylla::transport::errors::QueryError) -> Self {
        Self::Store(err.to_string())
    }
}

#[cfg(feature = "redis")]
impl From<redis::RedisError> for PersistenceError {
    fn from(err: redis::RedisError) -> Self {
        Self::CacheUnavailable(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PersistenceError>;
