//! # Cache Module
//!
//! Key-value backends for the recipe list snapshot.

pub mod memory;
#[cfg(feature = "redis")]
pub mod redis_client;
pub mod traits;

pub use memory::{CacheCalls, InMemoryCache};
#[cfg(feature = "redis")]
pub use redis_client::{CacheClient, CacheConfig};
pub use traits::CacheStore;
