//! # Recipe Persistence Library
//!
//! Persistence layer for the recipes service.
//!
//! ## Architecture
//!
//! This crate implements the Repository pattern with pluggable Strategy pattern
//! for the cache-aside recipe list:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Application Layer                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      RecipeService                           │
//! │     (list via ReadStrategy, mutations via WriteStrategy)     │
//! └─────────────────────────────────────────────────────────────┘
//!                    │                   │
//!                    ▼                   ▼
//! ┌─────────────────────────┐   ┌──────────────────────────────┐
//! │   CacheStore (Redis)    │   │  RecipeRepository (ScyllaDB) │
//! │  one "recipes" snapshot │   │      (Source of Truth)       │
//! └─────────────────────────┘   └──────────────────────────────┘
//! ```
//!
//! ## Features
//!
//! - `scylla`: Enable ScyllaDB backend (default)
//! - `redis`: Enable Redis cache layer (default)
//!
//! In-memory backends are always available.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use recipe_persistence::{
//!     CacheClient, CacheConfig, RecipeService, ScyllaClient, ScyllaConfig,
//!     ScyllaRecipeRepository, ServiceOptions,
//! };
//!
//! let scylla = Arc::new(ScyllaClient::new(ScyllaConfig::default()).await?);
//! let cache = CacheClient::new(CacheConfig::default()).await?;
//!
//! let service = RecipeService::new(
//!     Arc::new(ScyllaRecipeRepository::new(scylla)),
//!     Some(Arc::new(cache)),
//!     ServiceOptions::default(),
//! );
//!
//! let recipes = service.list().await?;
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod error;
pub mod repository;
pub mod service;
pub mod strategy;

// Re-export commonly used types
pub use cache::{CacheStore, InMemoryCache};
#[cfg(feature = "redis")]
pub use cache::{CacheClient, CacheConfig};
pub use error::{PersistenceError, Result};
pub use repository::{InMemoryRecipeRepository, RecipeRepository};
#[cfg(feature = "scylla")]
pub use repository::{ScyllaClient, ScyllaConfig, ScyllaRecipeRepository};
pub use service::{DeletePolicy, RecipeService, SNAPSHOT_KEY, ServiceOptions};
pub use strategy::{ReadSource, ReadStrategy, WriteStrategy};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
