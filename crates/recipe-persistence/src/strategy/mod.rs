//! # Strategy Module
//!
//! Enum-based cache/database access strategies using dispatch pattern.
//!
//! ## Available Strategies
//!
//! ### Read Strategies
//! - `CacheFirst` - Check cache, fall back to DB on miss, surface cache errors (default)
//! - `CacheFirstBypass` - Check cache, fall back to DB on miss or cache error
//! - `DbOnly` - Skip cache entirely
//!
//! ### Write Strategies
//! - `WriteAround` - Write DB, then invalidate cache (default)
//! - `DbOnly` - Write DB only, no cache interaction
//!
//! ## Example
//!
//! ```rust,ignore
//! use recipe_persistence::strategy::ReadStrategy;
//!
//! let fetched = ReadStrategy::CacheFirst
//!     .read(
//!         || cache_lookup(key),
//!         || db.find_all(),
//!         |recipes| cache_store(key, recipes),
//!     )
//!     .await?;
//! ```

pub mod read_strategy;
pub mod write_strategy;

pub use read_strategy::{Fetched, ReadSource, ReadStrategy};
pub use write_strategy::WriteStrategy;
