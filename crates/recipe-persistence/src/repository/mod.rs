//! # Repository Module
//!
//! Repository pattern implementations for recipe persistence.

pub mod memory;
#[cfg(feature = "scylla")]
pub mod scylla_impl;
pub mod traits;

pub use memory::{InMemoryRecipeRepository, RepositoryCalls};
#[cfg(feature = "scylla")]
pub use scylla_impl::{ScyllaClient, ScyllaConfig, ScyllaRecipeRepository};
pub use traits::RecipeRepository;
