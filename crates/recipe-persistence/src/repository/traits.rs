//! # Repository Traits
//!
//! Abstract repository interface for recipe records.
//! Implementations can be swapped for different backends (ScyllaDB, in-memory, etc.)

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use recipe_domain::{Recipe, RecipeInput};

// =============================================================================
// RECIPE REPOSITORY
// =============================================================================

/// Repository for Recipe entity operations
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Insert a new recipe, returning its id
    async fn insert(&self, recipe: &Recipe) -> Result<Uuid>;

    /// Get every recipe in the store's natural iteration order
    async fn find_all(&self) -> Result<Vec<Recipe>>;

    /// Get recipe by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Recipe>>;

    /// Replace name, tags, ingredients and instructions.
    ///
    /// Completes successfully whether or not a recipe with `id` exists.
    async fn update_by_id(&self, id: Uuid, fields: &RecipeInput) -> Result<()>;

    /// Delete recipe. No match is not an error.
    async fn delete_by_id(&self, id: Uuid) -> Result<()>;
}
