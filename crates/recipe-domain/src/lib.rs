//! # Recipes Service - Domain Model
//!
//! Core domain entities for the recipes service. These types are the single
//! source of truth across all layers: persistence, cache snapshot and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// ENTITIES
// =============================================================================

/// A published recipe.
///
/// `id` and `published_at` are assigned once by [`Recipe::publish`] and never
/// change afterwards; every other field is replaceable through
/// [`Recipe::apply`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: Uuid,
    pub name: String,
    pub tags: Vec<String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub published_at: DateTime<Utc>,
}

impl Recipe {
    /// Build a new recipe from a validated input, assigning a fresh id and
    /// the given publication time.
    #[must_use]
    pub fn publish(input: RecipeInput, published_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            tags: input.tags,
            ingredients: input.ingredients,
            instructions: input.instructions,
            published_at,
        }
    }

    /// Replace the mutable fields, keeping `id` and `published_at`.
    pub fn apply(&mut self, input: &RecipeInput) {
        self.name.clone_from(&input.name);
        self.tags.clone_from(&input.tags);
        self.ingredients.clone_from(&input.ingredients);
        self.instructions.clone_from(&input.instructions);
    }
}

// =============================================================================
// INPUTS
// =============================================================================

/// Caller-supplied recipe fields, used for both create and update.
///
/// Any `id` or `publishedAt` present in the incoming document is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeInput {
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
}

impl RecipeInput {
    /// Check the payload before it reaches either store.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Validation`] when the name is empty or blank.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::Validation(
                "recipe name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parse a recipe identifier from its textual form.
///
/// # Errors
///
/// Returns [`DomainError::InvalidId`] when `raw` is not a UUID.
pub fn parse_recipe_id(raw: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw).map_err(|_| DomainError::InvalidId(raw.to_string()))
}

// =============================================================================
// ERRORS
// =============================================================================

/// Domain-level errors
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid recipe: {0}")]
    Validation(String),

    #[error("Invalid recipe id: {0}")]
    InvalidId(String),
}
