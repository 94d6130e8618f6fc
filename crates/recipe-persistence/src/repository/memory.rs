//! In-process recipe repository.
//!
//! Keeps recipes in insertion order. Counts every call and supports failure
//! injection so the cache-aside path can be tested without ScyllaDB.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::traits::RecipeRepository;
use crate::error::{PersistenceError, Result};
use recipe_domain::{Recipe, RecipeInput};

/// Call counters for [`InMemoryRecipeRepository`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RepositoryCalls {
    pub inserts: usize,
    pub find_all: usize,
    pub find_by_id: usize,
    pub updates: usize,
    pub deletes: usize,
}

#[derive(Debug, Default)]
pub struct InMemoryRecipeRepository {
    recipes: RwLock<Vec<Recipe>>,
    failing: AtomicBool,
    inserts: AtomicUsize,
    find_all: AtomicUsize,
    find_by_id: AtomicUsize,
    updates: AtomicUsize,
    deletes: AtomicUsize,
}

impl InMemoryRecipeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with a store error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> RepositoryCalls {
        RepositoryCalls {
            inserts: self.inserts.load(Ordering::SeqCst),
            find_all: self.find_all.load(Ordering::SeqCst),
            find_by_id: self.find_by_id.load(Ordering::SeqCst),
            updates: self.updates.load(Ordering::SeqCst),
            deletes: self.deletes.load(Ordering::SeqCst),
        }
    }

    fn check_available(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(PersistenceError::Store(
                "in-memory store switched off".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl RecipeRepository for InMemoryRecipeRepository {
    async fn insert(&self, recipe: &Recipe) -> Result<Uuid> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        let mut recipes = self.recipes.write().await;
        if recipes.iter().any(|r| r.id == recipe.id) {
            return Err(PersistenceError::Store(format!(
                "duplicate recipe id {}",
                recipe.id
            )));
        }
        recipes.push(recipe.clone());
        Ok(recipe.id)
    }

    async fn find_all(&self) -> Result<Vec<Recipe>> {
        self.find_all.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self.recipes.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Recipe>> {
        self.find_by_id.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self.recipes.read().await.iter().find(|r| r.id == id).cloned())
    }

    async fn update_by_id(&self, id: Uuid, fields: &RecipeInput) -> Result<()> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        if let Some(recipe) = self.recipes.write().await.iter_mut().find(|r| r.id == id) {
            recipe.apply(fields);
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        self.recipes.write().await.retain(|r| r.id != id);
        Ok(())
    }
}
