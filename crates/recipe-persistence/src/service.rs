//! # Recipe Service
//!
//! Cache-aside orchestration over a [`RecipeRepository`] and an optional
//! [`CacheStore`].
//!
//! The whole recipe list is cached as one JSON snapshot under a single key.
//! List reads go through the configured [`ReadStrategy`]; create and update
//! (and delete, unless [`DeletePolicy::Retain`] is selected) go through the
//! configured [`WriteStrategy`], which deletes the snapshot only after the
//! record store has acknowledged the write. The snapshot is never patched.
//!
//! There is no version token on the snapshot: a list read that repopulates
//! concurrently with another request's write-then-invalidate can leave a
//! stale snapshot until the next mutation.

use chrono::{SubsecRound, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::cache::CacheStore;
use crate::error::{PersistenceError, Result};
use crate::repository::RecipeRepository;
use crate::strategy::{ReadStrategy, WriteStrategy};
use recipe_domain::{Recipe, RecipeInput};

/// Default cache key of the recipe list snapshot.
pub const SNAPSHOT_KEY: &str = "recipes";

/// Whether deleting a recipe clears the list snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeletePolicy {
    /// Delete invalidates like create and update.
    #[default]
    Invalidate,
    /// Delete leaves the snapshot in place; list reads may keep returning the
    /// deleted recipe until the next create or update.
    Retain,
}

/// Tunables for [`RecipeService`].
#[derive(Debug, Clone)]
pub struct ServiceOptions {
    pub read_strategy: ReadStrategy,
    pub write_strategy: WriteStrategy,
    pub delete_policy: DeletePolicy,
    pub snapshot_key: String,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            read_strategy: ReadStrategy::default(),
            write_strategy: WriteStrategy::default(),
            delete_policy: DeletePolicy::default(),
            snapshot_key: SNAPSHOT_KEY.to_string(),
        }
    }
}

impl ServiceOptions {
    pub fn with_read_strategy(mut self, strategy: ReadStrategy) -> Self {
        self.read_strategy = strategy;
        self
    }

    pub fn with_write_strategy(mut self, strategy: WriteStrategy) -> Self {
        self.write_strategy = strategy;
        self
    }

    pub fn with_delete_policy(mut self, policy: DeletePolicy) -> Self {
        self.delete_policy = policy;
        self
    }

    pub fn with_snapshot_key(mut self, key: impl Into<String>) -> Self {
        self.snapshot_key = key.into();
        self
    }
}

/// Recipe operations with a cached list view.
pub struct RecipeService {
    repo: Arc<dyn RecipeRepository>,
    cache: Option<Arc<dyn CacheStore>>,
    options: ServiceOptions,
}

impl RecipeService {
    /// Create a service. Without a cache every strategy degrades to its
    /// DB-only form.
    pub fn new(
        repo: Arc<dyn RecipeRepository>,
        cache: Option<Arc<dyn CacheStore>>,
        options: ServiceOptions,
    ) -> Self {
        Self {
            repo,
            cache,
            options,
        }
    }

    pub fn options(&self) -> &ServiceOptions {
        &self.options
    }

    fn read_strategy(&self) -> ReadStrategy {
        if self.cache.is_some() {
            self.options.read_strategy
        } else {
            ReadStrategy::DbOnly
        }
    }

    fn write_strategy(&self) -> WriteStrategy {
        if self.cache.is_some() {
            self.options.write_strategy
        } else {
            WriteStrategy::DbOnly
        }
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// List every recipe, answering from the snapshot when present.
    ///
    /// # Errors
    ///
    /// - [`PersistenceError::CacheUnavailable`] if the cache fails and the read
    ///   strategy does not bypass it
    /// - [`PersistenceError::Serialization`] if the snapshot cannot be decoded
    /// - [`PersistenceError::Store`] if the fallback query fails; the cache is
    ///   not written in that case
    pub async fn list(&self) -> Result<Vec<Recipe>> {
        let key = self.options.snapshot_key.as_str();
        let cache = self.cache.as_deref();

        let fetched = self
            .read_strategy()
            .read(
                || read_snapshot(cache, key),
                || self.repo.find_all(),
                |recipes: &Vec<Recipe>| write_snapshot(cache, key, serde_json::to_string(recipes)),
            )
            .await?;

        tracing::debug!(
            source = ?fetched.source,
            count = fetched.value.len(),
            "Listed recipes"
        );

        Ok(fetched.value)
    }

    /// Point lookup; the cache is never consulted.
    ///
    /// # Errors
    ///
    /// [`PersistenceError::NotFound`] if no recipe has this id, or the store
    /// error.
    pub async fn get(&self, id: Uuid) -> Result<Recipe> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| PersistenceError::recipe_not_found(id))
    }

    // =========================================================================
    // MUTATIONS
    // =========================================================================

    /// Publish a new recipe with a fresh id and the current time.
    ///
    /// # Errors
    ///
    /// The store error (nothing invalidated), or the invalidation error after
    /// the recipe was stored.
    pub async fn create(&self, input: RecipeInput) -> Result<Recipe> {
        // record stores keep millisecond timestamps
        let recipe = Recipe::publish(input, Utc::now().trunc_subsecs(3));

        self.write_strategy()
            .write(|| self.repo.insert(&recipe), || self.invalidate())
            .await?;

        tracing::info!(recipe_id = %recipe.id, name = %recipe.name, "Recipe created");
        Ok(recipe)
    }

    /// Replace the mutable fields of recipe `id`.
    ///
    /// Succeeds, and invalidates, even when no recipe matches `id`.
    ///
    /// # Errors
    ///
    /// The store error (nothing invalidated), or the invalidation error after
    /// the update was applied.
    pub async fn update(&self, id: Uuid, input: &RecipeInput) -> Result<()> {
        self.write_strategy()
            .write(|| self.repo.update_by_id(id, input), || self.invalidate())
            .await?;

        tracing::info!(recipe_id = %id, "Recipe updated");
        Ok(())
    }

    /// Delete recipe `id`. No match is success.
    ///
    /// # Errors
    ///
    /// The store error, or the invalidation error under
    /// [`DeletePolicy::Invalidate`].
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let strategy = match self.options.delete_policy {
            DeletePolicy::Invalidate => self.write_strategy(),
            DeletePolicy::Retain => WriteStrategy::DbOnly,
        };

        strategy
            .write(|| self.repo.delete_by_id(id), || self.invalidate())
            .await?;

        tracing::info!(recipe_id = %id, "Recipe deleted");
        Ok(())
    }

    async fn invalidate(&self) -> Result<()> {
        if let Some(cache) = &self.cache {
            let removed = cache.delete(&self.options.snapshot_key).await?;
            tracing::debug!(key = %self.options.snapshot_key, removed, "Removed recipe snapshot");
        }
        Ok(())
    }
}

async fn read_snapshot(cache: Option<&dyn CacheStore>, key: &str) -> Result<Option<Vec<Recipe>>> {
    let Some(cache) = cache else {
        return Ok(None);
    };

    let snapshot = cache
        .get(key)
        .await?
        .map(|raw| serde_json::from_str(&raw))
        .transpose()?;

    Ok(snapshot)
}

async fn write_snapshot(
    cache: Option<&dyn CacheStore>,
    key: &str,
    encoded: serde_json::Result<String>,
) -> Result<()> {
    match cache {
        Some(cache) => cache.set(key, &encoded?).await,
        None => Ok(()),
    }
}
