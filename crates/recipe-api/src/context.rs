//! # API Context
//!
//! Application state and dependency injection for HTTP handlers.

use std::sync::Arc;

use crate::config::Config;
use recipe_persistence::{
    CacheClient, CacheConfig, CacheStore, RecipeRepository, RecipeService, ScyllaClient,
    ScyllaConfig, ScyllaRecipeRepository, ServiceOptions,
};

/// Application context shared across all handlers
#[derive(Clone)]
pub struct ApiContext {
    /// Cache-aside recipe operations
    pub recipes: Arc<RecipeService>,
}

impl ApiContext {
    /// Create a new API context around a ready service
    pub fn new(recipes: RecipeService) -> Self {
        Self {
            recipes: Arc::new(recipes),
        }
    }

    /// Connect to ScyllaDB and, when enabled, Redis
    ///
    /// # Errors
    ///
    /// Returns an error if a backend cannot be reached or the schema
    /// bootstrap fails.
    pub async fn connect(config: &Config) -> anyhow::Result<Self> {
        tracing::info!(
            hosts = ?config.scylla.hosts,
            keyspace = %config.scylla.keyspace,
            "Connecting to ScyllaDB"
        );

        let scylla = ScyllaClient::new(ScyllaConfig {
            hosts: config.scylla.hosts.clone(),
            keyspace: config.scylla.keyspace.clone(),
            username: config.scylla.username.clone(),
            password: config.scylla.password.clone(),
        })
        .await?;
        if config.scylla.bootstrap_schema {
            scylla.ensure_schema().await?;
        }
        tracing::info!("ScyllaDB connected");

        let mut builder = ApiContextBuilder::new()
            .with_repository(Arc::new(ScyllaRecipeRepository::new(Arc::new(scylla))))
            .with_options(config.service_options());

        if config.cache.enabled {
            tracing::info!(url = %config.redis.url, "Connecting to Redis");
            let cache = CacheClient::new(CacheConfig {
                url: config.redis.url.clone(),
            })
            .await?;
            tracing::info!("Redis connected");
            builder = builder.with_cache(Arc::new(cache));
        } else {
            tracing::warn!("Recipe cache disabled, every list reads ScyllaDB");
        }

        builder.build().map_err(anyhow::Error::msg)
    }
}

/// Builder for ApiContext
pub struct ApiContextBuilder {
    repository: Option<Arc<dyn RecipeRepository>>,
    cache: Option<Arc<dyn CacheStore>>,
    options: ServiceOptions,
}

impl ApiContextBuilder {
    pub fn new() -> Self {
        Self {
            repository: None,
            cache: None,
            options: ServiceOptions::default(),
        }
    }

    pub fn with_repository(mut self, repository: Arc<dyn RecipeRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn with_cache(mut self, cache: Arc<dyn CacheStore>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_options(mut self, options: ServiceOptions) -> Self {
        self.options = options;
        self
    }

    /// # Errors
    ///
    /// Fails when no repository was supplied; the cache is optional.
    pub fn build(self) -> Result<ApiContext, &'static str> {
        let repository = self.repository.ok_or("Recipe repository required")?;
        Ok(ApiContext::new(RecipeService::new(
            repository,
            self.cache,
            self.options,
        )))
    }
}

impl Default for ApiContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
