//! ScyllaDB repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use scylla::{DeserializeRow, Session, SessionBuilder};
use std::sync::Arc;
use uuid::Uuid;

use super::traits::RecipeRepository;
use crate::error::{PersistenceError, Result};
use recipe_domain::{Recipe, RecipeInput};

const CREATE_RECIPES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS recipes (
        id uuid PRIMARY KEY,
        name text,
        tags list<text>,
        ingredients list<text>,
        instructions list<text>,
        published_at timestamp
    )
"#;

const SELECT_COLUMNS: &str = "SELECT id, name, tags, ingredients, instructions, published_at FROM recipes";

// Every write is a lightweight transaction: Paxos and client timestamps are
// never mixed on a recipe partition. [applied] is not inspected.
const INSERT_RECIPE: &str = r#"
    INSERT INTO recipes (
        id, name, tags, ingredients, instructions, published_at
    ) VALUES (?, ?, ?, ?, ?, ?)
    IF NOT EXISTS
"#;

// IF EXISTS also keeps an unknown id from becoming a partial row
const UPDATE_RECIPE: &str = r#"
    UPDATE recipes
    SET name = ?,
        tags = ?,
        ingredients = ?,
        instructions = ?
    WHERE id = ?
    IF EXISTS
"#;

const DELETE_RECIPE: &str = "DELETE FROM recipes WHERE id = ? IF EXISTS";

// =============================================================================
// SCYLLA CONFIGURATION
// =============================================================================

/// ScyllaDB connection configuration.
#[derive(Debug, Clone)]
pub struct ScyllaConfig {
    pub hosts: Vec<String>,
    pub keyspace: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Default for ScyllaConfig {
    fn default() -> Self {
        Self {
            hosts: vec!["localhost:9042".to_string()],
            keyspace: "recipes".to_string(),
            username: None,
            password: None,
        }
    }
}

// =============================================================================
// SCYLLA CLIENT
// =============================================================================

/// ScyllaDB client wrapper.
pub struct ScyllaClient {
    session: Arc<Session>,
    pub config: ScyllaConfig,
}

impl ScyllaClient {
    /// Create a new ScyllaDB client bound to the configured keyspace.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Store`] if the session cannot be opened or
    /// the keyspace does not exist.
    pub async fn new(config: ScyllaConfig) -> Result<Self> {
        let mut builder = SessionBuilder::new().known_nodes(&config.hosts);

        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.user(user, pass);
        }

        let session = builder.build().await?;
        session.use_keyspace(&config.keyspace, false).await?;

        Ok(Self {
            session: Arc::new(session),
            config,
        })
    }

    /// Create the `recipes` table if the keyspace does not have it yet.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Store`] if the statement fails.
    pub async fn ensure_schema(&self) -> Result<()> {
        self.session.query_unpaged(CREATE_RECIPES_TABLE, ()).await?;
        tracing::debug!(keyspace = %self.config.keyspace, "recipes table ready");
        Ok(())
    }
}

// =============================================================================
// ROW MAPPING
// =============================================================================

/// Raw `recipes` row. CQL stores empty lists as null.
#[derive(Debug, DeserializeRow)]
struct RecipeRow {
    id: Uuid,
    name: Option<String>,
    tags: Option<Vec<String>>,
    ingredients: Option<Vec<String>>,
    instructions: Option<Vec<String>>,
    published_at: Option<DateTime<Utc>>,
}

impl TryFrom<RecipeRow> for Recipe {
    type Error = PersistenceError;

    fn try_from(row: RecipeRow) -> Result<Self> {
        let published_at = row.published_at.ok_or_else(|| {
            PersistenceError::Store(format!("recipe {} has no published_at", row.id))
        })?;

        Ok(Self {
            id: row.id,
            name: row.name.unwrap_or_default(),
            tags: row.tags.unwrap_or_default(),
            ingredients: row.ingredients.unwrap_or_default(),
            instructions: row.instructions.unwrap_or_default(),
            published_at,
        })
    }
}

fn decode_error(err: impl std::fmt::Display) -> PersistenceError {
    PersistenceError::Store(format!("failed to decode recipe row: {err}"))
}

// =============================================================================
// RECIPE REPOSITORY
// =============================================================================

/// Repository for recipe operations.
pub struct ScyllaRecipeRepository {
    client: Arc<ScyllaClient>,
}

impl ScyllaRecipeRepository {
    /// Create a new recipe repository.
    pub fn new(client: Arc<ScyllaClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RecipeRepository for ScyllaRecipeRepository {
    async fn insert(&self, recipe: &Recipe) -> Result<Uuid> {
        self.client
            .session
            .query_unpaged(
                INSERT_RECIPE,
                (
                    recipe.id,
                    &recipe.name,
                    &recipe.tags,
                    &recipe.ingredients,
                    &recipe.instructions,
                    recipe.published_at,
                ),
            )
            .await?;

        Ok(recipe.id)
    }

    async fn find_all(&self) -> Result<Vec<Recipe>> {
        let result = self.client.session.query_unpaged(SELECT_COLUMNS, ()).await?;
        let rows = result.into_rows_result().map_err(decode_error)?;

        // one undecodable row fails the whole listing
        let recipes = rows
            .rows::<RecipeRow>()
            .map_err(decode_error)?
            .map(|row| row.map_err(decode_error).and_then(Recipe::try_from))
            .collect::<Result<Vec<_>>>()?;

        Ok(recipes)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Recipe>> {
        let query = format!("{SELECT_COLUMNS} WHERE id = ?");

        let result = self.client.session.query_unpaged(query, (id,)).await?;
        let row = result
            .into_rows_result()
            .map_err(decode_error)?
            .maybe_first_row::<RecipeRow>()
            .map_err(decode_error)?;

        row.map(Recipe::try_from).transpose()
    }

    async fn update_by_id(&self, id: Uuid, fields: &RecipeInput) -> Result<()> {
        self.client
            .session
            .query_unpaged(
                UPDATE_RECIPE,
                (
                    &fields.name,
                    &fields.tags,
                    &fields.ingredients,
                    &fields.instructions,
                    id,
                ),
            )
            .await?;

        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<()> {
        self.client
            .session
            .query_unpaged(DELETE_RECIPE, (id,))
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_with_null_lists_maps_to_empty() {
        let now = Utc::now();
        let row = RecipeRow {
            id: Uuid::new_v4(),
            name: Some("Pasta".to_string()),
            tags: None,
            ingredients: Some(vec!["pasta".to_string()]),
            instructions: None,
            published_at: Some(now),
        };

        let recipe = Recipe::try_from(row).unwrap();
        assert!(recipe.tags.is_empty());
        assert!(recipe.instructions.is_empty());
        assert_eq!(recipe.ingredients, vec!["pasta"]);
        assert_eq!(recipe.published_at, now);
    }

    #[test]
    fn test_writes_are_all_conditional() {
        assert!(INSERT_RECIPE.trim_end().ends_with("IF NOT EXISTS"));
        assert!(UPDATE_RECIPE.trim_end().ends_with("IF EXISTS"));
        assert!(DELETE_RECIPE.trim_end().ends_with("IF EXISTS"));
    }

    #[test]
    fn test_row_without_timestamp_is_rejected() {
        let row = RecipeRow {
            id: Uuid::new_v4(),
            name: Some("Pasta".to_string()),
            tags: None,
            ingredients: None,
            instructions: None,
            published_at: None,
        };

        assert!(matches!(
            Recipe::try_from(row),
            Err(PersistenceError::Store(_))
        ));
    }
}
