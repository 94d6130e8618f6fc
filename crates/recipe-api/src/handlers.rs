//! # Recipe Handlers
//!
//! REST endpoints over [`recipe_persistence::RecipeService`]. Payloads are
//! parsed and validated here, before either store is touched.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Serialize;
use uuid::Uuid;

use crate::context::ApiContext;
use crate::error::ApiResult;
use recipe_domain::{Recipe, RecipeInput, parse_recipe_id};

/// Body returned by a successful update: the submitted fields and the id.
#[derive(Debug, Serialize)]
pub struct UpdatedRecipe {
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: RecipeInput,
}

/// Body returned by a successful delete.
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: &'static str,
}

/// `POST /recipes`
pub async fn create_recipe(
    State(ctx): State<ApiContext>,
    payload: Result<Json<RecipeInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Recipe>)> {
    let Json(input) = payload?;
    input.validate()?;

    let recipe = ctx.recipes.create(input).await?;
    Ok((StatusCode::CREATED, Json(recipe)))
}

/// `GET /recipes`
pub async fn list_recipes(State(ctx): State<ApiContext>) -> ApiResult<Json<Vec<Recipe>>> {
    Ok(Json(ctx.recipes.list().await?))
}

/// `GET /recipes/{id}`
pub async fn get_recipe(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<Recipe>> {
    let id = parse_recipe_id(&id)?;
    Ok(Json(ctx.recipes.get(id).await?))
}

/// `PUT /recipes/{id}`
pub async fn update_recipe(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    payload: Result<Json<RecipeInput>, JsonRejection>,
) -> ApiResult<Json<UpdatedRecipe>> {
    let id = parse_recipe_id(&id)?;
    let Json(input) = payload?;
    input.validate()?;

    ctx.recipes.update(id, &input).await?;
    Ok(Json(UpdatedRecipe { id, fields: input }))
}

/// `DELETE /recipes/{id}`
pub async fn delete_recipe(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> ApiResult<Json<Message>> {
    let id = parse_recipe_id(&id)?;
    ctx.recipes.delete(id).await?;

    Ok(Json(Message {
        message: "Recipe has been deleted",
    }))
}
