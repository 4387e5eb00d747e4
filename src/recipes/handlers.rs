use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::extractors::AuthUser,
    error::AppError,
    recipes::{
        dto::{CreateRecipe, GenerateRequest, MatchQuery},
        generate::{has_required_fields, leading_int},
        matcher,
        repo::{NewRecipe, Recipe},
    },
    state::AppState,
};

pub fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(list_recipes).post(create_recipe))
        .route("/recipes/generate", post(generate_recipe))
        .route("/recipes/match/ingredients", get(match_recipes))
        .route("/recipes/:id", get(get_recipe).delete(delete_recipe))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn list_recipes(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<Recipe>>, AppError> {
    let rows = Recipe::list_by_user(&state.db, user.id).await?;
    Ok(Json(rows))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn get_recipe(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Recipe>, AppError> {
    let row = Recipe::find(&state.db, user.id, id)
        .await?
        .ok_or(AppError::NotFound("Recipe not found"))?;
    Ok(Json(row))
}

#[instrument(skip(state, user, payload), fields(user_id = %user.id))]
pub async fn create_recipe(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreateRecipe>,
) -> Result<Json<Recipe>, AppError> {
    if payload.prep_time < 0 || payload.cook_time < 0 {
        return Err(AppError::BadRequest("Times must be non-negative".into()));
    }

    let new = NewRecipe {
        name: payload.name,
        description: payload.description,
        ingredients: payload.ingredients.to_string(),
        instructions: payload.instructions.to_string(),
        prep_time: payload.prep_time,
        cook_time: payload.cook_time,
        servings: payload.servings,
        calories: payload.calories,
        is_healthy: payload.is_healthy,
        difficulty: payload.difficulty,
        tags: payload.tags.to_string(),
    };
    let row = Recipe::create(&state.db, user.id, &new).await?;
    info!(recipe_id = %row.id, name = %row.name, "recipe created");
    Ok(Json(row))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn delete_recipe(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !Recipe::delete(&state.db, user.id, id).await? {
        return Err(AppError::NotFound("Recipe not found"));
    }
    Ok(Json(
        serde_json::json!({"message": "Recipe deleted successfully"}),
    ))
}

/// Calls the external generator, validates the payload and persists the
/// resulting recipe for the caller.
#[instrument(skip(state, user, payload), fields(user_id = %user.id))]
pub async fn generate_recipe(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<GenerateRequest>,
) -> Result<Json<Recipe>, AppError> {
    if payload.ingredients.is_empty() {
        return Err(AppError::BadRequest("Ingredients are required".into()));
    }

    let recipe_data = state
        .generator
        .generate(&payload.ingredients, payload.preferences.as_deref())
        .await
        .map_err(|e| {
            warn!(error = %e, "recipe generation failed");
            AppError::Generation(e.to_string())
        })?;

    if !has_required_fields(&recipe_data) {
        warn!("generator returned recipe without ingredients or instructions");
        return Err(AppError::InvalidOperation(
            "Generator returned invalid recipe data".into(),
        ));
    }

    let str_field = |key: &str, default: &str| {
        recipe_data
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    };
    let list_field = |key: &str| {
        recipe_data
            .get(key)
            .map(Value::to_string)
            .unwrap_or_else(|| "[]".into())
    };

    let new = NewRecipe {
        name: str_field("name", "Unknown Recipe"),
        description: str_field("description", ""),
        ingredients: list_field("ingredients"),
        instructions: list_field("instructions"),
        prep_time: leading_int(recipe_data.get("prep_time")),
        cook_time: leading_int(recipe_data.get("cook_time")),
        servings: recipe_data
            .get("servings")
            .and_then(Value::as_i64)
            .unwrap_or(1) as i32,
        calories: recipe_data
            .get("calories")
            .and_then(Value::as_i64)
            .map(|c| c as i32),
        is_healthy: recipe_data
            .get("is_healthy")
            .and_then(Value::as_bool)
            .unwrap_or(true),
        difficulty: str_field("difficulty", "Unknown"),
        tags: list_field("tags"),
    };

    let row = Recipe::create(&state.db, user.id, &new).await?;
    info!(recipe_id = %row.id, name = %row.name, "generated recipe stored");
    Ok(Json(row))
}

/// Whole-table ingredient match; rows with malformed ingredient JSON are
/// skipped rather than failing the request.
#[instrument(skip(state))]
pub async fn match_recipes(
    State(state): State<AppState>,
    Query(query): Query<MatchQuery>,
) -> Result<Json<Vec<Recipe>>, AppError> {
    let wanted = query.names();
    let recipes = Recipe::list_all(&state.db).await?;

    let matched = recipes
        .into_iter()
        .filter(|r| match matcher::ingredient_names(&r.ingredients) {
            Some(names) => matcher::contains_all(&names, &wanted),
            None => false,
        })
        .collect::<Vec<_>>();

    Ok(Json(matched))
}
