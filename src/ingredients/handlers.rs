use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::extractors::AuthUser,
    error::AppError,
    ingredients::{
        dto::{CreateIngredient, ExpiringFilter, ListFilter, UpdateIngredient},
        repo::Ingredient,
    },
    state::AppState,
};

pub fn ingredient_routes() -> Router<AppState> {
    Router::new()
        .route("/ingredients", get(list_ingredients).post(create_ingredient))
        .route(
            "/ingredients/:id",
            get(get_ingredient)
                .put(update_ingredient)
                .delete(delete_ingredient),
        )
        .route("/ingredients/expiring/soon", get(expiring_soon))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn list_ingredients(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(filter): Query<ListFilter>,
) -> Result<Json<Vec<Ingredient>>, AppError> {
    let rows =
        Ingredient::list_by_user(&state.db, user.id, filter.location.as_deref()).await?;
    Ok(Json(rows))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn get_ingredient(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Ingredient>, AppError> {
    let row = Ingredient::find(&state.db, user.id, id)
        .await?
        .ok_or(AppError::NotFound("Ingredient not found"))?;
    Ok(Json(row))
}

#[instrument(skip(state, user, payload), fields(user_id = %user.id))]
pub async fn create_ingredient(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreateIngredient>,
) -> Result<Json<Ingredient>, AppError> {
    if payload.quantity < 0.0 {
        return Err(AppError::BadRequest("Quantity must be non-negative".into()));
    }

    if Ingredient::find_by_name(&state.db, user.id, &payload.name)
        .await?
        .is_some()
    {
        warn!(name = %payload.name, "duplicate ingredient name");
        return Err(AppError::Conflict("Ingredient already exists".into()));
    }

    let row = Ingredient::create(&state.db, user.id, &payload).await?;
    info!(ingredient_id = %row.id, name = %row.name, "ingredient created");
    Ok(Json(row))
}

#[instrument(skip(state, user, payload), fields(user_id = %user.id))]
pub async fn update_ingredient(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateIngredient>,
) -> Result<Json<Ingredient>, AppError> {
    if let Some(q) = payload.quantity {
        if q < 0.0 {
            return Err(AppError::BadRequest("Quantity must be non-negative".into()));
        }
    }

    let row = Ingredient::update(&state.db, user.id, id, &payload)
        .await?
        .ok_or(AppError::NotFound("Ingredient not found"))?;
    Ok(Json(row))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn delete_ingredient(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !Ingredient::delete(&state.db, user.id, id).await? {
        return Err(AppError::NotFound("Ingredient not found"));
    }
    info!(ingredient_id = %id, "ingredient deleted");
    Ok(Json(
        serde_json::json!({"message": "Ingredient deleted successfully"}),
    ))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn expiring_soon(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(filter): Query<ExpiringFilter>,
) -> Result<Json<Vec<Ingredient>>, AppError> {
    let rows = Ingredient::list_expiring(&state.db, user.id, filter.window()).await?;
    Ok(Json(rows))
}
