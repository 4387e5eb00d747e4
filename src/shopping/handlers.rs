use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::extractors::AuthUser,
    error::AppError,
    shopping::{
        dto::{CreateShoppingItem, CreateShoppingList, ShoppingListDetails, UpdateShoppingItem},
        repo::{ShoppingItem, ShoppingList},
    },
    state::AppState,
};

pub fn shopping_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/shopping-lists",
            get(list_shopping_lists).post(create_shopping_list),
        )
        .route(
            "/shopping-lists/:id",
            get(get_shopping_list).delete(delete_shopping_list),
        )
        .route("/shopping-lists/:id/items", axum::routing::post(add_item))
        .route(
            "/shopping-lists/items/:item_id",
            put(update_item).delete(delete_item),
        )
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn list_shopping_lists(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<ShoppingList>>, AppError> {
    let rows = ShoppingList::list_by_user(&state.db, user.id).await?;
    Ok(Json(rows))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn get_shopping_list(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ShoppingListDetails>, AppError> {
    let list = ShoppingList::find(&state.db, user.id, id)
        .await?
        .ok_or(AppError::NotFound("Shopping list not found"))?;
    let items = ShoppingItem::list_for(&state.db, list.id).await?;
    Ok(Json(ShoppingListDetails {
        id: list.id,
        name: list.name,
        created_at: list.created_at,
        items,
    }))
}

#[instrument(skip(state, user, payload), fields(user_id = %user.id))]
pub async fn create_shopping_list(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<CreateShoppingList>,
) -> Result<Json<ShoppingList>, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".into()));
    }
    let row = ShoppingList::create(&state.db, user.id, payload.name.trim()).await?;
    info!(list_id = %row.id, "shopping list created");
    Ok(Json(row))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn delete_shopping_list(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !ShoppingList::delete(&state.db, user.id, id).await? {
        return Err(AppError::NotFound("Shopping list not found"));
    }
    info!(list_id = %id, "shopping list deleted");
    Ok(Json(
        serde_json::json!({"message": "Shopping list deleted successfully"}),
    ))
}

#[instrument(skip(state, user, payload), fields(user_id = %user.id))]
pub async fn add_item(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateShoppingItem>,
) -> Result<Json<ShoppingItem>, AppError> {
    // Parent list must belong to the caller before any item is written.
    let list = ShoppingList::find(&state.db, user.id, id)
        .await?
        .ok_or(AppError::NotFound("Shopping list not found"))?;

    let item = ShoppingItem::create(
        &state.db,
        list.id,
        &payload.item_name,
        payload.quantity,
        &payload.unit,
        payload.is_purchased,
    )
    .await?;
    Ok(Json(item))
}

#[instrument(skip(state, user, payload), fields(user_id = %user.id))]
pub async fn update_item(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(item_id): Path<Uuid>,
    Json(payload): Json<UpdateShoppingItem>,
) -> Result<Json<ShoppingItem>, AppError> {
    let item = ShoppingItem::set_purchased(&state.db, user.id, item_id, payload.is_purchased)
        .await?
        .ok_or(AppError::NotFound("Shopping item not found"))?;
    Ok(Json(item))
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn delete_item(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(item_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !ShoppingItem::delete(&state.db, user.id, item_id).await? {
        return Err(AppError::NotFound("Shopping item not found"));
    }
    Ok(Json(
        serde_json::json!({"message": "Shopping item deleted successfully"}),
    ))
}
