use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::extractors::AdminUser,
    error::AppError,
    pages::{
        dto::{CreatePage, PagePublic, UpdatePage},
        repo::PageContent,
    },
    state::AppState,
};

pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/pages/public/:page_key", get(get_public_page))
        .route("/pages", get(list_pages).post(create_page))
        .route(
            "/pages/:page_key",
            axum::routing::put(update_page).delete(delete_page),
        )
}

/// Missing keys produce a renderable placeholder instead of an error.
#[instrument(skip(state))]
pub async fn get_public_page(
    State(state): State<AppState>,
    Path(page_key): Path<String>,
) -> Result<Json<PagePublic>, AppError> {
    let page = match PageContent::find_by_key(&state.db, &page_key).await? {
        Some(page) => PagePublic::from(page),
        None => PagePublic::placeholder(&page_key),
    };
    Ok(Json(page))
}

#[instrument(skip(state, admin), fields(admin_id = %admin.id))]
pub async fn list_pages(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
) -> Result<Json<Vec<PageContent>>, AppError> {
    let rows = PageContent::list(&state.db).await?;
    Ok(Json(rows))
}

#[instrument(skip(state, admin, payload), fields(admin_id = %admin.id))]
pub async fn create_page(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(payload): Json<CreatePage>,
) -> Result<Json<PageContent>, AppError> {
    if PageContent::find_by_key(&state.db, &payload.page_key)
        .await?
        .is_some()
    {
        warn!(page_key = %payload.page_key, "duplicate page key");
        return Err(AppError::Conflict("Page key already exists".into()));
    }

    let row = PageContent::create(
        &state.db,
        &payload.page_key,
        &payload.title,
        &payload.content,
        admin.id,
    )
    .await?;
    info!(page_key = %row.page_key, "page created");
    Ok(Json(row))
}

#[instrument(skip(state, admin, payload), fields(admin_id = %admin.id))]
pub async fn update_page(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(page_key): Path<String>,
    Json(payload): Json<UpdatePage>,
) -> Result<Json<PageContent>, AppError> {
    let row = PageContent::update(
        &state.db,
        &page_key,
        payload.title.as_deref(),
        payload.content.as_deref(),
        admin.id,
    )
    .await?
    .ok_or(AppError::NotFound("Page not found"))?;
    Ok(Json(row))
}

#[instrument(skip(state, admin), fields(admin_id = %admin.id))]
pub async fn delete_page(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(page_key): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !PageContent::delete(&state.db, &page_key).await? {
        return Err(AppError::NotFound("Page not found"));
    }
    info!(%page_key, "page deleted");
    Ok(Json(
        serde_json::json!({"message": "Page deleted successfully"}),
    ))
}
