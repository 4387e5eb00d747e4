use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::extractors::AdminUser,
    error::AppError,
    news::{
        dto::{CreateNews, NewsPublic, Pagination, UpdateNews},
        repo::{News, NewsFields},
    },
    state::AppState,
};

const PLACEHOLDER_IMAGE: &str = "https://picsum.photos/200/150";

pub fn news_routes() -> Router<AppState> {
    Router::new()
        .route("/news/public", get(list_published))
        .route("/news/public/:slug", get(get_published_by_slug))
        .route("/news", get(list_all).post(create_news))
        .route("/news/:id", axum::routing::put(update_news).delete(delete_news))
}

// --- public ---

#[instrument(skip(state))]
pub async fn list_published(
    State(state): State<AppState>,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<NewsPublic>>, AppError> {
    let rows = News::list_published(&state.db, p.limit, p.offset).await?;
    Ok(Json(rows.into_iter().map(NewsPublic::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_published_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<NewsPublic>, AppError> {
    let row = News::find_published_by_slug(&state.db, &slug)
        .await?
        .ok_or(AppError::NotFound("News not found"))?;
    Ok(Json(NewsPublic::from(row)))
}

// --- admin ---

#[instrument(skip(state, admin), fields(admin_id = %admin.id))]
pub async fn list_all(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<News>>, AppError> {
    let rows = News::list_all(&state.db, p.limit, p.offset).await?;
    Ok(Json(rows))
}

/// `published_at` is stamped exactly once, on the first transition to
/// published; later edits and unpublish/republish cycles keep it.
fn next_published_at(
    is_published: bool,
    current: Option<OffsetDateTime>,
) -> Option<OffsetDateTime> {
    if is_published && current.is_none() {
        Some(OffsetDateTime::now_utc())
    } else {
        current
    }
}

fn normalize_image_url(image_url: Option<String>) -> String {
    match image_url.as_deref() {
        None | Some("") | Some("string") => PLACEHOLDER_IMAGE.to_string(),
        Some(url) => url.to_string(),
    }
}

#[instrument(skip(state, admin, payload), fields(admin_id = %admin.id))]
pub async fn create_news(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(payload): Json<CreateNews>,
) -> Result<Json<News>, AppError> {
    if payload.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required".into()));
    }

    let slug = News::unique_slug(&state.db, &payload.title, None).await?;
    let image_url = normalize_image_url(payload.image_url);
    let published_at = payload.is_published.then(OffsetDateTime::now_utc);

    let row = News::create(
        &state.db,
        admin.id,
        &NewsFields {
            title: &payload.title,
            slug: &slug,
            summary: payload.summary.as_deref(),
            content: &payload.content,
            image_url: Some(&image_url),
            is_published: payload.is_published,
            published_at,
        },
    )
    .await?;

    info!(news_id = %row.id, slug = %row.slug, "news article created");
    Ok(Json(row))
}

#[instrument(skip(state, admin, payload), fields(admin_id = %admin.id))]
pub async fn update_news(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateNews>,
) -> Result<Json<News>, AppError> {
    let current = News::find(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("News not found"))?;

    let title_changed = payload.title.is_some();
    let title = payload.title.unwrap_or(current.title);
    // Title edits regenerate the slug, re-running the collision search but
    // allowing the row to keep its own slug.
    let slug = if title_changed {
        News::unique_slug(&state.db, &title, Some(id)).await?
    } else {
        current.slug.clone()
    };
    let summary = payload.summary.or(current.summary);
    let content = payload.content.unwrap_or(current.content);
    let image_url = payload.image_url.or(current.image_url);
    let is_published = payload.is_published.unwrap_or(current.is_published);

    let published_at = next_published_at(is_published, current.published_at);

    let row = News::update(
        &state.db,
        id,
        &NewsFields {
            title: &title,
            slug: &slug,
            summary: summary.as_deref(),
            content: &content,
            image_url: image_url.as_deref(),
            is_published,
            published_at,
        },
    )
    .await?;

    Ok(Json(row))
}

#[instrument(skip(state, admin), fields(admin_id = %admin.id))]
pub async fn delete_news(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !News::delete(&state.db, id).await? {
        return Err(AppError::NotFound("News not found"));
    }
    info!(news_id = %id, "news article deleted");
    Ok(Json(
        serde_json::json!({"message": "News deleted successfully"}),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_replaces_empty_or_stub_image_urls() {
        assert_eq!(normalize_image_url(None), PLACEHOLDER_IMAGE);
        assert_eq!(normalize_image_url(Some("".into())), PLACEHOLDER_IMAGE);
        assert_eq!(normalize_image_url(Some("string".into())), PLACEHOLDER_IMAGE);
        assert_eq!(
            normalize_image_url(Some("https://example.com/a.png".into())),
            "https://example.com/a.png"
        );
    }

    #[test]
    fn first_publish_stamps_published_at() {
        assert!(next_published_at(true, None).is_some());
    }

    #[test]
    fn resaving_a_published_article_keeps_the_original_timestamp() {
        let original = OffsetDateTime::now_utc() - time::Duration::days(3);
        assert_eq!(next_published_at(true, Some(original)), Some(original));
    }

    #[test]
    fn unpublish_and_republish_keep_the_original_timestamp() {
        let original = OffsetDateTime::now_utc() - time::Duration::days(3);
        let after_unpublish = next_published_at(false, Some(original));
        assert_eq!(after_unpublish, Some(original));
        assert_eq!(next_published_at(true, after_unpublish), Some(original));
    }

    #[test]
    fn draft_without_history_stays_unstamped() {
        assert_eq!(next_published_at(false, None), None);
    }
}
