use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::news::slug::{candidates, slugify};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct News {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub summary: Option<String>,
    pub content: String,
    pub image_url: Option<String>,
    pub author_id: Uuid,
    pub is_published: bool,
    pub published_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

const COLUMNS: &str = "id, title, slug, summary, content, image_url, author_id, \
                       is_published, published_at, created_at, updated_at";

pub struct NewsFields<'a> {
    pub title: &'a str,
    pub slug: &'a str,
    pub summary: Option<&'a str>,
    pub content: &'a str,
    pub image_url: Option<&'a str>,
    pub is_published: bool,
    pub published_at: Option<OffsetDateTime>,
}

impl News {
    pub async fn list_published(
        db: &PgPool,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<News>> {
        let rows = sqlx::query_as::<_, News>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM news
            WHERE is_published
            ORDER BY published_at DESC
            LIMIT $1 OFFSET $2
            "#
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find_published_by_slug(db: &PgPool, slug: &str) -> anyhow::Result<Option<News>> {
        let row = sqlx::query_as::<_, News>(&format!(
            "SELECT {COLUMNS} FROM news WHERE slug = $1 AND is_published"
        ))
        .bind(slug)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn list_all(db: &PgPool, limit: i64, offset: i64) -> anyhow::Result<Vec<News>> {
        let rows = sqlx::query_as::<_, News>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM news
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find(db: &PgPool, id: Uuid) -> anyhow::Result<Option<News>> {
        let row = sqlx::query_as::<_, News>(&format!(
            "SELECT {COLUMNS} FROM news WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    async fn slug_taken(db: &PgPool, slug: &str, exclude: Option<Uuid>) -> anyhow::Result<bool> {
        let taken: Option<i32> = sqlx::query_scalar(
            "SELECT 1 FROM news WHERE slug = $1 AND ($2::uuid IS NULL OR id <> $2)",
        )
        .bind(slug)
        .bind(exclude)
        .fetch_optional(db)
        .await?;
        Ok(taken.is_some())
    }

    /// First free slug derived from the title; appends `-1`, `-2`, … on
    /// collision. `exclude` lets an update keep its own slug.
    pub async fn unique_slug(
        db: &PgPool,
        title: &str,
        exclude: Option<Uuid>,
    ) -> anyhow::Result<String> {
        let base = slugify(title);
        for candidate in candidates(&base) {
            if !News::slug_taken(db, &candidate, exclude).await? {
                return Ok(candidate);
            }
        }
        unreachable!("candidate sequence is infinite")
    }

    pub async fn create(
        db: &PgPool,
        author_id: Uuid,
        fields: &NewsFields<'_>,
    ) -> anyhow::Result<News> {
        let row = sqlx::query_as::<_, News>(&format!(
            r#"
            INSERT INTO news
                (title, slug, summary, content, image_url, author_id, is_published, published_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(fields.title)
        .bind(fields.slug)
        .bind(fields.summary)
        .bind(fields.content)
        .bind(fields.image_url)
        .bind(author_id)
        .bind(fields.is_published)
        .bind(fields.published_at)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn update(
        db: &PgPool,
        id: Uuid,
        fields: &NewsFields<'_>,
    ) -> anyhow::Result<News> {
        let row = sqlx::query_as::<_, News>(&format!(
            r#"
            UPDATE news
            SET title = $2, slug = $3, summary = $4, content = $5, image_url = $6,
                is_published = $7, published_at = $8, updated_at = now()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(fields.title)
        .bind(fields.slug)
        .bind(fields.summary)
        .bind(fields.content)
        .bind(fields.image_url)
        .bind(fields.is_published)
        .bind(fields.published_at)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM news WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
