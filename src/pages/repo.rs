use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PageContent {
    pub id: Uuid,
    pub page_key: String,
    pub title: String,
    pub content: String,
    pub updated_by_id: Option<Uuid>,
    pub updated_at: OffsetDateTime,
}

const COLUMNS: &str = "id, page_key, title, content, updated_by_id, updated_at";

impl PageContent {
    pub async fn find_by_key(db: &PgPool, page_key: &str) -> anyhow::Result<Option<PageContent>> {
        let row = sqlx::query_as::<_, PageContent>(&format!(
            "SELECT {COLUMNS} FROM page_content WHERE page_key = $1"
        ))
        .bind(page_key)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn list(db: &PgPool) -> anyhow::Result<Vec<PageContent>> {
        let rows = sqlx::query_as::<_, PageContent>(&format!(
            "SELECT {COLUMNS} FROM page_content ORDER BY page_key"
        ))
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn create(
        db: &PgPool,
        page_key: &str,
        title: &str,
        content: &str,
        updated_by: Uuid,
    ) -> anyhow::Result<PageContent> {
        let row = sqlx::query_as::<_, PageContent>(&format!(
            r#"
            INSERT INTO page_content (page_key, title, content, updated_by_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(page_key)
        .bind(title)
        .bind(content)
        .bind(updated_by)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn update(
        db: &PgPool,
        page_key: &str,
        title: Option<&str>,
        content: Option<&str>,
        updated_by: Uuid,
    ) -> anyhow::Result<Option<PageContent>> {
        let row = sqlx::query_as::<_, PageContent>(&format!(
            r#"
            UPDATE page_content
            SET title = COALESCE($2, title),
                content = COALESCE($3, content),
                updated_by_id = $4,
                updated_at = now()
            WHERE page_key = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(page_key)
        .bind(title)
        .bind(content)
        .bind(updated_by)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn delete(db: &PgPool, page_key: &str) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM page_content WHERE page_key = $1")
            .bind(page_key)
            .execute(db)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
