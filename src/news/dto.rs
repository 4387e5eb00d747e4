use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateNews {
    pub title: String,
    pub summary: Option<String>,
    pub content: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_published: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateNews {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub is_published: Option<bool>,
}

/// Reader-facing article shape, without authoring metadata.
#[derive(Debug, Serialize)]
pub struct NewsPublic {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub summary: Option<String>,
    pub content: String,
    pub image_url: Option<String>,
    pub published_at: Option<OffsetDateTime>,
}

impl From<crate::news::repo::News> for NewsPublic {
    fn from(n: crate::news::repo::News) -> Self {
        Self {
            id: n.id,
            title: n.title,
            slug: n.slug,
            summary: n.summary,
            content: n.content,
            image_url: n.image_url,
            published_at: n.published_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}
fn default_limit() -> i64 {
    20
}
