use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Deserialize)]
pub struct CreatePage {
    pub page_key: String,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePage {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Reader-facing page document. Missing pages are synthesized so consumers
/// always get something renderable.
#[derive(Debug, Serialize)]
pub struct PagePublic {
    pub title: String,
    pub content: String,
    pub updated_at: Option<OffsetDateTime>,
}

impl PagePublic {
    pub fn placeholder(page_key: &str) -> Self {
        let mut chars = page_key.chars();
        let title = match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
            None => String::new(),
        };
        Self {
            title,
            content: format!("Content for {page_key} page is not available yet."),
            updated_at: None,
        }
    }
}

impl From<crate::pages::repo::PageContent> for PagePublic {
    fn from(p: crate::pages::repo::PageContent) -> Self {
        Self {
            title: p.title,
            content: p.content,
            updated_at: Some(p.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_capitalizes_the_key() {
        let p = PagePublic::placeholder("privacy");
        assert_eq!(p.title, "Privacy");
        assert_eq!(p.content, "Content for privacy page is not available yet.");
        assert!(p.updated_at.is_none());
    }

    #[test]
    fn placeholder_handles_empty_key() {
        let p = PagePublic::placeholder("");
        assert_eq!(p.title, "");
    }
}
