use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, instrument};

use crate::config::GeminiConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateIngredient {
    pub name: String,
    pub quantity: String,
    pub unit: String,
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid JSON in generator response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{0}")]
    Service(String),
}

/// Seam for the external text generator; the HTTP-backed client below is the
/// production implementation, tests inject canned ones.
#[async_trait]
pub trait RecipeGenerator: Send + Sync {
    async fn generate(
        &self,
        ingredients: &[GenerateIngredient],
        preferences: Option<&str>,
    ) -> Result<Value, GenerationError>;
}

/// Deterministic prompt: the generator is told to use only the listed
/// ingredients and answer with strict JSON.
pub fn build_prompt(ingredients: &[GenerateIngredient], preferences: Option<&str>) -> String {
    let ing_list = ingredients
        .iter()
        .map(|i| format!("- {}: {} {}", i.name, i.quantity, i.unit))
        .collect::<Vec<_>>()
        .join("\n");
    let prefs = preferences
        .map(|p| format!("Preferences: {p}\n\n"))
        .unwrap_or_default();
    format!(
        "Create a recipe using ONLY these ingredients:\n{ing_list}\n\n{prefs}\
         Respond with ONLY valid JSON with fields:\n\
         name, description, ingredients, instructions, prep_time, cook_time, \
         servings, calories, difficulty, tags.\n"
    )
}

/// Drops a surrounding markdown code fence (```json … ```), if any.
pub fn strip_code_fence(text: &str) -> &str {
    let mut t = text.trim();
    if t.starts_with("```") {
        t = match t.find('\n') {
            Some(i) => &t[i + 1..],
            None => &t[3..],
        };
    }
    if t.ends_with("```") {
        t = &t[..t.len() - 3];
    }
    t.trim()
}

/// Extracts the leading integer of values like `"10 minutes"` or `25`,
/// defaulting to zero.
pub fn leading_int(value: Option<&Value>) -> i32 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .unwrap_or(0),
        Some(Value::String(s)) => s
            .split_whitespace()
            .next()
            .and_then(|tok| tok.parse::<i32>().ok())
            .unwrap_or(0),
        _ => 0,
    }
}

/// A usable generated recipe must carry non-empty ingredient and instruction
/// lists; everything else has defaults.
pub fn has_required_fields(recipe: &Value) -> bool {
    let non_empty_array = |key: &str| {
        recipe
            .get(key)
            .and_then(Value::as_array)
            .map(|a| !a.is_empty())
            .unwrap_or(false)
    };
    non_empty_array("ingredients") && non_empty_array("instructions")
}

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(cfg: &GeminiConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            api_key: cfg.api_key.clone(),
            model: cfg.model.clone(),
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl RecipeGenerator for GeminiClient {
    #[instrument(skip(self, ingredients, preferences))]
    async fn generate(
        &self,
        ingredients: &[GenerateIngredient],
        preferences: Option<&str>,
    ) -> Result<Value, GenerationError> {
        let prompt = build_prompt(ingredients, preferences);
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model
        );

        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let payload: Value = response.json().await?;
        let text = payload
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                error!("generator response carried no candidate text");
                GenerationError::Service("generator returned no text".into())
            })?;

        debug!(raw_len = text.len(), "generator responded");
        let recipe: Value = serde_json::from_str(strip_code_fence(text))?;
        Ok(recipe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredients() -> Vec<GenerateIngredient> {
        vec![
            GenerateIngredient {
                name: "tomato".into(),
                quantity: "2".into(),
                unit: "pcs".into(),
            },
            GenerateIngredient {
                name: "onion".into(),
                quantity: "1".into(),
                unit: "pcs".into(),
            },
        ]
    }

    #[test]
    fn prompt_is_deterministic_and_lists_ingredients() {
        let a = build_prompt(&ingredients(), Some("vegan"));
        let b = build_prompt(&ingredients(), Some("vegan"));
        assert_eq!(a, b);
        assert!(a.contains("- tomato: 2 pcs"));
        assert!(a.contains("- onion: 1 pcs"));
        assert!(a.contains("Preferences: vegan"));
        assert!(a.contains("ONLY valid JSON"));
    }

    #[test]
    fn prompt_without_preferences_omits_the_line() {
        let p = build_prompt(&ingredients(), None);
        assert!(!p.contains("Preferences:"));
    }

    #[test]
    fn strips_fenced_json() {
        let fenced = "```json\n{\"name\": \"x\"}\n```";
        assert_eq!(strip_code_fence(fenced), "{\"name\": \"x\"}");
    }

    #[test]
    fn strips_bare_fence() {
        let fenced = "```\n{}\n```";
        assert_eq!(strip_code_fence(fenced), "{}");
    }

    #[test]
    fn leaves_unfenced_text_alone() {
        assert_eq!(strip_code_fence("  {\"a\": 1}  "), "{\"a\": 1}");
    }

    #[test]
    fn leading_int_parses_prefixed_strings() {
        assert_eq!(leading_int(Some(&Value::String("10 minutes".into()))), 10);
        assert_eq!(leading_int(Some(&Value::String("fast".into()))), 0);
        assert_eq!(leading_int(Some(&serde_json::json!(25))), 25);
        assert_eq!(leading_int(None), 0);
    }

    #[test]
    fn leading_int_defaults_on_out_of_range_numbers() {
        assert_eq!(leading_int(Some(&serde_json::json!(i64::MAX))), 0);
        assert_eq!(leading_int(Some(&serde_json::json!(i64::MIN))), 0);
    }

    #[test]
    fn required_fields_check() {
        let good = serde_json::json!({
            "ingredients": [{"name": "tomato"}],
            "instructions": ["Chop"]
        });
        assert!(has_required_fields(&good));

        let empty = serde_json::json!({"ingredients": [], "instructions": ["Chop"]});
        assert!(!has_required_fields(&empty));

        let missing = serde_json::json!({"instructions": ["Chop"]});
        assert!(!has_required_fields(&missing));
    }
}
