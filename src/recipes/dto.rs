use serde::Deserialize;
use serde_json::Value;

use crate::recipes::generate::GenerateIngredient;

/// Manual recipe creation, also used when a generated recipe is saved from
/// the frontend. Ingredient/instruction/tag lists arrive as JSON arrays and
/// are persisted serialized.
#[derive(Debug, Deserialize)]
pub struct CreateRecipe {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub ingredients: Value,
    pub instructions: Value,
    #[serde(default)]
    pub prep_time: i32,
    #[serde(default)]
    pub cook_time: i32,
    #[serde(default = "default_servings")]
    pub servings: i32,
    pub calories: Option<i32>,
    #[serde(default = "default_true")]
    pub is_healthy: bool,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    #[serde(default = "default_tags")]
    pub tags: Value,
}

fn default_servings() -> i32 {
    2
}
fn default_true() -> bool {
    true
}
fn default_difficulty() -> String {
    "Unknown".into()
}
fn default_tags() -> Value {
    Value::Array(vec![])
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub ingredients: Vec<GenerateIngredient>,
    pub preferences: Option<String>,
}

/// `?ingredients=tomato,onion` — comma-separated names for the matcher.
#[derive(Debug, Deserialize)]
pub struct MatchQuery {
    pub ingredients: String,
}

impl MatchQuery {
    pub fn names(&self) -> Vec<String> {
        self.ingredients
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_query_splits_and_trims() {
        let q = MatchQuery {
            ingredients: "tomato, onion ,,garlic".into(),
        };
        assert_eq!(q.names(), vec!["tomato", "onion", "garlic"]);
    }

    #[test]
    fn create_recipe_defaults() {
        let r: CreateRecipe = serde_json::from_str(
            r#"{"name": "Soup", "ingredients": ["tomato"], "instructions": ["Boil"]}"#,
        )
        .unwrap();
        assert_eq!(r.servings, 2);
        assert_eq!(r.difficulty, "Unknown");
        assert!(r.is_healthy);
        assert_eq!(r.tags, serde_json::json!([]));
    }
}
