use serde_json::Value;

/// Parses a serialized recipe-ingredient list into plain names. The column
/// holds either bare strings or `{"name": …}` records; anything that does not
/// parse as a JSON array yields `None` so the caller can skip the row.
pub fn ingredient_names(raw: &str) -> Option<Vec<String>> {
    let value: Value = serde_json::from_str(raw).ok()?;
    let arr = value.as_array()?;
    let names = arr
        .iter()
        .map(|entry| match entry {
            Value::Object(map) => match map.get("name") {
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => Value::Object(map.clone()).to_string(),
            },
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect();
    Some(names)
}

/// Case-sensitive, order-independent set containment: every wanted name must
/// appear in the recipe's ingredient list.
pub fn contains_all(recipe_names: &[String], wanted: &[String]) -> bool {
    wanted
        .iter()
        .all(|w| recipe_names.iter().any(|n| n == w))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_records() {
        let raw = r#"[{"name": "tomato", "quantity": 2}, {"name": "onion"}]"#;
        let names = ingredient_names(raw).unwrap();
        assert_eq!(names, vec!["tomato", "onion"]);
    }

    #[test]
    fn parses_bare_strings() {
        let names = ingredient_names(r#"["tomato", "onion"]"#).unwrap();
        assert_eq!(names, vec!["tomato", "onion"]);
    }

    #[test]
    fn malformed_json_yields_none() {
        assert!(ingredient_names("not json at all").is_none());
        assert!(ingredient_names(r#"{"name": "tomato"}"#).is_none());
    }

    #[test]
    fn superset_matches_subset_query() {
        let recipe = vec!["tomato".to_string(), "onion".to_string()];
        assert!(contains_all(&recipe, &["tomato".to_string()]));
        assert!(contains_all(
            &recipe,
            &["onion".to_string(), "tomato".to_string()]
        ));
        assert!(!contains_all(
            &recipe,
            &["tomato".to_string(), "garlic".to_string()]
        ));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let recipe = vec!["Tomato".to_string()];
        assert!(!contains_all(&recipe, &["tomato".to_string()]));
    }

    #[test]
    fn empty_query_matches_everything() {
        let recipe = vec!["tomato".to_string()];
        assert!(contains_all(&recipe, &[]));
    }
}
