use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Recipe {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    /// Serialized JSON list, either bare strings or `{"name": …}` records.
    pub ingredients: String,
    /// Serialized JSON list of steps.
    pub instructions: String,
    pub prep_time: i32,
    pub cook_time: i32,
    pub servings: i32,
    pub calories: Option<i32>,
    pub is_healthy: bool,
    pub difficulty: String,
    pub tags: String,
    pub created_at: OffsetDateTime,
}

const COLUMNS: &str = "id, user_id, name, description, ingredients, instructions, \
                       prep_time, cook_time, servings, calories, is_healthy, difficulty, \
                       tags, created_at";

pub struct NewRecipe {
    pub name: String,
    pub description: String,
    pub ingredients: String,
    pub instructions: String,
    pub prep_time: i32,
    pub cook_time: i32,
    pub servings: i32,
    pub calories: Option<i32>,
    pub is_healthy: bool,
    pub difficulty: String,
    pub tags: String,
}

impl Recipe {
    pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Recipe>> {
        let rows = sqlx::query_as::<_, Recipe>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM recipes
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<Option<Recipe>> {
        let row = sqlx::query_as::<_, Recipe>(&format!(
            "SELECT {COLUMNS} FROM recipes WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    /// The matcher scans every stored recipe, not just the caller's.
    pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<Recipe>> {
        let rows = sqlx::query_as::<_, Recipe>(&format!("SELECT {COLUMNS} FROM recipes"))
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    pub async fn create(db: &PgPool, user_id: Uuid, new: &NewRecipe) -> anyhow::Result<Recipe> {
        let row = sqlx::query_as::<_, Recipe>(&format!(
            r#"
            INSERT INTO recipes
                (user_id, name, description, ingredients, instructions, prep_time,
                 cook_time, servings, calories, is_healthy, difficulty, tags)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(&new.name)
        .bind(&new.description)
        .bind(&new.ingredients)
        .bind(&new.instructions)
        .bind(new.prep_time)
        .bind(new.cook_time)
        .bind(new.servings)
        .bind(new.calories)
        .bind(new.is_healthy)
        .bind(&new.difficulty)
        .bind(&new.tags)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM recipes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
