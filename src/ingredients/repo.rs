use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::ingredients::dto::{CreateIngredient, UpdateIngredient};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ingredient {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub user_id: Uuid,
    pub name: String,
    pub category: String,
    pub location: String,
    pub quantity: f64,
    pub unit: String,
    pub expiry_date: Option<Date>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

const COLUMNS: &str =
    "id, user_id, name, category, location, quantity, unit, expiry_date, created_at, updated_at";

impl Ingredient {
    pub async fn list_by_user(
        db: &PgPool,
        user_id: Uuid,
        location: Option<&str>,
    ) -> anyhow::Result<Vec<Ingredient>> {
        let rows = sqlx::query_as::<_, Ingredient>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM ingredients
            WHERE user_id = $1 AND ($2::text IS NULL OR location = $2)
            ORDER BY created_at DESC
            "#
        ))
        .bind(user_id)
        .bind(location)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find(
        db: &PgPool,
        user_id: Uuid,
        id: Uuid,
    ) -> anyhow::Result<Option<Ingredient>> {
        let row = sqlx::query_as::<_, Ingredient>(&format!(
            "SELECT {COLUMNS} FROM ingredients WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn find_by_name(
        db: &PgPool,
        user_id: Uuid,
        name: &str,
    ) -> anyhow::Result<Option<Ingredient>> {
        let row = sqlx::query_as::<_, Ingredient>(&format!(
            "SELECT {COLUMNS} FROM ingredients WHERE name = $1 AND user_id = $2"
        ))
        .bind(name)
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        input: &CreateIngredient,
    ) -> anyhow::Result<Ingredient> {
        let row = sqlx::query_as::<_, Ingredient>(&format!(
            r#"
            INSERT INTO ingredients (user_id, name, category, location, quantity, unit, expiry_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(&input.name)
        .bind(&input.category)
        .bind(&input.location)
        .bind(input.quantity)
        .bind(&input.unit)
        .bind(input.expiry_date)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn update(
        db: &PgPool,
        user_id: Uuid,
        id: Uuid,
        input: &UpdateIngredient,
    ) -> anyhow::Result<Option<Ingredient>> {
        let row = sqlx::query_as::<_, Ingredient>(&format!(
            r#"
            UPDATE ingredients
            SET name = COALESCE($3, name),
                category = COALESCE($4, category),
                location = COALESCE($5, location),
                quantity = COALESCE($6, quantity),
                unit = COALESCE($7, unit),
                expiry_date = COALESCE($8, expiry_date),
                updated_at = now()
            WHERE id = $1 AND user_id = $2
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(user_id)
        .bind(&input.name)
        .bind(&input.category)
        .bind(&input.location)
        .bind(input.quantity)
        .bind(&input.unit)
        .bind(input.expiry_date)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM ingredients WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    pub async fn list_expiring(
        db: &PgPool,
        user_id: Uuid,
        days: i32,
    ) -> anyhow::Result<Vec<Ingredient>> {
        let rows = sqlx::query_as::<_, Ingredient>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM ingredients
            WHERE user_id = $1
              AND expiry_date IS NOT NULL
              AND expiry_date <= current_date + $2::int
            ORDER BY expiry_date ASC
            "#
        ))
        .bind(user_id)
        .bind(days)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}
