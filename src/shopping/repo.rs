use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShoppingList {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub user_id: Uuid,
    pub name: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShoppingItem {
    pub id: Uuid,
    pub shopping_list_id: Uuid,
    pub item_name: String,
    pub quantity: f64,
    pub unit: String,
    pub is_purchased: bool,
}

impl ShoppingList {
    pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<ShoppingList>> {
        let rows = sqlx::query_as::<_, ShoppingList>(
            r#"
            SELECT id, user_id, name, created_at
            FROM shopping_lists
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn find(
        db: &PgPool,
        user_id: Uuid,
        id: Uuid,
    ) -> anyhow::Result<Option<ShoppingList>> {
        let row = sqlx::query_as::<_, ShoppingList>(
            r#"
            SELECT id, user_id, name, created_at
            FROM shopping_lists
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn create(db: &PgPool, user_id: Uuid, name: &str) -> anyhow::Result<ShoppingList> {
        let row = sqlx::query_as::<_, ShoppingList>(
            r#"
            INSERT INTO shopping_lists (user_id, name)
            VALUES ($1, $2)
            RETURNING id, user_id, name, created_at
            "#,
        )
        .bind(user_id)
        .bind(name)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    /// Items cascade on the foreign key.
    pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM shopping_lists WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}

impl ShoppingItem {
    pub async fn list_for(db: &PgPool, list_id: Uuid) -> anyhow::Result<Vec<ShoppingItem>> {
        let rows = sqlx::query_as::<_, ShoppingItem>(
            r#"
            SELECT id, shopping_list_id, item_name, quantity, unit, is_purchased
            FROM shopping_items
            WHERE shopping_list_id = $1
            "#,
        )
        .bind(list_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn create(
        db: &PgPool,
        list_id: Uuid,
        item_name: &str,
        quantity: f64,
        unit: &str,
        is_purchased: bool,
    ) -> anyhow::Result<ShoppingItem> {
        let row = sqlx::query_as::<_, ShoppingItem>(
            r#"
            INSERT INTO shopping_items (shopping_list_id, item_name, quantity, unit, is_purchased)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, shopping_list_id, item_name, quantity, unit, is_purchased
            "#,
        )
        .bind(list_id)
        .bind(item_name)
        .bind(quantity)
        .bind(unit)
        .bind(is_purchased)
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    /// Ownership is re-checked through the parent list.
    pub async fn set_purchased(
        db: &PgPool,
        user_id: Uuid,
        item_id: Uuid,
        is_purchased: bool,
    ) -> anyhow::Result<Option<ShoppingItem>> {
        let row = sqlx::query_as::<_, ShoppingItem>(
            r#"
            UPDATE shopping_items i
            SET is_purchased = $3
            FROM shopping_lists l
            WHERE i.id = $1 AND i.shopping_list_id = l.id AND l.user_id = $2
            RETURNING i.id, i.shopping_list_id, i.item_name, i.quantity, i.unit, i.is_purchased
            "#,
        )
        .bind(item_id)
        .bind(user_id)
        .bind(is_purchased)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    /// Ownership is re-checked through the parent list.
    pub async fn delete(db: &PgPool, user_id: Uuid, item_id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            DELETE FROM shopping_items i
            USING shopping_lists l
            WHERE i.id = $1 AND i.shopping_list_id = l.id AND l.user_id = $2
            "#,
        )
        .bind(item_id)
        .bind(user_id)
        .execute(db)
        .await?;
        Ok(res.rows_affected() > 0)
    }
}
