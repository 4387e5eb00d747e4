use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::shopping::repo::ShoppingItem;

#[derive(Debug, Deserialize)]
pub struct CreateShoppingList {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateShoppingItem {
    pub item_name: String,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    pub unit: String,
    #[serde(default)]
    pub is_purchased: bool,
}

fn default_quantity() -> f64 {
    1.0
}

#[derive(Debug, Deserialize)]
pub struct UpdateShoppingItem {
    pub is_purchased: bool,
}

/// List detail including its items.
#[derive(Debug, Serialize)]
pub struct ShoppingListDetails {
    pub id: Uuid,
    pub name: String,
    pub created_at: OffsetDateTime,
    pub items: Vec<ShoppingItem>,
}
