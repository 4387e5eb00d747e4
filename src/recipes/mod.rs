use crate::state::AppState;
use axum::Router;

mod dto;
pub mod generate;
pub mod handlers;
pub mod matcher;
pub mod repo;

pub fn router() -> Router<AppState> {
    handlers::recipe_routes()
}
