use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
pub mod repo;
pub mod slug;

pub fn router() -> Router<AppState> {
    handlers::news_routes()
}
