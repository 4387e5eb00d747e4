use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use crate::auth::jwt::{JwtKeys, TokenKind};
use crate::auth::repo::User;
use crate::error::AppError;
use crate::state::AppState;

/// Extracts the bearer token, validates it and loads the caller's user row.
/// Inactive accounts are rejected.
pub struct AuthUser(pub User);

/// Same as [`AuthUser`] but additionally requires the admin flag.
pub struct AdminUser(pub User);

async fn resolve_user(parts: &mut Parts, state: &AppState) -> Result<User, AppError> {
    let keys = JwtKeys::from_ref(state);

    let auth_header = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized("Missing Authorization header"))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .or_else(|| auth_header.strip_prefix("bearer "))
        .ok_or(AppError::Unauthorized("Invalid Authorization header"))?;

    let claims = match keys.verify(token) {
        Ok(c) => c,
        Err(_) => {
            warn!("invalid or expired token");
            return Err(AppError::Unauthorized("Invalid or expired token"));
        }
    };

    if claims.kind != TokenKind::Access {
        return Err(AppError::Unauthorized("Access token required"));
    }

    let user = User::find_by_id(&state.db, claims.sub)
        .await?
        .ok_or(AppError::Unauthorized("User not found"))?;

    if !user.is_active {
        warn!(user_id = %user.id, "inactive user rejected");
        return Err(AppError::Forbidden);
    }

    Ok(user)
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        resolve_user(parts, state).await.map(AuthUser)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = resolve_user(parts, state).await?;
        if !user.is_admin {
            warn!(user_id = %user.id, "non-admin caller on admin route");
            return Err(AppError::Forbidden);
        }
        Ok(AdminUser(user))
    }
}
