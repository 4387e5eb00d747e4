use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    admin::dto::{Pagination, UpdateUserFlags},
    auth::extractors::AdminUser,
    auth::repo::{User, UserStats},
    error::AppError,
    state::AppState,
};

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(list_users))
        .route("/admin/users/stats", get(user_stats))
        .route(
            "/admin/users/:id",
            get(get_user).patch(update_user).delete(delete_user),
        )
}

/// Admins cannot deactivate or delete their own account; that would make an
/// admin-less deployment possible.
fn guard_self_mutation(
    admin_id: Uuid,
    target_id: Uuid,
    update: Option<&UpdateUserFlags>,
) -> Result<(), AppError> {
    if admin_id != target_id {
        return Ok(());
    }
    match update {
        // Delete path
        None => Err(AppError::InvalidOperation(
            "Cannot delete your own account".into(),
        )),
        Some(u) if u.is_active == Some(false) => Err(AppError::InvalidOperation(
            "Cannot deactivate your own account".into(),
        )),
        Some(_) => Ok(()),
    }
}

#[instrument(skip(state, admin), fields(admin_id = %admin.id))]
pub async fn list_users(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<User>>, AppError> {
    let users = User::list(&state.db, p.limit, p.offset).await?;
    Ok(Json(users))
}

#[instrument(skip(state, admin), fields(admin_id = %admin.id))]
pub async fn user_stats(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
) -> Result<Json<UserStats>, AppError> {
    let stats = UserStats::load(&state.db).await?;
    Ok(Json(stats))
}

#[instrument(skip(state, admin), fields(admin_id = %admin.id))]
pub async fn get_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("User not found"))?;
    Ok(Json(user))
}

#[instrument(skip(state, admin, payload), fields(admin_id = %admin.id))]
pub async fn update_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserFlags>,
) -> Result<Json<User>, AppError> {
    guard_self_mutation(admin.id, id, Some(&payload))?;

    let user = User::update_flags(&state.db, id, payload.is_active, payload.is_admin)
        .await?
        .ok_or(AppError::NotFound("User not found"))?;

    info!(user_id = %user.id, is_active = user.is_active, is_admin = user.is_admin,
          "user flags updated");
    Ok(Json(user))
}

#[instrument(skip(state, admin), fields(admin_id = %admin.id))]
pub async fn delete_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    guard_self_mutation(admin.id, id, None)?;

    if !User::delete(&state.db, id).await? {
        return Err(AppError::NotFound("User not found"));
    }

    warn!(user_id = %id, "user deleted by admin");
    Ok(Json(
        serde_json::json!({"message": "User deleted successfully"}),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_cannot_delete_self() {
        let id = Uuid::new_v4();
        let err = guard_self_mutation(id, id, None).unwrap_err();
        assert!(matches!(err, AppError::InvalidOperation(_)));
    }

    #[test]
    fn admin_cannot_deactivate_self() {
        let id = Uuid::new_v4();
        let update = UpdateUserFlags {
            is_active: Some(false),
            is_admin: None,
        };
        let err = guard_self_mutation(id, id, Some(&update)).unwrap_err();
        assert!(matches!(err, AppError::InvalidOperation(_)));
    }

    #[test]
    fn admin_may_change_own_admin_flag_or_keep_active() {
        let id = Uuid::new_v4();
        let update = UpdateUserFlags {
            is_active: Some(true),
            is_admin: Some(true),
        };
        assert!(guard_self_mutation(id, id, Some(&update)).is_ok());
    }

    #[test]
    fn other_users_are_unrestricted() {
        let update = UpdateUserFlags {
            is_active: Some(false),
            is_admin: None,
        };
        assert!(guard_self_mutation(Uuid::new_v4(), Uuid::new_v4(), Some(&update)).is_ok());
        assert!(guard_self_mutation(Uuid::new_v4(), Uuid::new_v4(), None).is_ok());
    }
}
