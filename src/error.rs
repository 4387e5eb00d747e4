use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

/// Error taxonomy shared by every handler. Each variant carries a stable
/// status classification; repos return these directly or via the sqlx
/// conversions below.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(&'static str),

    #[error("Forbidden")]
    Forbidden,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    InvalidOperation(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Recipe generation failed: {0}")]
    Generation(String),

    #[error(transparent)]
    Internal(anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::InvalidCredentials | AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InvalidOperation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Generation(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::RowNotFound => AppError::NotFound("Not found"),
            sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
                AppError::Conflict("Duplicate value for a unique field".into())
            }
            _ => AppError::Internal(e.into()),
        }
    }
}

// Repos wrap sqlx errors in anyhow; unwrap the interesting ones so unique
// violations and missing rows still classify correctly.
impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        if let Some(sqlx_err) = e.downcast_ref::<sqlx::Error>() {
            if matches!(sqlx_err, sqlx::Error::RowNotFound) {
                return AppError::NotFound("Not found");
            }
            if let sqlx::Error::Database(db) = sqlx_err {
                if db.code().as_deref() == Some("23505") {
                    return AppError::Conflict("Duplicate value for a unique field".into());
                }
            }
        }
        AppError::Internal(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::Internal(e) => {
                error!(error = %e, "internal error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification_is_stable() {
        assert_eq!(
            AppError::NotFound("Ingredient not found").status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(AppError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::Conflict("Email already registered".into()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::InvalidOperation("Cannot deactivate your own account".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Generation("timeout".into()).status(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn row_not_found_maps_to_not_found() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn anyhow_wrapped_sqlx_errors_still_classify() {
        let wrapped: anyhow::Error = sqlx::Error::RowNotFound.into();
        let err: AppError = wrapped.into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
