use crate::database::DbError;
use crate::routes::auth::viewer::CapabilityError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use serde_json::json;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ImagesError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("internal error")]
    Internal(#[from] eyre::Report),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("authentication required")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),
}

fn log_error(error: &ImagesError) {
    match error {
        ImagesError::Database(e) => warn!("Database query failed: {}", e),
        ImagesError::Internal(e) => warn!("Internal error: {:?}", e),
        ImagesError::NotFound(what) => warn!("Images -> Not found: {}", what),
        ImagesError::Unauthorized => warn!("Images -> Write attempted without authentication"),
        ImagesError::Forbidden(why) => warn!("Images -> Forbidden: {}", why),
    }
}

// Response bodies are generic; the detail only reaches the log. A forbidden
// outcome stays a 403 and is never disguised as a 404.
impl IntoResponse for ImagesError {
    fn into_response(self) -> Response {
        log_error(&self);

        let (status, error_message) = match self {
            Self::Database(_) | Self::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "An internal error occurred.")
            }
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "Not found."),
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "Authentication required."),
            Self::Forbidden(_) => (StatusCode::FORBIDDEN, "Forbidden."),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<DbError> for ImagesError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Sqlx(sqlx::Error::RowNotFound) => Self::NotFound("row not found".into()),
            DbError::Sqlx(sql_err) => Self::Database(sql_err),
        }
    }
}

impl From<CapabilityError> for ImagesError {
    fn from(err: CapabilityError) -> Self {
        match err {
            CapabilityError::Unauthenticated => Self::Unauthorized,
            CapabilityError::MissingCapability(capability) => {
                Self::Forbidden(format!("missing capability {capability}"))
            }
        }
    }
}
