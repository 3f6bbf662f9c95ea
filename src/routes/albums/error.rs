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
pub enum AlbumsError {
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

    #[error("Bad Request: {0}")]
    BadRequest(String),
}

fn log_error(error: &AlbumsError) {
    match error {
        AlbumsError::Database(e) => warn!("Database query failed: {}", e),
        AlbumsError::Internal(e) => warn!("Internal error: {:?}", e),
        AlbumsError::NotFound(what) => warn!("Albums -> Not found: {}", what),
        AlbumsError::Unauthorized => warn!("Albums -> Write attempted without authentication"),
        AlbumsError::Forbidden(why) => warn!("Albums -> Forbidden: {}", why),
        AlbumsError::BadRequest(message) => warn!("Albums -> Bad request: {}", message),
    }
}

// The response bodies stay generic on purpose: not-found and forbidden carry
// no detail about what exists or why access failed. The specifics go to the
// log only.
impl IntoResponse for AlbumsError {
    fn into_response(self) -> Response {
        log_error(&self);

        let (status, error_message) = match self {
            Self::Database(_) | Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal error occurred.".to_string(),
            ),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "Not found.".to_string()),
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Authentication required.".to_string(),
            ),
            Self::Forbidden(_) => (StatusCode::FORBIDDEN, "Forbidden.".to_string()),
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<DbError> for AlbumsError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Sqlx(sqlx::Error::RowNotFound) => Self::NotFound("row not found".into()),
            DbError::Sqlx(sql_err) => Self::Database(sql_err),
        }
    }
}

impl From<CapabilityError> for AlbumsError {
    fn from(err: CapabilityError) -> Self {
        match err {
            CapabilityError::Unauthenticated => Self::Unauthorized,
            CapabilityError::MissingCapability(capability) => {
                Self::Forbidden(format!("missing capability {capability}"))
            }
        }
    }
}
