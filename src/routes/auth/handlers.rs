use super::error::AuthError;
use super::interfaces::{LoginRequest, TokenResponse};
use super::middleware::ApiUser;
use super::service;
use crate::database::tables::User;
use crate::state::ApiContext;
use axum::Json;
use axum::extract::State;

/// Exchange username and password for a bearer token.
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued.", body = TokenResponse),
        (status = 401, description = "Invalid username or password."),
    )
)]
pub async fn login(
    State(context): State<ApiContext>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AuthError> {
    let token = service::login(
        &context.pool,
        &context.settings.auth,
        &payload.username,
        &payload.password,
    )
    .await?;
    Ok(Json(TokenResponse { token }))
}

/// The currently authenticated user.
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "The authenticated user.", body = User),
        (status = 401, description = "Authentication failed."),
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_me(ApiUser(user): ApiUser) -> Json<User> {
    Json(user)
}
