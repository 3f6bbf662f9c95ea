use super::error::AuthError;
use super::hashing::verify_password;
use super::token::create_token;
use crate::database::stores::UserStore;
use crate::settings::AuthSettings;
use sqlx::SqlitePool;
use tracing::instrument;

/// Verifies credentials and issues a bearer token.
#[instrument(skip(pool, settings, password))]
pub async fn login(
    pool: &SqlitePool,
    settings: &AuthSettings,
    username: &str,
    password: &str,
) -> Result<String, AuthError> {
    let user = UserStore::find_by_username_with_password(pool, username)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if !verify_password(password.as_bytes(), &user.password)? {
        return Err(AuthError::InvalidCredentials);
    }

    create_token(user.id, &settings.jwt_secret, settings.token_expiry_minutes)
}
