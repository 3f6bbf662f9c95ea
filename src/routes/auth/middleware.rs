use super::error::AuthError;
use super::token::decode_token;
use super::viewer::Viewer;
use crate::database::stores::UserStore;
use crate::database::tables::User;
use crate::state::ApiContext;
use axum::extract::{FromRequestParts, State};
use axum::http::header;
use axum::http::request::Parts;
use color_eyre::eyre::eyre;

pub async fn extract_context<S>(parts: &mut Parts, state: &S) -> Result<ApiContext, AuthError>
where
    S: Send + Sync,
    State<ApiContext>: FromRequestParts<S>,
{
    match State::<ApiContext>::from_request_parts(parts, state).await {
        Ok(State(context)) => Ok(context),
        Err(_e) => Err(AuthError::Internal(eyre!(
            "Server state is not configured correctly."
        ))),
    }
}

/// Derives the viewer for a request. No Authorization header means an
/// anonymous viewer; a present but invalid token is rejected outright.
impl<S> FromRequestParts<S> for Viewer
where
    S: Send + Sync,
    State<ApiContext>: FromRequestParts<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = match parts.headers.get(header::AUTHORIZATION) {
            None => return Ok(Self::anonymous()),
            Some(value) => value
                .to_str()
                .ok()
                .and_then(|v| v.strip_prefix("Bearer "))
                .map(ToOwned::to_owned)
                .ok_or(AuthError::InvalidToken)?,
        };

        let context = extract_context(parts, state).await?;
        let claims = decode_token(&token, &context.settings.auth.jwt_secret)?;
        let user = UserStore::find_by_id(&context.pool, claims.sub)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        let capabilities = UserStore::capabilities(&context.pool, user.id).await?;

        Ok(Self::authenticated(user, capabilities))
    }
}

/// Extractor for endpoints that require an authenticated user.
#[derive(Clone, Debug)]
pub struct ApiUser(pub User);

impl<S> FromRequestParts<S> for ApiUser
where
    S: Send + Sync,
    State<ApiContext>: FromRequestParts<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let viewer = Viewer::from_request_parts(parts, state).await?;
        let user = viewer.user().cloned().ok_or(AuthError::MissingToken)?;
        Ok(Self(user))
    }
}
