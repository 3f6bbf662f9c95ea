use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JWT payload: user id and expiry.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthClaims {
    pub sub: i64,
    pub exp: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token: String,
}
