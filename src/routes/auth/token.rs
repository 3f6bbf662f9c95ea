use super::error::AuthError;
use super::interfaces::AuthClaims;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

/// Issues a signed bearer token for the user.
pub fn create_token(
    user_id: i64,
    jwt_secret: &str,
    expiry_minutes: i64,
) -> Result<String, AuthError> {
    let exp = (Utc::now() + Duration::minutes(expiry_minutes)).timestamp();
    let claims = AuthClaims { sub: user_id, exp };
    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_ref()),
    )?)
}

pub fn decode_token(token: &str, jwt_secret: &str) -> Result<AuthClaims, AuthError> {
    decode::<AuthClaims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_ref()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AuthError::InvalidToken)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn token_roundtrip() {
        let token = create_token(42, "secret", 60).unwrap();
        let claims = decode_token(&token, "secret").unwrap();
        assert_eq!(claims.sub, 42);
    }

    #[test]
    fn token_rejects_wrong_secret() {
        let token = create_token(42, "secret", 60).unwrap();
        assert!(decode_token(&token, "other-secret").is_err());
    }
}
