use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

const TOKEN_LEEWAY_SECS: u64 = 60;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // user id
    exp: usize,
    iat: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("token subject is not a user id: {0}")]
    InvalidSubject(String),
    #[error("token lifetime of {0}s overflows the expiry timestamp")]
    ExpiryOverflow(u64),
}

/// Issues a session token for `user_id` that expires `ttl_secs` from now.
pub fn generate_token(user_id: u32, secret: &str, ttl_secs: u64) -> Result<String, TokenError> {
    let now = Utc::now().timestamp().max(0) as u64;
    let exp = now
        .checked_add(ttl_secs)
        .and_then(|exp| usize::try_from(exp).ok())
        .ok_or(TokenError::ExpiryOverflow(ttl_secs))?;
    let iat = usize::try_from(now).map_err(|_| TokenError::ExpiryOverflow(ttl_secs))?;

    Ok(encode_claims(user_id, secret, iat, exp)?)
}

fn encode_claims(
    user_id: u32,
    secret: &str,
    iat: usize,
    exp: usize,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        sub: user_id.to_string(),
        exp,
        iat,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
}

/// Checks signature and expiry and returns the user id the token was issued for.
pub fn validate_token(token: &str, secret: &str) -> Result<u32, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = TOKEN_LEEWAY_SECS;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    )?;

    let sub = token_data.claims.sub;
    sub.parse::<u32>().map_err(|_| TokenError::InvalidSubject(sub))
}
