//! JWT encoding of session tokens and OAuth state

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::{error, warn};
use uuid::Uuid;

use super::models::{StateClaims, Token, TokenClaims};
use crate::common::ApiError;

/// Lifetime of the OAuth state cookie
pub const STATE_MAX_AGE_SECS: i64 = 10 * 60;

/// Signs `token` with a fresh expiry of `max_age` from now
pub fn encode_token(
    token: &Token,
    secret: &str,
    max_age: std::time::Duration,
) -> Result<(String, DateTime<Utc>), ApiError> {
    let now = Utc::now();
    let max_age = Duration::from_std(max_age)
        .map_err(|_| ApiError::InternalServer("session max age out of range".to_string()))?;
    let expires = now + max_age;

    let claims = TokenClaims {
        token: token.clone(),
        iat: now.timestamp(),
        exp: expires.timestamp(),
        jti: Uuid::new_v4().to_string(),
    };

    let encoded = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| {
        error!(error = %e, "JWT encoding error while issuing session token");
        ApiError::InternalServer("jwt error".to_string())
    })?;

    Ok((encoded, expires))
}

/// Verifies signature and expiry of a session token
pub fn decode_token(raw: &str, secret: &str) -> Result<TokenClaims, ApiError> {
    let data = decode::<TokenClaims>(
        raw,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|e| {
        warn!(error = %e, "Session token validation failed");
        ApiError::Unauthorized("invalid session token".to_string())
    })?;

    Ok(data.claims)
}

/// Expiry of decoded claims as a timestamp
pub fn expires_at(claims: &TokenClaims) -> DateTime<Utc> {
    Utc.timestamp_opt(claims.exp, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

pub fn encode_state(nonce: &str, callback_url: &str, secret: &str) -> Result<String, ApiError> {
    let claims = StateClaims {
        nonce: nonce.to_string(),
        callback_url: callback_url.to_string(),
        exp: (Utc::now() + Duration::seconds(STATE_MAX_AGE_SECS)).timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| {
        error!(error = %e, "JWT encoding error while issuing OAuth state");
        ApiError::InternalServer("jwt error".to_string())
    })
}

pub fn decode_state(raw: &str, secret: &str) -> Result<StateClaims, ApiError> {
    decode::<StateClaims>(
        raw,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        warn!(error = %e, "OAuth state validation failed");
        ApiError::Unauthorized("invalid oauth state".to_string())
    })
}
