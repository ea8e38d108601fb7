// src/utils/jwt.rs

use std::{
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use axum::{
    body::Body,
    extract::{FromRef, FromRequestParts, State},
    http::{Request, header, request::Parts},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{config::Config, error::AppError, store::IdentityStore};

/// Lifetime of the `state` token round-tripped through the login redirect.
const LOGIN_STATE_TTL: u64 = 600;

/// What a token may be used for.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Bearer credential for API requests; `sub` is the local user id.
    Access,
    /// CSRF guard for the login redirect; `sub` is a random nonce.
    LoginState,
}

/// JWT Claims structure.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub kind: TokenKind,
    /// Expiration time as Unix timestamp.
    pub exp: usize,
}

pub fn sign_jwt(sub: &str, kind: TokenKind, secret: &str, expiration_seconds: u64) -> Result<String, AppError> {
    let expiration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .as_secs() as usize
        + expiration_seconds as usize;

    let claims = Claims {
        sub: sub.to_owned(),
        kind,
        exp: expiration,
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?)
}

/// Verifies signature and expiry. Any failure is a 401.
pub fn verify_jwt(token: &str, secret: &str) -> Result<Claims, AppError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::AuthError("Invalid token".to_string()))?;

    Ok(token_data.claims)
}

pub fn sign_access_token(user_id: i64, config: &Config) -> Result<String, AppError> {
    sign_jwt(&user_id.to_string(), TokenKind::Access, &config.jwt_secret, config.jwt_expiration)
}

pub fn sign_login_state(config: &Config) -> Result<String, AppError> {
    sign_jwt(
        &Uuid::new_v4().to_string(),
        TokenKind::LoginState,
        &config.jwt_secret,
        LOGIN_STATE_TTL,
    )
}

pub fn verify_login_state(state: &str, config: &Config) -> Result<(), AppError> {
    match verify_jwt(state, &config.jwt_secret)?.kind {
        TokenKind::LoginState => Ok(()),
        TokenKind::Access => Err(AppError::AuthError("Invalid login state".to_string())),
    }
}

/// Axum Middleware: optional authentication.
///
/// No `Authorization` header means an anonymous request and passes through.
/// A valid access token injects `Claims` into the request extensions.
/// Anything else presented as a credential is rejected with 401.
pub async fn optional_auth_middleware(
    State(config): State<Config>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let Some(value) = req.headers().get(header::AUTHORIZATION) else {
        return Ok(next.run(req).await);
    };

    let token = value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::AuthError("Invalid token".to_string()))?;

    let claims = verify_jwt(token.trim(), &config.jwt_secret)?;
    if claims.kind != TokenKind::Access {
        return Err(AppError::AuthError("Invalid token".to_string()));
    }

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Partition key of the caller: the local user id, or `None` when anonymous.
///
/// A token whose user is unknown to the identity store is rejected with 401,
/// so a stale credential never reaches the history store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Owner(pub Option<i64>);

impl<S> FromRequestParts<S> for Owner
where
    Arc<dyn IdentityStore>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(claims) = parts.extensions.get::<Claims>() else {
            return Ok(Owner(None));
        };

        let id: i64 = claims
            .sub
            .parse()
            .map_err(|_| AppError::AuthError("Invalid token".to_string()))?;

        let identities = Arc::<dyn IdentityStore>::from_ref(state);
        if identities.find(id).await?.is_none() {
            tracing::warn!("Rejected token for unknown user {}", id);
            return Err(AppError::AuthError("User no longer exists".to_string()));
        }

        Ok(Owner(Some(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn round_trips_an_access_token() {
        let token = sign_jwt("42", TokenKind::Access, SECRET, 60).unwrap();
        let claims = verify_jwt(&token, SECRET).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.kind, TokenKind::Access);
    }

    #[test]
    fn rejects_a_token_signed_with_another_secret() {
        let token = sign_jwt("42", TokenKind::Access, "other", 60).unwrap();
        assert!(matches!(verify_jwt(&token, SECRET), Err(AppError::AuthError(_))));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(verify_jwt("not.a.jwt", SECRET), Err(AppError::AuthError(_))));
    }
}
