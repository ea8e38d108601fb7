// src/handlers/auth.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    response::Redirect,
};
use validator::Validate;

use crate::{
    config::Config,
    error::{AppError, ErrorBody},
    identity::IdentityProvider,
    models::user::{AuthCallbackParams, LoginResponse, UserProfile},
    store::IdentityStore,
    utils::jwt::{Owner, sign_access_token, sign_login_state, verify_login_state},
};

fn provider_or_500(
    provider: Option<Arc<dyn IdentityProvider>>,
) -> Result<Arc<dyn IdentityProvider>, AppError> {
    provider.ok_or_else(|| AppError::InternalServerError("OAuth is not configured".to_string()))
}

/// Starts a login by redirecting to the identity provider.
pub async fn login(
    State(provider): State<Option<Arc<dyn IdentityProvider>>>,
    State(config): State<Config>,
) -> Result<Redirect, AppError> {
    let provider = provider_or_500(provider)?;
    let state = sign_login_state(&config)?;
    Ok(Redirect::to(&provider.authorize_url(&state)?))
}

/// Completes a login and issues an access token.
///
/// Creates the local user on first sight of the provider subject.
pub async fn callback(
    State(provider): State<Option<Arc<dyn IdentityProvider>>>,
    State(identities): State<Arc<dyn IdentityStore>>,
    State(config): State<Config>,
    Query(params): Query<AuthCallbackParams>,
) -> Result<Json<LoginResponse>, AppError> {
    let provider = provider_or_500(provider)?;

    if let Err(validation_errors) = params.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let state = params
        .state
        .as_deref()
        .ok_or_else(|| AppError::AuthError("Missing login state".to_string()))?;
    verify_login_state(state, &config)?;

    let profile = provider.exchange(&params.code).await?;
    let user = identities.resolve(&profile).await?;
    let token = sign_access_token(user.id, &config)?;

    tracing::info!("User {} logged in", user.id);

    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer",
        user: user.into(),
    }))
}

/// The logged-in caller's profile.
#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = OK, body = UserProfile, description = "Current user"),
        (status = UNAUTHORIZED, body = ErrorBody, description = "Not logged in"),
    ),
    tag = "auth",
    security(
        ("token" = [])
    )
)]
pub async fn me(
    State(identities): State<Arc<dyn IdentityStore>>,
    Owner(owner_id): Owner,
) -> Result<Json<UserProfile>, AppError> {
    let id = owner_id.ok_or_else(|| AppError::AuthError("Login required".to_string()))?;

    let user = identities
        .find(id)
        .await?
        .ok_or_else(|| AppError::AuthError("User no longer exists".to_string()))?;

    Ok(Json(user.into()))
}
