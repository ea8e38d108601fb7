// src/identity.rs

//! External identity provider (OpenID Connect authorization-code flow).

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::{config::Config, error::AppError, models::user::ExternalProfile};

const GOOGLE_AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Where to send the browser to start a login. `state` comes back on the callback.
    fn authorize_url(&self, state: &str) -> Result<String, AppError>;

    /// Trades the callback's authorization code for the user's profile.
    async fn exchange(&self, code: &str) -> Result<ExternalProfile, AppError>;
}

pub struct GoogleProvider {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl GoogleProvider {
    /// `None` unless both client credentials are configured.
    pub fn from_config(config: &Config) -> Option<Self> {
        let (client_id, client_secret) = match (&config.google_client_id, &config.google_client_secret) {
            (Some(id), Some(secret)) => (id.clone(), secret.clone()),
            _ => return None,
        };

        Some(Self {
            http: reqwest::Client::new(),
            client_id,
            client_secret,
            redirect_uri: config.oauth_redirect_uri(),
        })
    }
}

#[async_trait]
impl IdentityProvider for GoogleProvider {
    fn authorize_url(&self, state: &str) -> Result<String, AppError> {
        let url = Url::parse_with_params(
            GOOGLE_AUTHORIZE_URL,
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", "openid email profile"),
                ("state", state),
            ],
        )
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
        Ok(url.into())
    }

    async fn exchange(&self, code: &str) -> Result<ExternalProfile, AppError> {
        let token: TokenResponse = self
            .http
            .post(GOOGLE_TOKEN_URL)
            .form(&[
                ("code", code),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await?
            .error_for_status()
            .map_err(|e| {
                tracing::warn!("Authorization code rejected: {}", e);
                AppError::AuthError("Login failed".to_string())
            })?
            .json()
            .await?;

        let profile = self
            .http
            .get(GOOGLE_USERINFO_URL)
            .bearer_auth(&token.access_token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> GoogleProvider {
        GoogleProvider {
            http: reqwest::Client::new(),
            client_id: "client-123".to_string(),
            client_secret: "shh".to_string(),
            redirect_uri: "http://localhost:5000/auth/callback".to_string(),
        }
    }

    #[test]
    fn authorize_url_carries_client_and_state() {
        let url = Url::parse(&provider().authorize_url("xyz").unwrap()).unwrap();
        assert_eq!(url.host_str(), Some("accounts.google.com"));

        let params: std::collections::HashMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(params["client_id"], "client-123");
        assert_eq!(params["redirect_uri"], "http://localhost:5000/auth/callback");
        assert_eq!(params["response_type"], "code");
        assert_eq!(params["state"], "xyz");
        assert!(params["scope"].contains("email"));
        assert!(!params.contains_key("client_secret"));
    }
}
