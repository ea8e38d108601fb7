// src/config.rs

use std::env;
use dotenvy::dotenv;

/// Signing secret used when `JWT_SECRET` is unset. Never deploy with it.
pub const DEV_JWT_SECRET: &str = "dev-secret-key-change-in-production";

#[derive(Debug, Clone)]
pub struct Config {
    /// Relational backend when set; the flat file backend otherwise.
    pub database_url: Option<String>,
    pub history_file: String,
    pub users_file: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub port: u16,
    pub public_url: String,
    pub google_client_id: Option<String>,
    pub google_client_secret: Option<String>,
    pub cors_origins: Vec<String>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = non_empty_var("DATABASE_URL");

        let history_file = env::var("HISTORY_FILE")
            .unwrap_or_else(|_| "history.json".to_string());

        let users_file = env::var("USERS_FILE")
            .unwrap_or_else(|_| "users.json".to_string());

        let jwt_secret = non_empty_var("JWT_SECRET")
            .unwrap_or_else(|| DEV_JWT_SECRET.to_string());

        let jwt_expiration = env::var("JWT_EXPIRATION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(86_400);

        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5000);

        let public_url = non_empty_var("PUBLIC_URL")
            .unwrap_or_else(|| format!("http://localhost:{}", port));

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| format!("http://localhost:{port},http://127.0.0.1:{port}"))
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        Self {
            database_url,
            history_file,
            users_file,
            jwt_secret,
            jwt_expiration,
            port,
            public_url,
            google_client_id: non_empty_var("GOOGLE_CLIENT_ID"),
            google_client_secret: non_empty_var("GOOGLE_CLIENT_SECRET"),
            cors_origins,
            rust_log,
        }
    }

    /// Redirect target registered with the identity provider.
    pub fn oauth_redirect_uri(&self) -> String {
        format!("{}/auth/callback", self.public_url.trim_end_matches('/'))
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
