// src/store/sql.rs

use std::{str::FromStr, time::Duration};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{
    FromRow, SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    types::Json,
};
use uuid::Uuid;
use validator::Validate;

use super::{HistoryStore, IdentityStore};
use crate::{
    error::AppError,
    models::{
        session::Session,
        user::{ExternalProfile, User},
    },
};

const CONNECT_ATTEMPTS: u32 = 5;

/// Relational backend on SQLite.
pub struct SqlStore {
    pool: SqlitePool,
}

#[derive(FromRow)]
struct SessionRow {
    id: String,
    owner_id: Option<i64>,
    payload: Json<Value>,
    created_at: DateTime<Utc>,
}

impl TryFrom<SessionRow> for Session {
    type Error = AppError;

    fn try_from(row: SessionRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| AppError::InternalServerError(format!("bad session id {}: {}", row.id, e)))?;
        Ok(Session {
            id,
            owner_id: row.owner_id,
            payload: row.payload.0,
            created_at: row.created_at,
        })
    }
}

impl SqlStore {
    /// Connects with retry, then applies pending migrations.
    pub async fn connect(url: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        // Every connection to `:memory:` opens its own database.
        let pool_options = if url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let mut retry_count = 0;
        let pool = loop {
            match pool_options
                .clone()
                .acquire_timeout(Duration::from_secs(3))
                .connect_with(options.clone())
                .await
            {
                Ok(pool) => break pool,
                Err(e) => {
                    retry_count += 1;
                    if retry_count >= CONNECT_ATTEMPTS {
                        return Err(AppError::InternalServerError(format!(
                            "Failed to connect to database after {} attempts: {}",
                            CONNECT_ATTEMPTS, e
                        )));
                    }
                    tracing::warn!("Database not ready, retrying in 2s... (Attempt {})", retry_count);
                    tokio::time::sleep(Duration::from_secs(2)).await;
                }
            }
        };
        tracing::info!("Database connected...");

        Self::from_pool(pool).await
    }

    pub async fn from_pool(pool: SqlitePool) -> Result<Self, AppError> {
        tracing::info!("Running migrations...");
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Migrations applied successfully.");
        Ok(Self { pool })
    }
}

#[async_trait]
impl HistoryStore for SqlStore {
    async fn append(&self, payload: Value, owner_id: Option<i64>) -> Result<Uuid, AppError> {
        let session = Session::new(payload, owner_id)?;

        sqlx::query(
            "INSERT INTO sessions (id, owner_id, payload, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(session.id.to_string())
        .bind(session.owner_id)
        .bind(Json(&session.payload))
        .bind(session.created_at)
        .execute(&self.pool)
        .await?;

        Ok(session.id)
    }

    async fn list(&self, owner_id: Option<i64>) -> Result<Vec<Session>, AppError> {
        let rows = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT id, owner_id, payload, created_at
            FROM sessions
            WHERE owner_id IS $1
            ORDER BY created_at DESC, seq DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Session::try_from).collect()
    }

    async fn get(&self, id: Uuid, owner_id: Option<i64>) -> Result<Option<Session>, AppError> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT id, owner_id, payload, created_at
            FROM sessions
            WHERE id = $1 AND owner_id IS $2
            "#,
        )
        .bind(id.to_string())
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Session::try_from).transpose()
    }
}

#[async_trait]
impl IdentityStore for SqlStore {
    async fn resolve(&self, profile: &ExternalProfile) -> Result<User, AppError> {
        profile
            .validate()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO users (provider_subject, email, name, picture, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT(provider_subject) DO NOTHING
            "#,
        )
        .bind(&profile.sub)
        .bind(&profile.email)
        .bind(&profile.name)
        .bind(&profile.picture)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, provider_subject, email, name, picture, created_at
            FROM users
            WHERE provider_subject = $1
            "#,
        )
        .bind(&profile.sub)
        .fetch_one(&self.pool)
        .await?;

        if inserted.rows_affected() == 1 {
            tracing::info!("Created user {} for new login", user.id);
        }
        Ok(user)
    }

    async fn find(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, provider_subject, email, name, picture, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}
