// src/store/mod.rs

//! Persistence for completed sessions and local user identities.
//!
//! Two interchangeable backends implement the same traits: a flat JSON file
//! log ([`file::FileStore`]) and a relational store on SQLite
//! ([`sql::SqlStore`]). Handlers only ever see the trait objects.

pub mod file;
pub mod sql;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::{
    config::Config,
    error::AppError,
    models::{
        session::Session,
        user::{ExternalProfile, User},
    },
};

/// Append-only log of completed quiz sessions, partitioned by owner.
///
/// `owner_id == None` addresses the anonymous partition; no operation ever
/// crosses partitions.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Stamps id and creation time onto `payload`, persists it, returns the id.
    async fn append(&self, payload: Value, owner_id: Option<i64>) -> Result<Uuid, AppError>;

    /// Sessions of one partition, newest first.
    async fn list(&self, owner_id: Option<i64>) -> Result<Vec<Session>, AppError>;

    /// `Ok(None)` when the id is unknown or belongs to another partition.
    async fn get(&self, id: Uuid, owner_id: Option<i64>) -> Result<Option<Session>, AppError>;
}

/// Local users keyed by identity-provider subject.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Returns the user for `profile.sub`, creating it on first login.
    async fn resolve(&self, profile: &ExternalProfile) -> Result<User, AppError>;

    async fn find(&self, id: i64) -> Result<Option<User>, AppError>;
}

/// The backend pair selected at startup.
#[derive(Clone)]
pub struct Stores {
    pub history: Arc<dyn HistoryStore>,
    pub identities: Arc<dyn IdentityStore>,
}

impl Stores {
    /// Relational backend when `DATABASE_URL` is set, flat files otherwise.
    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        match &config.database_url {
            Some(url) => {
                let store = Arc::new(sql::SqlStore::connect(url).await?);
                tracing::info!("Using relational history store");
                Ok(Self::shared(store))
            }
            None => {
                let store = Arc::new(file::FileStore::open(&config.history_file, &config.users_file).await?);
                tracing::info!(
                    "Using file history store at {} (users at {})",
                    config.history_file,
                    config.users_file
                );
                Ok(Self::shared(store))
            }
        }
    }

    /// Both traits served by one backend instance.
    pub fn shared<S>(store: Arc<S>) -> Self
    where
        S: HistoryStore + IdentityStore + 'static,
    {
        Self {
            history: store.clone(),
            identities: store,
        }
    }
}

/// Newest first; among equal timestamps the later append wins.
pub(crate) fn newest_first(mut sessions: Vec<Session>) -> Vec<Session> {
    sessions.reverse();
    sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sessions
}
