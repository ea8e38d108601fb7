// src/store/file.rs

use std::{
    io::ErrorKind,
    marker::PhantomData,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tokio::sync::Mutex;
use uuid::Uuid;
use validator::Validate;

use super::{HistoryStore, IdentityStore, newest_first};
use crate::{
    error::AppError,
    models::{
        session::Session,
        user::{ExternalProfile, User},
    },
};

/// A JSON array of records on disk.
///
/// Writes land in a temporary sibling first and are renamed into place, so a
/// failed write leaves the previous contents untouched.
struct JsonFile<T> {
    path: PathBuf,
    lock: Mutex<()>,
    _records: PhantomData<fn() -> T>,
}

impl<T: Serialize + DeserializeOwned> JsonFile<T> {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
            _records: PhantomData,
        }
    }

    async fn read(&self) -> Result<Vec<T>, AppError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            AppError::InternalServerError(format!("corrupt store file {}: {}", self.path.display(), e))
        })
    }

    async fn write(&self, records: &[T]) -> Result<(), AppError> {
        let bytes = serde_json::to_vec_pretty(records)
            .map_err(|e| AppError::InternalServerError(e.to_string()))?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Read-modify-write under the file's lock.
    async fn update<R>(&self, change: impl FnOnce(&mut Vec<T>) -> Result<R, AppError>) -> Result<R, AppError> {
        let _guard = self.lock.lock().await;
        let mut records = self.read().await?;
        let result = change(&mut records)?;
        self.write(&records).await?;
        Ok(result)
    }
}

/// Flat-file backend: one JSON file for sessions, one for users.
pub struct FileStore {
    sessions: JsonFile<Session>,
    users: JsonFile<User>,
}

impl FileStore {
    pub async fn open(history_file: impl AsRef<Path>, users_file: impl AsRef<Path>) -> Result<Self, AppError> {
        for path in [history_file.as_ref(), users_file.as_ref()] {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        Ok(Self {
            sessions: JsonFile::new(history_file.as_ref().to_path_buf()),
            users: JsonFile::new(users_file.as_ref().to_path_buf()),
        })
    }

    async fn find_by_subject(&self, subject: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .read()
            .await?
            .into_iter()
            .find(|u| u.provider_subject == subject))
    }
}

#[async_trait]
impl HistoryStore for FileStore {
    async fn append(&self, payload: Value, owner_id: Option<i64>) -> Result<Uuid, AppError> {
        let session = Session::new(payload, owner_id)?;
        let id = session.id;

        self.sessions
            .update(|sessions| {
                sessions.push(session);
                Ok(())
            })
            .await
            .inspect_err(|e| tracing::error!("Failed to append session {}: {}", id, e))?;

        Ok(id)
    }

    async fn list(&self, owner_id: Option<i64>) -> Result<Vec<Session>, AppError> {
        let sessions = self
            .sessions
            .read()
            .await?
            .into_iter()
            .filter(|s| s.owner_id == owner_id)
            .collect();
        Ok(newest_first(sessions))
    }

    async fn get(&self, id: Uuid, owner_id: Option<i64>) -> Result<Option<Session>, AppError> {
        Ok(self
            .sessions
            .read()
            .await?
            .into_iter()
            .find(|s| s.id == id && s.owner_id == owner_id))
    }
}

#[async_trait]
impl IdentityStore for FileStore {
    async fn resolve(&self, profile: &ExternalProfile) -> Result<User, AppError> {
        profile
            .validate()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        if let Some(user) = self.find_by_subject(&profile.sub).await? {
            return Ok(user);
        }

        // Re-checked under the lock: a concurrent first login may have won.
        self.users
            .update(|users| {
                if let Some(user) = users.iter().find(|u| u.provider_subject == profile.sub) {
                    return Ok(user.clone());
                }

                let user = User {
                    id: users.iter().map(|u| u.id).max().unwrap_or(0) + 1,
                    provider_subject: profile.sub.clone(),
                    email: profile.email.clone(),
                    name: profile.name.clone(),
                    picture: profile.picture.clone(),
                    created_at: Utc::now(),
                };
                tracing::info!("Created user {} for new login", user.id);
                users.push(user.clone());
                Ok(user)
            })
            .await
    }

    async fn find(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.users.read().await?.into_iter().find(|u| u.id == id))
    }
}
