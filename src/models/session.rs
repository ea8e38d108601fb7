// src/models/session.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppError;

/// One completed quiz run. Written once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,

    /// Local user id; `None` is the anonymous partition.
    pub owner_id: Option<i64>,

    /// Whatever the client recorded, with `id` injected.
    pub payload: Value,

    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Stamps a fresh id and creation time onto a client payload.
    ///
    /// The payload must be a JSON object; its `id` key, if any, is overwritten.
    pub fn new(payload: Value, owner_id: Option<i64>) -> Result<Self, AppError> {
        let Value::Object(mut fields) = payload else {
            return Err(AppError::BadRequest(
                "Session payload must be a JSON object".to_string(),
            ));
        };

        let id = Uuid::new_v4();
        fields.insert("id".to_string(), Value::String(id.to_string()));

        Ok(Self {
            id,
            owner_id,
            payload: Value::Object(fields),
            created_at: Utc::now(),
        })
    }
}

/// Acknowledgement returned by `POST /api/save_session`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SaveSessionResponse {
    pub status: String,
    pub id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn injects_a_fresh_id() {
        let session = Session::new(json!({"foo": "bar"}), None).unwrap();
        assert_eq!(
            session.payload,
            json!({"foo": "bar", "id": session.id.to_string()})
        );
        assert_eq!(session.owner_id, None);
    }

    #[test]
    fn overwrites_a_client_supplied_id() {
        let session = Session::new(json!({"id": "mine", "score": 3}), Some(7)).unwrap();
        assert_ne!(session.payload["id"], "mine");
        assert_eq!(session.payload["id"], session.id.to_string());
        assert_eq!(session.payload["score"], 3);
    }

    #[test]
    fn rejects_non_objects() {
        assert!(matches!(
            Session::new(json!([1, 2, 3]), None),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            Session::new(json!("text"), None),
            Err(AppError::BadRequest(_))
        ));
    }
}
