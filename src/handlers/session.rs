// src/handlers/session.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    error::{AppError, ErrorBody},
    models::session::SaveSessionResponse,
    store::HistoryStore,
    utils::jwt::Owner,
};

/// Records a completed session in the caller's partition.
///
/// Any JSON object is accepted; the server stamps `id` onto it.
#[utoipa::path(
    post,
    path = "/api/save_session",
    request_body(content = Object, description = "Client-defined session record"),
    responses(
        (status = OK, body = SaveSessionResponse, description = "Session stored"),
        (status = BAD_REQUEST, body = ErrorBody, description = "Body is not a JSON object"),
        (status = UNAUTHORIZED, body = ErrorBody, description = "Invalid bearer token"),
    ),
    tag = "history"
)]
pub async fn save_session(
    State(history): State<Arc<dyn HistoryStore>>,
    Owner(owner_id): Owner,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SaveSessionResponse>, AppError> {
    let Json(payload) = payload?;

    let id = history.append(payload, owner_id).await?;
    tracing::info!("Saved session {} (owner: {:?})", id, owner_id);

    Ok(Json(SaveSessionResponse {
        status: "success".to_string(),
        id,
    }))
}

/// Lists the caller's sessions, newest first.
#[utoipa::path(
    get,
    path = "/api/history",
    responses(
        (status = OK, body = Vec<Object>, description = "Stored session records"),
        (status = UNAUTHORIZED, body = ErrorBody, description = "Invalid bearer token"),
    ),
    tag = "history"
)]
pub async fn list_sessions(
    State(history): State<Arc<dyn HistoryStore>>,
    Owner(owner_id): Owner,
) -> Result<Json<Vec<Value>>, AppError> {
    let sessions = history.list(owner_id).await?;
    Ok(Json(sessions.into_iter().map(|s| s.payload).collect()))
}

/// Fetches one session from the caller's partition.
#[utoipa::path(
    get,
    path = "/api/history/{id}",
    params(
        ("id" = String, Path, description = "Session id returned by save_session"),
    ),
    responses(
        (status = OK, body = Object, description = "The stored session record"),
        (status = NOT_FOUND, body = ErrorBody, description = "Session not found"),
    ),
    tag = "history"
)]
pub async fn get_session(
    State(history): State<Arc<dyn HistoryStore>>,
    Owner(owner_id): Owner,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let not_found = || AppError::NotFound("Session not found".to_string());

    let id = Uuid::parse_str(&id).map_err(|_| not_found())?;
    let session = history.get(id, owner_id).await?.ok_or_else(not_found)?;

    Ok(Json(session.payload))
}
