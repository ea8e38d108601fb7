// src/handlers/question.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    curriculum::Curriculum,
    error::{AppError, ErrorBody},
    models::question::{Question, StrandInfo},
};

/// Lists the strands the client can offer, in menu order.
#[utoipa::path(
    get,
    path = "/api/strands",
    responses(
        (status = OK, body = Vec<StrandInfo>, description = "Available strands"),
    ),
    tag = "questions"
)]
pub async fn list_strands(State(curriculum): State<Arc<Curriculum>>) -> Json<Vec<StrandInfo>> {
    Json(curriculum.strands().into_iter().map(|s| s.info()).collect())
}

/// Generates one fresh question for a strand.
///
/// Unknown strand keys are a client error; nothing is stored.
#[utoipa::path(
    get,
    path = "/api/get_question/{strand}",
    params(
        ("strand" = String, Path, description = "Strand key, e.g. `number` or `coding`"),
    ),
    responses(
        (status = OK, body = Question, description = "A generated question"),
        (status = BAD_REQUEST, body = ErrorBody, description = "Invalid strand"),
    ),
    tag = "questions"
)]
pub async fn get_question(
    State(curriculum): State<Arc<Curriculum>>,
    Path(strand): Path<String>,
) -> Result<Json<Question>, AppError> {
    let question = curriculum.generate(&strand);

    if question.is_unknown_strand() {
        tracing::warn!("Question requested for unknown strand '{}'", strand);
        return Err(AppError::BadRequest("Invalid strand".to_string()));
    }

    Ok(Json(question))
}
