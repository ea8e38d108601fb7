// src/docs.rs

use axum::Json;
use utoipa::{
    Modify, OpenApi,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};

use crate::{
    error::ErrorBody,
    handlers,
    models::{
        question::{AnswerValue, Question, StrandInfo},
        session::SaveSessionResponse,
        user::UserProfile,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::question::list_strands,
        handlers::question::get_question,
        handlers::session::save_session,
        handlers::session::list_sessions,
        handlers::session::get_session,
        handlers::auth::me,
    ),
    components(schemas(AnswerValue, Question, StrandInfo, SaveSessionResponse, UserProfile, ErrorBody)),
    modifiers(&BearerToken),
    tags(
        (name = "questions", description = "Generated practice questions"),
        (name = "history", description = "Completed quiz sessions"),
        (name = "auth", description = "Logged-in user"),
    )
)]
pub struct ApiDoc;

struct BearerToken;

impl Modify for BearerToken {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme("token", SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)));
        }
    }
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
