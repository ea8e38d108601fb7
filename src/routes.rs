// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    docs,
    handlers::{auth, question, session},
    state::AppState,
    utils::jwt::optional_auth_middleware,
};

/// Assembles the main application router.
///
/// * `/api` serves questions, session history and the OpenAPI document.
/// * `/auth` drives the identity-provider login.
/// * Every route passes through optional authentication, so history is
///   partitioned by the bearer token when one is sent.
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/strands", get(question::list_strands))
        .route("/get_question/{strand}", get(question::get_question))
        .route("/save_session", post(session::save_session))
        .route("/history", get(session::list_sessions))
        .route("/history/{id}", get(session::get_session))
        .route("/me", get(auth::me))
        .route("/openapi.json", get(docs::openapi_json));

    let auth_routes = Router::new()
        .route("/login", get(auth::login))
        .route("/callback", get(auth::callback));

    Router::new()
        .nest("/api", api_routes)
        .nest("/auth", auth_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            optional_auth_middleware,
        ))
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
