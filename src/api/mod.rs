//! API layer - HTTP handlers and routing
//!
//! This module contains every HTTP endpoint of the service:
//! - Activity catalog endpoints
//! - Teacher auth endpoints
//! - Front-end redirect and static assets

pub mod activities;
pub mod auth;
pub mod common;
pub mod middleware;
pub mod responses;


use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    response::Redirect,
    routing::{delete, get, post},
    Router,
};
use std::path::Path;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

pub use middleware::{ApiError, AppState, AuthenticatedTeacher};

/// Entry point of the bundled front-end
pub const INDEX_PATH: &str = "/static/index.html";

/// Build the API router
pub fn build_api_router(state: AppState) -> Router<AppState> {
    // Teacher-only routes
    let protected_routes = Router::new()
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/activities/{name}/signup", post(activities::signup))
        .route("/activities/{name}/unregister", delete(activities::unregister))
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::require_teacher,
        ));

    // Public routes
    Router::new()
        .route("/", get(|| async { Redirect::temporary(INDEX_PATH) }))
        .route("/activities", get(activities::list_activities))
        .route("/auth/login", post(auth::login))
        .merge(protected_routes)
}

/// Build the complete router with static assets and middleware
pub fn build_router(
    state: AppState,
    cors_origin: &str,
    static_dir: &Path,
) -> anyhow::Result<Router> {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Ok(build_api_router(state.clone())
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state))
}
