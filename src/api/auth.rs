//! Authentication API endpoints
//!
//! Handles HTTP requests for teacher authentication:
//! - POST /auth/login - Teacher login
//! - POST /auth/logout - Teacher logout
//! - GET /auth/me - Current teacher

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    Json,
};

use crate::api::common::LoginParams;
use crate::api::middleware::{ApiError, AppState, AuthenticatedTeacher};
use crate::api::responses::{MessageResponse, TeacherProfile};
use crate::models::{TeacherRole, TeacherSession};

/// POST /auth/login - Teacher login
///
/// Credentials come from the query string, or from a JSON body for fields
/// the query string does not carry.
pub async fn login(
    State(state): State<AppState>,
    query: Result<Query<LoginParams>, QueryRejection>,
    body: Bytes,
) -> Result<Json<TeacherSession>, ApiError> {
    let Query(params) = query.map_err(|e| ApiError::validation_error(e.body_text()))?;
    let input = params.or_body(&body)?.into_input()?;
    let username = input.username.clone();

    match state.sessions.login(input).await {
        Ok(session) => {
            tracing::info!("Teacher {} logged in", session.username);
            Ok(Json(session))
        }
        Err(e) => {
            tracing::warn!("Login failed for {}: {}", username, e);
            Err(e.into())
        }
    }
}

/// POST /auth/logout - Teacher logout
///
/// Requires authentication. Revokes only the token used for this request.
pub async fn logout(
    State(state): State<AppState>,
    teacher: AuthenticatedTeacher,
) -> Json<MessageResponse> {
    state.sessions.logout(&teacher.token).await;
    tracing::info!("Teacher {} logged out", teacher.username);
    Json(MessageResponse::new(format!("Logged out {}", teacher.username)))
}

/// GET /auth/me - Current teacher
///
/// Requires authentication.
pub async fn me(teacher: AuthenticatedTeacher) -> Json<TeacherProfile> {
    Json(TeacherProfile {
        username: teacher.username,
        role: TeacherRole::Teacher,
    })
}
