//! Activity API endpoints
//!
//! - GET /activities - Full catalog (public)
//! - POST /activities/{name}/signup - Add a student (teacher only)
//! - DELETE /activities/{name}/unregister - Remove a student (teacher only)

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};

use crate::api::common::EmailQuery;
use crate::api::middleware::{ApiError, AppState, AuthenticatedTeacher};
use crate::api::responses::MessageResponse;
use crate::models::ActivityListing;

/// GET /activities - List every activity keyed by name
pub async fn list_activities(State(state): State<AppState>) -> Json<ActivityListing> {
    Json(state.catalog.list().await)
}

/// POST /activities/{name}/signup - Sign a student up for an activity
pub async fn signup(
    State(state): State<AppState>,
    teacher: AuthenticatedTeacher,
    Path(activity_name): Path<String>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Query(EmailQuery { email }) =
        query.map_err(|e| ApiError::validation_error(e.body_text()))?;

    let message = state.catalog.signup(&activity_name, &email).await?;
    tracing::debug!("Signup by {}: {}", teacher.username, message);
    Ok(Json(MessageResponse::new(message)))
}

/// DELETE /activities/{name}/unregister - Remove a student from an activity
pub async fn unregister(
    State(state): State<AppState>,
    teacher: AuthenticatedTeacher,
    Path(activity_name): Path<String>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Query(EmailQuery { email }) =
        query.map_err(|e| ApiError::validation_error(e.body_text()))?;

    let message = state.catalog.unregister(&activity_name, &email).await?;
    tracing::debug!("Unregister by {}: {}", teacher.username, message);
    Ok(Json(MessageResponse::new(message)))
}
