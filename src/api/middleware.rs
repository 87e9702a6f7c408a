//! API middleware
//!
//! Contains:
//! - Shared application state
//! - The API error type and its HTTP mapping
//! - The teacher authentication gate

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::services::{
    session::parse_bearer, ActivityCatalog, AuthError, CatalogError, CredentialStore,
    SessionRegistry,
};

/// Application state containing the shared stores
#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<CredentialStore>,
    pub sessions: Arc<SessionRegistry>,
    pub catalog: Arc<ActivityCatalog>,
}

impl AppState {
    /// Wire a session registry to the given credentials
    pub fn new(credentials: CredentialStore, catalog: ActivityCatalog) -> Self {
        let credentials = Arc::new(credentials);
        Self {
            sessions: Arc::new(SessionRegistry::new(credentials.clone())),
            credentials,
            catalog: Arc::new(catalog),
        }
    }
}

/// Teacher attached to a request by [`require_teacher`]
#[derive(Debug, Clone)]
pub struct AuthenticatedTeacher {
    pub username: String,
    /// Token the request authenticated with
    pub token: String,
}

impl<S> FromRequestParts<S> for AuthenticatedTeacher
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedTeacher>()
            .cloned()
            .ok_or_else(|| ApiError::unauthorized(AuthError::MissingAuthorization.to_string()))
    }
}

/// Error response for API errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ApiErrorDetail {
                code: code.into(),
                message: message.into(),
            },
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new("UNAUTHORIZED", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    pub fn status(&self) -> StatusCode {
        match self.error.code.as_str() {
            "UNAUTHORIZED" => StatusCode::UNAUTHORIZED,
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            "VALIDATION_ERROR" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::TokenGeneration(_) => {
                tracing::error!("{}", e);
                ApiError::internal_error("Failed to create session")
            }
            _ => ApiError::unauthorized(e.to_string()),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::ActivityNotFound(_) => ApiError::not_found(e.to_string()),
            CatalogError::AlreadySignedUp { .. } | CatalogError::NotSignedUp { .. } => {
                ApiError::validation_error(e.to_string())
            }
        }
    }
}

/// Teacher authentication gate.
///
/// Resolves the `Authorization` header through the session registry and
/// attaches an [`AuthenticatedTeacher`] to the request. Any failure ends the
/// request with 401.
pub async fn require_teacher(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let authorization = match request.headers().get(header::AUTHORIZATION) {
        Some(value) => Some(
            value
                .to_str()
                .map_err(|_| AuthError::InvalidAuthorizationFormat)?
                .to_owned(),
        ),
        None => None,
    };

    let username = state
        .sessions
        .resolve(authorization.as_deref())
        .await
        .inspect_err(|e| tracing::debug!("Rejected {} {}: {}", request.method(), request.uri(), e))?;
    let token = parse_bearer(authorization.as_deref())?.to_owned();

    request
        .extensions_mut()
        .insert(AuthenticatedTeacher { username, token });
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TeacherCredential;
    use crate::services::LoginInput;
    use axum::{body::Body, http, middleware::from_fn_with_state, routing::get, Router};
    use tower::ServiceExt;

    fn test_state() -> AppState {
        AppState::new(
            CredentialStore::from_entries([TeacherCredential::new("teacher1", "pass123")]),
            ActivityCatalog::seeded(),
        )
    }

    fn gated_router(state: AppState) -> Router {
        Router::new()
            .route(
                "/whoami",
                get(|teacher: AuthenticatedTeacher| async move { teacher.username }),
            )
            .route_layer(from_fn_with_state(state.clone(), require_teacher))
            .with_state(state)
    }

    fn request_with_auth(value: Option<&str>) -> http::Request<Body> {
        let mut builder = http::Request::builder().uri("/whoami");
        if let Some(value) = value {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_gate_accepts_issued_token() {
        let state = test_state();
        let session = state
            .sessions
            .login(LoginInput::new("teacher1", "pass123"))
            .await
            .unwrap();

        let response = gated_router(state)
            .oneshot(request_with_auth(Some(&format!("Bearer {}", session.token))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"teacher1");
    }

    #[tokio::test]
    async fn test_gate_rejects_missing_header() {
        let response = gated_router(test_state())
            .oneshot(request_with_auth(None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
        assert_eq!(body["error"]["message"], "Teacher authentication required");
    }

    #[tokio::test]
    async fn test_gate_rejects_wrong_scheme() {
        let response = gated_router(test_state())
            .oneshot(request_with_auth(Some("Basic dGVhY2hlcjE6cGFzczEyMw==")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Invalid authorization format");
    }

    #[tokio::test]
    async fn test_gate_rejects_unknown_token() {
        let response = gated_router(test_state())
            .oneshot(request_with_auth(Some("Bearer made-up")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Invalid or expired token");
    }

    #[test]
    fn test_catalog_errors_map_to_status() {
        let not_found: ApiError = CatalogError::ActivityNotFound("X".into()).into();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.error.message, "Activity not found");

        let duplicate: ApiError = CatalogError::AlreadySignedUp {
            activity: "X".into(),
            email: "a@b".into(),
        }
        .into();
        assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);
        assert_eq!(duplicate.error.message, "Student is already signed up");

        let missing: ApiError = CatalogError::NotSignedUp {
            activity: "X".into(),
            email: "a@b".into(),
        }
        .into();
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_auth_errors_map_to_unauthorized() {
        for e in [
            AuthError::NoTeachersConfigured,
            AuthError::InvalidCredentials,
            AuthError::MissingAuthorization,
            AuthError::InvalidAuthorizationFormat,
            AuthError::InvalidToken,
        ] {
            let api: ApiError = e.into();
            assert_eq!(api.status(), StatusCode::UNAUTHORIZED);
        }
    }
}
