//! Teacher session registry
//!
//! Issues opaque bearer tokens on login and resolves `Authorization` headers
//! back to usernames. Tokens live in memory until an explicit logout; there
//! is no expiry.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::TeacherSession;
use crate::services::credentials::CredentialStore;

/// Number of random bytes in a session token (256 bits)
const TOKEN_BYTES: usize = 32;

/// Error types for authentication operations.
///
/// Every variant except `TokenGeneration` is an authorization failure.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No teachers are configured, so nobody can log in
    #[error("No teacher credentials configured")]
    NoTeachersConfigured,

    /// Unknown username or wrong password
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// No `Authorization` header on the request
    #[error("Teacher authentication required")]
    MissingAuthorization,

    /// Header present but not `Bearer <token>`
    #[error("Invalid authorization format")]
    InvalidAuthorizationFormat,

    /// Token was never issued or has been logged out
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The OS random source failed
    #[error("Failed to generate session token: {0}")]
    TokenGeneration(getrandom::Error),
}

/// Input for teacher login
#[derive(Debug, Clone)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

impl LoginInput {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// In-memory mapping of bearer token to teacher username
pub struct SessionRegistry {
    credentials: Arc<CredentialStore>,
    sessions: RwLock<HashMap<String, String>>,
}

impl SessionRegistry {
    pub fn new(credentials: Arc<CredentialStore>) -> Self {
        Self {
            credentials,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Verify credentials and issue a fresh token.
    ///
    /// # Errors
    ///
    /// - `NoTeachersConfigured` if the credential store is empty
    /// - `InvalidCredentials` if the username is unknown or the password differs
    /// - `TokenGeneration` if the random source fails
    pub async fn login(&self, input: LoginInput) -> Result<TeacherSession, AuthError> {
        if self.credentials.is_empty() {
            return Err(AuthError::NoTeachersConfigured);
        }

        if !self.credentials.verify(&input.username, &input.password) {
            return Err(AuthError::InvalidCredentials);
        }

        let mut sessions = self.sessions.write().await;
        // Live tokens stay unique
        let token = loop {
            let candidate = generate_token()?;
            if !sessions.contains_key(&candidate) {
                break candidate;
            }
        };
        sessions.insert(token.clone(), input.username.clone());

        Ok(TeacherSession {
            token,
            username: input.username,
        })
    }

    /// Remove a token.
    ///
    /// Returns the username the token belonged to, or `None` if it was
    /// already gone. Removing an absent token is not an error.
    pub async fn logout(&self, token: &str) -> Option<String> {
        self.sessions.write().await.remove(token)
    }

    /// Resolve a raw `Authorization` header value to a username.
    ///
    /// The header must be `<scheme> <token>` with a case-insensitive `Bearer`
    /// scheme and a non-empty token that is currently registered.
    pub async fn resolve(&self, authorization: Option<&str>) -> Result<String, AuthError> {
        let token = parse_bearer(authorization)?;
        self.sessions
            .read()
            .await
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }

    /// Number of live tokens
    pub async fn active_sessions(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Split a header value into its bearer token.
///
/// Splits at the first space only, so anything after it (including further
/// spaces) is treated as the token.
pub fn parse_bearer(authorization: Option<&str>) -> Result<&str, AuthError> {
    let header = match authorization {
        Some(value) if !value.is_empty() => value,
        _ => return Err(AuthError::MissingAuthorization),
    };

    let (scheme, token) = header.split_once(' ').unwrap_or((header, ""));
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(AuthError::InvalidAuthorizationFormat);
    }

    Ok(token)
}

/// Generate a URL-safe token from 32 bytes of OS randomness
fn generate_token() -> Result<String, AuthError> {
    let mut bytes = [0u8; TOKEN_BYTES];
    getrandom::fill(&mut bytes).map_err(AuthError::TokenGeneration)?;
    Ok(data_encoding::BASE64URL_NOPAD.encode(&bytes))
}
