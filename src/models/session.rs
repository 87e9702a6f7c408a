//! Session model

use serde::{Deserialize, Serialize};

/// Teacher session issued on login.
///
/// Serializes directly as the login response body: `{token, username}`.
/// Sessions never expire; only logout removes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherSession {
    /// Opaque bearer token
    pub token: String,
    /// Username the token was issued to
    pub username: String,
}
