//! Shared API response types

use serde::{Deserialize, Serialize};

use crate::models::TeacherRole;

/// Plain confirmation message
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response for `GET /auth/me`
#[derive(Debug, Serialize, Deserialize)]
pub struct TeacherProfile {
    pub username: String,
    pub role: TeacherRole,
}
