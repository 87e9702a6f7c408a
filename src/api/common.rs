//! Common API request types
//!
//! Typed request bindings shared by the handlers. Parameters are validated
//! here before any handler logic runs.

use serde::Deserialize;

use crate::api::middleware::ApiError;
use crate::services::LoginInput;

/// `?email=` query parameter for roster changes
#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

/// Login parameters, accepted from the query string or a JSON body
#[derive(Debug, Default, Deserialize)]
pub struct LoginParams {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginParams {
    /// Fill fields missing from the query string with those from a JSON body
    pub fn or_body(self, body: &[u8]) -> Result<Self, ApiError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(self);
        }

        let body: LoginParams = serde_json::from_slice(body)
            .map_err(|e| ApiError::validation_error(format!("Invalid login body: {}", e)))?;

        Ok(Self {
            username: self.username.or(body.username),
            password: self.password.or(body.password),
        })
    }

    /// Require both fields
    pub fn into_input(self) -> Result<LoginInput, ApiError> {
        match (self.username, self.password) {
            (Some(username), Some(password)) => Ok(LoginInput::new(username, password)),
            _ => Err(ApiError::validation_error(
                "username and password are required",
            )),
        }
    }
}
