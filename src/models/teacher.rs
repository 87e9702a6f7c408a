//! Teacher model
//!
//! Teachers are the only authenticated role. Credentials come from a JSON file
//! and are compared in plaintext.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One entry of the credentials file.
///
/// Both fields are optional on the wire; entries missing either one are
/// dropped when the credential store is built.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeacherCredential {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl TeacherCredential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }

    /// Returns the pair if both username and password are non-empty
    pub fn into_pair(self) -> Option<(String, String)> {
        match (self.username, self.password) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some((username, password))
            }
            _ => None,
        }
    }
}

/// Top-level layout of the credentials file: `{"teachers": [...]}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeachersFile {
    #[serde(default)]
    pub teachers: Vec<TeacherCredential>,
}

/// Role reported for authenticated users
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeacherRole {
    #[default]
    Teacher,
}

impl fmt::Display for TeacherRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeacherRole::Teacher => write!(f, "teacher"),
        }
    }
}
