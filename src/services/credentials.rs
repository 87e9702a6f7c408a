//! Teacher credential store
//!
//! Loads teacher username/password pairs once at startup. The store is
//! read-only afterwards and shared by the session registry.

use std::collections::HashMap;
use std::path::Path;

use crate::models::{TeacherCredential, TeachersFile};

/// Error types for loading credentials
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("Failed to read credentials file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse credentials file '{path}': {source}")]
    ParseError {
        path: String,
        source: serde_json::Error,
    },
}

/// Immutable mapping from teacher username to password
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    teachers: HashMap<String, String>,
}

impl CredentialStore {
    /// Load credentials from a JSON file.
    ///
    /// A missing file yields an empty store, so every later login attempt is
    /// rejected. A file that exists but cannot be read or parsed is an error.
    pub fn load(path: &Path) -> Result<Self, CredentialError> {
        if !path.exists() {
            tracing::warn!(
                "Teacher credentials file {} not found, teacher login is disabled",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| CredentialError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        let file: TeachersFile =
            serde_json::from_str(&content).map_err(|e| CredentialError::ParseError {
                path: path.display().to_string(),
                source: e,
            })?;

        let store = Self::from_entries(file.teachers);
        tracing::info!(
            "Loaded {} teacher credential(s) from {}",
            store.len(),
            path.display()
        );
        Ok(store)
    }

    /// Build a store from in-memory entries.
    ///
    /// Entries without both a username and a password are skipped; for
    /// duplicate usernames the last entry wins.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = TeacherCredential>,
    {
        Self {
            teachers: entries
                .into_iter()
                .filter_map(TeacherCredential::into_pair)
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.teachers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.teachers.len()
    }

    pub fn contains(&self, username: &str) -> bool {
        self.teachers.contains_key(username)
    }

    /// Exact-match password check; unknown usernames never verify
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.teachers
            .get(username)
            .is_some_and(|stored| stored == password)
    }
}
