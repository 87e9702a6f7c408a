//! Configuration management
//!
//! Configuration is loaded from:
//! - config.yml file
//! - Environment variables (override file settings)
//!
//! Missing values are filled with defaults, so the service starts with no
//! configuration file at all.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Teacher authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,
    /// Front-end asset configuration
    #[serde(default)]
    pub assets: AssetsConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origin
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_cors_origin() -> String {
    "http://localhost:8000".to_string()
}

/// Teacher authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Path to the teacher credentials JSON file
    #[serde(default = "default_teachers_file")]
    pub teachers_file: PathBuf,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            teachers_file: default_teachers_file(),
        }
    }
}

fn default_teachers_file() -> PathBuf {
    PathBuf::from("teachers.json")
}

/// Front-end asset configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Directory served under `/static`
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            static_dir: default_static_dir(),
        }
    }
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

/// Error type for configuration parsing
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {message}")]
    ParseError {
        path: String,
        message: String,
    },
}

impl Config {
    /// Load configuration from file
    ///
    /// If the file doesn't exist or is empty, returns default configuration.
    /// If the file exists but is invalid YAML, returns an error with the
    /// location of the problem.
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: format_yaml_error(&e),
        })
    }

    /// Load configuration from file with environment variable overrides
    ///
    /// Environment variables:
    /// - MERGINGTON_SERVER_HOST
    /// - MERGINGTON_SERVER_PORT
    /// - MERGINGTON_SERVER_CORS_ORIGIN
    /// - MERGINGTON_AUTH_TEACHERS_FILE
    /// - MERGINGTON_ASSETS_STATIC_DIR
    pub fn load_with_env(path: &std::path::Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Socket address string the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("MERGINGTON_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("MERGINGTON_SERVER_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.server.port = port;
            }
        }
        if let Ok(cors_origin) = std::env::var("MERGINGTON_SERVER_CORS_ORIGIN") {
            self.server.cors_origin = cors_origin;
        }
        if let Ok(path) = std::env::var("MERGINGTON_AUTH_TEACHERS_FILE") {
            self.auth.teachers_file = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var("MERGINGTON_ASSETS_STATIC_DIR") {
            self.assets.static_dir = PathBuf::from(path);
        }
    }
}

/// Format YAML parsing error with location
fn format_yaml_error(e: &serde_yaml::Error) -> String {
    if let Some(location) = e.location() {
        format!(
            "at line {}, column {}: {}",
            location.line(),
            location.column(),
            e
        )
    } else {
        e.to_string()
    }
}

// Shared by every test that touches process environment variables.
#[cfg(test)]
static CONFIG_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
const ENV_KEYS: [&str; 5] = [
    "MERGINGTON_SERVER_HOST",
    "MERGINGTON_SERVER_PORT",
    "MERGINGTON_SERVER_CORS_ORIGIN",
    "MERGINGTON_AUTH_TEACHERS_FILE",
    "MERGINGTON_ASSETS_STATIC_DIR",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        let guard = super::CONFIG_ENV_MUTEX
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        for key in super::ENV_KEYS {
            std::env::remove_var(key);
        }
        guard
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let path = std::path::Path::new("nonexistent_config.yml");
        let config = Config::load(path).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.cors_origin, "http://localhost:8000");
        assert_eq!(config.auth.teachers_file, PathBuf::from("teachers.json"));
        assert_eq!(config.assets.static_dir, PathBuf::from("static"));
    }

    #[test]
    fn test_load_empty_file_returns_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "   \n").unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.server.port, 8000);
        assert_eq!(config.bind_address(), "0.0.0.0:8000");
    }

    #[test]
    fn test_load_partial_config_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "server:\n  port: 3000\n").unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.auth.teachers_file, PathBuf::from("teachers.json"));
    }

    #[test]
    fn test_load_full_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
server:
  host: "127.0.0.1"
  port: 9000
  cors_origin: "https://school.example"
auth:
  teachers_file: "/etc/mergington/teachers.json"
assets:
  static_dir: "public"
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:9000");
        assert_eq!(config.server.cors_origin, "https://school.example");
        assert_eq!(
            config.auth.teachers_file,
            PathBuf::from("/etc/mergington/teachers.json")
        );
        assert_eq!(config.assets.static_dir, PathBuf::from("public"));
    }

    #[test]
    fn test_load_invalid_yaml_returns_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "server:\n  port: not_a_number\n").unwrap();

        let err = Config::load(file.path()).unwrap_err();

        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_env_override_all_sections() {
        let _guard = lock_env();

        std::env::set_var("MERGINGTON_SERVER_HOST", "10.0.0.1");
        std::env::set_var("MERGINGTON_SERVER_PORT", "9100");
        std::env::set_var("MERGINGTON_SERVER_CORS_ORIGIN", "https://example.org");
        std::env::set_var("MERGINGTON_AUTH_TEACHERS_FILE", "secrets/teachers.json");
        std::env::set_var("MERGINGTON_ASSETS_STATIC_DIR", "web");

        let config = Config::load_with_env(std::path::Path::new("nonexistent.yml")).unwrap();

        assert_eq!(config.server.host, "10.0.0.1");
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.cors_origin, "https://example.org");
        assert_eq!(
            config.auth.teachers_file,
            PathBuf::from("secrets/teachers.json")
        );
        assert_eq!(config.assets.static_dir, PathBuf::from("web"));

        for key in super::ENV_KEYS {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_env_override_invalid_port_ignored() {
        let _guard = lock_env();

        std::env::set_var("MERGINGTON_SERVER_PORT", "not-a-port");
        let config = Config::load_with_env(std::path::Path::new("nonexistent.yml")).unwrap();
        assert_eq!(config.server.port, 8000);

        std::env::remove_var("MERGINGTON_SERVER_PORT");
    }
}
