//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `FIREBASE_DATABASE_URL` - Base URL of the Firebase Realtime Database
//!   (e.g., <https://my-project-default-rtdb.firebaseio.com>)
//! - `OPENWEATHER_API_KEY` - OpenWeather API key for zip code resolution
//!
//! ## Optional
//! - `ZIPDIR_HOST` - Bind address (default: 127.0.0.1)
//! - `ZIPDIR_PORT` - Listen port (default: 3000)
//! - `ZIPDIR_CORS_ORIGIN` - Allowed browser origin for the frontend
//!   (e.g., <http://localhost:5173> for the Vite dev server)
//! - `FIREBASE_AUTH_TOKEN` - Database secret appended as `?auth=` on requests
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// API application configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Browser origin allowed by CORS, if any
    pub cors_origin: Option<String>,
    /// Firebase Realtime Database configuration
    pub firebase: FirebaseConfig,
    /// OpenWeather geocoding configuration
    pub openweather: OpenWeatherConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Firebase Realtime Database configuration.
///
/// Implements `Debug` manually to redact the auth token.
#[derive(Clone)]
pub struct FirebaseConfig {
    /// Database base URL, without a trailing slash
    pub database_url: String,
    /// Optional database secret, sent as the `auth` query parameter
    pub auth_token: Option<SecretString>,
}

impl std::fmt::Debug for FirebaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseConfig")
            .field("database_url", &self.database_url)
            .field(
                "auth_token",
                &self.auth_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// OpenWeather API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct OpenWeatherConfig {
    /// OpenWeather API key
    pub api_key: SecretString,
}

impl std::fmt::Debug for OpenWeatherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherConfig")
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("ZIPDIR_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ZIPDIR_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("ZIPDIR_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("ZIPDIR_PORT".to_string(), e.to_string()))?;
        let cors_origin = get_optional_env("ZIPDIR_CORS_ORIGIN");

        let firebase = FirebaseConfig::from_env()?;
        let openweather = OpenWeatherConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");

        Ok(Self {
            host,
            port,
            cors_origin,
            firebase,
            openweather,
            sentry_dsn,
            sentry_environment,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl FirebaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let mut database_url = get_required_env("FIREBASE_DATABASE_URL")?;
        // Normalize so path joining in the client stays simple
        while database_url.ends_with('/') {
            database_url.pop();
        }

        Ok(Self {
            database_url,
            auth_token: get_optional_env("FIREBASE_AUTH_TOKEN").map(SecretString::from),
        })
    }
}

impl OpenWeatherConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: get_required_secret("OPENWEATHER_API_KEY")?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a required environment variable as a secret.
fn get_required_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    Ok(SecretString::from(value))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_config() -> ApiConfig {
        ApiConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            cors_origin: Some("http://localhost:5173".to_string()),
            firebase: FirebaseConfig {
                database_url: "https://test-rtdb.firebaseio.com".to_string(),
                auth_token: Some(SecretString::from("database-secret-value")),
            },
            openweather: OpenWeatherConfig {
                api_key: SecretString::from("openweather-key-value"),
            },
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    #[test]
    fn test_socket_addr() {
        let config = test_config();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_firebase_config_debug_redacts_token() {
        let config = test_config();
        let debug_output = format!("{:?}", config.firebase);

        assert!(debug_output.contains("test-rtdb.firebaseio.com"));
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("database-secret-value"));
    }

    #[test]
    fn test_openweather_config_debug_redacts_key() {
        let config = test_config();
        let debug_output = format!("{:?}", config.openweather);

        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("openweather-key-value"));
    }
}
