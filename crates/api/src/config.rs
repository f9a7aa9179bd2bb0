use std::str::FromStr;

use axum::http::HeaderValue;
use entrepaginas_core::api_keys::hash_api_key;

/// Error raised when an environment variable holds an unusable value.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got '{value}'")]
    InvalidValue {
        var: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("Invalid CORS origin '{0}'")]
    InvalidCorsOrigin(String),
}

/// Log output format for the `fmt` subscriber layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. The API key is
/// never kept in plain text; only its SHA-256 digest is stored.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `4002`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// SQLite connection URL (default: `sqlite::memory:`).
    pub database_url: String,
    /// Digest of `API_KEY`. `None` leaves the API open.
    pub api_key_hash: Option<[u8; 32]>,
    /// Insert the sample entries into an empty diary at startup.
    pub seed_sample_entries: bool,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `HOST`                 | `0.0.0.0`               |
    /// | `PORT`                 | `4002`                  |
    /// | `CORS_ORIGINS`         | `http://localhost:3000` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                    |
    /// | `DATABASE_URL`         | `sqlite::memory:`       |
    /// | `API_KEY`              | unset                   |
    /// | `SEED_SAMPLE_ENTRIES`  | `true`                  |
    /// | `LOG_FORMAT`           | `pretty`                |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let host = var("HOST", "0.0.0.0");
        let port = parse_var("PORT", &var("PORT", "4002"), "port number")?;

        let cors_origins: Vec<String> = var("CORS_ORIGINS", "http://localhost:3000")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        for origin in &cors_origins {
            HeaderValue::from_str(origin)
                .map_err(|_| ConfigError::InvalidCorsOrigin(origin.clone()))?;
        }

        let request_timeout_secs = parse_var(
            "REQUEST_TIMEOUT_SECS",
            &var("REQUEST_TIMEOUT_SECS", "30"),
            "number of seconds",
        )?;

        let database_url = var("DATABASE_URL", "sqlite::memory:");

        let api_key_hash = lookup("API_KEY")
            .filter(|k| !k.trim().is_empty())
            .map(|k| hash_api_key(k.trim()));

        let seed_sample_entries = parse_bool(
            "SEED_SAMPLE_ENTRIES",
            &var("SEED_SAMPLE_ENTRIES", "true"),
        )?;

        let log_format = match var("LOG_FORMAT", "pretty").to_ascii_lowercase().as_str() {
            "pretty" | "text" => LogFormat::Pretty,
            "json" => LogFormat::Json,
            other => {
                return Err(ConfigError::InvalidValue {
                    var: "LOG_FORMAT",
                    expected: "log format (pretty, json)",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            api_key_hash,
            seed_sample_entries,
            log_format,
        })
    }

    /// Whether requests must present an API key.
    pub fn requires_api_key(&self) -> bool {
        self.api_key_hash.is_some()
    }
}

fn parse_var<T: FromStr>(
    var: &'static str,
    value: &str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        var,
        expected,
        value: value.to_string(),
    })
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var,
            expected: "boolean",
            value: value.to_string(),
        }),
    }
}
