use std::path::PathBuf;
use std::str::FromStr;

/// A configuration variable that was set but could not be parsed.
#[derive(Debug, thiserror::Error)]
#[error("{key} must be a valid {expected}, got '{value}'")]
pub struct ConfigError {
    pub key: &'static str,
    pub expected: &'static str,
    pub value: String,
}

/// Server configuration loaded from environment variables.
///
/// Every field has a default suitable for local use.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins, comma-separated in `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// Directory holding the CSV tables.
    pub data_dir: PathBuf,
    /// Root of generic attachment uploads, one subdirectory per module.
    pub upload_dir: PathBuf,
    /// Site material assets and storyboard images.
    pub assets_dir: PathBuf,
    /// Largest accepted request body in bytes.
    pub max_upload_bytes: usize,
    /// Comparison datasets held in memory before the oldest is evicted.
    pub max_datasets: usize,
}

impl ServerConfig {
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `HOST`                 | `0.0.0.0`               |
    /// | `PORT`                 | `3000`                  |
    /// | `CORS_ORIGINS`         | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS` | `120`                   |
    /// | `DATA_DIR`             | `data`                  |
    /// | `UPLOAD_DIR`           | `uploads`               |
    /// | `ASSETS_DIR`           | `assets`                |
    /// | `MAX_UPLOAD_BYTES`     | `104857600`             |
    /// | `MAX_DATASETS`         | `16`                    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let cors_origins = text("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host: text("HOST", "0.0.0.0"),
            port: parsed(&lookup, "PORT", 3000, "u16")?,
            cors_origins,
            // Summaries wait on the text-generation endpoint, so allow more than a plain CRUD call.
            request_timeout_secs: parsed(&lookup, "REQUEST_TIMEOUT_SECS", 120, "u64")?,
            data_dir: text("DATA_DIR", "data").into(),
            upload_dir: text("UPLOAD_DIR", "uploads").into(),
            assets_dir: text("ASSETS_DIR", "assets").into(),
            max_upload_bytes: parsed(&lookup, "MAX_UPLOAD_BYTES", 100 * 1024 * 1024, "usize")?,
            max_datasets: parsed(&lookup, "MAX_DATASETS", 16, "usize")?,
        })
    }
}

fn parsed<F, T>(lookup: &F, key: &'static str, default: T, expected: &'static str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError {
            key,
            expected,
            value,
        }),
    }
}
