//! Server configuration from environment variables.

use std::path::PathBuf;
use std::str::FromStr;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind host (`HOST`, default 0.0.0.0).
    pub host: String,
    /// Bind port (`PORT`, default 5000).
    pub port: u16,
    /// Gemini API key (`GEMINI_API_KEY`, required).
    pub gemini_api_key: String,
    /// Gemini model id (`GEMINI_MODEL`, default "gemini-2.0-flash").
    pub gemini_model: String,
    /// Oracle request timeout in seconds (`ORACLE_TIMEOUT_SECS`, default 30).
    pub oracle_timeout_secs: u64,
    /// Directory holding the task store file (`DATA_DIR`, default "./data").
    pub data_dir: PathBuf,
    /// Secret for session tokens (`JWT_SECRET`, required).
    pub jwt_secret: String,
    /// Session token lifetime in days (`SESSION_TTL_DAYS`, default 30).
    pub session_ttl_days: i64,
    /// Email allowed to read the admin listing (`ADMIN_EMAIL`, optional;
    /// admin endpoints are disabled when unset).
    pub admin_email: Option<String>,
}

impl Config {
    /// Load configuration from the environment, failing fast when a
    /// required variable is missing.
    pub fn from_env() -> anyhow::Result<Self> {
        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| anyhow::anyhow!("GEMINI_API_KEY must be set"))?;
        let jwt_secret =
            std::env::var("JWT_SECRET").map_err(|_| anyhow::anyhow!("JWT_SECRET must be set"))?;

        Ok(Self {
            host: env_or("HOST", "0.0.0.0"),
            port: env_parse("PORT", 5000)?,
            gemini_api_key,
            gemini_model: env_or("GEMINI_MODEL", "gemini-2.0-flash"),
            oracle_timeout_secs: env_parse("ORACLE_TIMEOUT_SECS", 30)?,
            data_dir: PathBuf::from(env_or("DATA_DIR", "./data")),
            jwt_secret,
            session_ttl_days: env_parse("SESSION_TTL_DAYS", 30)?,
            admin_email: std::env::var("ADMIN_EMAIL")
                .ok()
                .map(|e| crate::tasks::normalize_owner(&e))
                .filter(|e| !e.is_empty()),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid {key}: {e}")),
        Err(_) => Ok(default),
    }
}
