//! Server configuration parsed from environment variables.
//!
//! A `.env` file in the working directory is loaded first when present, so
//! local development does not need exported variables.

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SESSION_TTL_DAYS: i64 = 14;
/// Upper bound on session lifetime; keeps cookie max-age and the
/// `make_interval` call in range.
pub const MAX_SESSION_TTL_DAYS: i64 = 3650;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is required")]
    Missing { var: &'static str },
    #[error("{var} is not a valid value: {value}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub database_url: String,
    pub port: u16,
    /// Mark auth and CSRF cookies `Secure`.
    pub cookie_secure: bool,
    pub session_ttl_days: i64,
}

impl ServerConfig {
    /// Build typed server config from environment variables.
    ///
    /// Required:
    /// - `DATABASE_URL`
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `COOKIE_SECURE`: default false
    /// - `SESSION_TTL_DAYS`: default 14
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing { var: "DATABASE_URL" })?;
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { var: "PORT", value: raw })?,
            Err(_) => DEFAULT_PORT,
        };
        let session_ttl_days = clamp_session_ttl(env_parse("SESSION_TTL_DAYS", DEFAULT_SESSION_TTL_DAYS));

        Ok(Self { database_url, port, cookie_secure: cookie_secure(), session_ttl_days })
    }
}

pub(crate) fn clamp_session_ttl(days: i64) -> i64 {
    days.clamp(1, MAX_SESSION_TTL_DAYS)
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

pub(crate) fn cookie_secure() -> bool {
    env_bool("COOKIE_SECURE").unwrap_or(false)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
