//! Server configuration parsed from environment variables.

use time::Duration;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Mark the session cookie `Secure`.
    pub cookie_secure: bool,
    /// Lifetime stamped on new sessions. `None` keeps sessions until logout.
    pub session_ttl: Option<Duration>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT, cookie_secure: false, session_ttl: None }
    }
}

impl ServerConfig {
    /// Build typed server config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `COOKIE_SECURE`: `1/true/yes/on` or `0/false/no/off`, default off
    /// - `SESSION_MAX_AGE_SECS`: positive seconds; unset or `0` disables expiry
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a set variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { key: "PORT", value: raw })?,
            None => DEFAULT_PORT,
        };

        let cookie_secure = match lookup("COOKIE_SECURE") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid { key: "COOKIE_SECURE", value: raw })?,
            None => false,
        };

        let session_ttl = match lookup("SESSION_MAX_AGE_SECS") {
            Some(raw) => parse_ttl(&raw).ok_or(ConfigError::Invalid { key: "SESSION_MAX_AGE_SECS", value: raw })?,
            None => None,
        };

        Ok(Self { port, cookie_secure, session_ttl })
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// `Some(None)` for zero (expiry disabled), `None` if unparseable.
fn parse_ttl(raw: &str) -> Option<Option<Duration>> {
    let secs: i64 = raw.trim().parse().ok()?;
    match secs {
        0 => Some(None),
        s if s > 0 => Some(Some(Duration::seconds(s))),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
