use std::str::FromStr;
use std::time::Duration;

use luxrent_core::session::SessionPolicy;

/// Minimum accepted length of `SESSION_SECRET`, in bytes.
pub const MIN_SECRET_LEN: usize = 32;

/// Default cookie carrying the signed session id.
const DEFAULT_COOKIE_NAME: &str = "luxrent_session";

/// Default interval between expired-session sweeps.
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 300;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set in the environment")]
    Missing(&'static str),

    #[error("{name} must be {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("SESSION_SECRET must be at least 32 bytes long")]
    SecretTooShort,
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Session cookie and expiry settings.
    pub session: SessionConfig,
}

/// Settings for the session gate and its cookie transport.
#[derive(Clone)]
pub struct SessionConfig {
    /// HMAC key signing the session cookie.
    pub secret: String,
    /// Mark the cookie `Secure`; browsers then only send it over HTTPS.
    pub secure_cookie: bool,
    pub cookie_name: String,
    /// Absolute session lifetime. `None` keeps sessions until logout.
    pub ttl_secs: Option<u64>,
    /// Idle expiry. `None` disables it.
    pub idle_timeout_secs: Option<u64>,
    pub sweep_interval_secs: u64,
}

impl SessionConfig {
    pub fn policy(&self) -> SessionPolicy {
        SessionPolicy {
            ttl: self.ttl_secs.map(Duration::from_secs),
            idle_timeout: self.idle_timeout_secs.map(Duration::from_secs),
        }
    }
}

// Hand-written so the secret never reaches the logs.
impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("secret", &"<redacted>")
            .field("secure_cookie", &self.secure_cookie)
            .field("cookie_name", &self.cookie_name)
            .field("ttl_secs", &self.ttl_secs)
            .field("idle_timeout_secs", &self.idle_timeout_secs)
            .field("sweep_interval_secs", &self.sweep_interval_secs)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default           |
    /// |-------------------------------|-------------------|
    /// | `HOST`                        | `0.0.0.0`         |
    /// | `PORT`                        | `3000`            |
    /// | `REQUEST_TIMEOUT_SECS`        | `30`              |
    /// | `SESSION_SECRET`              | **required**      |
    /// | `SESSION_SECURE_COOKIE`       | `false`           |
    /// | `SESSION_COOKIE_NAME`         | `luxrent_session` |
    /// | `SESSION_TTL_SECS`            | unset (no expiry) |
    /// | `SESSION_IDLE_TIMEOUT_SECS`   | unset             |
    /// | `SESSION_SWEEP_INTERVAL_SECS` | `300`             |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(&lookup, "PORT", "a valid port number", 3000)?;
        let request_timeout_secs =
            parse_or(&lookup, "REQUEST_TIMEOUT_SECS", "a number of seconds", 30)?;

        let secret = lookup("SESSION_SECRET").ok_or(ConfigError::Missing("SESSION_SECRET"))?;
        if secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::SecretTooShort);
        }

        let secure_cookie = match lookup("SESSION_SECURE_COOKIE") {
            None => false,
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid {
                name: "SESSION_SECURE_COOKIE",
                expected: "true or false",
                value: raw,
            })?,
        };

        let cookie_name = lookup("SESSION_COOKIE_NAME")
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_COOKIE_NAME.into());

        let session = SessionConfig {
            secret,
            secure_cookie,
            cookie_name,
            ttl_secs: parse_optional(&lookup, "SESSION_TTL_SECS", "a number of seconds")?,
            idle_timeout_secs: parse_optional(
                &lookup,
                "SESSION_IDLE_TIMEOUT_SECS",
                "a number of seconds",
            )?,
            sweep_interval_secs: parse_positive(
                &lookup,
                "SESSION_SWEEP_INTERVAL_SECS",
                DEFAULT_SWEEP_INTERVAL_SECS,
            )?,
        };

        Ok(Self {
            host,
            port,
            request_timeout_secs,
            session,
        })
    }
}

fn parse_optional<F, T>(
    lookup: &F,
    name: &'static str,
    expected: &'static str,
) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(name)
        .map(|raw| {
            raw.trim().parse().map_err(|_| ConfigError::Invalid {
                name,
                expected,
                value: raw.clone(),
            })
        })
        .transpose()
}

fn parse_or<F, T>(
    lookup: &F,
    name: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    Ok(parse_optional(lookup, name, expected)?.unwrap_or(default))
}

/// Like [`parse_or`], but zero is rejected.
fn parse_positive<F>(lookup: &F, name: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    const EXPECTED: &str = "a positive number of seconds";
    match parse_or(lookup, name, EXPECTED, default)? {
        0 => Err(ConfigError::Invalid {
            name,
            expected: EXPECTED,
            value: lookup(name).unwrap_or_default(),
        }),
        secs => Ok(secs),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
