//! Server configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use crate::nav::{NavPaths, NavPathsError};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_COOKIE_NAME: &str = "session_token";
pub const DEFAULT_SESSION_TTL_SECS: u64 = 7 * 24 * 60 * 60;
pub const DEFAULT_PKG_DIR: &str = "pkg";
pub const DEFAULT_SITE_TITLE: &str = "authnav";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {key}: expected a positive integer, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },

    #[error("invalid {key}: expected a boolean (1/0, true/false, yes/no, on/off), got {value:?}")]
    InvalidBool { key: &'static str, value: String },

    #[error("invalid nav path: {0}")]
    NavPaths(#[from] NavPathsError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    /// Postgres session store when set; in-memory store otherwise.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub cookie_name: String,
    pub cookie_secure: bool,
    pub session_ttl: Duration,
    pub dev_auth_bypass: bool,
    pub pkg_dir: PathBuf,
    pub site_title: String,
    pub nav_paths: NavPaths,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: None,
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
            cookie_name: DEFAULT_COOKIE_NAME.into(),
            cookie_secure: false,
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
            dev_auth_bypass: false,
            pkg_dir: PathBuf::from(DEFAULT_PKG_DIR),
            site_title: DEFAULT_SITE_TITLE.into(),
            nav_paths: NavPaths::default(),
        }
    }
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `DATABASE_URL`: Postgres session store; in-memory when absent
    /// - `DB_MAX_CONNECTIONS`: default 5, must be positive
    /// - `SESSION_COOKIE_NAME`: default `session_token`
    /// - `COOKIE_SECURE`: inferred from an `https://` `PUBLIC_URL` when absent
    /// - `SESSION_TTL_SECS`: session lifetime and cookie max-age, default 7 days
    /// - `DEV_AUTH_BYPASS`: enables `/api/dev/session`, default off
    /// - `PKG_DIR`: wasm bundle directory served at `/pkg`, default `pkg`
    /// - `SITE_TITLE`: page title, default `authnav`
    /// - `NAV_LOGIN_PATH`, `NAV_REGISTER_PATH`, `NAV_PROFILE_PATH`, `NAV_LOGOUT_PATH`
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for unparsable numbers or booleans and for
    /// nav paths that fail validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let port = parse_number(&get, "PORT", defaults.port)?;
        let db_max_connections = parse_number(&get, "DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?;
        if db_max_connections == 0 {
            return Err(ConfigError::InvalidNumber { key: "DB_MAX_CONNECTIONS", value: "0".into() });
        }
        let session_ttl_secs = parse_number(&get, "SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS)?;

        let cookie_secure = match parse_flag(&get, "COOKIE_SECURE")? {
            Some(secure) => secure,
            None => get("PUBLIC_URL").is_some_and(|url| url.starts_with("https://")),
        };

        let nav_paths = NavPaths {
            login: get("NAV_LOGIN_PATH").unwrap_or(defaults.nav_paths.login),
            register: get("NAV_REGISTER_PATH").unwrap_or(defaults.nav_paths.register),
            profile: get("NAV_PROFILE_PATH").unwrap_or(defaults.nav_paths.profile),
            logout: get("NAV_LOGOUT_PATH").unwrap_or(defaults.nav_paths.logout),
        };
        nav_paths.validate()?;

        Ok(Self {
            port,
            database_url: get("DATABASE_URL"),
            db_max_connections,
            cookie_name: get("SESSION_COOKIE_NAME").unwrap_or(defaults.cookie_name),
            cookie_secure,
            session_ttl: Duration::from_secs(session_ttl_secs),
            dev_auth_bypass: parse_flag(&get, "DEV_AUTH_BYPASS")?.unwrap_or(false),
            pkg_dir: get("PKG_DIR").map_or(defaults.pkg_dir, PathBuf::from),
            site_title: get("SITE_TITLE").unwrap_or(defaults.site_title),
            nav_paths,
        })
    }
}

/// Parse a boolean flag in the usual spellings.
pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_flag<G>(get: &G, key: &'static str) -> Result<Option<bool>, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    get(key)
        .map(|value| parse_bool(&value).ok_or(ConfigError::InvalidBool { key, value }))
        .transpose()
}

fn parse_number<G, T>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    G: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match get(key) {
        Some(value) => value
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { key, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
