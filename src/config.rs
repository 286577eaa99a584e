//! Server configuration parsed from environment variables.
//!
//! `main` loads `.env` (via `dotenvy`) before calling [`Config::from_env`],
//! so local development and deployed environments share one code path.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_STATIC_DIR: &str = "web";
pub const DEFAULT_LEAN_CHECK_DELAY_MS: u64 = 1000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set but could not be parsed.
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Shared secret for `POST /webhook`. `None` disables the webhook.
    pub api_key: Option<String>,
    pub debug_mode: bool,
    pub static_dir: PathBuf,
    pub lean_check_delay: Duration,
}

impl Config {
    /// Build config from the process environment.
    ///
    /// Optional:
    /// - `HOST`: default `0.0.0.0`
    /// - `PORT`: default 5000
    /// - `API_KEY`: webhook secret; unset or empty disables the webhook
    /// - `DEBUG_MODE`: boolean, default false
    /// - `STATIC_DIR`: directory served at `/`, default `web`
    /// - `LEAN_CHECK_DELAY_MS`: simulated Lean check latency, default 1000
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    pub fn from_lookup<L>(lookup: L) -> Result<Self, ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let port = parse_var(&lookup, "PORT", DEFAULT_PORT)?;
        let api_key = lookup("API_KEY").filter(|v| !v.is_empty());
        let debug_mode = match lookup("DEBUG_MODE") {
            None => false,
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid { var: "DEBUG_MODE", value: raw })?,
        };
        let static_dir = lookup("STATIC_DIR").map_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR), PathBuf::from);
        let delay_ms = parse_var(&lookup, "LEAN_CHECK_DELAY_MS", DEFAULT_LEAN_CHECK_DELAY_MS)?;

        Ok(Self {
            host,
            port,
            api_key,
            debug_mode,
            static_dir,
            lean_check_delay: Duration::from_millis(delay_ms),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Printable stand-in for the API key.
    pub fn redacted_api_key(&self) -> &'static str {
        if self.api_key.is_some() { "***" } else { "<unset>" }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("api_key", &self.redacted_api_key())
            .field("debug_mode", &self.debug_mode)
            .field("static_dir", &self.static_dir)
            .field("lean_check_delay", &self.lean_check_delay)
            .finish()
    }
}

/// Accepts 1/true/yes/on and 0/false/no/off, case-insensitive.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_var<L, T>(lookup: &L, var: &'static str, default: T) -> Result<T, ConfigError>
where
    L: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<T>().map_err(|_| ConfigError::Invalid { var, value: raw }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
