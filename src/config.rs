//! Server configuration from environment variables.
//!
//!   SUPABASE_URL                   : record store base URL
//!   SUPABASE_SERVICE_ROLE_KEY      : service credential (falls back to SUPABASE_ANON_KEY)
//!   SOCIAL_CHESS_BIND_ADDR         : listen address (default: 0.0.0.0:3001, PORT overrides the port)
//!   SOCIAL_CHESS_STATIC_DIR        : optional front-end asset directory
//!   SOCIAL_CHESS_STORE             : `rest` (default) or `memory`
//!   SOCIAL_CHESS_HTTP_TIMEOUT_SECS : record store client timeout (default: 30)
//!
//! Missing credentials are not fatal here: the server starts and every
//! store-backed request fails until they are provided.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Rest,
    Memory,
}

impl StoreBackend {
    fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "rest" => Ok(Self::Rest),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::Invalid {
                var: "SOCIAL_CHESS_STORE",
                reason: format!("expected 'rest' or 'memory', got '{other}'"),
            }),
        }
    }
}

/// URL + service credential for the hosted record store.
#[derive(Clone)]
pub struct StoreCredentials {
    pub url: Url,
    pub key: String,
}

impl fmt::Debug for StoreCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreCredentials")
            .field("url", &self.url.as_str())
            .field("key", &"<redacted>")
            .finish()
    }
}

impl StoreCredentials {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_url = non_empty(lookup("SUPABASE_URL")).ok_or(ConfigError::Missing("SUPABASE_URL"))?;
        let key = non_empty(lookup("SUPABASE_SERVICE_ROLE_KEY"))
            .or_else(|| non_empty(lookup("SUPABASE_ANON_KEY")))
            .ok_or(ConfigError::Missing("SUPABASE_SERVICE_ROLE_KEY or SUPABASE_ANON_KEY"))?;
        let url = Url::parse(&raw_url).map_err(|e| ConfigError::Invalid {
            var: "SUPABASE_URL",
            reason: e.to_string(),
        })?;
        Ok(Self { url, key })
    }
}

#[derive(Debug)]
pub struct Config {
    pub bind_addr: String,
    pub static_dir: Option<PathBuf>,
    pub backend: StoreBackend,
    pub http_timeout: Duration,
    /// Absent credentials are carried as the error to report per request.
    pub credentials: Result<StoreCredentials, ConfigError>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = match non_empty(lookup("SOCIAL_CHESS_BIND_ADDR")) {
            Some(addr) => addr,
            None => {
                let port = match non_empty(lookup("PORT")) {
                    Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                        var: "PORT",
                        reason: e.to_string(),
                    })?,
                    None => DEFAULT_PORT,
                };
                format!("0.0.0.0:{port}")
            }
        };

        let backend = match lookup("SOCIAL_CHESS_STORE") {
            Some(raw) => StoreBackend::parse(&raw)?,
            None => StoreBackend::Rest,
        };

        let http_timeout = match non_empty(lookup("SOCIAL_CHESS_HTTP_TIMEOUT_SECS")) {
            Some(raw) => Duration::from_secs(raw.parse::<u64>().map_err(|e| {
                ConfigError::Invalid {
                    var: "SOCIAL_CHESS_HTTP_TIMEOUT_SECS",
                    reason: e.to_string(),
                }
            })?),
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        Ok(Self {
            bind_addr,
            static_dir: non_empty(lookup("SOCIAL_CHESS_STATIC_DIR")).map(PathBuf::from),
            backend,
            http_timeout,
            credentials: StoreCredentials::from_lookup(&lookup),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
