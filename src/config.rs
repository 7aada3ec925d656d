use std::env;
use std::time::Duration;

use dotenvy::dotenv;

use crate::error::ConfigError;

pub const DEFAULT_SEARCH_API_URL: &str = "https://www.googleapis.com/customsearch/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

/// Process configuration. Built once at startup and handed to whatever needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub google_api_key: String,
    pub google_cse_id: String,
    pub search_api_url: String,
    pub search_timeout: Duration,
    pub bind_addr: String,
    pub port: u16,
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Config, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let google_api_key = get("GOOGLE_API_KEY").ok_or(ConfigError::MissingVar("GOOGLE_API_KEY"))?;
        let google_cse_id = get("GOOGLE_CSE_ID")
            .or_else(|| get("GOOGLE_CSE_CX"))
            .ok_or(ConfigError::MissingVar("GOOGLE_CSE_ID"))?;

        let search_timeout = match get("SEARCH_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidVar {
                        key: "SEARCH_TIMEOUT_SECS",
                        value: raw,
                    });
                }
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let port = match get("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidVar {
                key: "PORT",
                value: raw.clone(),
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Config {
            google_api_key,
            google_cse_id,
            search_api_url: get("SEARCH_API_URL").unwrap_or_else(|| DEFAULT_SEARCH_API_URL.to_string()),
            search_timeout,
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            port,
        })
    }
}
