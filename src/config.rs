//! Runtime configuration loaded from the environment (and `.env` if present).

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Base URL of the search backend, without trailing slash
    pub api_url: String,
    /// `limit` sent with each search
    pub result_limit: u32,
    pub timeout: Duration,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
    pub theme_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".to_string(),
            result_limit: 10,
            timeout: Duration::from_secs(30),
            log_filter: "info".to_string(),
            theme_file: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Missing keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_url = lookup("CRIBINFO_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_url);

        let result_limit = match lookup("CRIBINFO_RESULT_LIMIT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("Invalid CRIBINFO_RESULT_LIMIT: {raw}"))?,
            None => defaults.result_limit,
        };

        let timeout = match lookup("CRIBINFO_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.parse()
                    .with_context(|| format!("Invalid CRIBINFO_TIMEOUT_SECS: {raw}"))?,
            ),
            None => defaults.timeout,
        };

        let log_filter = lookup("CRIBINFO_LOG").unwrap_or(defaults.log_filter);
        let theme_file = lookup("CRIBINFO_THEME_FILE").map(PathBuf::from);

        Ok(Self {
            api_url,
            result_limit,
            timeout,
            log_filter,
            theme_file,
        })
    }
}
