//! Configuration loading and validation
//!
//! Settings come from `CRM_*` environment variables. A REST backend or a
//! JSON fixture file must be configured; the timezone decides what "local
//! time" means for every calendar-date computation.

use crate::error::{AppError, AppResult};
use chrono_tz::Tz;
use log::{info, warn};
use std::env;
use std::path::PathBuf;
use url::Url;

pub const ENV_API_URL: &str = "CRM_API_URL";
pub const ENV_API_TOKEN: &str = "CRM_API_TOKEN";
pub const ENV_REFRESH_TOKEN: &str = "CRM_REFRESH_TOKEN";
pub const ENV_FIXTURES: &str = "CRM_FIXTURES";
pub const ENV_TIMEZONE: &str = "CRM_TIMEZONE";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_url: Option<String>,
    pub api_token: Option<String>,
    pub refresh_token: Option<String>,
    pub fixtures: Option<PathBuf>,
    pub timezone: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            api_token: None,
            refresh_token: None,
            fixtures: None,
            timezone: "UTC".to_string(),
        }
    }
}

impl AppConfig {
    /// Reads the configuration from the process environment. Blank values
    /// count as unset.
    pub fn from_env() -> Self {
        let read = |key: &str| {
            env::var(key)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            api_url: read(ENV_API_URL),
            api_token: read(ENV_API_TOKEN),
            refresh_token: read(ENV_REFRESH_TOKEN),
            fixtures: read(ENV_FIXTURES).map(PathBuf::from),
            timezone: read(ENV_TIMEZONE).unwrap_or_else(|| "UTC".to_string()),
        }
    }

    pub fn tz(&self) -> AppResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| AppError::config(format!("Unknown timezone '{}': {}", self.timezone, e)))
    }

    pub fn api_base(&self) -> AppResult<Option<Url>> {
        self.api_url.as_deref().map(validate_api_url).transpose()
    }
}

/// Validates the API base URL: http(s) scheme and a host are required.
pub fn validate_api_url(api_url: &str) -> AppResult<Url> {
    if api_url.trim().is_empty() {
        return Err(AppError::config("API URL cannot be empty"));
    }

    let parsed = Url::parse(api_url)
        .map_err(|e| AppError::config(format!("Invalid API URL '{}': {}", api_url, e)))?;

    match parsed.scheme() {
        "https" => {}
        "http" => {
            let host = parsed.host_str().unwrap_or_default();
            if host != "localhost" && !host.starts_with("127.") {
                warn!("API URL uses plain HTTP; session tokens will travel unencrypted");
            }
        }
        other => {
            return Err(AppError::config(format!(
                "API URL must use http or https, got '{}://'",
                other
            )))
        }
    }

    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(AppError::config(format!("API URL '{}' has no host", api_url)));
    }

    Ok(parsed)
}

/// Validates the application configuration as a whole.
pub fn validate_config(config: &AppConfig) -> AppResult<()> {
    info!("Validating configuration");

    config.tz()?;
    config.api_base()?;

    if config.api_url.is_none() && config.fixtures.is_none() {
        return Err(AppError::config(format!(
            "No record source configured; set {} or {}",
            ENV_API_URL, ENV_FIXTURES
        )));
    }

    if config.api_url.is_some() && config.api_token.is_none() {
        warn!("{} is set without {}; requests will be unauthenticated", ENV_API_URL, ENV_API_TOKEN);
    }

    Ok(())
}
