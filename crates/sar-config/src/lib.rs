//! Configuration for the Slack attachment resource.
//!
//! The pipeline hands every invocation a `source` object on stdin; this crate
//! defines its shape ([`Source`]) and the process-level HTTP settings
//! ([`SlackSettings`]) read from the environment.
//!
//! ## Environment Variable Expansion
//!
//! `source` string values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! A bare `$` is literal text. Expanded fields:
//! - `source.token`
//! - `source.groupID`
//!
//! `source.filename` is matched byte for byte against upload names and is
//! never expanded.
//!
//! ## Process Settings
//!
//! - `SAR_SLACK_API_URL` - Slack Web API base URL (default `https://slack.com/api`)
//! - `SAR_HTTP_TIMEOUT_SECS` - global HTTP timeout in seconds (default: none)

mod expand;

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default Slack Web API base URL.
pub const DEFAULT_API_URL: &str = "https://slack.com/api";

/// Environment variable overriding the Slack API base URL.
pub const API_URL_VAR: &str = "SAR_SLACK_API_URL";

/// Environment variable setting a global HTTP timeout.
pub const TIMEOUT_VAR: &str = "SAR_HTTP_TIMEOUT_SECS";

/// Resource `source` configuration as supplied by the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Source {
    /// Slack API token, sent as a bearer token.
    pub token: String,
    /// Channel (or private group) the attachment is posted to.
    #[serde(rename = "groupID")]
    pub group_id: String,
    /// Exact attachment filename to track.
    pub filename: String,
}

impl Source {
    /// Expand environment references and validate the result.
    ///
    /// Only the token is required up front. The channel is passed through to
    /// the Slack API as given, and the filename is left exactly as written.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EnvVar`] if a referenced variable is unset, or
    /// [`ConfigError::Validation`] if the token is empty.
    pub fn resolve(self) -> Result<Self, ConfigError> {
        let source = Self {
            token: expand::expand_env(&self.token, "source.token")?,
            group_id: expand::expand_env(&self.group_id, "source.groupID")?,
            filename: self.filename,
        };
        require_non_empty(&source.token, "source.token")?;
        Ok(source)
    }
}

/// HTTP settings for talking to Slack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlackSettings {
    /// Slack Web API base URL, without trailing slash.
    pub api_url: String,
    /// Global timeout applied to every request. `None` keeps the transport default.
    pub timeout: Option<Duration>,
}

impl Default for SlackSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            timeout: None,
        }
    }
}

impl SlackSettings {
    /// Read settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if a variable holds an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if a variable holds an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(url) = lookup(API_URL_VAR).filter(|v| !v.is_empty()) {
            require_http_url(&url, API_URL_VAR)?;
            settings.api_url = url.trim_end_matches('/').to_owned();
        }

        if let Some(raw) = lookup(TIMEOUT_VAR).filter(|v| !v.is_empty()) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ConfigError::Validation(format!(
                    "{TIMEOUT_VAR} must be a positive integer, got {raw:?}"
                ))
            })?;
            if secs == 0 {
                return Err(ConfigError::Validation(format!(
                    "{TIMEOUT_VAR} must be greater than 0"
                )));
            }
            settings.timeout = Some(Duration::from_secs(secs));
        }

        Ok(settings)
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`source.token`").
        field: String,
        /// Error message (e.g., "${`SLACK_TOKEN`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}
