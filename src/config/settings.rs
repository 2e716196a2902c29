//! Application settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

use super::DEFAULT_AVATAR_BASE_URL;
use crate::resolver::MissingUserPolicy;

/// Runtime settings for the mini app.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppSettings {
    /// Host environment file. `None` runs as a plain browser.
    #[serde(default)]
    pub host_env_path: Option<PathBuf>,

    /// Base URL of the identicon service.
    #[serde(default = "default_avatar_base_url")]
    pub avatar_base_url: String,

    /// What to show when the host sends no user.
    #[serde(default)]
    pub missing_user_policy: MissingUserPolicy,

    /// Log level for the application.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_avatar_base_url() -> String {
    DEFAULT_AVATAR_BASE_URL.to_owned()
}

fn default_log_level() -> String {
    "info".to_owned()
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            host_env_path: None,
            avatar_base_url: default_avatar_base_url(),
            missing_user_policy: MissingUserPolicy::default(),
            log_level: default_log_level(),
        }
    }
}

impl AppSettings {
    /// Creates settings from environment variables.
    ///
    /// Reads `HOST_ENV_PATH`, `AVATAR_BASE_URL`, `MISSING_USER_POLICY` and
    /// `RUST_LOG`; unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let avatar_base_url = match lookup("AVATAR_BASE_URL") {
            Some(raw) => {
                Url::parse(&raw).map_err(|e| ConfigError::InvalidAvatarUrl(raw.clone(), e))?;
                raw
            }
            None => default_avatar_base_url(),
        };

        let missing_user_policy = lookup("MISSING_USER_POLICY")
            .map(|raw| raw.parse::<MissingUserPolicy>().map_err(ConfigError::InvalidPolicy))
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            host_env_path: lookup("HOST_ENV_PATH")
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
            avatar_base_url,
            missing_user_policy,
            log_level: lookup("RUST_LOG").unwrap_or_else(default_log_level),
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid AVATAR_BASE_URL {0:?}: {1}")]
    InvalidAvatarUrl(String, url::ParseError),

    #[error("Invalid MISSING_USER_POLICY: {0}")]
    InvalidPolicy(String),
}
