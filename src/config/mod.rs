use crate::global;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const CLIENT_ID_VAR: &str = "ZOOM_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "ZOOM_CLIENT_SECRET";
pub const ACCOUNT_ID_VAR: &str = "ZOOM_ACCOUNT_ID";

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub zoom: ZoomConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// OAuth token endpoint for the account credentials grant
    pub auth_token_url: String,
    /// Base URL of the REST API, without a trailing slash
    pub api_base_url: String,
    /// Client-wide request timeout. Unset means requests may block indefinitely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            auth_token_url: "https://zoom.us/oauth/token".to_string(),
            api_base_url: "https://api.zoom.us/v2".to_string(),
            request_timeout_secs: None,
        }
    }
}

impl Config {
    /// Load from the default location. A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!(
                "Config file not found at {:?}, using defaults",
                config_path
            );
            return Ok(Self::default());
        }

        let content =
            std::fs::read_to_string(config_path).context("Failed to read config file")?;

        let config: Self = toml::from_str(&content).context("Failed to parse config file")?;

        info!("Loaded config from {:?}", config_path);
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    pub fn config_path() -> Result<PathBuf> {
        global::config_file()
    }
}

/// Server-to-Server OAuth app credentials.
///
/// Read once at startup and never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub account_id: String,
}

impl Credentials {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        account_id: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            account_id: account_id.into(),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build credentials from an arbitrary variable lookup.
    ///
    /// Unset variables become empty strings. They are not rejected here; the token
    /// endpoint refuses them instead.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = Self::new(
            lookup(CLIENT_ID_VAR).unwrap_or_default(),
            lookup(CLIENT_SECRET_VAR).unwrap_or_default(),
            lookup(ACCOUNT_ID_VAR).unwrap_or_default(),
        );

        let missing = credentials.missing_vars();
        if !missing.is_empty() {
            warn!(
                "Missing environment variables: {}. Authentication will likely fail",
                missing.join(", ")
            );
        }

        credentials
    }

    /// Names of the environment variables whose values are empty.
    pub fn missing_vars(&self) -> Vec<&'static str> {
        [
            (CLIENT_ID_VAR, &self.client_id),
            (CLIENT_SECRET_VAR, &self.client_secret),
            (ACCOUNT_ID_VAR, &self.account_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("account_id", &self.account_id)
            .finish()
    }
}
