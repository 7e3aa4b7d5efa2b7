//
//  bitbucket-cloud
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Two layers of configuration live here:
//!
//! - [`ClientConfig`]: the immutable settings a
//!   [`BitbucketClient`](crate::api::BitbucketClient) is built from. Every
//!   request and every cursor created through that client sees the same
//!   values; there is no process-wide default that can change underneath it.
//! - [`Config`]: the TOML file the `bbc` binary reads its defaults from.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/bbc/config.toml`
//! - **macOS**: `~/Library/Application Support/bbc/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\bbc\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [api]
//! base_url = "https://api.bitbucket.org/2.0"
//! timeout_secs = 30
//! page_len = 50
//!
//! [auth]
//! username = "jane"
//! ```
//!
//! Secrets are never read from or written to this file. Tokens and app
//! passwords come from the environment or the command line.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::auth::AuthCredential;

/// Default Bitbucket Cloud API root.
pub const DEFAULT_BASE_URL: &str = "https://api.bitbucket.org/2.0";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings shared by every request a client sends.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use bitbucket_cloud::config::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_timeout(Duration::from_secs(5))
///     .with_page_len(100);
/// assert_eq!(config.base_url, "https://api.bitbucket.org/2.0");
/// assert_eq!(config.page_len, Some(100));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// API root every path is resolved against.
    pub base_url: String,

    /// `User-Agent` header value.
    pub user_agent: String,

    /// Per-request timeout, covering connect and body read.
    pub timeout: Duration,

    /// Requested page size. `None` leaves it to the server.
    pub page_len: Option<u32>,

    /// Credential attached to every request. `None` means anonymous.
    pub auth: Option<AuthCredential>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: default_user_agent(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            page_len: None,
            auth: None,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_page_len(mut self, page_len: u32) -> Self {
        self.page_len = Some(page_len);
        self
    }

    pub fn with_auth(mut self, auth: AuthCredential) -> Self {
        self.auth = Some(auth);
        self
    }
}

fn default_user_agent() -> String {
    format!("{}/{}", crate::APP_NAME, crate::VERSION)
}

/// The `bbc` configuration file.
///
/// # Notes
///
/// - All fields use `#[serde(default)]`, so a partial file is valid
/// - A missing file is not an error; defaults are used
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// API connection settings.
    #[serde(default)]
    pub api: ApiSection,

    /// Non-secret authentication settings.
    #[serde(default)]
    pub auth: AuthSection,
}

/// The `[api]` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_len: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

/// The `[auth]` table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthSection {
    /// Username paired with an app password from the environment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Keys accepted by [`Config::get`] and [`Config::set`].
pub const CONFIG_KEYS: &[&str] = &[
    "api.base_url",
    "api.timeout_secs",
    "api.page_len",
    "api.user_agent",
    "auth.username",
];

impl Config {
    /// Loads configuration from the default location.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read or is not valid TOML.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads configuration from `path`, or defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Writes the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Returns the path to the configuration file.
    ///
    /// The file may not exist; this only returns where it would be.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Gets a value by dotted key.
    ///
    /// ```rust
    /// use bitbucket_cloud::config::Config;
    ///
    /// let mut config = Config::default();
    /// assert_eq!(config.get("api.page_len"), None);
    /// config.set("api.page_len", "25")?;
    /// assert_eq!(config.get("api.page_len"), Some("25".to_string()));
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "api.base_url" => self.api.base_url.clone(),
            "api.timeout_secs" => self.api.timeout_secs.map(|v| v.to_string()),
            "api.page_len" => self.api.page_len.map(|v| v.to_string()),
            "api.user_agent" => self.api.user_agent.clone(),
            "auth.username" => self.auth.username.clone(),
            _ => None,
        }
    }

    /// Sets a value by dotted key.
    ///
    /// Changes are only persisted when [`Config::save`] is called.
    ///
    /// # Errors
    ///
    /// Fails for unknown keys and for values that do not parse as the
    /// field's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api.base_url" => {
                url::Url::parse(value).with_context(|| format!("Invalid URL: {}", value))?;
                self.api.base_url = Some(value.to_string());
            }
            "api.timeout_secs" => {
                self.api.timeout_secs = Some(
                    value
                        .parse()
                        .with_context(|| format!("Invalid timeout: {}", value))?,
                );
            }
            "api.page_len" => {
                let page_len: u32 = value
                    .parse()
                    .with_context(|| format!("Invalid page length: {}", value))?;
                if page_len == 0 {
                    bail!("Page length must be at least 1");
                }
                self.api.page_len = Some(page_len);
            }
            "api.user_agent" => self.api.user_agent = Some(value.to_string()),
            "auth.username" => self.auth.username = Some(value.to_string()),
            _ => bail!(
                "Unknown config key '{}'. Valid keys: {}",
                key,
                CONFIG_KEYS.join(", ")
            ),
        }
        Ok(())
    }

    /// Builds the client settings described by this file.
    ///
    /// Authentication is left unset; the caller decides where secrets
    /// come from.
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::default();
        if let Some(base_url) = &self.api.base_url {
            config = config.with_base_url(base_url.as_str());
        }
        if let Some(secs) = self.api.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if let Some(page_len) = self.api.page_len {
            config = config.with_page_len(page_len);
        }
        if let Some(user_agent) = &self.api.user_agent {
            config = config.with_user_agent(user_agent.as_str());
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_client_config_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.user_agent.starts_with("bbc/"));
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.page_len, None);
        assert!(config.auth.is_none());
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set("api.page_len", "50").unwrap();
        config.set("auth.username", "jane").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.get("auth.username"), Some("jane".to_string()));
    }

    #[test]
    fn test_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\ntimeout_secs = 5\n").unwrap();

        let client = Config::load_from(&path).unwrap().client_config();
        assert_eq!(client.timeout, Duration::from_secs(5));
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid config file"));
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("api.page_len", "0").is_err());
        assert!(config.set("api.page_len", "many").is_err());
        assert!(config.set("api.base_url", "not a url").is_err());
        assert!(config.set("core.editor", "vim").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_client_config_from_file_values() {
        let mut config = Config::default();
        config.set("api.base_url", "https://bb.internal/2.0").unwrap();
        config.set("api.user_agent", "ci-bot").unwrap();

        let client = config.client_config();
        assert_eq!(client.base_url, "https://bb.internal/2.0");
        assert_eq!(client.user_agent, "ci-bot");
        assert_eq!(client.page_len, None);
    }
}
