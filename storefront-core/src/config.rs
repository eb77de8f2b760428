//! Configuration management
//!
//! Settings live in `settings.json` inside the storefront directory:
//! ```json
//! {
//!   "api": { "baseUrl": "https://fakestoreapi.com", "timeoutMs": 10000 },
//!   "cache": { "ttlSecs": 300 },
//!   "auth": { "username": "demo", "password": "demo", "tokenTtlHours": 24, "loginDelayMs": 500 }
//! }
//! ```
//! Every key is optional. Keys this crate does not know about are kept
//! when the file is saved again.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::adapters::fakestore::{DEFAULT_TIMEOUT_MS, FAKESTORE_PRODUCTION_URL};

pub const SETTINGS_FILE: &str = "settings.json";

/// Environment variable overriding `api.baseUrl`
pub const API_BASE_URL_ENV: &str = "STOREFRONT_API_BASE_URL";
/// Environment variable overriding `api.timeoutMs`
pub const API_TIMEOUT_ENV: &str = "STOREFRONT_API_TIMEOUT_MS";
/// Environment variable overriding `auth.username`
pub const DEMO_USERNAME_ENV: &str = "STOREFRONT_DEMO_USERNAME";
/// Environment variable overriding `auth.password`
pub const DEMO_PASSWORD_ENV: &str = "STOREFRONT_DEMO_PASSWORD";

const DEFAULT_CACHE_TTL_SECS: u64 = 5 * 60;
const DEFAULT_TOKEN_TTL_HOURS: u64 = 24;
const DEFAULT_LOGIN_DELAY_MS: u64 = 500;
const DEFAULT_DEMO_USERNAME: &str = "demo";
const DEFAULT_DEMO_PASSWORD: &str = "demo";
const SECS_PER_HOUR: u64 = 60 * 60;

/// Keys accepted by [`Config::set`]
pub const SETTING_KEYS: &[&str] = &[
    "api.baseUrl",
    "api.timeoutMs",
    "cache.ttlSecs",
    "auth.username",
    "auth.password",
    "auth.tokenTtlHours",
    "auth.loginDelayMs",
];

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    api: ApiSettings,
    #[serde(default)]
    cache: CacheSettings,
    #[serde(default)]
    auth: AuthSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CacheSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ttl_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token_ttl_hours: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    login_delay_ms: Option<u64>,
}

/// The credential pair accepted by the mock authenticator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new(DEFAULT_DEMO_USERNAME, DEFAULT_DEMO_PASSWORD)
    }
}

/// Storefront configuration (typed view of settings)
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub api_timeout: Duration,
    /// Freshness window of the response cache
    pub cache_ttl: Duration,
    pub credentials: Credentials,
    /// Lifetime of freshly minted session tokens
    pub token_ttl: Duration,
    /// Simulated round trip of the mock login call
    pub login_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_settings(SettingsFile::default())
    }
}

impl Config {
    /// Load config from the storefront directory
    ///
    /// A missing file yields defaults. Environment variables win over the
    /// file for the base URL, timeout and demo credentials.
    pub fn load(storefront_dir: &Path) -> Result<Self> {
        let mut config = Self::load_file(storefront_dir)?;
        config.apply_env_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Load config from `settings.json` alone, ignoring the environment
    pub fn load_file(storefront_dir: &Path) -> Result<Self> {
        Ok(Self::from_settings(read_settings(storefront_dir)?))
    }

    fn from_settings(raw: SettingsFile) -> Self {
        let api_base_url = raw
            .api
            .base_url
            .unwrap_or_else(|| FAKESTORE_PRODUCTION_URL.to_string());
        let credentials = Credentials::new(
            raw.auth
                .username
                .unwrap_or_else(|| DEFAULT_DEMO_USERNAME.to_string()),
            raw.auth
                .password
                .unwrap_or_else(|| DEFAULT_DEMO_PASSWORD.to_string()),
        );

        Self {
            api_base_url,
            api_timeout: Duration::from_millis(raw.api.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS)),
            cache_ttl: Duration::from_secs(raw.cache.ttl_secs.unwrap_or(DEFAULT_CACHE_TTL_SECS)),
            credentials,
            token_ttl: token_ttl_from_hours(
                raw.auth.token_ttl_hours.unwrap_or(DEFAULT_TOKEN_TTL_HOURS),
            ),
            login_delay: Duration::from_millis(
                raw.auth.login_delay_ms.unwrap_or(DEFAULT_LOGIN_DELAY_MS),
            ),
        }
    }

    fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var(API_BASE_URL_ENV) {
            if !url.trim().is_empty() {
                self.api_base_url = url;
            }
        }
        if let Some(value) = var(API_TIMEOUT_ENV) {
            match value.trim().parse::<u64>() {
                Ok(ms) => self.api_timeout = Duration::from_millis(ms),
                Err(_) => tracing::warn!("ignoring invalid {}={:?}", API_TIMEOUT_ENV, value),
            }
        }
        if let Some(username) = var(DEMO_USERNAME_ENV) {
            self.credentials.username = username;
        }
        if let Some(password) = var(DEMO_PASSWORD_ENV) {
            self.credentials.password = password;
        }
    }

    /// Update one setting by its `settings.json` path, e.g. `cache.ttlSecs`
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api.baseUrl" => self.api_base_url = value.to_string(),
            "api.timeoutMs" => self.api_timeout = Duration::from_millis(parse_number(key, value)?),
            "cache.ttlSecs" => self.cache_ttl = Duration::from_secs(parse_number(key, value)?),
            "auth.username" => self.credentials.username = value.to_string(),
            "auth.password" => self.credentials.password = value.to_string(),
            "auth.tokenTtlHours" => {
                let hours = parse_number(key, value)?;
                if hours.checked_mul(SECS_PER_HOUR).is_none() {
                    bail!("{} is too large: {}", key, hours);
                }
                self.token_ttl = token_ttl_from_hours(hours);
            }
            "auth.loginDelayMs" => self.login_delay = Duration::from_millis(parse_number(key, value)?),
            _ => bail!(
                "Unknown setting '{}'. Known settings: {}",
                key,
                SETTING_KEYS.join(", ")
            ),
        }
        Ok(())
    }

    /// Save config to the storefront directory
    ///
    /// Preserves settings this crate doesn't manage.
    pub fn save(&self, storefront_dir: &Path) -> Result<()> {
        let mut settings = read_settings(storefront_dir)?;

        settings.api.base_url = Some(self.api_base_url.clone());
        settings.api.timeout_ms = Some(self.api_timeout.as_millis() as u64);
        settings.cache.ttl_secs = Some(self.cache_ttl.as_secs());
        settings.auth.username = Some(self.credentials.username.clone());
        settings.auth.password = Some(self.credentials.password.clone());
        settings.auth.token_ttl_hours = Some(self.token_ttl.as_secs() / SECS_PER_HOUR);
        settings.auth.login_delay_ms = Some(self.login_delay.as_millis() as u64);

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(storefront_dir.join(SETTINGS_FILE), content)?;
        Ok(())
    }
}

/// Token lifetime in hours; values too large to express in seconds fall back
/// to the default
fn token_ttl_from_hours(hours: u64) -> Duration {
    match hours.checked_mul(SECS_PER_HOUR) {
        Some(secs) => Duration::from_secs(secs),
        None => {
            tracing::warn!(hours, "ignoring oversized auth.tokenTtlHours");
            Duration::from_secs(DEFAULT_TOKEN_TTL_HOURS * SECS_PER_HOUR)
        }
    }
}

fn parse_number(key: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .with_context(|| format!("{} expects a whole number, got '{}'", key, value))
}

fn read_settings(storefront_dir: &Path) -> Result<SettingsFile> {
    let settings_path = storefront_dir.join(SETTINGS_FILE);
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }

    let content = std::fs::read_to_string(&settings_path)?;
    Ok(serde_json::from_str(&content).unwrap_or_else(|e| {
        tracing::warn!(path = %settings_path.display(), "ignoring unreadable settings: {}", e);
        SettingsFile::default()
    }))
}
