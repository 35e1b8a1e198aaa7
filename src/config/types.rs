//! Configuration types, defaults, loading, and validation.

use super::secrets::SecretString;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Collection id of the blog collection on the content API.
/// Selecting it switches step 3 to the blog form and makes `category` required.
pub const DEFAULT_BLOG_COLLECTION_ID: &str = "66a345b2baa543bc5924b256";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// External service endpoints
    #[serde(default)]
    pub api: ApiConfig,

    /// Chat assistant webhook
    #[serde(default)]
    pub chat: ChatConfig,

    /// Wizard behaviour
    #[serde(default)]
    pub wizard: WizardConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How the collection listing endpoint takes the site id
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionsRoute {
    /// `/api/collections?siteId=<id>`
    #[default]
    Query,
    /// `/api/collections/<id>`
    Path,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Submission webhook (POST, JSON body)
    #[serde(default)]
    pub webhook_url: String,

    /// Base URL of the content API (sites, collections, model deployments)
    #[serde(default = "default_content_api_url")]
    pub content_api_url: String,

    /// Where the user is sent to authenticate (auth page, HTTP 401)
    #[serde(default = "default_auth_url")]
    pub auth_url: String,

    #[serde(default)]
    pub collections_route: CollectionsRoute,

    /// Optional bearer token for the content API and the webhook.
    /// Never written back by `save()`.
    #[serde(default, skip_serializing)]
    pub api_token: Option<SecretString>,
}

fn default_content_api_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_auth_url() -> String {
    "http://localhost:8000/auth/webflow".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            content_api_url: default_content_api_url(),
            auth_url: default_auth_url(),
            collections_route: CollectionsRoute::default(),
            api_token: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Chat assistant webhook (POST `{message, chatHistory, sessionId}`)
    #[serde(default)]
    pub webhook_url: String,

    /// Phrases that mark a bot reply as the final prompt (case-insensitive)
    #[serde(default = "default_final_prompt_markers")]
    pub final_prompt_markers: Vec<String>,
}

fn default_final_prompt_markers() -> Vec<String> {
    vec!["final prompt".to_string()]
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            final_prompt_markers: default_final_prompt_markers(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardConfig {
    #[serde(default = "default_blog_collection_id")]
    pub blog_collection_id: String,

    /// Seconds before a notification disappears on its own
    #[serde(default = "default_notification_timeout")]
    pub notification_timeout_secs: u64,
}

fn default_blog_collection_id() -> String {
    DEFAULT_BLOG_COLLECTION_ID.to_string()
}

fn default_notification_timeout() -> u64 {
    5
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            blog_collection_id: default_blog_collection_id(),
            notification_timeout_secs: default_notification_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log to this file instead of the rolling file in the logs directory
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Home directory for config, session and logs: `~/.prompt-wizard`
pub fn wizard_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".prompt-wizard")
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. Default values
    /// 2. System config: ~/.prompt-wizard/config.toml
    /// 3. Local config: ./prompt-wizard.toml
    /// 4. Environment variables
    pub fn load() -> Result<Self> {
        tracing::debug!("Loading configuration...");

        let mut config = Self::default();

        let system_config_path = Self::system_config_path();
        if system_config_path.exists() {
            tracing::debug!("Loading system config from: {:?}", system_config_path);
            config = Self::load_file(&system_config_path)?;
        }

        let local_config_path = Self::local_config_path();
        if local_config_path.exists() {
            tracing::debug!("Loading local config from: {:?}", local_config_path);
            config = Self::load_file(&local_config_path)?;
        }

        config = Self::apply_env_overrides(config, |key| std::env::var(key).ok());

        tracing::debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from a specific file path, then apply env overrides
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading configuration from custom path: {:?}", path);

        if !path.exists() {
            anyhow::bail!("Config file not found: {:?}", path);
        }
        let config = Self::load_file(path)?;
        Ok(Self::apply_env_overrides(config, |key| {
            std::env::var(key).ok()
        }))
    }

    /// ~/.prompt-wizard/config.toml
    pub fn system_config_path() -> PathBuf {
        wizard_home().join("config.toml")
    }

    /// ./prompt-wizard.toml
    fn local_config_path() -> PathBuf {
        PathBuf::from("./prompt-wizard.toml")
    }

    /// Parse one TOML file. A later file replaces an earlier one wholesale;
    /// missing sections fall back to defaults through `#[serde(default)]`.
    fn load_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Apply environment variable overrides.
    /// `lookup` is `std::env::var` in production and a map in tests.
    pub fn apply_env_overrides<F>(mut config: Self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("PROMPT_WIZARD_WEBHOOK_URL") {
            config.api.webhook_url = url;
        }
        if let Some(url) = lookup("PROMPT_WIZARD_CONTENT_API_URL") {
            config.api.content_api_url = url;
        }
        if let Some(url) = lookup("PROMPT_WIZARD_AUTH_URL") {
            config.api.auth_url = url;
        }
        if let Some(token) = lookup("PROMPT_WIZARD_API_TOKEN")
            && !token.trim().is_empty()
        {
            config.api.api_token = Some(SecretString::new(token));
        }
        if let Some(url) = lookup("PROMPT_WIZARD_CHAT_WEBHOOK_URL") {
            config.chat.webhook_url = url;
        }
        if let Some(level) = lookup("PROMPT_WIZARD_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Some(file) = lookup("PROMPT_WIZARD_LOG_FILE") {
            config.logging.file = Some(PathBuf::from(file));
        }

        config
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        tracing::debug!("Validating configuration...");

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            anyhow::bail!(
                "Invalid log level: {}. Must be one of: {:?}",
                self.logging.level,
                valid_levels
            );
        }

        // Empty URLs are allowed (the feature is just unavailable), bad schemes are not
        for (name, url) in [
            ("api.webhook_url", &self.api.webhook_url),
            ("api.content_api_url", &self.api.content_api_url),
            ("api.auth_url", &self.api.auth_url),
            ("chat.webhook_url", &self.chat.webhook_url),
        ] {
            if !url.is_empty() && !(url.starts_with("http://") || url.starts_with("https://")) {
                anyhow::bail!("{} must be an http(s) URL, got {:?}", name, url);
            }
        }

        if self.wizard.blog_collection_id.trim().is_empty() {
            anyhow::bail!("wizard.blog_collection_id must not be empty");
        }

        if self.api.webhook_url.is_empty() {
            tracing::warn!("api.webhook_url is not set; submissions will fail");
        }

        tracing::debug!("Configuration validation passed");
        Ok(())
    }

    /// Save configuration to a file (the API token is never written)
    pub fn save(&self, path: &Path) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        fs::write(path, toml_string)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        tracing::info!("Configuration saved to: {:?}", path);
        Ok(())
    }
}
