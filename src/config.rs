use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::event::EventCategory;

/// Main hookrelay configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub log_level: LogLevel,
    pub webhook: WebhookConfig,
    pub events: EventsConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }

    pub fn level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Off => log::LevelFilter::Off,
        }
    }
}

/// Shared HMAC secret. Never printed in full.
#[derive(Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Placeholder shown instead of the secret
    pub fn redacted(&self) -> &'static str {
        if self.0.is_empty() { "" } else { "********" }
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret({})", self.redacted())
    }
}

/// Where and how webhooks are delivered
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WebhookConfig {
    /// Endpoint that receives every POST
    pub endpoint_url: String,
    /// Key for the `X-Hub-Signature` HMAC
    pub secret: Secret,
    /// Upper bound on a single delivery, in seconds
    pub timeout_secs: u64,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            endpoint_url: String::new(),
            secret: Secret::default(),
            timeout_secs: 10,
        }
    }
}

impl WebhookConfig {
    /// Reject configurations that could never deliver anything.
    pub fn validate(&self) -> Result<()> {
        let url = self.endpoint_url.trim();
        if url.is_empty() {
            eyre::bail!("webhook.endpoint_url is not configured");
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            eyre::bail!("webhook.endpoint_url must be an http:// or https:// URL, got {}", url);
        }
        if self.secret.is_empty() {
            eyre::bail!("webhook.secret is not configured");
        }
        if self.timeout_secs == 0 {
            eyre::bail!("webhook.timeout_secs must be greater than zero");
        }
        Ok(())
    }
}

/// Per-category enable switches
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct EventsConfig {
    pub edited_article: bool,
    pub added_article: bool,
    pub removed_article: bool,
    pub moved_article: bool,
    pub new_user: bool,
    pub blocked_user: bool,
    pub file_upload: bool,
    pub protected_article: bool,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            edited_article: true,
            added_article: true,
            removed_article: true,
            moved_article: true,
            new_user: true,
            blocked_user: true,
            file_upload: true,
            protected_article: true,
        }
    }
}

impl EventsConfig {
    pub fn is_enabled(&self, category: EventCategory) -> bool {
        match category {
            EventCategory::EditedArticle => self.edited_article,
            EventCategory::AddedArticle => self.added_article,
            EventCategory::RemovedArticle => self.removed_article,
            EventCategory::MovedArticle => self.moved_article,
            EventCategory::NewUser => self.new_user,
            EventCategory::BlockedUser => self.blocked_user,
            EventCategory::FileUpload => self.file_upload,
            EventCategory::ProtectedArticle => self.protected_article,
        }
    }
}

impl Config {
    /// Load configuration with fallback chain, then apply environment overrides
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let mut config = Self::load_file(config_path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn load_file(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            let path = Self::expand_path(path);
            return Self::load_from_file(&path).context(format!("Failed to load config from {}", path.display()));
        }

        // Check HOOKRELAY_CONFIG env var
        if let Ok(env_path) = std::env::var("HOOKRELAY_CONFIG") {
            let path = Self::expand_path(Path::new(&env_path));
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from HOOKRELAY_CONFIG: {}", e);
                    }
                }
            }
        }

        for path in Self::candidate_paths() {
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", path.display(), e);
                    }
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Files searched when no explicit path is given, in priority order
    pub fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Ok(dir) = std::env::var("HOOKRELAY_DIR") {
            paths.push(PathBuf::from(dir).join("hookrelay.yaml"));
        }
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("hookrelay").join("hookrelay.yaml"));
        }
        paths.push(PathBuf::from("hookrelay.yaml"));
        paths
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("HOOKRELAY_ENDPOINT_URL") {
            self.webhook.endpoint_url = url;
        }
        if let Ok(secret) = std::env::var("HOOKRELAY_SECRET") {
            self.webhook.secret = Secret::new(secret);
        }
    }

    /// Copy safe to print: the secret is replaced by a placeholder
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        config.webhook.secret = Secret::new(self.webhook.secret.redacted());
        config
    }

    /// Expand a path that may contain ~ or env vars
    pub fn expand_path(path: &Path) -> PathBuf {
        let path_str = path.to_string_lossy();
        let expanded = shellexpand::full(&path_str).unwrap_or_else(|_| path_str.clone());
        PathBuf::from(expanded.as_ref())
    }
}
