//! Application configuration.
//!
//! Loaded from an optional TOML file, then secrets are overridden from the
//! environment (a `.env` file is honoured by the binary through `dotenvy`).
//! Every section has defaults, so an empty file is a valid config. There is
//! deliberately no default API key.

use std::path::Path;

use serde::Deserialize;

use crate::domain::error::DomainError;
use crate::domain::values::scoring_profile::ScoringProfile;
use crate::infrastructure::logging::LoggingConfig;

pub const ENV_CONFIG_PATH: &str = "CONGRESSINTEL_CONFIG";
pub const ENV_QUIVER_API_KEY: &str = "QUIVER_API_KEY";
pub const ENV_WEBHOOK_URL: &str = "CONGRESSINTEL_WEBHOOK_URL";
pub const ENV_WEBHOOK_TOKEN: &str = "CONGRESSINTEL_WEBHOOK_TOKEN";
pub const ENV_ALERT_TO: &str = "CONGRESSINTEL_ALERT_TO";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub feed: FeedConfig,
    pub prices: PriceConfig,
    pub cache: CacheConfig,
    pub logging: LoggingConfig,
    pub notifications: NotificationConfig,
    pub portfolio: PortfolioConfig,
    pub scoring: ScoringProfile,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.quiverquant.com/beta".into(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PriceConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for PriceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".into(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_secs: 3600 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// JSON webhook that relays alert digests (email gateway, chat hook).
    pub webhook_url: Option<String>,
    pub webhook_token: Option<String>,
    /// Where the relay should deliver the digest.
    pub destination: Option<String>,
    pub subject: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            webhook_token: None,
            destination: None,
            subject: "Congress Alerts".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PortfolioConfig {
    /// Default capital for the model portfolio.
    pub capital: f64,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self { capital: 200.0 }
    }
}

impl AppConfig {
    /// Load from `path` (when given) and apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, DomainError> {
        let mut config = match path {
            Some(p) => {
                let content = std::fs::read_to_string(p)
                    .map_err(|e| DomainError::Config(format!("cannot read {}: {e}", p.display())))?;
                Self::parse_toml(&content)?
            }
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn parse_toml(content: &str) -> Result<Self, DomainError> {
        toml::from_str(content).map_err(|e| DomainError::Config(e.to_string()))
    }

    /// Override secrets from `lookup` (the process environment in production).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(key) = lookup(ENV_QUIVER_API_KEY) {
            self.feed.api_key = Some(key);
        }
        if let Some(url) = lookup(ENV_WEBHOOK_URL) {
            self.notifications.webhook_url = Some(url);
        }
        if let Some(token) = lookup(ENV_WEBHOOK_TOKEN) {
            self.notifications.webhook_token = Some(token);
        }
        if let Some(to) = lookup(ENV_ALERT_TO) {
            self.notifications.destination = Some(to);
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        self.scoring.validate().map_err(DomainError::Config)?;
        if !(self.portfolio.capital.is_finite() && self.portfolio.capital > 0.0) {
            return Err(DomainError::Config(format!(
                "portfolio.capital must be positive, got {}",
                self.portfolio.capital
            )));
        }
        Ok(())
    }
}
