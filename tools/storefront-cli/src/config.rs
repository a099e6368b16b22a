//! CLI configuration.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use storefront_api::DEFAULT_BASE_URL;
use storefront_core::cart::PricingPolicy;

/// Environment variable that overrides `api.base_url`.
pub const API_URL_ENV: &str = "STOREFRONT_API_URL";

/// File names searched for, in order, in each directory.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Backend connection.
    #[serde(default)]
    pub api: ApiConfig,

    /// Local state.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Shipping and tax rules for the order summary.
    #[serde(default)]
    pub pricing: PricingPolicy,

    /// Environment-specific overrides.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub environments: HashMap<String, EnvironmentConfig>,
}

impl StorefrontConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Search `start` and its parents for a config file.
    pub fn find(start: &Path) -> Option<PathBuf> {
        start.ancestors().find_map(|dir| {
            CONFIG_FILE_NAMES
                .iter()
                .map(|name| dir.join(name))
                .find(|path| path.is_file())
        })
    }

    /// Get the config with the named environment's overrides applied.
    pub fn for_environment(&self, env: &str) -> Result<StorefrontConfig> {
        let Some(overrides) = self.environments.get(env) else {
            bail!("Unknown environment: {}", env);
        };

        let mut config = self.clone();
        if let Some(ref api) = overrides.api {
            config.api = api.clone();
        }
        if let Some(ref storage) = overrides.storage {
            config.storage = storage.clone();
        }
        if let Some(pricing) = overrides.pricing {
            config.pricing = pricing;
        }
        Ok(config)
    }

    /// Replace the base URL when `url` is set and non-empty.
    pub fn with_api_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url;
        }
        self
    }

    /// Directory holding the cart and token.
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .unwrap_or_else(default_data_dir)
    }
}

/// Backend connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the REST API, including the `/api` prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Local storage settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Where the cart and session token live.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

/// Environment-specific configuration overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    #[serde(default)]
    pub api: Option<ApiConfig>,
    #[serde(default)]
    pub storage: Option<StorageConfig>,
    #[serde(default)]
    pub pricing: Option<PricingPolicy>,
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Platform data directory for the CLI.
fn default_data_dir() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("storefront"),
        None => std::env::temp_dir().join("storefront"),
    }
}

/// Generate a default storefront.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Storefront client configuration

[api]
base_url = "{base_url}"
timeout_secs = 30

[storage]
# data_dir = "~/.local/share/storefront"

[pricing]
free_shipping_threshold = 100.0
flat_shipping = 10.0
tax_rate_percent = 7.0

[environments.staging]
[environments.staging.api]
base_url = "https://staging.example.com/api"
timeout_secs = 30
"#,
        base_url = DEFAULT_BASE_URL
    )
}
