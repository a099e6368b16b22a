//! CLI execution context.

use std::path::PathBuf;

use anyhow::{bail, Context as _, Result};
use storefront_api::{FetchClient, StorefrontApi};
use storefront_auth::{AuthManager, User};
use storefront_cache::Cache;
use storefront_core::cart::CartStore;

use crate::config::{StorefrontConfig, API_URL_ENV};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration, with environment overrides applied.
    pub config: StorefrontConfig,
    /// File the config was read from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Persisted cart.
    pub cart: CartStore,
    /// Auth session.
    pub auth: AuthManager,
    /// REST client.
    pub api: StorefrontApi,
    session_restored: bool,
}

impl Context {
    /// Load config and open local state.
    pub fn load(config_path: Option<&str>, env: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config_path = match config_path {
            Some(path) => Some(PathBuf::from(path)),
            // Try to find config in current directory or parent directories
            None => StorefrontConfig::find(&cwd),
        };
        let mut config = match &config_path {
            Some(path) => StorefrontConfig::load(path)?,
            None => StorefrontConfig::default(),
        };
        if let Some(env) = env {
            config = config.for_environment(env)?;
        }
        let config = config.with_api_url(std::env::var(API_URL_ENV).ok());

        let data_dir = config.data_dir();
        let cache = Cache::open(&data_dir)
            .with_context(|| format!("Failed to open data directory: {}", data_dir.display()))?;
        tracing::debug!(data_dir = %data_dir.display(), base_url = %config.api.base_url, "context loaded");

        let client = FetchClient::new(config.api.base_url.clone(), config.api.timeout())
            .context("Failed to create HTTP client")?;

        Ok(Self {
            cart: CartStore::open(cache.clone()),
            auth: AuthManager::new(cache),
            api: StorefrontApi::new(client),
            config,
            config_path,
            output,
            cwd,
            session_restored: false,
        })
    }

    /// Restore the saved session once and attach its token to the API client.
    pub async fn restore_session(&mut self) {
        if self.session_restored {
            return;
        }
        self.auth.init(&self.api).await;
        self.api.set_token(self.auth.token());
        self.session_restored = true;
    }

    /// Restore the session and fail unless someone is signed in.
    pub async fn require_user(&mut self) -> Result<User> {
        self.restore_session().await;
        match self.auth.user() {
            Some(user) => Ok(user.clone()),
            None => match self.auth.error() {
                Some(reason) => bail!("{}. Run `storefront auth login` again.", reason),
                None => bail!("Not signed in. Run `storefront auth login` first."),
            },
        }
    }

    /// Point the API client at the current session token.
    pub fn sync_token(&mut self) {
        self.api.set_token(self.auth.token());
        self.session_restored = true;
    }
}
