//! Configuration resolution pipeline
//!
//! [`ConfigResolver`] ties the pieces together: it loads the bundled
//! document, attempts the remote override, merges the two and keeps the
//! result in an injected [`ConfigCache`] for the configured TTL.
//!
//! ```rust,no_run
//! use atera_compact_calculator::{ConfigResolver, Settings};
//!
//! # async fn example() -> atera_compact_calculator::Result<()> {
//! let resolver = ConfigResolver::new(Settings::default())?;
//! let config = resolver.load_config().await?;
//! println!("{} sliders, prefix {}", config.sliders.len(), config.currency_prefix);
//! # Ok(())
//! # }
//! ```

use super::{
    local::load_local,
    merge::{finalize, merge},
    options::{FileOptionStore, OptionStore, sanitize_remote_url},
    remote::{RemoteFetcher, RemoteSource},
};
use crate::{
    Error, Result,
    config::{Settings, precedence::remote_url_chain},
    error::format_error_for_logging,
    types::{CalculatorConfig, ConfigDocument},
    utils::cache::{ConfigCache, TransientCache, config_cache_key},
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Loads, merges and caches the calculator configuration
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    settings: Arc<Settings>,
    cache: Arc<dyn ConfigCache>,
    options: Arc<dyn OptionStore>,
    remote: Arc<dyn RemoteSource>,
}

impl ConfigResolver {
    /// Create a resolver with the default cache, file option store and HTTP fetcher
    pub fn new(settings: Settings) -> Result<Self> {
        let remote = RemoteFetcher::new(&settings)?;
        let options = FileOptionStore::new(settings.calculator.options_path());
        Ok(Self::with_parts(
            settings,
            Arc::new(TransientCache::new()),
            Arc::new(options),
            Arc::new(remote),
        ))
    }

    /// Create a resolver from explicit collaborators
    pub fn with_parts(
        settings: Settings,
        cache: Arc<dyn ConfigCache>,
        options: Arc<dyn OptionStore>,
        remote: Arc<dyn RemoteSource>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            cache,
            options,
            remote,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Read the bundled document from `calculator.local_config_path`
    pub async fn load_local(&self) -> Result<ConfigDocument> {
        load_local(&self.settings.calculator.local_config_path).await
    }

    /// Resolve the remote URL; `None` means the remote layer is disabled
    ///
    /// An unreadable option store is logged and treated as unset.
    pub async fn resolve_remote_url(&self) -> Option<String> {
        let persisted = match self.options.get_remote_url().await {
            Ok(value) => value,
            Err(e) => {
                warn!("Ignoring persisted remote URL: {}", e);
                None
            }
        };

        remote_url_chain(self.settings.calculator.remote_url.clone(), persisted).resolve()
    }

    /// Fetch the remote document, or [`Error::RemoteDisabled`] when no URL resolves
    pub async fn load_remote(&self) -> Result<ConfigDocument> {
        let url = self.resolve_remote_url().await;
        self.fetch_remote(url.as_deref()).await
    }

    async fn fetch_remote(&self, url: Option<&str>) -> Result<ConfigDocument> {
        let url = url.ok_or(Error::RemoteDisabled)?;
        self.remote.fetch(url).await
    }

    /// Merge two documents into the served configuration
    pub fn merge(&self, local: &ConfigDocument, remote: &ConfigDocument) -> CalculatorConfig {
        merge(local, remote)
    }

    /// Cached configuration, rebuilding it after expiry or invalidation
    ///
    /// Remote wins when it loads; a failed remote degrades to the local
    /// document. When both fail the remote error is returned.
    ///
    /// Entries are keyed by the resolved remote URL, so a setting persisted
    /// by another process misses the cache on the next call.
    pub async fn load_config(&self) -> Result<CalculatorConfig> {
        let remote_url = self.resolve_remote_url().await;
        let key = config_cache_key(remote_url.as_deref());

        if let Some(cached) = self.cache.get(&key).await {
            return Ok(cached);
        }

        let local = self.load_local().await;
        let remote = self.fetch_remote(remote_url.as_deref()).await;

        let config = match (local, remote) {
            (local, Ok(remote)) => {
                let base = local.unwrap_or_else(|e| {
                    warn!("Merging remote config over an empty base: {}", e);
                    ConfigDocument::default()
                });
                info!("Loaded calculator config with remote override");
                merge(&base, &remote)
            }
            (Ok(local), Err(e)) => {
                match e {
                    Error::RemoteDisabled => debug!("Remote config disabled, using local"),
                    ref other => warn!("Remote config unavailable, using local: {}", other),
                }
                finalize(local)
            }
            (Err(local_error), Err(remote_error)) => {
                error!(
                    remote = %format_error_for_logging(&remote_error),
                    "No calculator config available (local: {})",
                    local_error
                );
                return Err(remote_error);
            }
        };

        self.cache
            .set(
                &key,
                config.clone(),
                self.settings.calculator.cache_ttl(),
            )
            .await;

        Ok(config)
    }

    /// Resolved configuration, or the hard-coded fallback on total failure
    pub async fn config_or_fallback(&self) -> CalculatorConfig {
        match self.load_config().await {
            Ok(config) => config,
            Err(e) => {
                warn!("Rendering fallback calculator config: {}", e);
                CalculatorConfig::fallback()
            }
        }
    }

    /// Evict the cached configuration
    pub async fn invalidate_cache(&self) {
        info!("Invalidating cached calculator config");
        let remote_url = self.resolve_remote_url().await;
        self.cache
            .delete(&config_cache_key(remote_url.as_deref()))
            .await;
    }

    /// Current persisted remote URL; empty when unset
    pub async fn remote_url_setting(&self) -> Result<String> {
        Ok(self.options.get_remote_url().await?.unwrap_or_default())
    }

    /// Sanitize and persist a new remote URL, then invalidate the cache
    pub async fn update_remote_url(&self, value: &str) -> Result<String> {
        let sanitized = sanitize_remote_url(value)?;
        self.options.set_remote_url(&sanitized).await?;
        self.invalidate_cache().await;
        Ok(sanitized)
    }
}
