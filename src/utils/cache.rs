//! Time-bounded cache for the resolved configuration
//!
//! The resolver never touches global state: it holds an `Arc<dyn ConfigCache>`
//! so tests can swap in a fake clock or a counting store.

use crate::types::CalculatorConfig;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

/// Fixed cache key for the merged configuration
pub const CONFIG_CACHE_KEY: &str = "atera_compact_calculator_config_v1";

/// Cache key for the configuration built against `remote_url`
pub fn config_cache_key(remote_url: Option<&str>) -> String {
    match remote_url {
        Some(url) => format!("{}:{}", CONFIG_CACHE_KEY, url),
        None => CONFIG_CACHE_KEY.to_string(),
    }
}

/// Default lifetime of a cached configuration
pub const DEFAULT_CONFIG_TTL: Duration = Duration::from_secs(3600);

/// Source of the current time
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Key/value store with per-entry expiry
#[async_trait::async_trait]
pub trait ConfigCache: Send + Sync + std::fmt::Debug {
    /// Return the value if present and unexpired
    async fn get(&self, key: &str) -> Option<CalculatorConfig>;

    /// Store a value for `ttl`
    async fn set(&self, key: &str, value: CalculatorConfig, ttl: Duration);

    /// Evict a key
    async fn delete(&self, key: &str);
}

#[derive(Debug, Clone)]
struct CacheEntry {
    key: String,
    value: CalculatorConfig,
    stored_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

/// Single-entry in-process cache
///
/// Holds at most one key; storing a different key replaces the entry.
pub struct TransientCache {
    entry: RwLock<Option<CacheEntry>>,
    clock: Clock,
}

impl std::fmt::Debug for TransientCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransientCache").finish_non_exhaustive()
    }
}

impl TransientCache {
    /// Create an empty cache using the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(Utc::now))
    }

    /// Create an empty cache with a custom clock
    pub fn with_clock(clock: Clock) -> Self {
        Self {
            entry: RwLock::new(None),
            clock,
        }
    }

    /// When the current entry was stored, if any
    pub async fn stored_at(&self) -> Option<DateTime<Utc>> {
        self.entry.read().await.as_ref().map(|e| e.stored_at)
    }
}

impl Default for TransientCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ConfigCache for TransientCache {
    async fn get(&self, key: &str) -> Option<CalculatorConfig> {
        let now = (self.clock)();
        let guard = self.entry.read().await;

        match guard.as_ref() {
            Some(entry) if entry.key == key && entry.expires_at > now => {
                debug!("Cache hit for '{}' (expires {})", key, entry.expires_at);
                Some(entry.value.clone())
            }
            Some(entry) if entry.key == key => {
                debug!("Cache entry for '{}' expired at {}", key, entry.expires_at);
                None
            }
            _ => {
                debug!("Cache miss for '{}'", key);
                None
            }
        }
    }

    async fn set(&self, key: &str, value: CalculatorConfig, ttl: Duration) {
        let now = (self.clock)();
        let expires_at = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        *self.entry.write().await = Some(CacheEntry {
            key: key.to_string(),
            value,
            stored_at: now,
            expires_at,
        });
        debug!("Cached '{}' until {}", key, expires_at);
    }

    async fn delete(&self, key: &str) {
        let mut guard = self.entry.write().await;
        if guard.as_ref().is_some_and(|entry| entry.key == key) {
            *guard = None;
            debug!("Evicted '{}'", key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn manual_clock(start: DateTime<Utc>) -> (Clock, Arc<Mutex<DateTime<Utc>>>) {
        let now = Arc::new(Mutex::new(start));
        let handle = now.clone();
        let clock: Clock = Arc::new(move || *handle.lock().unwrap());
        (clock, now)
    }

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = TransientCache::new();
        cache
            .set(CONFIG_CACHE_KEY, CalculatorConfig::fallback(), DEFAULT_CONFIG_TTL)
            .await;

        let cached = cache.get(CONFIG_CACHE_KEY).await.unwrap();
        assert_eq!(cached, CalculatorConfig::fallback());
        assert!(cache.stored_at().await.is_some());
    }

    #[tokio::test]
    async fn test_entry_expires_after_ttl() {
        let start = Utc::now();
        let (clock, now) = manual_clock(start);
        let cache = TransientCache::with_clock(clock);

        cache
            .set(CONFIG_CACHE_KEY, CalculatorConfig::fallback(), DEFAULT_CONFIG_TTL)
            .await;

        *now.lock().unwrap() = start + chrono::Duration::minutes(59);
        assert!(cache.get(CONFIG_CACHE_KEY).await.is_some());

        *now.lock().unwrap() = start + chrono::Duration::minutes(60);
        assert!(cache.get(CONFIG_CACHE_KEY).await.is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let cache = TransientCache::new();
        cache
            .set(CONFIG_CACHE_KEY, CalculatorConfig::fallback(), DEFAULT_CONFIG_TTL)
            .await;

        cache.delete("some_other_key").await;
        assert!(cache.get(CONFIG_CACHE_KEY).await.is_some());

        cache.delete(CONFIG_CACHE_KEY).await;
        assert!(cache.get(CONFIG_CACHE_KEY).await.is_none());
    }

    #[tokio::test]
    async fn test_other_key_misses() {
        let cache = TransientCache::new();
        cache
            .set(CONFIG_CACHE_KEY, CalculatorConfig::fallback(), DEFAULT_CONFIG_TTL)
            .await;
        assert!(cache.get("atera_compact_calculator_config_v2").await.is_none());
    }

    #[tokio::test]
    async fn test_key_follows_remote_url() {
        let cache = TransientCache::new();
        let key = config_cache_key(Some("https://a.example.com/c.json"));
        cache
            .set(&key, CalculatorConfig::fallback(), DEFAULT_CONFIG_TTL)
            .await;

        assert!(cache.get(&key).await.is_some());
        assert!(
            cache
                .get(&config_cache_key(Some("https://b.example.com/c.json")))
                .await
                .is_none()
        );
        assert!(cache.get(&config_cache_key(None)).await.is_none());
    }

    #[tokio::test]
    async fn test_huge_ttl_does_not_overflow() {
        let cache = TransientCache::new();
        cache
            .set(
                CONFIG_CACHE_KEY,
                CalculatorConfig::fallback(),
                Duration::from_secs(u64::MAX),
            )
            .await;
        assert!(cache.get(CONFIG_CACHE_KEY).await.is_some());
    }
}
