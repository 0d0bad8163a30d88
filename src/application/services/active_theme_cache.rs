use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::application::services::theme_service::ThemeService;
use crate::domain::models::theme::Theme;
use crate::infrastructure::persistence::ttl_cache::TtlCache;

/// There is exactly one active theme system-wide, so the cache has one key.
pub const ACTIVE_THEME_CACHE_KEY: &str = "active-theme";

pub const DEFAULT_ACTIVE_THEME_TTL: Duration = Duration::from_secs(300);

/// Process-wide memo of `ThemeService::get_active_theme`.
///
/// Failures are not cached and read as "no active theme". Concurrent misses
/// may each hit the store; the lock only guards the map. A read that started
/// before an `invalidate` is returned to its caller but never stored.
pub struct ActiveThemeCache {
    theme_service: Arc<ThemeService>,
    cache: RwLock<TtlCache<Option<Theme>>>,
    generation: AtomicU64,
}

impl ActiveThemeCache {
    pub fn new(theme_service: Arc<ThemeService>, ttl: Duration) -> Self {
        Self {
            theme_service,
            cache: RwLock::new(TtlCache::new(ttl)),
            generation: AtomicU64::new(0),
        }
    }

    pub async fn get(&self) -> Option<Theme> {
        if let Some(cached) = self.cache.read().await.get(ACTIVE_THEME_CACHE_KEY) {
            return cached;
        }

        let generation = self.generation.load(Ordering::SeqCst);
        match self.theme_service.get_active_theme().await {
            Ok(theme) => {
                let mut cache = self.cache.write().await;
                if self.generation.load(Ordering::SeqCst) == generation {
                    cache.set(ACTIVE_THEME_CACHE_KEY, theme.clone());
                } else {
                    tracing::debug!("Active theme changed during lookup, not caching the result");
                }
                theme
            }
            Err(error) => {
                tracing::warn!("Active theme lookup failed, serving no theme: {}", error);
                None
            }
        }
    }

    /// Drop the cached value so the next `get` reads through.
    pub async fn invalidate(&self) {
        tracing::debug!("Invalidating active theme cache");
        let mut cache = self.cache.write().await;
        self.generation.fetch_add(1, Ordering::SeqCst);
        cache.remove(ACTIVE_THEME_CACHE_KEY);
    }
}
