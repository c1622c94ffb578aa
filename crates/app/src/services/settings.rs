//! Cached access to redirect settings.
//!
//! The storefront script asks for a shop's setting on every 404 page view, so
//! lookups are cached in memory (`moka`, 60-second TTL). Shops without a
//! record are cached too. Writes through [`RedirectSettingsService::save`]
//! replace the cached entry; other instances pick the change up when their
//! entry expires.

use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;
use tracing::{debug, instrument};

use redirect404_core::{RedirectSetting, RedirectSettingUpdate, ShopDomain};

use crate::db::{RedirectSettingRepository, RepositoryError};

const CACHE_CAPACITY: u64 = 10_000;
const CACHE_TTL: Duration = Duration::from_secs(60);

/// Redirect settings backed by `PostgreSQL` with an in-memory cache.
#[derive(Clone)]
pub struct RedirectSettingsService {
    pool: PgPool,
    cache: Cache<ShopDomain, Option<RedirectSetting>>,
}

impl RedirectSettingsService {
    /// Create a new settings service.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();

        Self { pool, cache }
    }

    /// Look up the setting for a shop.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the database lookup fails.
    #[instrument(skip(self, shop), fields(shop = %shop))]
    pub async fn find(
        &self,
        shop: &ShopDomain,
    ) -> Result<Option<RedirectSetting>, RepositoryError> {
        if let Some(cached) = self.cache.get(shop).await {
            debug!("Redirect setting cache hit");
            return Ok(cached);
        }

        let loaded = RedirectSettingRepository::new(&self.pool)
            .get_by_shop(shop)
            .await?;

        Ok(self.remember(shop, loaded).await)
    }

    /// Create or update the setting for a shop.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the upsert fails.
    #[instrument(skip(self, shop, update), fields(shop = %shop))]
    pub async fn save(
        &self,
        shop: &ShopDomain,
        update: &RedirectSettingUpdate,
    ) -> Result<RedirectSetting, RepositoryError> {
        let setting = RedirectSettingRepository::new(&self.pool)
            .upsert(shop, update)
            .await?;
        self.store(shop, &setting).await;

        tracing::info!(
            is_enabled = setting.is_enabled,
            has_url = !setting.redirect_url.is_empty(),
            "Redirect setting saved"
        );

        Ok(setting)
    }

    /// Cache a value read from the database unless a newer one is present.
    async fn remember(
        &self,
        shop: &ShopDomain,
        loaded: Option<RedirectSetting>,
    ) -> Option<RedirectSetting> {
        self.cache
            .entry(shop.clone())
            .or_insert(loaded)
            .await
            .into_value()
    }

    /// Cache a value just written to the database, replacing any entry.
    async fn store(&self, shop: &ShopDomain, setting: &RedirectSetting) {
        self.cache
            .insert(shop.clone(), Some(setting.clone()))
            .await;
    }
}
