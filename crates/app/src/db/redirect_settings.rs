//! Redirect settings repository.
//!
//! One row per shop in `redirect_settings`, keyed by the unique `shop` column.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use redirect404_core::{RedirectSetting, RedirectSettingId, RedirectSettingUpdate, ShopDomain};

use super::RepositoryError;

/// Internal row type for `PostgreSQL` queries.
///
/// `shop` decodes through [`ShopDomain`], so a malformed value stored by hand
/// surfaces as a decode error instead of reaching handlers.
#[derive(Debug, sqlx::FromRow)]
struct RedirectSettingRow {
    id: RedirectSettingId,
    shop: ShopDomain,
    redirect_url: String,
    is_enabled: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<RedirectSettingRow> for RedirectSetting {
    fn from(row: RedirectSettingRow) -> Self {
        Self {
            id: row.id,
            shop: row.shop,
            redirect_url: row.redirect_url,
            is_enabled: row.is_enabled,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for redirect setting database operations.
pub struct RedirectSettingRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RedirectSettingRepository<'a> {
    /// Create a new redirect setting repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the setting for a shop.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails or the stored
    /// shop is not a valid domain.
    pub async fn get_by_shop(
        &self,
        shop: &ShopDomain,
    ) -> Result<Option<RedirectSetting>, RepositoryError> {
        let row = sqlx::query_as::<_, RedirectSettingRow>(
            r"
            SELECT id, shop, redirect_url, is_enabled, created_at, updated_at
            FROM redirect_settings
            WHERE shop = $1
            ",
        )
        .bind(shop)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(RedirectSetting::from))
    }

    /// Create or update the setting for a shop.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert(
        &self,
        shop: &ShopDomain,
        update: &RedirectSettingUpdate,
    ) -> Result<RedirectSetting, RepositoryError> {
        let row = sqlx::query_as::<_, RedirectSettingRow>(
            r"
            INSERT INTO redirect_settings (shop, redirect_url, is_enabled)
            VALUES ($1, $2, $3)
            ON CONFLICT (shop) DO UPDATE SET
                redirect_url = EXCLUDED.redirect_url,
                is_enabled = EXCLUDED.is_enabled,
                updated_at = NOW()
            RETURNING id, shop, redirect_url, is_enabled, created_at, updated_at
            ",
        )
        .bind(shop)
        .bind(&update.redirect_url)
        .bind(update.is_enabled)
        .fetch_one(self.pool)
        .await?;

        Ok(RedirectSetting::from(row))
    }

    /// Delete the setting for a shop.
    ///
    /// Returns `true` if a row was removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, shop: &ShopDomain) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM redirect_settings WHERE shop = $1")
            .bind(shop)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
