//! Redirect setting management commands.
//!
//! These talk to the database directly; a running app instance keeps serving
//! its cached copy for up to a minute after a change.
//!
//! # Environment Variables
//!
//! - `APP_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)

use redirect404_app::db::{RedirectSettingRepository, RepositoryError};
use redirect404_core::{RedirectSettingUpdate, ShopDomain, ShopDomainError};
use thiserror::Error;

use super::DatabaseError;

/// Errors that can occur during settings operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Invalid shop: {0}")]
    InvalidShop(#[from] ShopDomainError),

    #[error("No redirect setting for {0}")]
    NotFound(ShopDomain),
}

/// Print a shop's redirect setting.
pub async fn show(shop: &str) -> Result<(), SettingsError> {
    let shop = ShopDomain::parse(shop)?;
    let pool = super::connect().await?;

    let setting = RedirectSettingRepository::new(&pool)
        .get_by_shop(&shop)
        .await?
        .ok_or_else(|| SettingsError::NotFound(shop.clone()))?;

    #[allow(clippy::print_stdout)]
    {
        println!("Shop:         {}", setting.shop);
        println!("Redirect URL: {}", setting.redirect_url);
        println!("Enabled:      {}", setting.is_enabled);
        println!("Updated:      {}", setting.updated_at);
    }

    Ok(())
}

/// Create or update a shop's redirect setting.
pub async fn set(shop: &str, redirect_url: String, is_enabled: bool) -> Result<(), SettingsError> {
    let shop = ShopDomain::parse(shop)?;
    let pool = super::connect().await?;

    let update = RedirectSettingUpdate {
        redirect_url,
        is_enabled,
    };
    let setting = RedirectSettingRepository::new(&pool)
        .upsert(&shop, &update)
        .await?;

    tracing::info!(
        shop = %setting.shop,
        is_enabled = setting.is_enabled,
        "Redirect setting saved"
    );
    Ok(())
}

/// Delete a shop's redirect setting.
pub async fn delete(shop: &str) -> Result<(), SettingsError> {
    let shop = ShopDomain::parse(shop)?;
    let pool = super::connect().await?;

    if !RedirectSettingRepository::new(&pool).delete(&shop).await? {
        return Err(SettingsError::NotFound(shop));
    }

    tracing::info!(shop = %shop, "Redirect setting deleted");
    Ok(())
}
