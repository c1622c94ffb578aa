//! App Proxy routes.
//!
//! Shopify forwards storefront requests for `/apps/404redirect/*` to
//! `/api/proxy/*` on this service, appending `shop`, `path_prefix`,
//! `timestamp` and a `signature` over all query parameters.

use axum::{
    Json,
    extract::{Query, State},
};
use secrecy::ExposeSecret;
use tracing::instrument;

use redirect404_core::{QueryParams, RedirectTarget, ShopDomain, proxy};

use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Check that a proxied request was signed by Shopify.
///
/// Only enforced in production. Development mode accepts unsigned requests so
/// the storefront script can be exercised locally.
///
/// # Errors
///
/// - `AppError::Configuration` if the API secret is not configured
/// - `AppError::Unauthorized` if the signature is missing or wrong
pub fn authorize_proxy_request(config: &AppConfig, params: &QueryParams) -> Result<()> {
    if !config.environment.is_production() {
        return Ok(());
    }

    let Some(secret) = config.shopify.api_secret.as_ref() else {
        return Err(AppError::Configuration(
            "SHOPIFY_API_SECRET is not set".to_string(),
        ));
    };

    if !proxy::verify(params, secret.expose_secret()) {
        tracing::warn!(
            shop = params.get("shop").map(String::as_str),
            "Invalid App Proxy signature"
        );
        return Err(AppError::Unauthorized("Invalid signature".to_string()));
    }

    Ok(())
}

/// Extract the `shop` parameter.
///
/// # Errors
///
/// Returns `AppError::BadRequest` if `shop` is missing or not a valid domain.
pub fn shop_param(params: &QueryParams) -> Result<ShopDomain> {
    params
        .get("shop")
        .and_then(|shop| ShopDomain::parse(shop).ok())
        .ok_or_else(|| AppError::BadRequest("Shop parameter is required".to_string()))
}

/// GET /api/proxy/settings - Redirect target for the storefront script.
///
/// Shops without a stored setting get an empty, disabled target.
#[instrument(skip(state, params))]
pub async fn settings(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<RedirectTarget>> {
    authorize_proxy_request(state.config(), &params)?;
    let shop = shop_param(&params)?;

    let setting = state.settings().find(&shop).await?;
    let target = setting
        .as_ref()
        .map_or_else(RedirectTarget::disabled, RedirectTarget::from);

    Ok(Json(target))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;
    use crate::config::{Environment, ShopifyAppConfig};

    const SECRET: &str = "9f3a1c7e5b2d4068af1e3c5b7d9f0a2c";

    fn config(environment: Environment, secret: Option<&str>) -> AppConfig {
        AppConfig {
            database_url: SecretString::from("postgres://localhost/test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            environment,
            shopify: ShopifyAppConfig {
                api_key: "key".to_string(),
                api_secret: secret.map(SecretString::from),
            },
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    fn signed_params(secret: &str) -> QueryParams {
        let mut params = QueryParams::new();
        params.insert("shop".to_string(), "example.myshopify.com".to_string());
        params.insert("path_prefix".to_string(), "/apps/404redirect".to_string());
        params.insert("timestamp".to_string(), "1700000000".to_string());
        let signature = proxy::sign(&params, secret).unwrap();
        params.insert(proxy::SIGNATURE_PARAM.to_string(), signature);
        params
    }

    #[test]
    fn test_authorize_valid_signature() {
        let config = config(Environment::Production, Some(SECRET));
        assert!(authorize_proxy_request(&config, &signed_params(SECRET)).is_ok());
    }

    #[test]
    fn test_authorize_wrong_signature() {
        let config = config(Environment::Production, Some(SECRET));
        let result = authorize_proxy_request(&config, &signed_params("other-secret"));
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_authorize_missing_signature() {
        let config = config(Environment::Production, Some(SECRET));
        let mut params = signed_params(SECRET);
        params.remove(proxy::SIGNATURE_PARAM);
        let result = authorize_proxy_request(&config, &params);
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_authorize_missing_secret() {
        let config = config(Environment::Production, None);
        let result = authorize_proxy_request(&config, &signed_params(SECRET));
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_authorize_development_bypass() {
        let config = config(Environment::Development, None);
        assert!(authorize_proxy_request(&config, &QueryParams::new()).is_ok());
    }

    #[test]
    fn test_shop_param() {
        let params = signed_params(SECRET);
        assert_eq!(
            shop_param(&params).unwrap().as_str(),
            "example.myshopify.com"
        );

        assert!(matches!(
            shop_param(&QueryParams::new()),
            Err(AppError::BadRequest(_))
        ));

        let mut params = QueryParams::new();
        params.insert("shop".to_string(), String::new());
        assert!(matches!(shop_param(&params), Err(AppError::BadRequest(_))));
    }
}
