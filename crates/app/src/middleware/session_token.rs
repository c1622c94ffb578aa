//! Shopify admin session token authentication.
//!
//! The embedded admin UI sends `Authorization: Bearer <token>` with every
//! request. The token is an HS256 JWT signed with the app's API secret:
//!
//! - `aud` is the app's API key
//! - `dest` is the shop URL (`https://example.myshopify.com`)
//! - `iss` is the shop admin URL (`https://example.myshopify.com/admin`)
//! - `exp` / `nbf` bound a one-minute validity window
//!
//! See <https://shopify.dev/docs/apps/build/authentication-authorization/session-tokens>.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

use redirect404_core::ShopDomain;

use crate::error::AppError;
use crate::state::AppState;

/// Clock skew tolerated when checking `exp` and `nbf`, in seconds.
const LEEWAY_SECONDS: u64 = 5;

/// Message returned for every rejected token.
const INVALID_SESSION: &str = "Invalid session token";

/// Errors that can occur while decoding a session token.
#[derive(Debug, thiserror::Error)]
pub enum SessionTokenError {
    #[error("jwt error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("dest claim is not a shop URL")]
    InvalidDestination,
    #[error("iss and dest claims name different shops")]
    IssuerMismatch,
}

#[derive(Debug, Deserialize)]
struct SessionTokenClaims {
    iss: String,
    dest: String,
    sub: Option<String>,
}

/// An authenticated admin request.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(session: ShopifySession) -> String {
///     format!("Hello, {}!", session.shop)
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopifySession {
    /// Shop the admin user is signed into.
    pub shop: ShopDomain,
    /// Shopify staff user ID (`sub`), when present.
    pub user_id: Option<String>,
}

/// Decode and validate a session token.
///
/// # Errors
///
/// Returns `SessionTokenError` if the signature, audience, or validity window
/// is wrong, or if the `dest`/`iss` claims don't name the same shop.
pub fn decode_session_token(
    token: &str,
    api_key: &str,
    api_secret: &SecretString,
) -> Result<ShopifySession, SessionTokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[api_key]);
    validation.set_required_spec_claims(&["exp", "nbf", "aud"]);
    validation.validate_nbf = true;
    validation.leeway = LEEWAY_SECONDS;

    let key = DecodingKey::from_secret(api_secret.expose_secret().as_bytes());
    let claims = jsonwebtoken::decode::<SessionTokenClaims>(token, &key, &validation)?.claims;

    let dest_host = host_of(&claims.dest).ok_or(SessionTokenError::InvalidDestination)?;
    let iss_host = host_of(&claims.iss).ok_or(SessionTokenError::IssuerMismatch)?;
    if iss_host != dest_host {
        return Err(SessionTokenError::IssuerMismatch);
    }

    let shop = ShopDomain::parse(&dest_host).map_err(|_| SessionTokenError::InvalidDestination)?;

    Ok(ShopifySession {
        shop,
        user_id: claims.sub,
    })
}

fn host_of(raw: &str) -> Option<String> {
    Url::parse(raw)
        .ok()
        .and_then(|url| url.host_str().map(str::to_owned))
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

impl FromRequestParts<AppState> for ShopifySession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let shopify = &state.config().shopify;

        let Some(api_secret) = shopify.api_secret.as_ref() else {
            return Err(AppError::Configuration(
                "SHOPIFY_API_SECRET is not set".to_string(),
            ));
        };

        let Some(token) = bearer_token(parts) else {
            tracing::debug!("Admin request without session token");
            return Err(AppError::Unauthorized(INVALID_SESSION.to_string()));
        };

        decode_session_token(token, &shopify.api_key, api_secret).map_err(|e| {
            tracing::warn!(error = %e, "Rejected admin session token");
            AppError::Unauthorized(INVALID_SESSION.to_string())
        })
    }
}
