//! Admin settings API for the embedded app.
//!
//! Authenticated with Shopify session tokens; the shop comes from the token,
//! never from the request body.

use axum::{
    Form, Json,
    extract::State,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use redirect404_core::{RedirectSetting, RedirectSettingUpdate, RedirectTarget, ShopDomain};

use crate::error::Result;
use crate::middleware::ShopifySession;
use crate::state::AppState;

/// Current setting as shown in the admin.
///
/// A stored record is returned whole (`id`, timestamps included); a shop that
/// never saved gets only `shop` plus the default target.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AdminSettingsView {
    Stored(RedirectSetting),
    #[serde(rename_all = "camelCase")]
    Default {
        shop: ShopDomain,
        #[serde(flatten)]
        target: RedirectTarget,
    },
}

/// Form posted by the admin settings page.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsForm {
    pub redirect_url: Option<String>,
    /// Stringified boolean; only `"true"` enables the redirect.
    pub is_enabled: Option<String>,
}

/// Response to a successful save.
#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub success: bool,
    pub settings: RedirectSetting,
}

/// GET /api/redirect-setting - Current setting for the session's shop.
///
/// Shops that have never saved get `{redirectUrl: "", isEnabled: true}`.
#[instrument(skip(state, session), fields(shop = %session.shop))]
pub async fn show(
    State(state): State<AppState>,
    session: ShopifySession,
) -> Result<Json<AdminSettingsView>> {
    let view = match state.settings().find(&session.shop).await? {
        Some(setting) => AdminSettingsView::Stored(setting),
        None => AdminSettingsView::Default {
            shop: session.shop,
            target: RedirectTarget::admin_default(),
        },
    };

    Ok(Json(view))
}

/// POST /api/redirect-setting - Create or update the session's shop setting.
#[instrument(skip(state, session, form), fields(shop = %session.shop))]
pub async fn save(
    State(state): State<AppState>,
    session: ShopifySession,
    Form(form): Form<SettingsForm>,
) -> Result<Json<SaveResponse>> {
    let update = RedirectSettingUpdate::from_form(form.redirect_url, form.is_enabled.as_deref());
    let settings = state.settings().save(&session.shop, &update).await?;

    Ok(Json(SaveResponse {
        success: true,
        settings,
    }))
}
