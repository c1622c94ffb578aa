//! Redirect setting types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{RedirectSettingId, ShopDomain};

/// A shop's stored 404 redirect configuration.
///
/// One record per shop. Serialized in camelCase for the admin API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectSetting {
    pub id: RedirectSettingId,
    pub shop: ShopDomain,
    /// Target URL for 404 visitors. Empty means "not configured".
    pub redirect_url: String,
    pub is_enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Values written by the admin settings form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectSettingUpdate {
    pub redirect_url: String,
    pub is_enabled: bool,
}

impl RedirectSettingUpdate {
    /// Build an update from raw form values.
    ///
    /// The form posts `isEnabled` as a stringified boolean; only the exact
    /// string `"true"` enables the redirect. A missing URL is stored as empty.
    #[must_use]
    pub fn from_form(redirect_url: Option<String>, is_enabled: Option<&str>) -> Self {
        Self {
            redirect_url: redirect_url.unwrap_or_default(),
            is_enabled: is_enabled == Some("true"),
        }
    }
}

/// The public view of a setting served to the storefront script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectTarget {
    pub redirect_url: String,
    pub is_enabled: bool,
}

impl RedirectTarget {
    /// Target served when a shop has no stored setting: nothing to redirect to.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            redirect_url: String::new(),
            is_enabled: false,
        }
    }

    /// Defaults shown in the admin before a shop saves anything.
    #[must_use]
    pub const fn admin_default() -> Self {
        Self {
            redirect_url: String::new(),
            is_enabled: true,
        }
    }
}

impl From<&RedirectSetting> for RedirectTarget {
    fn from(setting: &RedirectSetting) -> Self {
        Self {
            redirect_url: setting.redirect_url.clone(),
            is_enabled: setting.is_enabled,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn setting(url: &str, enabled: bool) -> RedirectSetting {
        let now = Utc::now();
        RedirectSetting {
            id: RedirectSettingId::new(1),
            shop: ShopDomain::parse("example.myshopify.com").unwrap(),
            redirect_url: url.to_owned(),
            is_enabled: enabled,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_from_form_enabled_only_for_true() {
        assert!(RedirectSettingUpdate::from_form(None, Some("true")).is_enabled);
        assert!(!RedirectSettingUpdate::from_form(None, Some("false")).is_enabled);
        assert!(!RedirectSettingUpdate::from_form(None, Some("TRUE")).is_enabled);
        assert!(!RedirectSettingUpdate::from_form(None, Some("1")).is_enabled);
        assert!(!RedirectSettingUpdate::from_form(None, None).is_enabled);
    }

    #[test]
    fn test_from_form_missing_url_is_empty() {
        let update = RedirectSettingUpdate::from_form(None, Some("true"));
        assert_eq!(update.redirect_url, "");

        let update = RedirectSettingUpdate::from_form(Some("https://x.test/".into()), None);
        assert_eq!(update.redirect_url, "https://x.test/");
    }

    #[test]
    fn test_target_json_shape() {
        let json = serde_json::to_value(RedirectTarget::disabled()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "redirectUrl": "", "isEnabled": false })
        );

        let json = serde_json::to_value(RedirectTarget::admin_default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "redirectUrl": "", "isEnabled": true })
        );
    }

    #[test]
    fn test_target_from_setting() {
        let target = RedirectTarget::from(&setting("https://example.com/", false));
        assert_eq!(target.redirect_url, "https://example.com/");
        assert!(!target.is_enabled);
    }

    #[test]
    fn test_setting_serializes_camel_case() {
        let json = serde_json::to_value(setting("https://example.com/", true)).unwrap();
        assert_eq!(json["shop"], "example.myshopify.com");
        assert_eq!(json["redirectUrl"], "https://example.com/");
        assert_eq!(json["isEnabled"], true);
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
    }
}
