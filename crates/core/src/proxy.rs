//! Shopify App Proxy signature verification.
//!
//! Requests forwarded through the App Proxy carry every query parameter the
//! storefront sent, plus a few added by Shopify (`shop`, `path_prefix`,
//! `timestamp`, `logged_in_customer_id`) and a `signature` parameter. The
//! signature is the lowercase hex HMAC-SHA256, keyed with the app's API secret,
//! of the remaining parameters formatted as `key=value`, sorted by key and
//! joined with `&`.
//!
//! Values are used exactly as decoded from the query string. Keys are sorted by
//! byte order, so the canonical payload is identical on every platform.
//!
//! # Example
//!
//! ```
//! use redirect404_core::proxy::{QueryParams, sign, verify};
//!
//! let mut params = QueryParams::new();
//! params.insert("shop".to_owned(), "example.myshopify.com".to_owned());
//! params.insert("timestamp".to_owned(), "1700000000".to_owned());
//!
//! let tag = sign(&params, "s3cr3t").unwrap();
//! params.insert("signature".to_owned(), tag);
//!
//! assert!(verify(&params, "s3cr3t"));
//! assert!(!verify(&params, "wrong"));
//! ```

use std::collections::BTreeMap;

use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Name of the query parameter carrying the authentication tag.
pub const SIGNATURE_PARAM: &str = "signature";

/// Decoded query parameters, ordered by key.
///
/// Duplicate keys are not modeled: inserting a key again replaces its value.
pub type QueryParams = BTreeMap<String, String>;

type HmacSha256 = Hmac<Sha256>;

/// Errors that can occur while computing a signature.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SigningError {
    /// The shared secret is empty.
    #[error("signing secret cannot be empty")]
    EmptySecret,
    /// The secret was rejected as an HMAC key.
    ///
    /// HMAC-SHA256 accepts keys of any length, so this is unreachable today;
    /// it exists because the `hmac` key constructor is fallible.
    #[error("signing secret cannot be used as an HMAC key")]
    InvalidKey,
}

/// Parse a raw `application/x-www-form-urlencoded` query string.
///
/// A leading `?` is ignored. When a key appears more than once, the last value
/// wins.
#[must_use]
pub fn parse_query(raw: &str) -> QueryParams {
    let raw = raw.strip_prefix('?').unwrap_or(raw);
    url::form_urlencoded::parse(raw.as_bytes())
        .into_owned()
        .collect()
}

/// Encode parameters back into a query string (sorted by key).
#[must_use]
pub fn to_query_string(params: &QueryParams) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish()
}

/// Build the canonical payload the signature is computed over.
///
/// Every parameter except `signature` is rendered as `key=value` (value
/// verbatim), sorted by key in byte order, and joined with `&`. An empty input
/// yields an empty string.
#[must_use]
pub fn canonical_payload<I, K, V>(params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let sorted = collect_params(params);

    sorted
        .iter()
        .filter(|(key, _)| key.as_str() != SIGNATURE_PARAM)
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Compute the App Proxy signature for a set of parameters.
///
/// Any `signature` entry in `params` is ignored. Returns the 64 character
/// lowercase hex HMAC-SHA256 of the canonical payload.
///
/// # Errors
///
/// Returns [`SigningError::EmptySecret`] if the secret is empty.
pub fn sign<I, K, V>(params: I, secret: &str) -> Result<String, SigningError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    if secret.is_empty() {
        return Err(SigningError::EmptySecret);
    }

    let payload = canonical_payload(params);

    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| SigningError::InvalidKey)?;
    mac.update(payload.as_bytes());

    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Verify that a set of query parameters was signed with `secret`.
///
/// Returns `false` when the `signature` parameter is missing, when the secret
/// is unusable, or when the recomputed tag does not match exactly. The cause of
/// a failure is not reported.
#[must_use]
pub fn verify<I, K, V>(params: I, secret: &str) -> bool
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut params = collect_params(params);

    let Some(provided) = params.remove(SIGNATURE_PARAM) else {
        return false;
    };

    let Ok(expected) = sign(&params, secret) else {
        return false;
    };

    constant_time_compare(&expected, &provided)
}

/// Collect arbitrary key/value pairs into an owned, key-ordered map.
fn collect_params<I, K, V>(params: I) -> QueryParams
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    params
        .into_iter()
        .map(|(k, v)| (k.as_ref().to_owned(), v.as_ref().to_owned()))
        .collect()
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result: u8 = 0;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }

    result == 0
}
