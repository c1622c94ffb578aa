//! App Proxy signing command.
//!
//! Prints a query string carrying a valid `signature`, for exercising
//! `/api/proxy/settings` without going through Shopify:
//!
//! ```bash
//! curl "http://localhost:3000/api/proxy/settings?$(redirect404 sign -p shop=example.myshopify.com)"
//! ```

use redirect404_core::proxy::{self, QueryParams, SigningError};

/// Parse a `key=value` argument.
///
/// Only the first `=` separates; the value may contain further `=` signs.
pub fn parse_param(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))?;
    if key.is_empty() {
        return Err(format!("empty parameter name in `{raw}`"));
    }
    Ok((key.to_owned(), value.to_owned()))
}

/// Sign `params` and return the full query string.
pub fn signed_query(secret: &str, params: Vec<(String, String)>) -> Result<String, SigningError> {
    let mut params: QueryParams = params
        .into_iter()
        .filter(|(key, _)| key != proxy::SIGNATURE_PARAM)
        .collect();
    let signature = proxy::sign(&params, secret)?;
    params.insert(proxy::SIGNATURE_PARAM.to_owned(), signature);

    Ok(proxy::to_query_string(&params))
}

/// Print the signed query string to stdout.
pub fn run(secret: &str, params: Vec<(String, String)>) -> Result<(), SigningError> {
    let query = signed_query(secret, params)?;

    #[allow(clippy::print_stdout)]
    {
        println!("{query}");
    }

    Ok(())
}
