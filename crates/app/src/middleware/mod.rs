//! HTTP middleware and extractors.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added in `main`)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (recorded into the request span)
//! 4. Security headers

pub mod request_id;
pub mod security_headers;
pub mod session_token;

pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session_token::{SessionTokenError, ShopifySession, decode_session_token};
