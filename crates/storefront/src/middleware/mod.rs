//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request span)
//! 3. Request ID (recorded into the request span)
//! 4. Security headers
//! 5. Session layer (tower-sessions, memory or `PostgreSQL` store)

pub mod request_id;
pub mod security_headers;
pub mod session;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
