//! HTTP middleware: CORS, security headers and request ids.

pub mod cors;
pub mod request_id;
pub mod security;

pub use cors::{create_cors_layer, create_permissive_cors_layer, parse_origins};
pub use request_id::{MakeRequestUuid, trace_layer};
pub use security::security_headers;
