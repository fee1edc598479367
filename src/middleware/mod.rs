//! Server middleware
//!
//! Provides CORS headers and request logging.

pub mod cors;
pub mod logging;

pub use cors::with_cors_headers;
pub use logging::log_request;
