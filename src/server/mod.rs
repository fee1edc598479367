//! Server core functionality
//!
//! This module contains the listener bootstrap, shared state, and HTTP
//! routing for the file proxy.

pub mod core;
pub mod routes;
pub mod state;

pub use self::core::Server;
pub use routes::router;
pub use state::AppState;
