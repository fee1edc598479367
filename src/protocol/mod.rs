//! Gateway protocol implementation
//!
//! Handles request parsing, command dispatch, and response generation.

pub mod commands;
pub mod handlers;
pub mod parser;
pub mod responses;

pub use commands::{Command, Operation};
pub use handlers::handle_command;
pub use responses::Outcome;
