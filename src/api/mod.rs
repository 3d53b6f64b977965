//! HTTP API module.
//!
//! This module provides the HTTP server, wire types, and the roster
//! event stream backing the live-updating signup page.

pub mod events;
pub mod server;
pub mod types;

pub use events::*;
pub use server::start_server;
pub use types::*;
