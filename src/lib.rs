//! # Rostersync - live mentorship roster with signup validation
//!
//! Rostersync fetches the published spreadsheet export behind a
//! mentorship-signup page, parses it into a roster table, and serves it
//! alongside signup form validation.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Published    │────▶│    Fetch    │────▶│   Parser    │────▶│  Snapshot   │
//! │ export URLs  │     │ (fallback)  │     │ (quoted CSV)│     │  (+ API)    │
//! └──────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rostersync::{refresh_roster, RosterSource};
//!
//! #[tokio::main]
//! async fn main() {
//!     let sources = vec![RosterSource::from_url("https://example.org/roster.csv")];
//!     let client = reqwest::Client::new();
//!     let snapshot = refresh_roster(&client, &sources).await.unwrap();
//!     println!("Roster has {} rows", snapshot.row_count());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Domain models (SignupForm, FieldErrors, Submission)
//! - [`parser`] - Delimited-text parsing with encoding detection
//! - [`validation`] - Signup form validation
//! - [`fetch`] - Published-export fetching
//! - [`roster`] - Snapshots and the refresh pipeline
//! - [`config`] - Environment configuration
//! - [`api`] - HTTP API server

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Validation
pub mod validation;

// Fetching & refresh
pub mod fetch;
pub mod roster;

// Configuration
pub mod config;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{ConfigError, FetchError, RosterError, ServerError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{FieldErrors, SignupForm, Submission};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{
    decode_content, detect_encoding, parse_roster, parse_roster_bytes, parse_roster_file,
    parse_table, ParsedRoster, RosterTable,
};

// =============================================================================
// Re-exports - Validation
// =============================================================================

pub use validation::{
    is_institutional_email, validate_signup, validate_signup_with_domain, DEFAULT_EMAIL_DOMAIN,
};

// =============================================================================
// Re-exports - Fetching & refresh
// =============================================================================

pub use fetch::{fetch_document, FetchedDocument, RosterSource};
pub use roster::{new_store, refresh_roster, RosterSnapshot, RosterStore};

// =============================================================================
// Re-exports - Configuration
// =============================================================================

pub use config::Config;

// =============================================================================
// Re-exports - API
// =============================================================================

pub use api::types::{error_response, RosterResponse, SignupResponse};

// Server
pub mod server {
    pub use crate::api::server::start_server;
}
