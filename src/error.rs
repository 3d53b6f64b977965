//! Error types for the rostersync service.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`FetchError`] - Roster source fetching errors
//! - [`ConfigError`] - Configuration errors
//! - [`RosterError`] - Top-level roster pipeline errors
//! - [`ServerError`] - HTTP server errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries. Parsing and
//! validation themselves are total and never appear here.

use thiserror::Error;

// =============================================================================
// Fetch Errors
// =============================================================================

/// Errors while fetching a published roster export.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed (connect, status, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Source responded with a blank document.
    #[error("Source '{0}' returned an empty document")]
    EmptyDocument(String),

    /// Source responded with text that parses to zero roster rows.
    #[error("Source '{0}' yielded no roster rows")]
    NoRows(String),

    /// No candidate sources were configured.
    #[error("No roster sources configured")]
    NoSources,

    /// Every candidate source was tried and failed.
    #[error("All {attempts} roster sources failed, last error: {last}")]
    Exhausted { attempts: usize, last: String },
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable holds a value that does not parse.
    #[error("Invalid value '{value}' for {var}")]
    InvalidValue { var: &'static str, value: String },
}

// =============================================================================
// Roster Errors (top-level)
// =============================================================================

/// Top-level roster pipeline errors.
///
/// This is the main error type returned by the CLI commands and the
/// file-based parsing entry points. It wraps all lower-level errors.
#[derive(Debug, Error)]
pub enum RosterError {
    /// File IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Fetch error.
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Roster pipeline error.
    #[error("Roster error: {0}")]
    Roster(#[from] RosterError),

    /// Invalid request.
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Server internal error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for roster operations.
pub type RosterResult<T> = Result<T, RosterError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // FetchError -> RosterError
        let fetch_err = FetchError::NoSources;
        let roster_err: RosterError = fetch_err.into();
        assert!(roster_err.to_string().contains("No roster sources"));

        // ConfigError -> RosterError
        let config_err = ConfigError::InvalidValue {
            var: "PORT",
            value: "abc".into(),
        };
        let roster_err: RosterError = config_err.into();
        assert!(roster_err.to_string().contains("PORT"));

        // RosterError -> ServerError
        let server_err: ServerError = roster_err.into();
        assert!(server_err.to_string().contains("abc"));
    }

    #[test]
    fn test_exhausted_error_format() {
        let err = FetchError::Exhausted {
            attempts: 3,
            last: "Source 'mirror' returned an empty document".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("All 3 roster sources failed"));
        assert!(msg.contains("mirror"));
    }
}
