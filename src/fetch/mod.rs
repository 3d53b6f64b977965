//! Fetching published roster exports over HTTP.
//!
//! A roster is published at one or more candidate URLs (the primary
//! export plus mirrors). Each [`RosterSource`] gets exactly one GET per
//! refresh; the ordered fallback across sources lives in
//! [`crate::roster::refresh_roster`].

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{FetchError, FetchResult};
use crate::parser::{decode_content, detect_encoding};

/// A candidate endpoint serving the published roster export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterSource {
    /// Display name, used in logs and error messages.
    pub name: String,
    /// Export URL.
    pub url: String,
}

impl RosterSource {
    /// Create a named source.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Create a source named after the URL's host.
    pub fn from_url(url: impl Into<String>) -> Self {
        let url = url.into();
        let name = host_of(&url).unwrap_or("source").to_string();
        Self { name, url }
    }
}

/// Extract the host portion of a URL, if any.
fn host_of(url: &str) -> Option<&str> {
    let rest = url.split("://").nth(1).unwrap_or(url);
    let host = rest.split('/').next().unwrap_or("");
    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}

/// A fetched and decoded roster document.
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    /// Name of the source that served it.
    pub source: String,
    /// Detected encoding of the response body.
    pub encoding: String,
    /// Decoded document text.
    pub text: String,
}

/// Fetch one source: GET, status check, decode, reject blank bodies.
pub async fn fetch_document(client: &Client, source: &RosterSource) -> FetchResult<FetchedDocument> {
    let response = client.get(&source.url).send().await?.error_for_status()?;
    let bytes = response.bytes().await?;

    let encoding = detect_encoding(&bytes);
    let text = decode_content(&bytes, &encoding);

    if text.trim().is_empty() {
        return Err(FetchError::EmptyDocument(source.name.clone()));
    }

    Ok(FetchedDocument {
        source: source.name.clone(),
        encoding,
        text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_named_after_host() {
        let source = RosterSource::from_url("https://docs.google.com/spreadsheets/d/abc/pub?output=csv");
        assert_eq!(source.name, "docs.google.com");
        assert!(source.url.ends_with("output=csv"));
    }

    #[test]
    fn test_source_without_scheme() {
        let source = RosterSource::from_url("mirror.example.org/roster.csv");
        assert_eq!(source.name, "mirror.example.org");
    }

    #[test]
    fn test_unnameable_url_falls_back() {
        let source = RosterSource::from_url("");
        assert_eq!(source.name, "source");
    }

    #[test]
    fn test_explicit_name_kept() {
        let source = RosterSource::new("primary", "https://example.org/pub.csv");
        assert_eq!(source.name, "primary");
    }
}
