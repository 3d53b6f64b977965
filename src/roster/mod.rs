//! Roster snapshots and the refresh pipeline.
//!
//! [`refresh_roster`] combines fetching and parsing: it walks the
//! configured sources in order and accepts the first one whose document
//! parses to a non-empty row set. Failure is explicit — when every source
//! has been tried once, the caller gets [`FetchError::Exhausted`] with
//! the last underlying error.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::{FetchError, FetchResult};
use crate::fetch::{fetch_document, RosterSource};
use crate::parser::{parse_roster, RosterTable};

/// A parsed roster with provenance metadata.
#[derive(Debug, Clone)]
pub struct RosterSnapshot {
    /// The parsed table.
    pub table: RosterTable,
    /// Name of the source that served it.
    pub source: String,
    /// Encoding the document was decoded from.
    pub encoding: String,
    /// When the fetch completed.
    pub fetched_at: DateTime<Utc>,
}

impl RosterSnapshot {
    /// Build a snapshot stamped with the current time.
    pub fn new(table: RosterTable, source: impl Into<String>, encoding: impl Into<String>) -> Self {
        Self {
            table,
            source: source.into(),
            encoding: encoding.into(),
            fetched_at: Utc::now(),
        }
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.table.row_count()
    }

    /// Rows as JSON objects keyed by column header.
    pub fn records(&self) -> Vec<Value> {
        self.table.records()
    }
}

/// Shared handle to the most recent snapshot, `None` until first load.
pub type RosterStore = Arc<RwLock<Option<RosterSnapshot>>>;

/// Create an empty store.
pub fn new_store() -> RosterStore {
    Arc::new(RwLock::new(None))
}

/// Fetch and parse the roster, trying each source once, in order.
///
/// A source succeeds when its document parses to at least one data row.
/// Sources that fail to fetch, decode blank, or parse empty are skipped
/// in favor of the next candidate.
pub async fn refresh_roster(client: &Client, sources: &[RosterSource]) -> FetchResult<RosterSnapshot> {
    if sources.is_empty() {
        return Err(FetchError::NoSources);
    }

    let mut last: Option<FetchError> = None;

    for source in sources {
        match fetch_document(client, source).await {
            Ok(doc) => {
                let table = parse_roster(&doc.text);
                if table.is_empty() {
                    last = Some(FetchError::NoRows(doc.source));
                    continue;
                }
                return Ok(RosterSnapshot::new(table, doc.source, doc.encoding));
            }
            Err(e) => last = Some(e),
        }
    }

    Err(FetchError::Exhausted {
        attempts: sources.len(),
        last: last
            .map(|e| e.to_string())
            .unwrap_or_else(|| "unknown error".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> RosterTable {
        parse_roster("name,email\nAda,ada@rit.edu\nBob,bob@rit.edu")
    }

    #[test]
    fn test_snapshot_metadata() {
        let snapshot = RosterSnapshot::new(sample_table(), "primary", "utf-8");
        assert_eq!(snapshot.row_count(), 2);
        assert_eq!(snapshot.source, "primary");
        assert_eq!(snapshot.encoding, "utf-8");
    }

    #[test]
    fn test_snapshot_records() {
        let snapshot = RosterSnapshot::new(sample_table(), "primary", "utf-8");
        let records = snapshot.records();
        assert_eq!(records[0]["name"], "Ada");
        assert_eq!(records[1]["email"], "bob@rit.edu");
    }

    #[tokio::test]
    async fn test_refresh_without_sources_is_explicit() {
        let client = Client::new();
        let result = refresh_roster(&client, &[]).await;
        assert!(matches!(result, Err(FetchError::NoSources)));
    }

    #[tokio::test]
    async fn test_store_starts_empty() {
        let store = new_store();
        assert!(store.read().await.is_none());
    }
}
