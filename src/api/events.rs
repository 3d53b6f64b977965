//! Roster refresh events via Server-Sent Events (SSE).
//!
//! A broadcast channel carries refresh outcomes to connected clients,
//! which is what keeps the signup page's table live without polling.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Outcome of one refresh cycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum RefreshStatus {
    Updated,
    Failed,
}

/// A single refresh event pushed to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEvent {
    /// Refresh outcome.
    pub status: RefreshStatus,
    /// Source that served the roster, when updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Row count after the refresh.
    #[serde(default)]
    pub row_count: usize,
    /// Error message, when failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// When the refresh finished.
    pub at: DateTime<Utc>,
}

impl RosterEvent {
    pub fn updated(source: impl Into<String>, row_count: usize) -> Self {
        Self {
            status: RefreshStatus::Updated,
            source: Some(source.into()),
            row_count,
            message: None,
            at: Utc::now(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: RefreshStatus::Failed,
            source: None,
            row_count: 0,
            message: Some(message.into()),
            at: Utc::now(),
        }
    }
}

/// Global event broadcaster
pub static ROSTER_EVENTS: Lazy<EventBroadcaster> = Lazy::new(EventBroadcaster::new);

/// Broadcasts refresh events to all connected SSE clients
pub struct EventBroadcaster {
    sender: broadcast::Sender<RosterEvent>,
}

impl EventBroadcaster {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(100);
        Self { sender }
    }

    /// Publish an event to all subscribers
    pub fn publish(&self, event: RosterEvent) {
        // Also mirror to stdout
        match event.status {
            RefreshStatus::Updated => println!(
                "   ✓ roster updated: {} rows from '{}'",
                event.row_count,
                event.source.as_deref().unwrap_or("?")
            ),
            RefreshStatus::Failed => println!(
                "   ❌ roster refresh failed: {}",
                event.message.as_deref().unwrap_or("unknown error")
            ),
        }

        // Broadcast to SSE clients (ignore if no receivers)
        let _ = self.sender.send(event);
    }

    /// Get a receiver for SSE streaming
    pub fn subscribe(&self) -> broadcast::Receiver<RosterEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenient publishing functions
pub fn publish_updated(source: impl Into<String>, row_count: usize) {
    ROSTER_EVENTS.publish(RosterEvent::updated(source, row_count));
}

pub fn publish_failed(message: impl Into<String>) {
    ROSTER_EVENTS.publish(RosterEvent::failed(message));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = RosterEvent::updated("primary", 12);
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"status\":\"updated\""));
        assert!(json.contains("\"rowCount\":12"));
        assert!(!json.contains("message"));
    }

    #[tokio::test]
    async fn test_subscribers_receive_events() {
        let broadcaster = EventBroadcaster::new();
        let mut rx = broadcaster.subscribe();

        broadcaster.publish(RosterEvent::failed("boom"));

        let event = rx.recv().await.unwrap();
        assert_eq!(event.status, RefreshStatus::Failed);
        assert_eq!(event.message.as_deref(), Some("boom"));
    }
}
