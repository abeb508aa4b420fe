//! Notification bus for quote mutations
//!
//! Every create, update and delete publishes a user-facing [`Notification`]
//! (the toast the UI shows) and, when it succeeds, a [`QuoteEvent`] carrying
//! the changed record. Delivery is up to whoever subscribes.
//!
//! ```text
//! Access layer ──▶ EventBus::publish() ──▶ broadcast channel ──▶ toast renderer
//!                                                           ──▶ HTTP/log subscribers
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::core::entity::{Quote, QuoteId};

/// Events related to quote mutations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum QuoteEvent {
    Created { quote: Quote },
    Updated { quote: Quote },
    Deleted { quote_id: QuoteId },
}

/// Severity of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A user-facing notification, the toast of the UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// Top-level event published on the bus
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AppEvent {
    Quote(QuoteEvent),
    Notification(Notification),
}

impl AppEvent {
    pub fn event_kind(&self) -> &str {
        match self {
            AppEvent::Quote(_) => "quote",
            AppEvent::Notification(_) => "notification",
        }
    }

    /// Get the quote id this event relates to (if applicable)
    pub fn quote_id(&self) -> Option<QuoteId> {
        match self {
            AppEvent::Quote(QuoteEvent::Created { quote } | QuoteEvent::Updated { quote }) => {
                Some(quote.id)
            }
            AppEvent::Quote(QuoteEvent::Deleted { quote_id }) => Some(*quote_id),
            AppEvent::Notification(_) => None,
        }
    }

    pub fn as_notification(&self) -> Option<&Notification> {
        match self {
            AppEvent::Notification(n) => Some(n),
            AppEvent::Quote(_) => None,
        }
    }
}

/// Envelope wrapping an event with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub event: AppEvent,
}

impl EventEnvelope {
    pub fn new(event: AppEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event,
        }
    }
}

/// Broadcast-based event bus
///
/// Cheap to clone; all clones share the same channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventEnvelope>,
}

impl EventBus {
    /// Create a new EventBus with the given channel capacity
    ///
    /// Receivers that fall more than `capacity` events behind get `Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers
    ///
    /// Never fails; with no subscribers the event is dropped. Returns the
    /// number of receivers that will see it.
    pub fn publish(&self, event: AppEvent) -> usize {
        let envelope = EventEnvelope::new(event);
        self.sender.send(envelope).unwrap_or(0)
    }

    /// Shorthand for publishing a [`Notification`]
    pub fn notify(&self, notification: Notification) -> usize {
        self.publish(AppEvent::Notification(notification))
    }

    /// Subscribe to events published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}
