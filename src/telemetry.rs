//! Tracing subscriber setup and notification logging

use tokio::sync::broadcast::{Receiver, error::RecvError};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::core::events::{EventEnvelope, NotificationLevel};

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "info,quotes=debug";

/// Install a console subscriber filtered by `RUST_LOG`
///
/// Returns an error when a global subscriber is already installed.
pub fn init_tracing() -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init()
}

/// Log every notification from `events` until the bus is dropped
///
/// Notifications missed by a lagging receiver are counted in a warning and
/// logging goes on. Returns how many notifications were logged.
pub async fn log_notifications(mut events: Receiver<EventEnvelope>) -> usize {
    let mut logged = 0;
    loop {
        match events.recv().await {
            Ok(envelope) => {
                if let Some(notification) = envelope.event.as_notification() {
                    match notification.level {
                        NotificationLevel::Success => tracing::info!("{}", notification.message),
                        NotificationLevel::Error => tracing::warn!("{}", notification.message),
                    }
                    logged += 1;
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Notification log fell behind");
            }
            Err(RecvError::Closed) => return logged,
        }
    }
}
