//! Event publishing.
//!
//! Delivery is fire-and-forget: lifecycle operations log and swallow
//! publish failures rather than failing the booking.

use async_trait::async_trait;
use tracing::info;

use matchday_core::events::PlatformEvent;
use matchday_core::result::AppResult;
use matchday_core::traits::event_publisher::EventPublisher;

/// Publisher that emits events to the structured log.
///
/// Stands in for an external notification pipeline in single-node
/// deployments and tests.
#[derive(Debug, Clone, Default)]
pub struct TracingPublisher;

impl TracingPublisher {
    /// Creates a new tracing publisher.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventPublisher for TracingPublisher {
    async fn publish(&self, event: PlatformEvent) -> AppResult<()> {
        let payload = serde_json::to_string(&event.payload)?;
        info!(
            event_id = %event.id,
            actor_id = ?event.actor_id,
            %payload,
            "Domain event"
        );
        Ok(())
    }
}
