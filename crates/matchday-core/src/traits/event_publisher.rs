//! Event publisher trait for fire-and-forget notification hand-off.

use async_trait::async_trait;

use crate::events::PlatformEvent;
use crate::result::AppResult;

/// Trait for dispatching domain events to the notification collaborator.
///
/// Delivery is fire-and-forget: the booking core does not retry, and
/// services log and swallow publish failures rather than failing the
/// operation that produced the event.
#[async_trait]
pub trait EventPublisher: Send + Sync + 'static {
    /// Publish a single event.
    async fn publish(&self, event: PlatformEvent) -> AppResult<()>;
}
