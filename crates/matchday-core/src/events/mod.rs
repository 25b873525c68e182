//! Domain events emitted by MatchDay operations.
//!
//! Events are handed to the [`crate::traits::EventPublisher`] and consumed
//! by the out-of-process notification collaborator. The core never retries
//! delivery.

pub mod booking;
pub mod loyalty;
pub mod subscription;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use booking::BookingEvent;
pub use loyalty::LoyaltyEvent;
pub use subscription::SubscriptionEvent;

/// Wrapper for all domain events with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The user or staff member who caused the event (if applicable).
    pub actor_id: Option<Uuid>,
    /// The event payload.
    pub payload: EventPayload,
}

/// Union of all domain event types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event")]
pub enum EventPayload {
    /// A booking lifecycle event.
    Booking(BookingEvent),
    /// A subscription enforcement event.
    Subscription(SubscriptionEvent),
    /// A loyalty ledger event.
    Loyalty(LoyaltyEvent),
}

impl PlatformEvent {
    /// Create a new platform event.
    pub fn new(actor_id: Option<Uuid>, payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            actor_id,
            payload,
        }
    }
}
