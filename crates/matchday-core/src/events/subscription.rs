//! Subscription enforcement events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events emitted when subscription limits are hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SubscriptionEvent {
    /// A cafe action was denied because a plan limit was reached.
    LimitReached {
        /// The cafe whose limit was hit.
        cafe_id: Uuid,
        /// The limited resource (e.g. `"bookings_per_month"`).
        resource: String,
        /// The configured limit, if the plan caps this resource.
        limit: Option<u32>,
        /// The usage count at denial time.
        current: u32,
    },
}
