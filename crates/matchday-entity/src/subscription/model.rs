//! Cafe subscription assignment entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::plan::SubscriptionPlan;

/// The active plan assignment for a cafe.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CafeSubscription {
    /// Unique subscription identifier.
    pub id: Uuid,
    /// The subscribed cafe.
    pub cafe_id: Uuid,
    /// The purchased plan.
    pub plan_id: Uuid,
    /// When the subscription started.
    pub started_at: DateTime<Utc>,
    /// When the subscription expires.
    pub expires_at: DateTime<Utc>,
    /// Whether the subscription renews automatically.
    pub auto_renew: bool,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
}

impl CafeSubscription {
    /// Whether the subscription is active at the given instant.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.started_at <= now && now < self.expires_at
    }
}

/// A subscription joined with its plan, as resolved for enforcement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveSubscription {
    /// The assignment row.
    pub subscription: CafeSubscription,
    /// The plan carrying the limits.
    pub plan: SubscriptionPlan,
}
