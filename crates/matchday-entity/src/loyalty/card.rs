//! Loyalty card entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::tier::LoyaltyTier;

/// A fan's loyalty card: point balance and tier.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LoyaltyCard {
    /// Unique card identifier.
    pub id: Uuid,
    /// The owning fan.
    pub user_id: Uuid,
    /// Spendable point balance. Never negative.
    pub points_balance: i64,
    /// Lifetime earned points; drives tier progression and never
    /// decreases.
    pub lifetime_points: i64,
    /// Current tier.
    pub tier: LoyaltyTier,
    /// When the card was last mutated.
    pub updated_at: DateTime<Utc>,
}
