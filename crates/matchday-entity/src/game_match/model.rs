//! Match entity model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::MatchStatus;

/// A scheduled sporting fixture bookable at a branch.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GameMatch {
    /// Unique match identifier.
    pub id: Uuid,
    /// The owning cafe (denormalized for tenant checks).
    pub cafe_id: Uuid,
    /// The branch hosting the screening.
    pub branch_id: Uuid,
    /// Fixture title shown to fans (e.g. "Arsenal vs Spurs").
    pub title: String,
    /// Kickoff time.
    pub kickoff_at: DateTime<Utc>,
    /// Lifecycle status.
    pub status: MatchStatus,
    /// Whether the match is visible to fans.
    pub published: bool,
    /// Base price per seat for this match.
    pub seat_price: Decimal,
    /// Maximum number of seats that may be booked.
    pub capacity: i32,
    /// When the match was created.
    pub created_at: DateTime<Utc>,
}

impl GameMatch {
    /// Whether fans may currently create bookings for this match.
    pub fn is_bookable(&self) -> bool {
        self.published && self.status == MatchStatus::Upcoming
    }
}
