//! Loyalty ledger events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events related to loyalty point movements.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LoyaltyEvent {
    /// Points were earned for a confirmed booking.
    PointsEarned {
        /// The fan who earned the points.
        user_id: Uuid,
        /// The booking that produced the points.
        booking_id: Uuid,
        /// The number of points earned.
        points: i64,
    },
    /// Previously earned points were clawed back after a cancellation.
    PointsClawedBack {
        /// The fan whose points were reversed.
        user_id: Uuid,
        /// The cancelled booking.
        booking_id: Uuid,
        /// The number of points reversed.
        points: i64,
    },
    /// Points were redeemed against the card balance.
    PointsRedeemed {
        /// The fan who redeemed.
        user_id: Uuid,
        /// The number of points spent.
        points: i64,
    },
}
