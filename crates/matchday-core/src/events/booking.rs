//! Booking lifecycle events.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events related to booking lifecycle transitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BookingEvent {
    /// A fan created a booking; seats are held pending payment.
    Created {
        /// The booking ID.
        booking_id: Uuid,
        /// The match being booked.
        match_id: Uuid,
        /// The fan who booked.
        user_id: Uuid,
        /// Number of reserved seats.
        seat_count: u32,
        /// The total owed, including the service fee.
        total: Decimal,
    },
    /// Payment was captured and the booking is confirmed.
    Confirmed {
        /// The booking ID.
        booking_id: Uuid,
        /// The fan who booked.
        user_id: Uuid,
    },
    /// The fan arrived and the booking was checked in.
    CheckedIn {
        /// The booking ID.
        booking_id: Uuid,
        /// When the check-in happened.
        checked_in_at: DateTime<Utc>,
    },
    /// The booking was cancelled and its seats released.
    Cancelled {
        /// The booking ID.
        booking_id: Uuid,
        /// The fan who booked.
        user_id: Uuid,
        /// The amount refunded, if a paid payment existed.
        refunded: Option<Decimal>,
    },
}
