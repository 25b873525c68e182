//! Booking entity model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::BookingStatus;

/// A fan's seat reservation for one match.
///
/// Bookings are never deleted; cancellation is a status, not a delete.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    /// Unique booking identifier.
    pub id: Uuid,
    /// Human-readable booking code (e.g. "MD-7KF3QX").
    pub code: String,
    /// Random token embedded in the scannable QR code.
    pub qr_token: String,
    /// The fan who booked.
    pub user_id: Uuid,
    /// Display name of the fan, denormalized for the check-in screen.
    pub customer_name: Option<String>,
    /// The owning cafe (denormalized for tenant checks).
    pub cafe_id: Uuid,
    /// The branch hosting the match.
    pub branch_id: Uuid,
    /// The booked match.
    pub match_id: Uuid,
    /// Number of guests attending.
    pub guest_count: i32,
    /// Lifecycle status.
    pub status: BookingStatus,
    /// Sum of the per-seat prices.
    pub subtotal: Decimal,
    /// Fixed service fee.
    pub service_fee: Decimal,
    /// Total owed (`subtotal + service_fee`).
    pub total: Decimal,
    /// When the booking was created.
    pub created_at: DateTime<Utc>,
    /// When payment was captured.
    pub confirmed_at: Option<DateTime<Utc>>,
    /// When the fan was admitted. Set exactly once.
    pub checked_in_at: Option<DateTime<Utc>>,
    /// When the booking was cancelled.
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl Booking {
    /// Whether the booking still holds its seats.
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// Data required to create a new booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBooking {
    /// Pre-generated booking identifier (also binds the seat reservation).
    pub id: Uuid,
    /// Human-readable booking code.
    pub code: String,
    /// QR token.
    pub qr_token: String,
    /// The fan who is booking.
    pub user_id: Uuid,
    /// Display name of the fan.
    pub customer_name: Option<String>,
    /// The owning cafe.
    pub cafe_id: Uuid,
    /// The branch hosting the match.
    pub branch_id: Uuid,
    /// The booked match.
    pub match_id: Uuid,
    /// Number of guests attending.
    pub guest_count: i32,
    /// Sum of the per-seat prices.
    pub subtotal: Decimal,
    /// Fixed service fee.
    pub service_fee: Decimal,
    /// Total owed.
    pub total: Decimal,
}
