//! Seat inventory trait for per-match seat reservation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::result::AppResult;

/// A committed seat reservation, bound 1:1 to a booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    /// The match the seats are reserved for.
    pub match_id: Uuid,
    /// The booking that owns the reservation.
    pub booking_id: Uuid,
    /// The reserved seat ids.
    pub seat_ids: Vec<Uuid>,
    /// When the reservation was committed.
    pub reserved_at: DateTime<Utc>,
}

/// Outcome of a reservation attempt.
///
/// Expected denials are data, not errors, so the caller can distinguish a
/// losing race from an infrastructure failure and offer alternate seats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ReservationOutcome {
    /// All requested seats were reserved.
    Reserved(Reservation),
    /// Nothing was reserved; the denial explains why.
    Denied(ReservationDenied),
}

/// Why a reservation attempt was denied. No partial grants ever occur.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ReservationDenied {
    /// One or more requested seats already hold an active reservation
    /// for this match. Only the conflicting seats are listed.
    SeatUnavailable {
        /// The seats that are already taken.
        seat_ids: Vec<Uuid>,
    },
    /// One or more seat ids do not belong to the match's branch.
    SeatNotFound {
        /// The unknown seat ids.
        seat_ids: Vec<Uuid>,
    },
    /// The request exceeds capacity: more guests than requested seats,
    /// or the match would be booked past its capacity figure.
    CapacityExceeded {
        /// Guests the caller asked to admit.
        requested: u32,
        /// Seats actually available for the request.
        available: u32,
    },
}

/// Trait for atomic per-match seat reservation.
///
/// Implementations must guarantee all-or-nothing semantics: either every
/// requested seat is reserved or none is. Two implementations are
/// provided:
/// - Postgres-based (one transaction per match with row locks)
/// - In-memory (using `tokio::sync::Mutex`) for single-node use and tests
#[async_trait]
pub trait SeatInventory: Send + Sync + 'static {
    /// Try to reserve the given seats for a match on behalf of a booking.
    ///
    /// `guest_count` is validated against the number of requested seats.
    async fn reserve(
        &self,
        match_id: Uuid,
        booking_id: Uuid,
        seat_ids: &[Uuid],
        guest_count: u32,
    ) -> AppResult<ReservationOutcome>;

    /// Release every seat held by the given booking for the given match.
    ///
    /// Releasing a booking that holds no seats is a logged no-op, so a
    /// cancellation retried by the caller cannot double-free seats.
    async fn release(&self, match_id: Uuid, booking_id: Uuid) -> AppResult<()>;
}
