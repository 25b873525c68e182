//! Structured booking failure taxonomy.
//!
//! Expected domain failures carry the data a caller needs to react
//! (conflicting seats, quota numbers, the actual status), while
//! infrastructure failures pass through as [`AppError`].

use thiserror::Error;
use uuid::Uuid;

use matchday_core::error::AppError;
use matchday_entity::booking::BookingStatus;

/// Result alias for booking lifecycle operations.
pub type BookingResult<T> = Result<T, BookingError>;

/// Everything that can go wrong in the booking lifecycle.
#[derive(Debug, Error)]
pub enum BookingError {
    /// The match does not exist, is unpublished, or is past booking.
    #[error("match {match_id} is not open for booking")]
    MatchNotBookable {
        /// The requested match.
        match_id: Uuid,
    },

    /// The cafe is suspended and cannot receive bookings.
    #[error("cafe {cafe_id} is suspended")]
    CafeSuspended {
        /// The suspended cafe.
        cafe_id: Uuid,
    },

    /// The cafe has no active subscription.
    #[error("cafe {cafe_id} has no active subscription")]
    NoActiveSubscription {
        /// The cafe without a subscription.
        cafe_id: Uuid,
    },

    /// One or more requested seats are already reserved for the match.
    #[error("{} seat(s) already reserved", .seat_ids.len())]
    SeatsUnavailable {
        /// The conflicting seats.
        seat_ids: Vec<Uuid>,
    },

    /// One or more seat ids do not exist in the match's branch.
    #[error("{} unknown seat id(s)", .seat_ids.len())]
    SeatsUnknown {
        /// The unknown seat ids.
        seat_ids: Vec<Uuid>,
    },

    /// The request exceeds the match's remaining capacity.
    #[error("capacity exceeded: requested {requested}, available {available}")]
    CapacityExceeded {
        /// Guests the caller asked to admit.
        requested: u32,
        /// Seats actually available.
        available: u32,
    },

    /// The cafe's monthly booking quota is exhausted.
    #[error("booking quota exhausted: {current} of {limit:?} used")]
    QuotaExhausted {
        /// The plan's limit, `None` for unlimited.
        limit: Option<u32>,
        /// Bookings already counted this period.
        current: u32,
    },

    /// The booking is not in a status that permits the operation.
    #[error("booking {booking_id} is {status}, operation not permitted")]
    InvalidState {
        /// The booking.
        booking_id: Uuid,
        /// Its actual status.
        status: BookingStatus,
    },

    /// The booking does not exist.
    #[error("booking {booking_id} not found")]
    NotFound {
        /// The missing booking.
        booking_id: Uuid,
    },

    /// An infrastructure failure.
    #[error(transparent)]
    Internal(#[from] AppError),
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::NotFound { .. } | BookingError::MatchNotBookable { .. } => {
                AppError::not_found(err.to_string())
            }
            BookingError::SeatsUnknown { .. } => AppError::validation(err.to_string()),
            BookingError::Internal(inner) => inner,
            _ => AppError::conflict(err.to_string()),
        }
    }
}
