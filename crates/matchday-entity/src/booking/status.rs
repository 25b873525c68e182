//! Booking status enumeration and transition guard.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use matchday_core::AppError;

/// Lifecycle status of a booking.
///
/// Transitions are monotonic: `pending -> confirmed -> checked_in` is
/// forward-only, and cancellation is reachable from `pending` or
/// `confirmed` but never from `checked_in`. There is no transition out
/// of `checked_in` or `cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "booking_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Created; seats held, payment not yet captured.
    Pending,
    /// Payment captured.
    Confirmed,
    /// Fan arrived and was admitted. Terminal.
    CheckedIn,
    /// Cancelled by the fan or cafe staff. Terminal.
    Cancelled,
}

impl BookingStatus {
    /// Whether the transition to `to` is legal.
    pub fn can_transition_to(&self, to: BookingStatus) -> bool {
        matches!(
            (self, to),
            (Self::Pending, Self::Confirmed)
                | (Self::Confirmed, Self::CheckedIn)
                | (Self::Pending, Self::Cancelled)
                | (Self::Confirmed, Self::Cancelled)
        )
    }

    /// Whether this status is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::CheckedIn | Self::Cancelled)
    }

    /// Whether the booking still holds its seats.
    ///
    /// Every status except `cancelled` counts as active: a seat can be
    /// attached to at most one active booking per match.
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }

    /// Return the status as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::CheckedIn => "checked_in",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "checked_in" => Ok(Self::CheckedIn),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(AppError::validation(format!(
                "Invalid booking status: '{s}'. Expected one of: pending, confirmed, checked_in, cancelled"
            ))),
        }
    }
}
