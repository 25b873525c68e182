//! Seat entity model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An individual bookable seat within a section.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Seat {
    /// Unique seat identifier.
    pub id: Uuid,
    /// The section this seat belongs to.
    pub section_id: Uuid,
    /// The branch this seat belongs to (denormalized for lookups).
    pub branch_id: Uuid,
    /// Seat label shown to fans (e.g. "VIP-03").
    pub label: String,
    /// Fixed price override; when set, it replaces the match seat price
    /// plus section surcharge for this seat.
    pub price_override: Option<Decimal>,
    /// Whether the seat is physically available for booking at all.
    pub active: bool,
}

/// A seat joined with the surcharge of its section, as fetched for pricing.
///
/// Fully populated by an explicit repository query; there is no lazy
/// relationship loading anywhere in the platform.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SeatWithSurcharge {
    /// Unique seat identifier.
    pub id: Uuid,
    /// The section this seat belongs to.
    pub section_id: Uuid,
    /// Seat label shown to fans.
    pub label: String,
    /// Name of the owning section.
    pub section_name: String,
    /// Fixed price override for the seat, if any.
    pub price_override: Option<Decimal>,
    /// Surcharge of the owning section.
    pub price_surcharge: Decimal,
}
