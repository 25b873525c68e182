//! Seating section entity model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A named group of seats within a branch (e.g. "VIP").
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SeatingSection {
    /// Unique section identifier.
    pub id: Uuid,
    /// The branch this section belongs to.
    pub branch_id: Uuid,
    /// Section name shown to fans.
    pub name: String,
    /// Number of seats in the section.
    pub total_seats: i32,
    /// Price surcharge added on top of the match seat price.
    pub price_surcharge: Decimal,
}
