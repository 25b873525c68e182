//! Cafe entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::CafeStatus;

/// A tenant organization owning one or more branches.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Cafe {
    /// Unique cafe identifier.
    pub id: Uuid,
    /// Display name of the cafe.
    pub name: String,
    /// Operational status (active/suspended).
    pub status: CafeStatus,
    /// When the cafe was created.
    pub created_at: DateTime<Utc>,
    /// When the cafe was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Cafe {
    /// Whether the cafe may currently receive bookings.
    pub fn can_receive_bookings(&self) -> bool {
        self.status.is_active()
    }
}
