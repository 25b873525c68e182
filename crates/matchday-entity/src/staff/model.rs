//! Staff member entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::StaffRole;

/// A staff account scoped to one cafe.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StaffMember {
    /// Unique staff identifier.
    pub id: Uuid,
    /// The employing cafe.
    pub cafe_id: Uuid,
    /// Display name.
    pub name: String,
    /// Contact email, unique per cafe.
    pub email: String,
    /// Assigned role.
    pub role: StaffRole,
    /// Whether the account can act. Deactivated staff keep their rows
    /// for audit history.
    pub active: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
