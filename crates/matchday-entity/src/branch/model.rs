//! Branch entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A physical venue location belonging to a cafe.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Branch {
    /// Unique branch identifier.
    pub id: Uuid,
    /// The owning cafe.
    pub cafe_id: Uuid,
    /// Display name of the branch.
    pub name: String,
    /// Street address shown to fans.
    pub address: Option<String>,
    /// Total seat capacity across all sections.
    pub total_capacity: i32,
    /// When the branch was created.
    pub created_at: DateTime<Utc>,
}
