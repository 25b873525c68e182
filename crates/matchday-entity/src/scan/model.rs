//! Scan log entity model.
//!
//! Every QR scan at the door is recorded, including rejected ones, so a
//! cafe can audit disputed entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Result of a door scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "scan_outcome", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ScanOutcome {
    /// The booking was admitted.
    CheckedIn,
    /// The booking had already been admitted earlier.
    AlreadyCheckedIn,
    /// The code did not resolve to an admissible booking.
    Rejected,
}

/// One recorded door scan.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ScanLog {
    /// Unique scan identifier.
    pub id: Uuid,
    /// The cafe whose staff performed the scan.
    pub cafe_id: Uuid,
    /// The raw code presented at the door.
    pub scanned_code: String,
    /// The booking the code resolved to, if any.
    pub booking_id: Option<Uuid>,
    /// What happened.
    pub outcome: ScanOutcome,
    /// The staff member who scanned.
    pub scanned_by: Uuid,
    /// When the scan happened.
    pub scanned_at: DateTime<Utc>,
}

/// Data required to append a scan log row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateScanLog {
    /// The cafe whose staff performed the scan.
    pub cafe_id: Uuid,
    /// The raw code presented at the door.
    pub scanned_code: String,
    /// The booking the code resolved to, if any.
    pub booking_id: Option<Uuid>,
    /// What happened.
    pub outcome: ScanOutcome,
    /// The staff member who scanned.
    pub scanned_by: Uuid,
}
