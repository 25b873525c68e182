//! Loyalty transaction entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Kind of loyalty point movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "loyalty_transaction_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LoyaltyTransactionKind {
    /// Points earned for a confirmed booking.
    Earn,
    /// Points spent by the fan.
    Redeem,
    /// Earned points reversed after a cancellation.
    Clawback,
}

/// One append-only loyalty point movement.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LoyaltyTransaction {
    /// Unique transaction identifier.
    pub id: Uuid,
    /// The card the movement applies to.
    pub card_id: Uuid,
    /// The booking that caused the movement, when applicable.
    pub booking_id: Option<Uuid>,
    /// The kind of movement.
    pub kind: LoyaltyTransactionKind,
    /// Points moved. Always positive; the kind carries the direction.
    pub points: i64,
    /// When the movement was recorded.
    pub created_at: DateTime<Utc>,
}

/// Data required to record a loyalty transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLoyaltyTransaction {
    /// The fan whose card is mutated.
    pub user_id: Uuid,
    /// The booking that caused the movement, when applicable.
    pub booking_id: Option<Uuid>,
    /// The kind of movement.
    pub kind: LoyaltyTransactionKind,
    /// Points moved. Always positive.
    pub points: i64,
}
