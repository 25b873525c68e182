//! Payment entity model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::PaymentStatus;

/// One attempt to collect money for a booking or a subscription.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Payment {
    /// Unique payment identifier.
    pub id: Uuid,
    /// The booking being paid for, if this is a booking payment.
    pub booking_id: Option<Uuid>,
    /// The cafe subscription being paid for, if this is a plan payment.
    pub subscription_id: Option<Uuid>,
    /// The amount of the attempt.
    pub amount: Decimal,
    /// Status of the attempt.
    pub status: PaymentStatus,
    /// Gateway reference for reconciliation.
    pub gateway_reference: Option<String>,
    /// When the attempt was recorded.
    pub created_at: DateTime<Utc>,
    /// When the captured amount was refunded, if it was.
    pub refunded_at: Option<DateTime<Utc>>,
}
