//! Payment repository.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use matchday_core::error::{AppError, ErrorKind};
use matchday_core::result::AppResult;
use matchday_entity::payment::{Payment, PaymentStatus};

/// Access to payment records.
#[async_trait]
pub trait PaymentStore: Send + Sync + 'static {
    /// Record a captured payment for a booking.
    async fn record_captured(
        &self,
        booking_id: Uuid,
        amount: Decimal,
        gateway_reference: Option<&str>,
    ) -> AppResult<Payment>;

    /// Find the captured payment for a booking, if any.
    async fn find_paid_by_booking(&self, booking_id: Uuid) -> AppResult<Option<Payment>>;

    /// Mark a captured payment as refunded, stamping `refunded_at`.
    /// Returns `None` if the payment was not in `Paid` status.
    async fn mark_refunded(&self, id: Uuid) -> AppResult<Option<Payment>>;
}

/// PostgreSQL-backed payment store.
#[derive(Debug, Clone)]
pub struct PgPaymentRepository {
    pool: PgPool,
}

impl PgPaymentRepository {
    /// Create a new payment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PaymentStore for PgPaymentRepository {
    async fn record_captured(
        &self,
        booking_id: Uuid,
        amount: Decimal,
        gateway_reference: Option<&str>,
    ) -> AppResult<Payment> {
        sqlx::query_as::<_, Payment>(
            "INSERT INTO payments (booking_id, amount, status, gateway_reference) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(booking_id)
        .bind(amount)
        .bind(PaymentStatus::Paid)
        .bind(gateway_reference)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record payment", e))
    }

    async fn find_paid_by_booking(&self, booking_id: Uuid) -> AppResult<Option<Payment>> {
        sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE booking_id = $1 AND status = 'paid' \
             ORDER BY created_at DESC LIMIT 1",
        )
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find payment", e))
    }

    async fn mark_refunded(&self, id: Uuid) -> AppResult<Option<Payment>> {
        sqlx::query_as::<_, Payment>(
            "UPDATE payments SET status = 'refunded', refunded_at = NOW() \
             WHERE id = $1 AND status = 'paid' RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to refund payment", e))
    }
}
