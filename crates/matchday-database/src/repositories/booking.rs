//! Booking repository.
//!
//! Booking creation is counted against the cafe's plan limit inside a
//! single transaction that locks the cafe row, so two concurrent
//! bookings cannot both pass a nearly-exhausted quota.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use matchday_core::error::{AppError, ErrorKind};
use matchday_core::result::AppResult;
use matchday_core::types::limit::PlanLimit;
use matchday_entity::booking::{Booking, BookingStatus, CreateBooking};

/// Outcome of a limit-guarded booking insert.
#[derive(Debug, Clone)]
pub enum BookingCreateOutcome {
    /// The booking row was inserted.
    Created(Booking),
    /// The cafe's monthly booking quota is exhausted; nothing was
    /// inserted.
    LimitExceeded {
        /// The plan's limit, `None` for unlimited (never denied then).
        limit: Option<u32>,
        /// Bookings already counted in the current period.
        current: u32,
    },
}

/// Outcome of a conditional status transition.
#[derive(Debug, Clone)]
pub enum TransitionOutcome {
    /// The transition was applied; the updated row is returned.
    Applied(Booking),
    /// The booking was not in the expected status. The row is returned
    /// unchanged so the caller can report the actual state.
    Rejected(Booking),
}

/// Access to booking rows and their status machine.
///
/// Status transitions are conditional updates keyed on the current
/// status. A transition that loses a race is `Rejected`, never applied
/// twice.
#[async_trait]
pub trait BookingStore: Send + Sync + 'static {
    /// Find a booking by ID.
    async fn find(&self, id: Uuid) -> AppResult<Option<Booking>>;

    /// Find a booking by its human-readable code or QR token.
    async fn find_by_code(&self, code: &str) -> AppResult<Option<Booking>>;

    /// Insert a booking if the cafe's quota for the current billing
    /// period allows it. Non-cancelled bookings created since
    /// `period_start` count against the limit.
    async fn create_under_limit(
        &self,
        data: &CreateBooking,
        limit: PlanLimit,
        period_start: DateTime<Utc>,
    ) -> AppResult<BookingCreateOutcome>;

    /// Move a pending booking to confirmed, stamping `confirmed_at`.
    async fn mark_confirmed(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<TransitionOutcome>;

    /// Move a confirmed booking to checked-in, stamping `checked_in_at`.
    async fn mark_checked_in(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<TransitionOutcome>;

    /// Cancel a pending or confirmed booking, stamping `cancelled_at`.
    async fn mark_cancelled(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<TransitionOutcome>;

    /// Count non-cancelled bookings for a cafe since `period_start`.
    async fn count_in_period(&self, cafe_id: Uuid, period_start: DateTime<Utc>) -> AppResult<u32>;
}

/// PostgreSQL-backed booking store.
#[derive(Debug, Clone)]
pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    /// Create a new booking repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run a conditional status update and classify the result.
    async fn transition(
        &self,
        id: Uuid,
        expected: BookingStatus,
        set_clause: &str,
        at: DateTime<Utc>,
    ) -> AppResult<TransitionOutcome> {
        let query = format!("UPDATE bookings SET {set_clause} WHERE id = $1 AND status = $2 RETURNING *");
        let updated = sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(expected)
            .bind(at)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to transition booking", e)
            })?;

        if let Some(booking) = updated {
            return Ok(TransitionOutcome::Applied(booking));
        }

        let current = self
            .find(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Booking {id} not found")))?;
        Ok(TransitionOutcome::Rejected(current))
    }
}

#[async_trait]
impl BookingStore for PgBookingRepository {
    async fn find(&self, id: Uuid) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find booking", e))
    }

    async fn find_by_code(&self, code: &str) -> AppResult<Option<Booking>> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE code = $1 OR qr_token = $1")
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find booking by code", e)
            })
    }

    async fn create_under_limit(
        &self,
        data: &CreateBooking,
        limit: PlanLimit,
        period_start: DateTime<Utc>,
    ) -> AppResult<BookingCreateOutcome> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        // Serialize quota checks per cafe.
        sqlx::query("SELECT id FROM cafes WHERE id = $1 FOR UPDATE")
            .bind(data.cafe_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock cafe", e))?;

        let current: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM bookings \
             WHERE cafe_id = $1 AND status != 'cancelled' AND created_at >= $2",
        )
        .bind(data.cafe_id)
        .bind(period_start)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count bookings", e))?;

        let check = limit.check(current as u32);
        if !check.allowed {
            tx.rollback().await.map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to roll back transaction", e)
            })?;
            return Ok(BookingCreateOutcome::LimitExceeded {
                limit: check.limit,
                current: check.current,
            });
        }

        let booking = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings \
             (id, code, qr_token, user_id, customer_name, cafe_id, branch_id, match_id, \
              guest_count, subtotal, service_fee, total) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) RETURNING *",
        )
        .bind(data.id)
        .bind(&data.code)
        .bind(&data.qr_token)
        .bind(data.user_id)
        .bind(&data.customer_name)
        .bind(data.cafe_id)
        .bind(data.branch_id)
        .bind(data.match_id)
        .bind(data.guest_count)
        .bind(data.subtotal)
        .bind(data.service_fee)
        .bind(data.total)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create booking", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(BookingCreateOutcome::Created(booking))
    }

    async fn mark_confirmed(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<TransitionOutcome> {
        self.transition(
            id,
            BookingStatus::Pending,
            "status = 'confirmed', confirmed_at = $3",
            at,
        )
        .await
    }

    async fn mark_checked_in(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<TransitionOutcome> {
        self.transition(
            id,
            BookingStatus::Confirmed,
            "status = 'checked_in', checked_in_at = $3",
            at,
        )
        .await
    }

    async fn mark_cancelled(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<TransitionOutcome> {
        // Cancellation is allowed from both non-terminal states, so the
        // condition is widened rather than keyed on one status.
        let updated = sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = 'cancelled', cancelled_at = $2 \
             WHERE id = $1 AND status IN ('pending', 'confirmed') RETURNING *",
        )
        .bind(id)
        .bind(at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to cancel booking", e))?;

        if let Some(booking) = updated {
            return Ok(TransitionOutcome::Applied(booking));
        }

        let current = self
            .find(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Booking {id} not found")))?;
        Ok(TransitionOutcome::Rejected(current))
    }

    async fn count_in_period(&self, cafe_id: Uuid, period_start: DateTime<Utc>) -> AppResult<u32> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM bookings \
             WHERE cafe_id = $1 AND status != 'cancelled' AND created_at >= $2",
        )
        .bind(cafe_id)
        .bind(period_start)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count bookings", e))?;
        Ok(count as u32)
    }
}
