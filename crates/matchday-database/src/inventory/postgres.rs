//! Seat inventory over PostgreSQL row locks.
//!
//! A reservation attempt runs in one transaction that locks the match
//! row, so concurrent attempts for the same match serialize and exactly
//! one of two overlapping requests wins. A partial unique index on
//! `(match_id, seat_id) WHERE released_at IS NULL` backstops the lock.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use matchday_core::error::{AppError, ErrorKind};
use matchday_core::result::AppResult;
use matchday_core::traits::seat_inventory::{
    Reservation, ReservationDenied, ReservationOutcome, SeatInventory,
};
use matchday_entity::game_match::GameMatch;

/// PostgreSQL-backed seat inventory.
#[derive(Debug, Clone)]
pub struct PgSeatInventory {
    pool: PgPool,
}

impl PgSeatInventory {
    /// Create a new inventory over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SeatInventory for PgSeatInventory {
    async fn reserve(
        &self,
        match_id: Uuid,
        booking_id: Uuid,
        seat_ids: &[Uuid],
        guest_count: u32,
    ) -> AppResult<ReservationOutcome> {
        if seat_ids.is_empty() {
            return Err(AppError::validation("At least one seat must be requested"));
        }
        if guest_count as usize > seat_ids.len() {
            return Ok(ReservationOutcome::Denied(
                ReservationDenied::CapacityExceeded {
                    requested: guest_count,
                    available: seat_ids.len() as u32,
                },
            ));
        }

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        // Serialize reservation attempts per match.
        let game_match = sqlx::query_as::<_, GameMatch>(
            "SELECT * FROM matches WHERE id = $1 FOR UPDATE",
        )
        .bind(match_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock match", e))?
        .ok_or_else(|| AppError::not_found(format!("Match {match_id} not found")))?;

        let known: Vec<Uuid> = sqlx::query_scalar(
            "SELECT id FROM seats WHERE branch_id = $1 AND active = TRUE AND id = ANY($2)",
        )
        .bind(game_match.branch_id)
        .bind(seat_ids)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to resolve seats", e))?;

        let unknown: Vec<Uuid> = seat_ids
            .iter()
            .copied()
            .filter(|id| !known.contains(id))
            .collect();
        if !unknown.is_empty() {
            tx.rollback().await.map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to roll back transaction", e)
            })?;
            return Ok(ReservationOutcome::Denied(ReservationDenied::SeatNotFound {
                seat_ids: unknown,
            }));
        }

        // Seat conflicts take precedence over the capacity comparison,
        // even when the match is full.
        let taken: Vec<Uuid> = sqlx::query_scalar(
            "SELECT seat_id FROM seat_reservations \
             WHERE match_id = $1 AND seat_id = ANY($2) AND released_at IS NULL \
             FOR UPDATE",
        )
        .bind(match_id)
        .bind(seat_ids)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check conflicts", e))?;

        if !taken.is_empty() {
            tx.rollback().await.map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to roll back transaction", e)
            })?;
            return Ok(ReservationOutcome::Denied(
                ReservationDenied::SeatUnavailable { seat_ids: taken },
            ));
        }

        let reserved: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM seat_reservations \
             WHERE match_id = $1 AND released_at IS NULL",
        )
        .bind(match_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count reservations", e)
        })?;

        let available = (game_match.capacity as i64 - reserved).max(0) as u32;
        if (seat_ids.len() as u32) > available {
            tx.rollback().await.map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to roll back transaction", e)
            })?;
            return Ok(ReservationOutcome::Denied(
                ReservationDenied::CapacityExceeded {
                    requested: guest_count,
                    available,
                },
            ));
        }

        let reserved_at = Utc::now();
        for seat_id in seat_ids {
            sqlx::query(
                "INSERT INTO seat_reservations (match_id, booking_id, seat_id, reserved_at) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(match_id)
            .bind(booking_id)
            .bind(seat_id)
            .bind(reserved_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err)
                    if db_err.constraint() == Some("seat_reservations_active_seat_key") =>
                {
                    AppError::conflict(format!("Seat {seat_id} was reserved concurrently"))
                }
                _ => AppError::with_source(ErrorKind::Database, "Failed to reserve seat", e),
            })?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(ReservationOutcome::Reserved(Reservation {
            match_id,
            booking_id,
            seat_ids: seat_ids.to_vec(),
            reserved_at,
        }))
    }

    async fn release(&self, match_id: Uuid, booking_id: Uuid) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE seat_reservations SET released_at = NOW() \
             WHERE match_id = $1 AND booking_id = $2 AND released_at IS NULL",
        )
        .bind(match_id)
        .bind(booking_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to release reservation", e)
        })?;

        if result.rows_affected() == 0 {
            debug!(%match_id, %booking_id, "Release with no active reservation, ignoring");
        }
        Ok(())
    }
}
