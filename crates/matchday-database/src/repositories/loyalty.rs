//! Loyalty ledger repository.
//!
//! Point movements are applied inside a transaction that locks the card
//! row, keeping the balance, lifetime total, and tier consistent under
//! concurrent bookings.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use matchday_core::config::loyalty::TierThresholds;
use matchday_core::error::{AppError, ErrorKind};
use matchday_core::result::AppResult;
use matchday_entity::loyalty::{
    CreateLoyaltyTransaction, LoyaltyCard, LoyaltyTier, LoyaltyTransaction,
    LoyaltyTransactionKind,
};

/// Access to loyalty cards and their append-only transaction log.
#[async_trait]
pub trait LoyaltyStore: Send + Sync + 'static {
    /// Find a fan's card.
    async fn find_card(&self, user_id: Uuid) -> AppResult<Option<LoyaltyCard>>;

    /// Apply a point movement to the fan's card, creating the card on
    /// first use.
    ///
    /// - `Earn` adds to both balance and lifetime points and may
    ///   promote the tier.
    /// - `Clawback` subtracts from the balance, saturating at zero;
    ///   lifetime points and tier are untouched.
    /// - `Redeem` subtracts from the balance and fails with a conflict
    ///   when the balance is insufficient.
    async fn apply(
        &self,
        data: &CreateLoyaltyTransaction,
        thresholds: &TierThresholds,
    ) -> AppResult<LoyaltyCard>;

    /// Find the earn transaction recorded for a booking, if any.
    async fn find_earned_for_booking(
        &self,
        booking_id: Uuid,
    ) -> AppResult<Option<LoyaltyTransaction>>;
}

/// PostgreSQL-backed loyalty store.
#[derive(Debug, Clone)]
pub struct PgLoyaltyRepository {
    pool: PgPool,
}

impl PgLoyaltyRepository {
    /// Create a new loyalty repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LoyaltyStore for PgLoyaltyRepository {
    async fn find_card(&self, user_id: Uuid) -> AppResult<Option<LoyaltyCard>> {
        sqlx::query_as::<_, LoyaltyCard>("SELECT * FROM loyalty_cards WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find loyalty card", e)
            })
    }

    async fn apply(
        &self,
        data: &CreateLoyaltyTransaction,
        thresholds: &TierThresholds,
    ) -> AppResult<LoyaltyCard> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let card = sqlx::query_as::<_, LoyaltyCard>(
            "INSERT INTO loyalty_cards (user_id) VALUES ($1) \
             ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id \
             RETURNING *",
        )
        .bind(data.user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to lock loyalty card", e)
        })?;

        let (balance, lifetime, moved) = match data.kind {
            LoyaltyTransactionKind::Earn => (
                card.points_balance + data.points,
                card.lifetime_points + data.points,
                data.points,
            ),
            LoyaltyTransactionKind::Clawback => {
                let moved = data.points.min(card.points_balance);
                (card.points_balance - moved, card.lifetime_points, moved)
            }
            LoyaltyTransactionKind::Redeem => {
                if card.points_balance < data.points {
                    tx.rollback().await.map_err(|e| {
                        AppError::with_source(
                            ErrorKind::Database,
                            "Failed to roll back transaction",
                            e,
                        )
                    })?;
                    return Err(AppError::conflict(format!(
                        "Insufficient points: balance {} < {}",
                        card.points_balance, data.points
                    )));
                }
                (card.points_balance - data.points, card.lifetime_points, data.points)
            }
        };

        let tier = LoyaltyTier::for_lifetime_points(lifetime.min(u32::MAX as i64) as u32, thresholds);

        let updated = sqlx::query_as::<_, LoyaltyCard>(
            "UPDATE loyalty_cards \
             SET points_balance = $2, lifetime_points = $3, tier = $4, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(card.id)
        .bind(balance)
        .bind(lifetime)
        .bind(tier)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update loyalty card", e)
        })?;

        sqlx::query(
            "INSERT INTO loyalty_transactions (card_id, booking_id, kind, points) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(card.id)
        .bind(data.booking_id)
        .bind(data.kind)
        .bind(moved)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to record loyalty transaction", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(updated)
    }

    async fn find_earned_for_booking(
        &self,
        booking_id: Uuid,
    ) -> AppResult<Option<LoyaltyTransaction>> {
        sqlx::query_as::<_, LoyaltyTransaction>(
            "SELECT * FROM loyalty_transactions WHERE booking_id = $1 AND kind = 'earn'",
        )
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find earn transaction", e)
        })
    }
}
