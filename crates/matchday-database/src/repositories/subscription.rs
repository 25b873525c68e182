//! Subscription and plan-usage repositories.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use matchday_core::error::{AppError, ErrorKind};
use matchday_core::result::AppResult;
use matchday_entity::subscription::{ActiveSubscription, CafeSubscription, SubscriptionPlan};

/// Access to cafe subscriptions and their plans.
#[async_trait]
pub trait SubscriptionStore: Send + Sync + 'static {
    /// Resolve the subscription active for a cafe at the given instant,
    /// joined with its plan. `None` when the cafe has no active
    /// subscription.
    async fn find_active(&self, cafe_id: Uuid, now: DateTime<Utc>)
    -> AppResult<Option<ActiveSubscription>>;
}

/// Current resource counts for a cafe, as consumed by limit checks.
#[async_trait]
pub trait UsageStore: Send + Sync + 'static {
    /// Count a cafe's branches.
    async fn count_branches(&self, cafe_id: Uuid) -> AppResult<u32>;

    /// Count non-cancelled matches scheduled by the cafe since
    /// `period_start`.
    async fn count_matches_in_period(
        &self,
        cafe_id: Uuid,
        period_start: DateTime<Utc>,
    ) -> AppResult<u32>;

    /// Count a cafe's active staff accounts.
    async fn count_staff(&self, cafe_id: Uuid) -> AppResult<u32>;

    /// Count a cafe's live promotional offers.
    async fn count_offers(&self, cafe_id: Uuid) -> AppResult<u32>;
}

/// PostgreSQL-backed subscription store.
#[derive(Debug, Clone)]
pub struct PgSubscriptionRepository {
    pool: PgPool,
}

impl PgSubscriptionRepository {
    /// Create a new subscription repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionStore for PgSubscriptionRepository {
    async fn find_active(
        &self,
        cafe_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Option<ActiveSubscription>> {
        let subscription = sqlx::query_as::<_, CafeSubscription>(
            "SELECT * FROM cafe_subscriptions \
             WHERE cafe_id = $1 AND started_at <= $2 AND expires_at > $2 \
             ORDER BY expires_at DESC LIMIT 1",
        )
        .bind(cafe_id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find subscription", e)
        })?;

        let Some(subscription) = subscription else {
            return Ok(None);
        };

        let plan = sqlx::query_as::<_, SubscriptionPlan>(
            "SELECT * FROM subscription_plans WHERE id = $1",
        )
        .bind(subscription.plan_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find plan", e))?
        .ok_or_else(|| {
            AppError::not_found(format!("Plan {} not found", subscription.plan_id))
        })?;

        Ok(Some(ActiveSubscription { subscription, plan }))
    }
}

/// PostgreSQL-backed usage counters.
#[derive(Debug, Clone)]
pub struct PgUsageRepository {
    pool: PgPool,
}

impl PgUsageRepository {
    /// Create a new usage repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn count(&self, query: &str, cafe_id: Uuid) -> AppResult<u32> {
        let count: i64 = sqlx::query_scalar(query)
            .bind(cafe_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count usage", e))?;
        Ok(count as u32)
    }
}

#[async_trait]
impl UsageStore for PgUsageRepository {
    async fn count_branches(&self, cafe_id: Uuid) -> AppResult<u32> {
        self.count("SELECT COUNT(*) FROM branches WHERE cafe_id = $1", cafe_id)
            .await
    }

    async fn count_matches_in_period(
        &self,
        cafe_id: Uuid,
        period_start: DateTime<Utc>,
    ) -> AppResult<u32> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM matches \
             WHERE cafe_id = $1 AND status != 'cancelled' AND created_at >= $2",
        )
        .bind(cafe_id)
        .bind(period_start)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count matches", e))?;
        Ok(count as u32)
    }

    async fn count_staff(&self, cafe_id: Uuid) -> AppResult<u32> {
        self.count(
            "SELECT COUNT(*) FROM staff_members WHERE cafe_id = $1 AND active = TRUE",
            cafe_id,
        )
        .await
    }

    async fn count_offers(&self, cafe_id: Uuid) -> AppResult<u32> {
        self.count(
            "SELECT COUNT(*) FROM offers WHERE cafe_id = $1 AND live = TRUE",
            cafe_id,
        )
        .await
    }
}
