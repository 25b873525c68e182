//! Match repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use matchday_core::error::{AppError, ErrorKind};
use matchday_core::result::AppResult;
use matchday_entity::game_match::{GameMatch, MatchStatus};

/// Data required to schedule a match.
#[derive(Debug, Clone)]
pub struct CreateMatch {
    /// The owning cafe.
    pub cafe_id: Uuid,
    /// The hosting branch.
    pub branch_id: Uuid,
    /// Display title (e.g. "Arsenal vs Chelsea").
    pub title: String,
    /// Kickoff time.
    pub kickoff_at: DateTime<Utc>,
    /// Base per-seat price.
    pub seat_price: Decimal,
    /// Maximum guests admitted.
    pub capacity: i32,
}

/// Access to scheduled matches.
#[async_trait]
pub trait MatchStore: Send + Sync + 'static {
    /// Find a match by ID.
    async fn find(&self, id: Uuid) -> AppResult<Option<GameMatch>>;

    /// List upcoming published matches for a branch, soonest first.
    async fn list_upcoming(&self, branch_id: Uuid) -> AppResult<Vec<GameMatch>>;

    /// Schedule a new match. Created unpublished in `Upcoming` status.
    async fn create(&self, data: &CreateMatch) -> AppResult<GameMatch>;

    /// Publish a match, making it visible and bookable.
    async fn publish(&self, id: Uuid) -> AppResult<GameMatch>;

    /// Move a match from `expected` to `next`. The update is conditional
    /// on the current status, so concurrent transitions cannot skip a
    /// state; returns `None` when the match was not in `expected`.
    async fn transition(
        &self,
        id: Uuid,
        expected: MatchStatus,
        next: MatchStatus,
    ) -> AppResult<Option<GameMatch>>;
}

/// PostgreSQL-backed match store.
#[derive(Debug, Clone)]
pub struct PgMatchRepository {
    pool: PgPool,
}

impl PgMatchRepository {
    /// Create a new match repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MatchStore for PgMatchRepository {
    async fn find(&self, id: Uuid) -> AppResult<Option<GameMatch>> {
        sqlx::query_as::<_, GameMatch>("SELECT * FROM matches WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find match", e))
    }

    async fn list_upcoming(&self, branch_id: Uuid) -> AppResult<Vec<GameMatch>> {
        sqlx::query_as::<_, GameMatch>(
            "SELECT * FROM matches \
             WHERE branch_id = $1 AND published = TRUE AND status = 'upcoming' \
             ORDER BY kickoff_at ASC",
        )
        .bind(branch_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list upcoming matches", e)
        })
    }

    async fn create(&self, data: &CreateMatch) -> AppResult<GameMatch> {
        sqlx::query_as::<_, GameMatch>(
            "INSERT INTO matches (cafe_id, branch_id, title, kickoff_at, seat_price, capacity) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(data.cafe_id)
        .bind(data.branch_id)
        .bind(&data.title)
        .bind(data.kickoff_at)
        .bind(data.seat_price)
        .bind(data.capacity)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create match", e))
    }

    async fn publish(&self, id: Uuid) -> AppResult<GameMatch> {
        sqlx::query_as::<_, GameMatch>(
            "UPDATE matches SET published = TRUE WHERE id = $1 AND status = 'upcoming' RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to publish match", e))?
        .ok_or_else(|| AppError::conflict(format!("Match {id} is not upcoming or not found")))
    }

    async fn transition(
        &self,
        id: Uuid,
        expected: MatchStatus,
        next: MatchStatus,
    ) -> AppResult<Option<GameMatch>> {
        sqlx::query_as::<_, GameMatch>(
            "UPDATE matches SET status = $3 WHERE id = $1 AND status = $2 RETURNING *",
        )
        .bind(id)
        .bind(expected)
        .bind(next)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to transition match", e))
    }
}
