//! Seat and section repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use matchday_core::error::{AppError, ErrorKind};
use matchday_core::result::AppResult;
use matchday_entity::branch::{SeatWithSurcharge, SeatingSection};

/// Read access to a branch's seat map.
#[async_trait]
pub trait SeatStore: Send + Sync + 'static {
    /// List the sections of a branch.
    async fn find_sections(&self, branch_id: Uuid) -> AppResult<Vec<SeatingSection>>;

    /// Resolve the given seat ids within a branch, joined with their
    /// section surcharge for pricing. Inactive seats and seats belonging
    /// to other branches are simply absent from the result.
    async fn find_with_sections(
        &self,
        branch_id: Uuid,
        seat_ids: &[Uuid],
    ) -> AppResult<Vec<SeatWithSurcharge>>;
}

/// PostgreSQL-backed seat store.
#[derive(Debug, Clone)]
pub struct PgSeatRepository {
    pool: PgPool,
}

impl PgSeatRepository {
    /// Create a new seat repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SeatStore for PgSeatRepository {
    async fn find_sections(&self, branch_id: Uuid) -> AppResult<Vec<SeatingSection>> {
        sqlx::query_as::<_, SeatingSection>(
            "SELECT * FROM seating_sections WHERE branch_id = $1 ORDER BY name ASC",
        )
        .bind(branch_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list sections", e))
    }

    async fn find_with_sections(
        &self,
        branch_id: Uuid,
        seat_ids: &[Uuid],
    ) -> AppResult<Vec<SeatWithSurcharge>> {
        sqlx::query_as::<_, SeatWithSurcharge>(
            "SELECT s.id, s.section_id, s.label, s.price_override, \
                    sec.name AS section_name, sec.price_surcharge \
             FROM seats s \
             JOIN seating_sections sec ON sec.id = s.section_id \
             WHERE s.branch_id = $1 AND s.active = TRUE AND s.id = ANY($2)",
        )
        .bind(branch_id)
        .bind(seat_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to resolve seats", e))
    }
}
