//! Cafe repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use matchday_core::error::{AppError, ErrorKind};
use matchday_core::result::AppResult;
use matchday_entity::branch::Branch;
use matchday_entity::cafe::{Cafe, CafeStatus};

/// Read access to cafes and their branches.
#[async_trait]
pub trait CafeStore: Send + Sync + 'static {
    /// Find a cafe by ID.
    async fn find(&self, id: Uuid) -> AppResult<Option<Cafe>>;

    /// Find a branch by ID.
    async fn find_branch(&self, id: Uuid) -> AppResult<Option<Branch>>;

    /// Set a cafe's status.
    async fn set_status(&self, id: Uuid, status: CafeStatus) -> AppResult<Cafe>;
}

/// PostgreSQL-backed cafe store.
#[derive(Debug, Clone)]
pub struct PgCafeRepository {
    pool: PgPool,
}

impl PgCafeRepository {
    /// Create a new cafe repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CafeStore for PgCafeRepository {
    async fn find(&self, id: Uuid) -> AppResult<Option<Cafe>> {
        sqlx::query_as::<_, Cafe>("SELECT * FROM cafes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find cafe", e))
    }

    async fn find_branch(&self, id: Uuid) -> AppResult<Option<Branch>> {
        sqlx::query_as::<_, Branch>("SELECT * FROM branches WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find branch", e))
    }

    async fn set_status(&self, id: Uuid, status: CafeStatus) -> AppResult<Cafe> {
        sqlx::query_as::<_, Cafe>(
            "UPDATE cafes SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update cafe status", e))?
        .ok_or_else(|| AppError::not_found(format!("Cafe {id} not found")))
    }
}
